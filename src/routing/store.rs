//! Shared, hot-swappable router snapshots.
//!
//! # Design Decisions
//! - Readers load an `Arc<CompiledRouter>` without locking
//! - Writers replace the whole snapshot; nothing is mutated in place
//! - The generation counter lets callers observe that a swap happened

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::router::CompiledRouter;

/// Holds the current compiled router.
#[derive(Debug)]
pub struct RouterStore {
    current: ArcSwap<CompiledRouter>,
    generation: AtomicU64,
}

impl RouterStore {
    pub fn new(initial: CompiledRouter) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            generation: AtomicU64::new(0),
        }
    }

    /// The router in effect right now.
    pub fn load(&self) -> Arc<CompiledRouter> {
        self.current.load_full()
    }

    /// Publish `next` and return the new generation.
    pub fn replace(&self, next: CompiledRouter) -> u64 {
        self.current.store(Arc::new(next));
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::router::Router;
    use std::thread;

    #[test]
    fn test_readers_keep_their_snapshot() {
        let store = Arc::new(RouterStore::new(Router::new().compile().unwrap()));
        let before = store.load();

        let mut router = Router::new();
        router.register_route("/status", "health", "status");
        assert_eq!(store.replace(router.compile().unwrap()), 1);

        assert!(before.match_path("/status").is_err());
        assert!(store.load().match_path("/status").is_ok());
    }

    #[test]
    fn test_concurrent_readers() {
        let mut router = Router::new();
        router.register_route("/items/:id", "items", "show");
        let store = Arc::new(RouterStore::new(router.compile().unwrap()));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let path = format!("/items/{i}");
                    store.load().match_path(&path).unwrap().target.action
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "show");
        }
    }
}
