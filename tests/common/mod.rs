//! Shared fixtures for integration tests.

use std::sync::Arc;

use segment_router::handler::{Handler, HandlerError};
use segment_router::routing::{MemoryModel, ParamValue, Params, Record};

/// Build a `Params` map of raw values.
pub fn raw(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), ParamValue::from(*v)))
        .collect()
}

/// A `post` model whose records publish a `url` field.
#[allow(dead_code)]
pub fn post_model() -> Arc<MemoryModel> {
    Arc::new(
        MemoryModel::new(
            "post",
            vec![
                Record::new().with("id", 1).with("url", "hello-world").with("title", "Hello"),
                Record::new().with("id", 2).with("url", "second").with("title", "Second"),
            ],
        )
        .with_url_field(),
    )
}

/// A model that declares no URL field.
#[allow(dead_code)]
pub fn tag_model() -> Arc<MemoryModel> {
    Arc::new(MemoryModel::new("tag", vec![Record::new().with("name", "rust")]))
}

/// Handler that records what it was given.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingHandler {
    pub params: Params,
    pub actions: Vec<String>,
}

impl Handler for RecordingHandler {
    fn set_params(&mut self, params: &Params) {
        self.params = params.clone();
    }

    fn invoke(&mut self, action: &str) -> Result<serde_json::Value, HandlerError> {
        self.actions.push(action.to_string());
        Ok(serde_json::json!({ "action": action, "params": self.params }))
    }
}
