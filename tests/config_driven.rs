//! Routers built from configuration files.

use std::sync::Arc;

use segment_router::config::parse_config;
use segment_router::handler::HandlerRegistry;
use segment_router::routing::{ParamValue, RouterStore};
use segment_router::Router;

mod common;

use common::{raw, RecordingHandler};

const BLOG: &str = r#"
[[params]]
name = "id"
predicate = "uint"

[[params]]
name = "post"
model = "post"

[[params]]
name = "author"
model = "author"
field = "handle"

[[routes]]
pattern = "/"
handler = "home"
action = "index"

[[routes]]
pattern = "/posts/:id"
handler = "posts"
action = "show"

[[routes]]
pattern = "/posts/:post"
handler = "posts"
action = "by_slug"

[[routes]]
pattern = "/authors/:author/posts/:post"
handler = "posts"
action = "by_author"

[[models]]
name = "post"
url_field = true
records = [
    { id = 1, url = "hello-world" },
    { id = 2, url = "second" },
]

[[models]]
name = "author"
records = [{ handle = "ada", name = "Ada" }]
"#;

#[test]
fn test_blog_routes() {
    let config = parse_config(BLOG).unwrap();
    let mut router = Router::from_config(&config).unwrap();

    assert_eq!(router.match_path("/").unwrap().target.handler, "home");
    assert_eq!(router.match_path("/posts/2").unwrap().target.action, "show");
    assert_eq!(router.match_path("/posts/second").unwrap().target.action, "by_slug");
    assert!(router.match_path("/posts/third").unwrap_err().is_not_found());

    let m = router.match_path("/authors/ada/posts/hello-world").unwrap();
    assert_eq!(m.target.action, "by_author");
    let author = m.params["author"].as_record().unwrap();
    assert_eq!(author.field_text("name").as_deref(), Some("Ada"));

    // Records project their bound field back into the URL
    let url = router.build_url(&m.params).unwrap();
    assert_eq!(url, "/authors/ada/posts/hello-world");
}

#[test]
fn test_explicit_route_selection() {
    let config = parse_config(BLOG).unwrap();
    let mut router = Router::from_config(&config).unwrap();

    let url = router
        .build_url(&raw(&[("route", "/posts/:id"), ("id", "7"), ("post", "ignored")]))
        .unwrap();
    assert_eq!(url, "/posts/7");
}

#[test]
fn test_handle_through_registry() {
    let config = parse_config(BLOG).unwrap();
    let mut router = Router::from_config(&config).unwrap();

    let mut handlers = HandlerRegistry::new();
    handlers.register("posts", RecordingHandler::default);

    let output = router.handle("/posts/1", &handlers).unwrap();
    assert_eq!(output["action"], "show");
    assert_eq!(output["params"]["id"], "1");
    assert_eq!(router.last_match().unwrap().params["id"], ParamValue::from("1"));
}

#[test]
fn test_shared_snapshot_across_threads() {
    let config = parse_config(BLOG).unwrap();
    let compiled = Router::from_config(&config).unwrap().compile().unwrap();
    let store = Arc::new(RouterStore::new(compiled));

    let handles: Vec<_> = ["/posts/1", "/posts/second", "/"]
        .into_iter()
        .map(|path| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.load().match_path(path).map(|m| m.target.action))
        })
        .collect();

    let actions: Vec<_> = handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect();
    assert_eq!(actions, vec!["show", "by_slug", "index"]);
}
