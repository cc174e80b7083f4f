/// Classification counters per resolve request
///
/// Kept in its own test binary with a single test so the global
/// counters are not touched concurrently.
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use locus_links::{
    metrics::{IDENTIFIER_FALLBACKS_TOTAL, LOCALITY_CLASSIFICATIONS_TOTAL},
    server::build_router,
    AppContext, ServerConfig,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const AUTHOR_URL: &str =
    "http://node-a.example:8000/api/authors/c53452d6-f3eb-4616-8338-49288a3da001/";

fn app_for(backend: &str) -> Router {
    let backend = backend.to_string();
    let config = ServerConfig::from_lookup(move |key| match key {
        "LOCUS_BACKEND_URL" => Some(backend.clone()),
        _ => None,
    })
    .unwrap();
    build_router(AppContext::new(config).unwrap())
}

async fn post(app: Router, uri: &str, body: Value) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn classifications(kind: &str) -> u64 {
    ["local", "remote"]
        .iter()
        .map(|locality| {
            LOCALITY_CLASSIFICATIONS_TOTAL
                .with_label_values(&[kind, locality])
                .get()
        })
        .sum()
}

fn fallbacks() -> u64 {
    IDENTIFIER_FALLBACKS_TOTAL
        .with_label_values(&["extract_identifier"])
        .get()
}

#[tokio::test]
async fn test_each_resolve_classifies_once() {
    // remote author: route, api and inbox urls all come from one decision
    let (authors, entries) = (classifications("author"), classifications("entry"));
    let body = post(
        app_for("http://node-b.example:8000"),
        "/api/resolve/author",
        json!({ "id": AUTHOR_URL }),
    )
    .await;
    assert_eq!(body["locality"], "remote");
    assert_eq!(classifications("author") - authors, 1);
    assert_eq!(classifications("entry") - entries, 0);

    // entry falling through to its author counts as one entry decision only
    let (authors, entries) = (classifications("author"), classifications("entry"));
    let body = post(
        app_for("http://node-b.example:8000"),
        "/api/resolve/entry",
        json!({ "id": "e1", "author": { "id": AUTHOR_URL } }),
    )
    .await;
    assert_eq!(body["locality"], "remote");
    assert_eq!(classifications("entry") - entries, 1);
    assert_eq!(classifications("author") - authors, 0);

    // a local guess is extracted once, not once per derived address
    let before = fallbacks();
    let body = post(
        app_for("http://node-a.example:8000"),
        "/api/resolve/author",
        json!({ "id": "http://node-a.example:8000/api/authors/111/" }),
    )
    .await;
    assert_eq!(body["locality"], "local");
    assert_eq!(body["routePath"], "/authors/111");
    assert_eq!(body["inboxUrl"], "http://node-a.example:8000/api/authors/111/inbox/");
    assert_eq!(fallbacks() - before, 1);
}
