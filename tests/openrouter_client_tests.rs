//! Tests for the OpenRouter HTTP adapter against a local stub provider.
//!
//! The stub serves canned chat-completion, SSE, and image-generation bodies
//! so the full request/response path — auth header, status mapping, JSON
//! decoding, and incremental SSE framing — is exercised over real sockets.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use futures_util::{stream, StreamExt};
use serde_json::{json, Value};

use llmgate::{ChatClient, ImageClient, OpenRouterClient, Turn};

/// Bind an ephemeral port, serve `app`, and return the base URL.
async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: &str) -> OpenRouterClient {
    OpenRouterClient::new("test-key", "m1", "img-1", base_url)
}

/// SSE body delivered as explicit transport chunks.
fn sse_response(chunks: Vec<&'static str>) -> impl IntoResponse {
    let body = Body::from_stream(stream::iter(
        chunks
            .into_iter()
            .map(|c| Ok::<_, Infallible>(Bytes::from_static(c.as_bytes()))),
    ));
    ([(header::CONTENT_TYPE, "text/event-stream")], body)
}

#[tokio::test]
async fn complete_extracts_content_model_and_usage() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let app = Router::new()
        .route(
            "/chat/completions",
            post(|State(seen): State<Arc<Mutex<Option<Value>>>>, Json(body): Json<Value>| async move {
                *seen.lock().unwrap() = Some(body);
                Json(json!({
                    "choices": [{"message": {"content": "Fine"}}],
                    "model": "m1",
                    "usage": {"prompt_tokens": 8, "completion_tokens": 4, "total_tokens": 12}
                }))
            }),
        )
        .with_state(seen.clone());
    let base = spawn_stub(app).await;

    let client = client_for(&base);
    let messages = vec![Turn::user("hello"), Turn::user("how are you")];
    let result = client.complete(&messages).await.unwrap();

    assert_eq!(result.content(), "Fine");
    assert_eq!(result.model(), "m1");
    assert_eq!(result.total_tokens(), Some(12));

    // The provider saw the composed list verbatim, in order.
    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "m1");
    assert_eq!(
        body["messages"],
        json!([
            {"role": "user", "content": "hello"},
            {"role": "user", "content": "how are you"}
        ])
    );
}

#[tokio::test]
async fn non_2xx_status_is_preserved_on_sync_path() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let base = spawn_stub(app).await;

    let err = client_for(&base)
        .complete(&[Turn::user("hi")])
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(429));
    assert!(err.to_string().contains("slow down"));
}

#[tokio::test]
async fn empty_choices_is_a_malformed_response() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({"choices": [], "model": "m1"})) }),
    );
    let base = spawn_stub(app).await;

    let err = client_for(&base)
        .complete(&[Turn::user("hi")])
        .await
        .unwrap_err();

    assert!(err.is_malformed_response());
}

#[tokio::test]
async fn stream_decodes_fragments_until_terminal_marker() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async {
            sse_response(vec![
                "data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n",
                "data: {\"choices\":[{\"delta\":{\"content\":\" there\"}}]}\n",
                "data: [DONE]\n",
            ])
        }),
    );
    let base = spawn_stub(app).await;

    let mut fragments = client_for(&base).stream(&[Turn::user("hi")]).await.unwrap();

    let mut collected = Vec::new();
    while let Some(fragment) = fragments.next().await {
        collected.push(fragment.unwrap());
    }
    assert_eq!(collected, vec!["Hi", " there"]);
}

#[tokio::test]
async fn split_transport_chunks_decode_identically() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async {
            sse_response(vec![
                "data: {\"choi",
                "ces\":[{\"delta\":{\"content\":\"X\"}}]}\n",
                "data: [DONE]\n",
            ])
        }),
    );
    let base = spawn_stub(app).await;

    let mut fragments = client_for(&base).stream(&[Turn::user("hi")]).await.unwrap();

    let mut collected = Vec::new();
    while let Some(fragment) = fragments.next().await {
        collected.push(fragment.unwrap());
    }
    assert_eq!(collected, vec!["X"]);
}

#[tokio::test]
async fn malformed_line_yields_no_fragment_and_ends_normally() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { sse_response(vec!["data: not-json\n", "data: [DONE]\n"]) }),
    );
    let base = spawn_stub(app).await;

    let mut fragments = client_for(&base).stream(&[Turn::user("hi")]).await.unwrap();

    let mut collected = Vec::new();
    while let Some(fragment) = fragments.next().await {
        collected.push(fragment.unwrap());
    }
    assert!(collected.is_empty());
}

#[tokio::test]
async fn non_2xx_status_is_preserved_on_streaming_path() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_stub(app).await;

    let err = client_for(&base)
        .stream(&[Turn::user("hi")])
        .await
        .err()
        .unwrap();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn image_generation_returns_first_url() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let app = Router::new()
        .route(
            "/images/generations",
            post(|State(seen): State<Arc<Mutex<Option<Value>>>>, Json(body): Json<Value>| async move {
                *seen.lock().unwrap() = Some(body);
                Json(json!({"data": [{"url": "https://img.example/1.png"}]}))
            }),
        )
        .with_state(seen.clone());
    let base = spawn_stub(app).await;

    let image = client_for(&base).generate("a lighthouse").await.unwrap();
    assert_eq!(image.url(), "https://img.example/1.png");

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "img-1");
    assert_eq!(body["prompt"], "a lighthouse");
    assert_eq!(body["n"], 1);
    assert_eq!(body["size"], "1024x1024");
}

#[tokio::test]
async fn image_response_without_url_is_malformed() {
    let app = Router::new().route(
        "/images/generations",
        post(|| async { Json(json!({"data": [{}]})) }),
    );
    let base = spawn_stub(app).await;

    let err = client_for(&base).generate("x").await.unwrap_err();
    assert!(err.is_malformed_response());
}

#[tokio::test]
async fn image_errors_share_the_chat_error_shape() {
    let app = Router::new().route(
        "/images/generations",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let base = spawn_stub(app).await;

    let err = client_for(&base).generate("x").await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert!(err.is_provider_request());
}
