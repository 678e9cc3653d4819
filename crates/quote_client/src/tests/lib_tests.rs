use super::*;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use shared::error::FetchError;
use tokio::net::TcpListener;

struct Offline;

impl Connectivity for Offline {
    fn is_online(&self) -> bool {
        false
    }
}

#[derive(Clone)]
struct QuoteServerState {
    hits: Arc<AtomicUsize>,
    /// Attempts (1-based) that answer 500 before the body below is served.
    fail_first: usize,
    body: serde_json::Value,
}

async fn serve_random_quote(State(state): State<QuoteServerState>) -> impl IntoResponse {
    let attempt = state.hits.fetch_add(1, Ordering::SeqCst) + 1;
    if attempt <= state.fail_first {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(state.body.clone()).into_response()
}

async fn spawn_quote_server(
    fail_first: usize,
    body: serde_json::Value,
) -> (String, Arc<AtomicUsize>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let state = QuoteServerState {
        hits: hits.clone(),
        fail_first,
        body,
    };
    let app = Router::new()
        .route("/api/random", get(serve_random_quote))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/api/random"), hits)
}

fn fetcher_for(url: String, connectivity: Box<dyn Connectivity>) -> QuoteFetcher {
    let config = FetcherConfig {
        api_url: url,
        request_timeout: Duration::from_secs(5),
        ..FetcherConfig::default()
    };
    QuoteFetcher::new(config, connectivity).expect("build fetcher")
}

#[tokio::test]
async fn fetches_first_quote_from_well_formed_response() {
    let (url, hits) = spawn_quote_server(
        0,
        serde_json::json!([
            {"q": "Be the change", "a": "Gandhi"},
            {"q": "ignored", "a": "ignored"}
        ]),
    )
    .await;
    let fetcher = fetcher_for(url, Box::new(AlwaysOnline));

    let quote = fetcher.fetch().await.expect("fetch");
    assert_eq!(quote, Quote::new("Be the change", "Gandhi"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_array_yields_empty_response() {
    let (url, hits) = spawn_quote_server(0, serde_json::json!([])).await;
    let fetcher = fetcher_for(url, Box::new(AlwaysOnline));

    let err = fetcher.fetch().await.expect_err("should fail");
    assert!(matches!(err, FetchError::EmptyResponse));
    // Content-level failures never retry.
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_author_yields_invalid_data_without_retry() {
    let (url, hits) = spawn_quote_server(0, serde_json::json!([{"q": "Be the change"}])).await;
    let fetcher = fetcher_for(url, Box::new(AlwaysOnline));

    let err = fetcher.fetch().await.expect_err("should fail");
    assert!(matches!(err, FetchError::InvalidData));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_quote_text_yields_invalid_data() {
    let (url, _hits) = spawn_quote_server(0, serde_json::json!([{"q": "", "a": "Gandhi"}])).await;
    let fetcher = fetcher_for(url, Box::new(AlwaysOnline));

    let err = fetcher.fetch().await.expect_err("should fail");
    assert!(matches!(err, FetchError::InvalidData));
}

#[tokio::test]
async fn recovers_from_transient_server_errors() {
    let (url, hits) =
        spawn_quote_server(2, serde_json::json!([{"q": "Be the change", "a": "Gandhi"}])).await;
    let fetcher = fetcher_for(url, Box::new(AlwaysOnline));

    let quote = fetcher.fetch().await.expect("fetch after retries");
    assert_eq!(quote, Quote::new("Be the change", "Gandhi"));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn exhausted_retries_report_transport_with_status() {
    let (url, hits) = spawn_quote_server(usize::MAX, serde_json::json!([])).await;
    let fetcher = fetcher_for(url, Box::new(AlwaysOnline));

    let err = fetcher.fetch().await.expect_err("should fail");
    match err {
        FetchError::Transport(detail) => assert!(
            detail.contains("500"),
            "detail should carry the status: {detail}"
        ),
        other => panic!("expected transport failure, got {other:?}"),
    }
    // First attempt plus the two built-in retries.
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn offline_precheck_issues_no_request() {
    let (url, hits) =
        spawn_quote_server(0, serde_json::json!([{"q": "unseen", "a": "unseen"}])).await;
    let fetcher = fetcher_for(url, Box::new(Offline));

    let err = fetcher.fetch().await.expect_err("should fail");
    assert!(matches!(err, FetchError::NoConnection));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_body_is_a_transport_failure() {
    let (url, _hits) = spawn_quote_server(0, serde_json::json!({"not": "an array"})).await;
    let fetcher = fetcher_for(url, Box::new(AlwaysOnline));

    let err = fetcher.fetch().await.expect_err("should fail");
    assert!(matches!(err, FetchError::Transport(_)));
}
