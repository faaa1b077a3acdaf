//! Integration Tests for the Fetch-Through Layer
//!
//! Runs a local upstream server and checks that repeat requests are served
//! from the cache until the entry is reaped.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use serde::Deserialize;
use timed_cache::{api::create_router, AppState, CacheError, CachedFetcher, TimedCache};
use tokio::net::TcpListener;
use tower::ServiceExt;

// == Upstream Fixture ==

#[derive(Debug, Deserialize)]
struct Pokemon {
    name: String,
    base_experience: u32,
}

async fn pokemon_handler(
    State(requests): State<Arc<AtomicUsize>>,
    Path(name): Path<String>,
) -> String {
    requests.fetch_add(1, Ordering::SeqCst);
    format!(r#"{{"name":"{}","base_experience":64}}"#, name)
}

/// Starts an upstream on an ephemeral port.
///
/// Returns its base URL and a counter of requests that reached it.
async fn spawn_upstream() -> (String, Arc<AtomicUsize>) {
    let requests = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/pokemon/:name", get(pokemon_handler))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .with_state(requests.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), requests)
}

fn fetcher(interval: Duration) -> CachedFetcher {
    let cache = TimedCache::new(interval).unwrap();
    CachedFetcher::new(cache, Duration::from_secs(5)).unwrap()
}

// == Fetcher Tests ==

#[tokio::test]
async fn test_second_fetch_is_served_from_cache() {
    let (base, requests) = spawn_upstream().await;
    let fetcher = fetcher(Duration::from_secs(300));
    let url = format!("{}/pokemon/pikachu", base);

    let first = fetcher.fetch(&url).await.unwrap();
    let second = fetcher.fetch(&url).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(requests.load(Ordering::SeqCst), 1);
    assert_eq!(fetcher.cache().get(&url).await, Some(first));
}

#[tokio::test]
async fn test_distinct_urls_are_cached_separately() {
    let (base, requests) = spawn_upstream().await;
    let fetcher = fetcher(Duration::from_secs(300));

    let pikachu: Pokemon = fetcher
        .fetch_json(&format!("{}/pokemon/pikachu", base))
        .await
        .unwrap();
    let eevee: Pokemon = fetcher
        .fetch_json(&format!("{}/pokemon/eevee", base))
        .await
        .unwrap();

    assert_eq!(pikachu.name, "pikachu");
    assert_eq!(eevee.name, "eevee");
    assert_eq!(eevee.base_experience, 64);
    assert_eq!(requests.load(Ordering::SeqCst), 2);
    assert_eq!(fetcher.cache().len().await, 2);
}

#[tokio::test]
async fn test_failed_status_is_not_cached() {
    let (base, _) = spawn_upstream().await;
    let fetcher = fetcher(Duration::from_secs(300));
    let url = format!("{}/missing", base);

    let result = fetcher.fetch(&url).await;

    match result {
        Err(CacheError::Upstream { status, url: failed }) => {
            assert_eq!(status, 404);
            assert_eq!(failed, url);
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
    assert!(fetcher.cache().get(&url).await.is_none());
}

#[tokio::test]
async fn test_refetch_after_entry_is_reaped() {
    let (base, requests) = spawn_upstream().await;
    let fetcher = fetcher(Duration::from_millis(50));
    let url = format!("{}/pokemon/bulbasaur", base);

    fetcher.fetch(&url).await.unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;
    fetcher.fetch(&url).await.unwrap();

    assert_eq!(requests.load(Ordering::SeqCst), 2);
}

// == HTTP Fetch Endpoint ==

#[tokio::test]
async fn test_fetch_endpoint_goes_through_cache() {
    let (base, requests) = spawn_upstream().await;
    let cache = TimedCache::new(Duration::from_secs(300)).unwrap();
    let app = create_router(AppState::new(cache.clone(), Duration::from_secs(5)).unwrap());
    let url = format!("{}/pokemon/charmander", base);

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/fetch?url={}", url))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let pokemon: Pokemon = serde_json::from_slice(&body).unwrap();
        assert_eq!(pokemon.name, "charmander");
    }

    assert_eq!(requests.load(Ordering::SeqCst), 1);
    let stats = cache.stats().await;
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn test_fetch_endpoint_upstream_failure_is_bad_gateway() {
    let (base, _) = spawn_upstream().await;
    let cache = TimedCache::new(Duration::from_secs(300)).unwrap();
    let app = create_router(AppState::new(cache, Duration::from_secs(5)).unwrap());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/fetch?url={}/missing", base))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
