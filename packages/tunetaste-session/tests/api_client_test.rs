//! Tests for the server API client and a debounced session against a mock
//! Tunetaste server.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::Mutex;
use tunetaste_session::{
    ApiClient, ClientError, Debouncer, SearchQuery, SearchSession, Track, FAVORITES_CAPACITY,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_body(offset: u32, count: u32, total: u32) -> serde_json::Value {
    let tracks: Vec<_> = (offset..offset + count)
        .map(|n| {
            json!({
                "id": format!("rec-{}", n),
                "name": format!("Song {}", n),
                "artist": "Miles Davis",
                "image": "/default-cover.jpg"
            })
        })
        .collect();
    json!({ "tracks": tracks, "total": total })
}

#[tokio::test]
async fn test_search_sends_terms_and_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("artist", "Miles Davis"))
        .and(query_param("title", ""))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(10, 10, 25)))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let result = client
        .search(&SearchQuery::new(Some("Miles Davis"), None, 10))
        .await
        .unwrap();

    assert_eq!(result.total, 25);
    assert_eq!(result.tracks.len(), 10);
    assert_eq!(result.tracks[0].id, "rec-10");
}

#[tokio::test]
async fn test_server_error_body_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "search failed" })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let err = client
        .search(&SearchQuery::new(None, Some("So What"), 0))
        .await
        .unwrap_err();

    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "search failed");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_favorites_posts_track_array() {
    let server = MockServer::start().await;
    let tracks: Vec<Track> = (0..FAVORITES_CAPACITY)
        .map(|n| Track::new(format!("rec-{}", n), "Song", "Artist", "/default-cover.jpg"))
        .collect();

    Mock::given(method("POST"))
        .and(path("/favorites"))
        .and(body_json(&tracks))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "analysis": { "preference_vector": { "danceability_danceable": 0.25 } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client.submit_favorites(&tracks).await.unwrap();

    assert_eq!(response.status, "ok");
    let sliders = response.preference_vector().unwrap().sliders();
    assert_eq!(sliders.len(), 1);
    assert_eq!(sliders[0].label, "Danceable");
    assert_eq!(sliders[0].percent, 25);
}

#[tokio::test]
async fn test_debounced_typing_runs_one_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("artist", "Miles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 10, 42)))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let session = Arc::new(Mutex::new(SearchSession::new(client)));
    let debouncer = Debouncer::new(Duration::from_millis(50));

    for typed in ["M", "Mi", "Mil", "Mile", "Miles"] {
        let session = Arc::clone(&session);
        debouncer.trigger(async move {
            let mut session = session.lock().await;
            if let Err(e) = session.set_terms(typed, "").await {
                panic!("search for {} failed: {}", typed, e);
            }
        });
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    tokio::time::sleep(Duration::from_millis(300)).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .url
        .query_pairs()
        .any(|(k, v)| k == "artist" && v == "Miles"));

    let session = session.lock().await;
    assert_eq!(session.pagination().total(), 42);
    assert_eq!(session.pagination().label(), "Showing 1 - 10 of 42");
}
