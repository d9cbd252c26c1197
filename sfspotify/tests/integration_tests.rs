//! Integration tests for sfspotify

use serde_json::json;
use sfnowplaying::PlaybackSource;
use sfspotify::{Credentials, Error, SpotifyClient};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock token endpoint answering with `token`
async fn mount_token(mock_server: &MockServer, token: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header_exists("authorization"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "user-read-currently-playing"
        })))
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

fn client(mock_server: &MockServer) -> SpotifyClient {
    SpotifyClient::builder()
        .api_base(format!("{}/v1", mock_server.uri()))
        .accounts_base(mock_server.uri())
        .credentials(Credentials::new("client-id", "client-secret", "refresh-1"))
        .build()
        .unwrap()
}

fn track_json() -> serde_json::Value {
    json!({
        "is_playing": true,
        "progress_ms": 12000,
        "currently_playing_type": "track",
        "item": {
            "type": "track",
            "id": "4uLU6hMCjMI75M1A2tKUQC",
            "uri": "spotify:track:4uLU6hMCjMI75M1A2tKUQC",
            "name": "Never Gonna Give You Up",
            "artists": [{"name": "Rick Astley"}],
            "album": {
                "name": "Whenever You Need Somebody",
                "images": [{"url": "https://i.scdn.co/image/640", "width": 640, "height": 640}]
            }
        }
    })
}

#[tokio::test]
async fn test_currently_playing_track() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, "token-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/currently-playing"))
        .and(query_param("additional_types", "track,episode"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(track_json()))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let snapshot = client.currently_playing().await.unwrap().unwrap();

    assert_eq!(snapshot.track_id, "4uLU6hMCjMI75M1A2tKUQC");
    assert_eq!(snapshot.title, "Never Gonna Give You Up");
    assert_eq!(snapshot.artists, vec!["Rick Astley"]);
    assert_eq!(snapshot.album_art_url.as_deref(), Some("https://i.scdn.co/image/640"));
}

#[tokio::test]
async fn test_token_is_cached() {
    let mock_server = MockServer::start().await;
    // Un seul échange de token pour trois appels
    mount_token(&mock_server, "token-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(track_json()))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    for _ in 0..3 {
        client.currently_playing().await.unwrap();
    }
}

#[tokio::test]
async fn test_no_content_means_stopped() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, "token-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    assert!(client.currently_playing().await.unwrap().is_none());
}

#[tokio::test]
async fn test_null_item_means_stopped() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, "token-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/currently-playing"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"is_playing": false, "item": null})),
        )
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    assert!(client.currently_playing().await.unwrap().is_none());
}

#[tokio::test]
async fn test_unauthorized_invalidates_token() {
    let mock_server = MockServer::start().await;
    // Le 401 force un nouvel échange au prochain appel
    mount_token(&mock_server, "token-1", 2).await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let err = client.currently_playing().await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));

    assert!(client.currently_playing().await.unwrap().is_none());
}

#[tokio::test]
async fn test_refused_refresh_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})),
        )
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let err = client.currently_playing().await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized(ref msg) if msg.contains("invalid_grant")));
}

#[tokio::test]
async fn test_server_error_is_status() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, "token-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let err = client.currently_playing().await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_malformed_item() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, "token-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_playing": true,
            "item": {"type": "track", "name": "No identity", "artists": []}
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let err = client.currently_playing().await.unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
}

#[tokio::test]
async fn test_fetch_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/image/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3, 4]))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/image/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let bytes = client
        .fetch_bytes(&format!("{}/image/abc", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(bytes, vec![1, 2, 3, 4]);

    let err = client
        .fetch_bytes(&format!("{}/image/missing", mock_server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_playback_source_seam() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, "token-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(track_json()))
        .mount(&mock_server)
        .await;

    let source: Box<dyn PlaybackSource> = Box::new(client(&mock_server));
    let snapshot = source.currently_playing().await.unwrap().unwrap();
    assert_eq!(snapshot.title, "Never Gonna Give You Up");
}

#[tokio::test]
async fn test_rotated_refresh_token_is_used_and_reported() {
    let mock_server = MockServer::start().await;

    // Premier échange : Spotify renvoie un nouveau refresh token
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-1",
            "expires_in": 3600,
            "refresh_token": "refresh-2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("refresh_token=refresh-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-2",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let rotated = Arc::new(Mutex::new(Vec::<String>::new()));
    let seen = Arc::clone(&rotated);
    let client = SpotifyClient::builder()
        .accounts_base(mock_server.uri())
        .credentials(Credentials::new("client-id", "client-secret", "refresh-1"))
        .on_rotation(move |token| seen.lock().unwrap().push(token.to_string()))
        .build()
        .unwrap();

    assert_eq!(client.ensure_token().await.unwrap(), "token-1");
    client.invalidate_token().await;
    assert_eq!(client.ensure_token().await.unwrap(), "token-2");

    assert_eq!(*rotated.lock().unwrap(), vec!["refresh-2".to_string()]);
}
