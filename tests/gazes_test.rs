//! Gazes catalog client tests
//!
//! Tests title lookup, episode video selection and error handling.

use mockito::{Matcher, Server};
use animewatch::api::{CatalogError, GazesClient};

// =============================================================================
// Search Tests
// =============================================================================

#[tokio::test]
async fn test_search_parses_results() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/anime/animes")
        .match_query(Matcher::UrlEncoded("title".into(), "one piece".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": [
                {"id": 12, "title": "One Piece"},
                {"id": 99, "title": "One Piece Film Red"}
            ]}"#,
        )
        .create_async()
        .await;

    let client = GazesClient::with_base_url(server.url());
    let results = client.search("one piece").await.unwrap();

    mock.assert_async().await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, 12);
    assert_eq!(results[0].title, "One Piece");
    assert_eq!(results[1].id, 99);
}

#[tokio::test]
async fn test_find_takes_first_match() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/anime/animes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data": [{"id": 5, "title": "Sword Art Online"}, {"id": 6, "title": "Sword Art Online II"}]}"#)
        .create_async()
        .await;

    let client = GazesClient::with_base_url(server.url());
    let anime = client.find("sword art").await.unwrap();

    assert_eq!(anime.id, 5);
    assert_eq!(anime.slug(), "Sword-Art-Online");
}

#[tokio::test]
async fn test_find_empty_data_is_no_match() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/anime/animes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data": []}"#)
        .create_async()
        .await;

    let client = GazesClient::with_base_url(server.url());
    let err = client.find("nothing").await.unwrap_err();

    assert!(matches!(err, CatalogError::NoMatch(ref t) if t == "nothing"));
}

#[tokio::test]
async fn test_search_invalid_json() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/anime/animes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = GazesClient::with_base_url(server.url());
    let err = client.search("x").await.unwrap_err();

    assert!(matches!(err, CatalogError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_search_server_error() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/anime/animes")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = GazesClient::with_base_url(server.url());
    let err = client.search("x").await.unwrap_err();

    assert!(matches!(err, CatalogError::Status(503)));
}

// =============================================================================
// Episode Video Tests
// =============================================================================

#[tokio::test]
async fn test_episode_video_requested_language() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/anime/animes/12/3")
        .with_status(200)
        .with_body(
            r#"{"data": {
                "vf": {"videoUri": "https://cdn.example/12/3/vf.m3u8"},
                "vostfr": {"videoUri": "https://cdn.example/12/3/vostfr.m3u8"}
            }}"#,
        )
        .create_async()
        .await;

    let client = GazesClient::with_base_url(server.url());
    let source = client.episode_video(12, 3, "vf").await.unwrap();

    mock.assert_async().await;
    assert_eq!(source.language, "vf");
    assert_eq!(source.video_uri, "https://cdn.example/12/3/vf.m3u8");
}

#[tokio::test]
async fn test_episode_video_falls_back_to_vostfr() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/anime/animes/12/1")
        .with_status(200)
        .with_body(r#"{"data": {"vostfr": {"videoUri": "https://cdn.example/12/1/vostfr.m3u8"}}}"#)
        .create_async()
        .await;

    let client = GazesClient::with_base_url(server.url());
    let source = client.episode_video(12, 1, "vf").await.unwrap();

    assert_eq!(source.language, "vostfr");
    assert!(source.is_fallback("vf"));
}

#[tokio::test]
async fn test_episode_video_none_available() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/anime/animes/12/1")
        .with_status(200)
        .with_body(r#"{"data": {"vf": {"videoUri": "https://cdn.example/12/1/vf.m3u8"}}}"#)
        .create_async()
        .await;

    let client = GazesClient::with_base_url(server.url());
    let err = client.episode_video(12, 1, "en").await.unwrap_err();

    match err {
        CatalogError::NoVideo { episode, language } => {
            assert_eq!(episode, 1);
            assert_eq!(language, "en");
        }
        other => panic!("Expected NoVideo, got {:?}", other),
    }
}

#[tokio::test]
async fn test_episode_not_found() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/anime/animes/12/999")
        .with_status(404)
        .create_async()
        .await;

    let client = GazesClient::with_base_url(server.url());
    let err = client.episode_video(12, 999, "vostfr").await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound));
}
