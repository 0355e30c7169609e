//! 401 handling through the real request path

use crate::common::{signed_in_api, TEST_LOGOUT_DELAY_MS};
use assert_matches::assert_matches;
use instaclone::shared::ApiError;
use pretty_assertions::assert_eq;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_unauthorized_response_ends_session_after_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/post/all"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let test = signed_in_api(&server);
    let mut login_rx = test.session.subscribe();
    let result = test.api.posts().all().await;

    assert_matches!(result, Err(ApiError::Unauthorized));
    assert_eq!(test.notifier.texts(), vec!["Error"]);
    assert!(test.session.is_logged_in());

    tokio::time::timeout(
        Duration::from_millis(TEST_LOGOUT_DELAY_MS * 20),
        login_rx.wait_for(|logged_in| !logged_in),
    )
    .await
    .unwrap()
    .unwrap();
    assert!(test.session.get_token().is_none());
    assert!(test.session.get_user().is_none());
    assert_eq!(test.session.generation(), 1);
}

#[tokio::test]
async fn test_server_error_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/post/all"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let test = signed_in_api(&server);
    let result = test.api.posts().all().await;

    assert_eq!(
        result,
        Err(ApiError::Http {
            status: 500,
            message: "boom".to_string()
        })
    );
    tokio::time::sleep(Duration::from_millis(TEST_LOGOUT_DELAY_MS * 2)).await;
    assert!(test.session.is_logged_in());
    assert!(test.notifier.texts().is_empty());
}
