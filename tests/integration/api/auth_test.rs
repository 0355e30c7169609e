//! Authentication API integration tests
//!
//! Sign-in, sign-up and the session they leave behind.

use crate::common::{anonymous_api, kari, signed_in_api};
use assert_matches::assert_matches;
use instaclone::shared::models::{LoginRequest, SignupRequest};
use instaclone::shared::ApiError;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> LoginRequest {
    LoginRequest {
        username: "kari".to_string(),
        password: "hemmelig".to_string(),
    }
}

#[tokio::test]
async fn test_login_stores_token_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .and(body_json(json!({ "username": "kari", "password": "hemmelig" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "token": "Bearer xyz" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user/"))
        .and(header("Authorization", "Bearer xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "username": "kari",
            "firstname": "Kari",
            "lastname": "Nordmann"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let test = anonymous_api(&server);
    let user = test.api.auth().login_and_store(&credentials()).await.unwrap();

    assert_eq!(user, kari());
    assert_eq!(test.session.get_token().as_deref(), Some("Bearer xyz"));
    assert_eq!(test.session.get_user(), Some(kari()));
    assert!(*test.session.subscribe().borrow());
}

#[tokio::test]
async fn test_failed_login_leaves_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid username or password"))
        .mount(&server)
        .await;

    let test = anonymous_api(&server);
    let result = test.api.auth().login_and_store(&credentials()).await;

    assert_matches!(result, Err(ApiError::Http { status: 400, .. }));
    assert!(test.session.get_token().is_none());
    assert!(!test.session.is_logged_in());
}

#[tokio::test]
async fn test_user_lookup_failure_discards_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "t" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let test = anonymous_api(&server);
    let result = test.api.auth().login_and_store(&credentials()).await;

    assert_matches!(result, Err(ApiError::Http { status: 500, .. }));
    assert!(test.session.get_token().is_none());
}

#[tokio::test]
async fn test_register_sends_confirm_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .and(body_json(json!({
            "email": "kari@example.no",
            "username": "kari",
            "firstname": "Kari",
            "lastname": "Nordmann",
            "password": "hemmelig",
            "confirmPassword": "hemmelig"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let test = anonymous_api(&server);
    let response = test
        .api
        .auth()
        .register(&SignupRequest {
            email: "kari@example.no".to_string(),
            username: "kari".to_string(),
            firstname: "Kari".to_string(),
            lastname: "Nordmann".to_string(),
            password: "hemmelig".to_string(),
            confirm_password: "hemmelig".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.message, "ok");
    assert!(!test.session.is_logged_in());
}

#[tokio::test]
async fn test_authenticated_calls_carry_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/post/user/posts"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let test = signed_in_api(&server);
    let posts = test.api.posts().for_current_user().await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_token_required_calls_fail_locally_without_session() {
    let server = MockServer::start().await;

    let test = anonymous_api(&server);
    let result = test.api.posts().for_current_user().await;

    assert_matches!(result, Err(ApiError::NotAuthenticated));
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}
