//! Common test utilities and helpers
//!
//! - API clients pointed at a wiremock server
//! - Session and model fixtures

use instaclone::egui_app::{ApiClient, Config, Notifier, Session};
use instaclone::shared::{AppConfig, Post, User};
use std::time::Duration;
use wiremock::MockServer;

/// Forced-logout delay used by API tests
pub const TEST_LOGOUT_DELAY_MS: u64 = 50;

/// Everything a test needs to drive the API layer
pub struct TestApi {
    pub api: ApiClient,
    pub session: Session,
    pub notifier: Notifier,
}

pub fn test_config(server: &MockServer) -> Config {
    Config::with_builder(
        AppConfig::builder()
            .server_url(server.uri())
            .logout_delay_ms(TEST_LOGOUT_DELAY_MS),
    )
    .unwrap()
}

/// Client with an empty session
pub fn anonymous_api(server: &MockServer) -> TestApi {
    let session = Session::in_memory();
    let notifier = Notifier::new(Duration::from_secs(5));
    let api = ApiClient::new(test_config(server), session.clone(), notifier.clone());
    TestApi { api, session, notifier }
}

/// Client whose session already holds token `abc` and user `kari`
pub fn signed_in_api(server: &MockServer) -> TestApi {
    let test = anonymous_api(server);
    test.session.save_token("abc");
    test.session.save_user(&kari()).unwrap();
    test
}

pub fn kari() -> User {
    User {
        id: Some(2),
        username: "kari".to_string(),
        firstname: "Kari".to_string(),
        lastname: "Nordmann".to_string(),
        ..Default::default()
    }
}

pub fn post(id: Option<i64>, user_id: i64) -> Post {
    Post {
        id,
        title: format!("post {:?}", id),
        caption: "caption".to_string(),
        user_id: Some(user_id),
        ..Default::default()
    }
}
