//! HTTP Service Layer
//!
//! `ApiClient` owns the HTTP client, the session handle and the error
//! interceptor. Every request goes through [`ApiClient::execute`], which
//! attaches the bearer token and lets the interceptor see failures.
//!
//! One thin wrapper per resource sits on top:
//!
//! - [`AuthApi`] - sign in, sign up
//! - [`UserApi`] - current user, lookups, profile update
//! - [`PostApi`] - post CRUD and likes
//! - [`CommentApi`] - comments on a post
//! - [`ImageApi`] - profile and post images
//! - [`ChatApi`] - chat history

use crate::egui_app::config::Config;
use crate::egui_app::interceptor::ErrorInterceptor;
use crate::egui_app::notification::Notifier;
use crate::egui_app::session::Session;
use crate::shared::error::ApiError;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

pub mod auth;
pub mod chat;
pub mod comments;
pub mod images;
pub mod posts;
pub mod users;

pub use auth::AuthApi;
pub use chat::ChatApi;
pub use comments::CommentApi;
pub use images::ImageApi;
pub use posts::PostApi;
pub use users::UserApi;

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
    session: Session,
    interceptor: ErrorInterceptor,
}

impl ApiClient {
    pub fn new(config: Config, session: Session, notifier: Notifier) -> Self {
        let interceptor = ErrorInterceptor::new(session.clone(), notifier, config.logout_delay());
        Self {
            config,
            client: Client::new(),
            session,
            interceptor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    pub fn users(&self) -> UserApi {
        UserApi::new(self.clone())
    }

    pub fn posts(&self) -> PostApi {
        PostApi::new(self.clone())
    }

    pub fn comments(&self) -> CommentApi {
        CommentApi::new(self.clone())
    }

    pub fn images(&self) -> ImageApi {
        ImageApi::new(self.clone())
    }

    pub fn chat(&self) -> ChatApi {
        ChatApi::new(self.clone())
    }

    /// Start a request with the session token attached when present
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.api_url(path);
        let mut builder = self.client.request(method, url);
        if let Some(header) = self.session.authorization_header() {
            builder = builder.header(AUTHORIZATION, header);
        }
        builder
    }

    /// Send a request; non-success statuses become errors after the
    /// interceptor has seen them.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!("[API] Network error: {}", e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        self.interceptor.intercept(status);
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let url = response.url().path().to_string();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        tracing::warn!("[API] {} failed with {}", url, status);
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }

    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.execute(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Like [`execute_json`](Self::execute_json) but an empty or `null`
    /// body yields `None`.
    pub(crate) async fn execute_optional_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let response = self.execute(builder).await?;
        let text = response.text().await?;
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }
        serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) fn require_token(&self) -> Result<(), ApiError> {
        if self.session.get_token().is_some() {
            Ok(())
        } else {
            Err(ApiError::NotAuthenticated)
        }
    }
}
