/**
 * Authentication API
 *
 * Sign-in and sign-up calls. A successful sign-in stores the token and
 * the current user in the session.
 */

use super::ApiClient;
use crate::shared::error::ApiError;
use crate::shared::models::{AuthResponse, LoginRequest, MessageResponse, SignupRequest, User};
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct AuthApi {
    api: ApiClient,
}

impl AuthApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /api/auth/signin`
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let builder = self
            .api
            .request(Method::POST, "/api/auth/signin")
            .json(request);
        self.api.execute_json(builder).await
    }

    /// `POST /api/auth/signup`
    pub async fn register(&self, request: &SignupRequest) -> Result<MessageResponse, ApiError> {
        let builder = self
            .api
            .request(Method::POST, "/api/auth/signup")
            .json(request);
        self.api.execute_json(builder).await
    }

    /// Sign in, then store token and user snapshot in the session.
    ///
    /// When the user lookup fails the token is discarded again, so a
    /// half-established session never passes the navigation guard.
    pub async fn login_and_store(&self, request: &LoginRequest) -> Result<User, ApiError> {
        let response = self.login(request).await?;
        let session = self.api.session();
        session.save_token(&response.token);

        match self.api.users().current().await {
            Ok(user) => {
                session.save_user(&user)?;
                tracing::info!("[API] Signed in as {}", user.username);
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("[API] Signed in but user lookup failed: {}", e);
                session.discard();
                Err(e)
            }
        }
    }
}
