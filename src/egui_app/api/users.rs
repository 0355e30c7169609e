use super::ApiClient;
use crate::shared::error::ApiError;
use crate::shared::models::User;
use reqwest::Method;

/// User lookups and profile updates
#[derive(Debug, Clone)]
pub struct UserApi {
    api: ApiClient,
}

impl UserApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /api/user/`
    pub async fn current(&self) -> Result<User, ApiError> {
        self.api.require_token()?;
        let builder = self.api.request(Method::GET, "/api/user/");
        self.api.execute_json(builder).await
    }

    /// `GET /api/user/{id}`
    pub async fn by_id(&self, user_id: i64) -> Result<User, ApiError> {
        let builder = self
            .api
            .request(Method::GET, &format!("/api/user/{}", user_id));
        self.api.execute_json(builder).await
    }

    /// `GET /api/user/username/{username}`
    pub async fn by_username(&self, username: &str) -> Result<User, ApiError> {
        let builder = self
            .api
            .request(Method::GET, &format!("/api/user/username/{}", username));
        self.api.execute_json(builder).await
    }

    /// `POST /api/user/update`; refreshes the session snapshot when the
    /// updated user is the signed-in one.
    pub async fn update(&self, user: &User) -> Result<User, ApiError> {
        self.api.require_token()?;
        let builder = self.api.request(Method::POST, "/api/user/update").json(user);
        let updated: User = self.api.execute_json(builder).await?;

        let session = self.api.session();
        if session.get_user().map(|u| u.id) == Some(updated.id) {
            session.save_user(&updated)?;
        }
        Ok(updated)
    }
}
