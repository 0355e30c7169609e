use super::ApiClient;
use crate::shared::error::ApiError;
use crate::shared::models::{MessageResponse, NewPost, Post};
use reqwest::Method;

/// Post CRUD and likes
#[derive(Debug, Clone)]
pub struct PostApi {
    api: ApiClient,
}

impl PostApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /api/post/create`
    pub async fn create(&self, post: &NewPost) -> Result<Post, ApiError> {
        self.api.require_token()?;
        let builder = self.api.request(Method::POST, "/api/post/create").json(post);
        self.api.execute_json(builder).await
    }

    /// `GET /api/post/all`
    pub async fn all(&self) -> Result<Vec<Post>, ApiError> {
        let builder = self.api.request(Method::GET, "/api/post/all");
        self.api.execute_json(builder).await
    }

    /// `GET /api/post/user/posts`
    pub async fn for_current_user(&self) -> Result<Vec<Post>, ApiError> {
        self.api.require_token()?;
        let builder = self.api.request(Method::GET, "/api/post/user/posts");
        self.api.execute_json(builder).await
    }

    /// `POST /api/post/{id}/{username}/like`. The server toggles the like
    /// and returns the updated post.
    pub async fn like(&self, post_id: i64, username: &str) -> Result<Post, ApiError> {
        let builder = self.api.request(
            Method::POST,
            &format!("/api/post/{}/{}/like", post_id, username),
        );
        self.api.execute_json(builder).await
    }

    /// `DELETE /api/post/{id}/delete`
    pub async fn delete(&self, post_id: i64) -> Result<MessageResponse, ApiError> {
        self.api.require_token()?;
        let builder = self
            .api
            .request(Method::DELETE, &format!("/api/post/{}/delete", post_id));
        Ok(self
            .api
            .execute_optional_json(builder)
            .await?
            .unwrap_or_default())
    }
}
