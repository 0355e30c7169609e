use super::ApiClient;
use crate::shared::error::ApiError;
use crate::shared::models::{Comment, MessageResponse, NewComment};
use reqwest::Method;

/// Comments on posts
#[derive(Debug, Clone)]
pub struct CommentApi {
    api: ApiClient,
}

impl CommentApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /api/comment/{postId}/create`
    pub async fn add(&self, post_id: i64, message: &str) -> Result<Comment, ApiError> {
        self.api.require_token()?;
        let body = NewComment {
            message: message.to_string(),
        };
        let builder = self
            .api
            .request(Method::POST, &format!("/api/comment/{}/create", post_id))
            .json(&body);
        let mut comment: Comment = self.api.execute_json(builder).await?;
        comment.post_id = Some(post_id);
        Ok(comment)
    }

    /// `GET /api/comment/{postId}/all`, in server order
    pub async fn for_post(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        let builder = self
            .api
            .request(Method::GET, &format!("/api/comment/{}/all", post_id));
        let mut comments: Vec<Comment> = self.api.execute_json(builder).await?;
        for comment in &mut comments {
            comment.post_id = Some(post_id);
        }
        Ok(comments)
    }

    /// `POST /api/comment/{id}/delete`
    pub async fn delete(&self, comment_id: i64) -> Result<MessageResponse, ApiError> {
        self.api.require_token()?;
        let builder = self
            .api
            .request(Method::POST, &format!("/api/comment/{}/delete", comment_id));
        Ok(self
            .api
            .execute_optional_json(builder)
            .await?
            .unwrap_or_default())
    }
}
