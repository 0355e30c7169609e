//! Image API
//!
//! Images travel as opaque payloads: uploads are multipart `file` parts,
//! downloads are `{ "imageBytes": "<base64>" }`. A user or post without an
//! image comes back as an empty model rather than an error.

use super::ApiClient;
use crate::shared::error::ApiError;
use crate::shared::models::{ImageModel, MessageResponse};
use reqwest::multipart::{Form, Part};
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct ImageApi {
    api: ApiClient,
}

/// Guess a MIME type from the file name
fn mime_for(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else {
        "image/jpeg"
    }
}

fn file_form(bytes: Vec<u8>, file_name: &str) -> Result<Form, ApiError> {
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime_for(file_name))
        .map_err(|e| ApiError::Network(e.to_string()))?;
    Ok(Form::new().part("file", part))
}

impl ImageApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn fetch(&self, path: &str) -> Result<ImageModel, ApiError> {
        let builder = self.api.request(Method::GET, path);
        Ok(self
            .api
            .execute_optional_json(builder)
            .await?
            .unwrap_or_default())
    }

    async fn post_form(&self, path: &str, form: Form) -> Result<MessageResponse, ApiError> {
        self.api.require_token()?;
        let builder = self.api.request(Method::POST, path).multipart(form);
        Ok(self
            .api
            .execute_optional_json(builder)
            .await?
            .unwrap_or_default())
    }

    /// `POST /api/image/upload`
    pub async fn upload_profile_image(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<MessageResponse, ApiError> {
        let form = file_form(bytes, file_name)?;
        self.post_form("/api/image/upload", form).await
    }

    /// `POST /api/image/{postId}/upload`
    pub async fn upload_post_image(
        &self,
        post_id: i64,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<MessageResponse, ApiError> {
        let form = file_form(bytes, file_name)?;
        self.post_form(&format!("/api/image/{}/upload", post_id), form)
            .await
    }

    /// `GET /api/image/profileImage`
    pub async fn profile_image(&self) -> Result<ImageModel, ApiError> {
        self.api.require_token()?;
        self.fetch("/api/image/profileImage").await
    }

    /// `GET /api/image/profileImage/{userId}`
    pub async fn profile_image_of(&self, user_id: i64) -> Result<ImageModel, ApiError> {
        self.fetch(&format!("/api/image/profileImage/{}", user_id))
            .await
    }

    /// `GET /api/image/{postId}/image`
    pub async fn post_image(&self, post_id: i64) -> Result<ImageModel, ApiError> {
        self.fetch(&format!("/api/image/{}/image", post_id)).await
    }

    /// `POST /api/image/profileImage/delete`
    pub async fn delete_profile_image(&self) -> Result<MessageResponse, ApiError> {
        self.api.require_token()?;
        let builder = self
            .api
            .request(Method::POST, "/api/image/profileImage/delete");
        Ok(self
            .api
            .execute_optional_json(builder)
            .await?
            .unwrap_or_default())
    }
}
