use eframe::egui;

use super::file_picker::{self, FilePicker, SelectedFile};
use crate::egui_app::api::{ImageApi, PostApi};
use crate::egui_app::state::AppContext;
use crate::egui_app::tasks::{take_ready, Pending};
use crate::egui_app::theme::colors;
use crate::egui_app::types::Route;
use crate::shared::error::{ApiError, SharedError};
use crate::shared::models::{NewPost, Post};
use crate::shared::validation::validate_post;

/// Create the post, then attach its image
async fn create_post(
    posts_api: PostApi,
    images_api: ImageApi,
    post: NewPost,
    file: SelectedFile,
) -> Result<Post, ApiError> {
    let created = posts_api.create(&post).await?;
    let Some(post_id) = created.id else {
        return Err(ApiError::Decode("created post has no id".to_string()));
    };
    images_api
        .upload_post_image(post_id, file.bytes, &file.name)
        .await?;
    tracing::info!("[POST] Created post {}", post_id);
    Ok(created)
}

#[derive(Default)]
pub struct AddPostState {
    pub title: String,
    pub location: String,
    pub caption: String,
    pub picker: FilePicker,
    pub errors: Vec<String>,
    pending: Option<Pending<Result<Post, ApiError>>>,
}

impl AddPostState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, ctx: &AppContext) {
        let post = NewPost {
            title: self.title.trim().to_string(),
            caption: self.caption.trim().to_string(),
            location: self.location.trim().to_string(),
        };
        let mut errors = match validate_post(&post) {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };
        let Some(file) = self.picker.file.clone() else {
            errors.push(SharedError::validation("image", "Choose an image for the post"));
            self.errors = super::form_errors(errors);
            return;
        };
        if !errors.is_empty() {
            self.errors = super::form_errors(errors);
            return;
        }
        self.errors.clear();

        let posts_api = ctx.api.posts();
        let images_api = ctx.api.images();
        self.pending = Some(ctx.spawn(create_post(posts_api, images_api, post, file)));
    }

    pub fn poll(&mut self, ctx: &AppContext) -> Option<Route> {
        self.picker.poll();
        match take_ready(&mut self.pending)? {
            Ok(_) => {
                ctx.notifier.show_snack_bar("Post created successfully");
                ctx.session.get_user().and_then(|u| u.id).map(Route::Profile)
            }
            Err(e) => {
                tracing::warn!("[POST] Creating post failed: {}", e);
                ctx.notifier.show_snack_bar("Error creating post.");
                None
            }
        }
    }
}

pub fn render(ui: &mut egui::Ui, state: &mut AddPostState, ctx: &AppContext) -> Option<Route> {
    super::title(ui, Route::AddPost);

    super::form_row(ui, "Title:", &mut state.title, false);
    super::form_row(ui, "Location:", &mut state.location, false);
    ui.horizontal(|ui| {
        ui.add_sized(
            [120.0, 24.0],
            egui::Label::new(egui::RichText::new("Caption:").color(colors::TEXT_SECONDARY)),
        );
        ui.add_sized([280.0, 80.0], egui::TextEdit::multiline(&mut state.caption));
    });
    ui.add_space(8.0);

    file_picker::render(ui, &mut state.picker, ctx);
    super::error_list(ui, &state.errors);
    ui.add_space(12.0);

    let submit = ui.add_enabled(
        state.pending.is_none(),
        egui::Button::new(egui::RichText::new("Publish").color(colors::TEXT_LIGHT))
            .fill(colors::ACCENT),
    );
    if submit.clicked() {
        state.submit(ctx);
    }
    if state.pending.is_some() {
        super::loading(ui, "Publishing...");
    }

    None
}
