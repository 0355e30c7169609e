//! Profile page
//!
//! Shows a user and their profile picture. The owner can upload or delete
//! the picture and edit their details; anyone else can start a chat.

use eframe::egui;
use tokio::sync::broadcast;

use super::edit_user_view::{self, DialogOutcome, EditUserState};
use super::file_picker::{self, FilePicker};
use crate::egui_app::events::drain;
use crate::egui_app::state::AppContext;
use crate::egui_app::tasks::{take_ready, Pending};
use crate::egui_app::theme::colors;
use crate::egui_app::types::Route;
use crate::shared::display::DecodedImage;
use crate::shared::error::ApiError;
use crate::shared::models::{ImageModel, MessageResponse, User};

type ProfileLoad = (Result<User, ApiError>, Result<User, ApiError>);

pub struct ProfileState {
    pub user_id: i64,
    pub user: Option<User>,
    pub is_owner: bool,
    pub loaded: bool,
    pub image: Option<DecodedImage>,
    pub has_image: bool,
    pub picker: FilePicker,
    edit: Option<EditUserState>,
    load: Option<Pending<ProfileLoad>>,
    image_load: Option<Pending<Result<ImageModel, ApiError>>>,
    upload: Option<Pending<Result<MessageResponse, ApiError>>>,
    delete: Option<Pending<Result<MessageResponse, ApiError>>>,
    profile_rx: broadcast::Receiver<()>,
}

impl ProfileState {
    pub fn new(ctx: &AppContext, user_id: i64) -> Self {
        let users_api = ctx.api.users();
        let load = ctx.spawn(async move {
            tokio::join!(users_api.by_id(user_id), users_api.current())
        });

        let mut state = Self {
            user_id,
            user: None,
            is_owner: false,
            loaded: false,
            image: None,
            has_image: false,
            picker: FilePicker::default(),
            edit: None,
            load: Some(load),
            image_load: None,
            upload: None,
            delete: None,
            profile_rx: ctx.profile_events.subscribe(),
        };
        state.reload_image(ctx);
        state
    }

    fn reload_image(&mut self, ctx: &AppContext) {
        let images_api = ctx.api.images();
        let user_id = self.user_id;
        self.image_load = Some(ctx.spawn(async move { images_api.profile_image_of(user_id).await }));
    }

    pub fn upload(&mut self, ctx: &AppContext) {
        let Some(file) = self.picker.file.clone() else {
            return;
        };
        let images_api = ctx.api.images();
        self.upload = Some(ctx.spawn(async move {
            images_api.upload_profile_image(file.bytes, &file.name).await
        }));
    }

    pub fn delete_image(&mut self, ctx: &AppContext) {
        let images_api = ctx.api.images();
        self.delete = Some(ctx.spawn(async move { images_api.delete_profile_image().await }));
    }

    pub fn poll(&mut self, ctx: &AppContext) -> Option<Route> {
        self.picker.poll();

        if let Some((user, current)) = take_ready(&mut self.load) {
            match user {
                Ok(user) => self.user = Some(user),
                Err(e) => {
                    tracing::warn!("[PROFILE] User {} lookup failed: {}", self.user_id, e);
                    ctx.notifier.show_snack_bar("Error loading profile.");
                }
            }
            self.is_owner = matches!(current, Ok(ref me) if me.id == Some(self.user_id));
            self.loaded = self.user.is_some();
        }

        if drain(&mut self.profile_rx) {
            self.reload_image(ctx);
        }

        if let Some(result) = take_ready(&mut self.image_load) {
            match result {
                Ok(image) => {
                    self.image = super::decode_slot(
                        &format!("profile-{}", self.user_id),
                        image.image_bytes.as_deref(),
                    );
                    self.has_image = self.image.is_some();
                }
                Err(e) => tracing::warn!("[PROFILE] Profile image lookup failed: {}", e),
            }
        }

        if let Some(result) = take_ready(&mut self.upload) {
            match result {
                Ok(_) => {
                    ctx.notifier.show_snack_bar("Profile Image updated successfully");
                    self.picker.clear();
                    self.has_image = true;
                    ctx.profile_events.notify_profile_picture_updated();
                }
                Err(e) => {
                    tracing::warn!("[PROFILE] Upload failed: {}", e);
                    ctx.notifier.show_snack_bar("Error uploading image.");
                }
            }
        }

        if let Some(result) = take_ready(&mut self.delete) {
            match result {
                Ok(_) => {
                    ctx.notifier.show_snack_bar("Profile Image deleted successfully");
                    self.picker.clear();
                    self.image = None;
                    self.has_image = false;
                    ctx.profile_events.notify_profile_picture_updated();
                }
                Err(e) => {
                    tracing::warn!("[PROFILE] Delete failed: {}", e);
                    ctx.notifier.show_snack_bar("Error deleting image.");
                }
            }
        }

        if let Some(edit) = &mut self.edit {
            if let DialogOutcome::Saved(user) = edit.poll(ctx) {
                self.user = Some(user);
                self.edit = None;
            }
        }

        None
    }
}

pub fn render(ui: &mut egui::Ui, state: &mut ProfileState, ctx: &AppContext) -> Option<Route> {
    let mut next = None;

    let Some(user) = state.user.clone().filter(|_| state.loaded) else {
        super::loading(ui, "Loading profile...");
        return None;
    };

    ui.horizontal(|ui| {
        super::avatar(ui, state.image.as_ref(), 96.0);
        ui.add_space(16.0);
        ui.vertical(|ui| {
            ui.label(
                egui::RichText::new(user.display_name())
                    .size(22.0)
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            );
            ui.label(egui::RichText::new(format!("@{}", user.username)).color(colors::TEXT_SECONDARY));
            if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
                ui.label(bio);
            }
        });
    });
    ui.add_space(16.0);

    if !state.is_owner {
        if ui.button("💬 Message").clicked() {
            next = Some(Route::Chat(state.user_id));
        }
        return next;
    }

    ui.horizontal(|ui| {
        if ui.button("Edit profile").clicked() {
            state.edit = Some(EditUserState::new(&user));
        }
        if state.has_image
            && ui
                .add_enabled(state.delete.is_none(), egui::Button::new("Delete picture"))
                .clicked()
        {
            state.delete_image(ctx);
        }
    });
    ui.add_space(8.0);

    ui.label(egui::RichText::new("New profile picture").color(colors::TEXT_SECONDARY));
    file_picker::render(ui, &mut state.picker, ctx);
    let upload = ui.add_enabled(
        state.picker.file.is_some() && state.upload.is_none(),
        egui::Button::new("Upload"),
    );
    if upload.clicked() {
        state.upload(ctx);
    }

    if let Some(edit) = &mut state.edit {
        if edit_user_view::render(ui.ctx(), edit, ctx) == DialogOutcome::Closed {
            state.edit = None;
        }
    }

    next
}
