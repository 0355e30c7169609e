//! Edit-profile dialog
//!
//! Opened from the profile page of the signed-in user. Works on a copy of
//! the user; the profile only changes once the server accepts the update.

use eframe::egui;

use crate::egui_app::state::AppContext;
use crate::egui_app::tasks::{take_ready, Pending};
use crate::egui_app::theme::{colors, styles};
use crate::shared::error::ApiError;
use crate::shared::models::User;
use crate::shared::validation::validate_profile;

pub struct EditUserState {
    original: User,
    pub firstname: String,
    pub lastname: String,
    pub bio: String,
    pub errors: Vec<String>,
    pending: Option<Pending<Result<User, ApiError>>>,
}

/// What the dialog asks of its owner after a frame
#[derive(Debug, PartialEq)]
pub enum DialogOutcome {
    Open,
    Closed,
    Saved(User),
}

impl EditUserState {
    pub fn new(user: &User) -> Self {
        Self {
            original: user.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            bio: user.bio.clone().unwrap_or_default(),
            errors: Vec::new(),
            pending: None,
        }
    }

    /// The user as it would be sent
    pub fn edited(&self) -> User {
        User {
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            bio: Some(self.bio.trim().to_string()),
            ..self.original.clone()
        }
    }

    pub fn submit(&mut self, ctx: &AppContext) {
        let user = self.edited();
        if let Err(errors) = validate_profile(&user) {
            self.errors = super::form_errors(errors);
            return;
        }
        self.errors.clear();

        let users_api = ctx.api.users();
        self.pending = Some(ctx.spawn(async move { users_api.update(&user).await }));
    }

    pub fn poll(&mut self, ctx: &AppContext) -> DialogOutcome {
        match take_ready(&mut self.pending) {
            Some(Ok(user)) => {
                ctx.notifier.show_snack_bar("User updated successfully");
                DialogOutcome::Saved(user)
            }
            Some(Err(e)) => {
                tracing::warn!("[PROFILE] Update failed: {}", e);
                ctx.notifier.show_snack_bar("Error updating user.");
                DialogOutcome::Open
            }
            None => DialogOutcome::Open,
        }
    }
}

pub fn render(egui_ctx: &egui::Context, state: &mut EditUserState, ctx: &AppContext) -> DialogOutcome {
    let mut outcome = DialogOutcome::Open;

    egui::Window::new("Edit profile")
        .collapsible(false)
        .resizable(false)
        .frame(styles::modal_frame())
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(egui_ctx, |ui| {
            super::form_row(ui, "First name:", &mut state.firstname, false);
            super::form_row(ui, "Last name:", &mut state.lastname, false);
            ui.horizontal(|ui| {
                ui.add_sized(
                    [120.0, 24.0],
                    egui::Label::new(egui::RichText::new("Bio:").color(colors::TEXT_SECONDARY)),
                );
                ui.add_sized([280.0, 60.0], egui::TextEdit::multiline(&mut state.bio));
            });
            super::error_list(ui, &state.errors);
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let save = ui.add_enabled(
                    state.pending.is_none(),
                    egui::Button::new(egui::RichText::new("Save").color(colors::TEXT_LIGHT))
                        .fill(colors::ACCENT),
                );
                if save.clicked() {
                    state.submit(ctx);
                }
                if ui.button("Cancel").clicked() {
                    outcome = DialogOutcome::Closed;
                }
            });
        });

    outcome
}
