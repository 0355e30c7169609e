//! Navigation bar
//!
//! Shows the signed-in user's avatar and the main routes. Follows the
//! session's login signal and re-fetches the avatar whenever the profile
//! picture changes.

use eframe::egui;
use tokio::sync::{broadcast, watch};

use crate::egui_app::events::drain;
use crate::egui_app::state::AppContext;
use crate::egui_app::tasks::{take_ready, Pending};
use crate::egui_app::theme::colors;
use crate::egui_app::types::Route;
use crate::shared::display::DecodedImage;
use crate::shared::error::ApiError;
use crate::shared::models::{ImageModel, User};

type NavLoad = (Result<User, ApiError>, Result<ImageModel, ApiError>);

pub enum NavAction {
    Go(Route),
    LogOut,
}

pub struct NavState {
    pub user: Option<User>,
    pub avatar: Option<DecodedImage>,
    load: Option<Pending<NavLoad>>,
    login_rx: watch::Receiver<bool>,
    profile_rx: broadcast::Receiver<()>,
}

impl NavState {
    pub fn new(ctx: &AppContext) -> Self {
        let login_rx = ctx.session.subscribe();
        let logged_in = *login_rx.borrow();
        let mut state = Self {
            user: None,
            avatar: None,
            load: None,
            login_rx,
            profile_rx: ctx.profile_events.subscribe(),
        };
        if logged_in {
            state.reload(ctx);
        }
        state
    }

    fn reload(&mut self, ctx: &AppContext) {
        let users = ctx.api.users();
        let images = ctx.api.images();
        self.load = Some(ctx.spawn(async move {
            tokio::join!(users.current(), images.profile_image())
        }));
    }

    pub fn poll(&mut self, ctx: &AppContext) {
        if self.login_rx.has_changed().unwrap_or(false) {
            if *self.login_rx.borrow_and_update() {
                self.reload(ctx);
            } else {
                self.user = None;
                self.avatar = None;
                self.load = None;
            }
        }

        if drain(&mut self.profile_rx) && self.user.is_some() {
            self.reload(ctx);
        }

        if let Some((user, image)) = take_ready(&mut self.load) {
            match user {
                Ok(user) => self.user = Some(user),
                Err(e) => tracing::warn!("[NAV] Current user lookup failed: {}", e),
            }
            match image {
                Ok(image) => {
                    self.avatar = super::decode_slot("nav-avatar", image.image_bytes.as_deref())
                }
                Err(e) => tracing::warn!("[NAV] Profile image lookup failed: {}", e),
            }
        }
    }
}

pub fn render(ui: &mut egui::Ui, state: &mut NavState, current: Route) -> Option<NavAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("📷 Instaclone")
                .size(20.0)
                .strong()
                .color(colors::TEXT_LIGHT),
        );
        ui.add_space(24.0);

        let Some(user) = state.user.clone() else {
            if ui.selectable_label(current == Route::Login, "Login").clicked() {
                action = Some(NavAction::Go(Route::Login));
            }
            if ui.selectable_label(current == Route::Register, "Register").clicked() {
                action = Some(NavAction::Go(Route::Register));
            }
            return;
        };

        for route in [Route::Index, Route::UserPosts, Route::AddPost] {
            if ui.selectable_label(current == route, route.title()).clicked() {
                action = Some(NavAction::Go(route));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Logout").clicked() {
                action = Some(NavAction::LogOut);
            }
            ui.add_space(8.0);
            if let Some(id) = user.id {
                let profile = Route::Profile(id);
                if ui
                    .selectable_label(current == profile, format!("@{}", user.username))
                    .clicked()
                {
                    action = Some(NavAction::Go(profile));
                }
                if super::avatar(ui, state.avatar.as_ref(), 28.0).clicked() {
                    action = Some(NavAction::Go(profile));
                }
            }
        });
    });

    action
}
