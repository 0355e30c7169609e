use eframe::egui;

use crate::egui_app::state::AppContext;
use crate::egui_app::tasks::{take_ready, Pending};
use crate::egui_app::theme::colors;
use crate::egui_app::types::Route;
use crate::shared::error::ApiError;
use crate::shared::models::{LoginRequest, User};
use crate::shared::validation::validate_login;

#[derive(Default)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub errors: Vec<String>,
    pending: Option<Pending<Result<User, ApiError>>>,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn submit(&mut self, ctx: &AppContext) {
        let request = LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        };
        if let Err(errors) = validate_login(&request) {
            self.errors = super::form_errors(errors);
            return;
        }
        self.errors.clear();

        let auth = ctx.api.auth();
        self.pending = Some(ctx.spawn(async move { auth.login_and_store(&request).await }));
    }

    pub fn poll(&mut self, ctx: &AppContext) -> Option<Route> {
        match take_ready(&mut self.pending)? {
            Ok(_) => {
                ctx.notifier.show_snack_bar("Successfully logged in");
                self.password.clear();
                Some(Route::Index)
            }
            Err(e) => {
                tracing::warn!("[AUTH] Login failed: {}", e);
                ctx.notifier.show_snack_bar("Login error");
                None
            }
        }
    }
}

pub fn render(ui: &mut egui::Ui, state: &mut LoginState, ctx: &AppContext) -> Option<Route> {
    let mut next = None;

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(
            egui::RichText::new("Welcome back")
                .size(28.0)
                .color(colors::TEXT_PRIMARY),
        );
        ui.add_space(20.0);
    });

    super::form_row(ui, "Email:", &mut state.username, false);
    super::form_row(ui, "Password:", &mut state.password, true);
    super::error_list(ui, &state.errors);
    ui.add_space(12.0);

    ui.horizontal(|ui| {
        let login = ui.add_enabled(
            !state.is_loading(),
            egui::Button::new(egui::RichText::new("Login").color(colors::TEXT_LIGHT))
                .fill(colors::ACCENT),
        );
        if login.clicked() {
            state.submit(ctx);
        }
        if ui.button("Create account").clicked() {
            next = Some(Route::Register);
        }
    });

    if state.is_loading() {
        ui.add_space(10.0);
        super::loading(ui, "Signing in...");
    }

    next
}
