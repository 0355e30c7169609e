use eframe::egui;

use crate::egui_app::state::AppContext;
use crate::egui_app::tasks::{take_ready, Pending};
use crate::egui_app::theme::colors;
use crate::egui_app::types::Route;
use crate::shared::error::ApiError;
use crate::shared::models::{MessageResponse, SignupRequest};
use crate::shared::validation::validate_signup;

#[derive(Default)]
pub struct RegisterState {
    pub email: String,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
    pub confirm_password: String,
    pub errors: Vec<String>,
    pending: Option<Pending<Result<MessageResponse, ApiError>>>,
}

impl RegisterState {
    pub fn new() -> Self {
        Self::default()
    }

    fn request(&self) -> SignupRequest {
        SignupRequest {
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }

    pub fn submit(&mut self, ctx: &AppContext) {
        let request = self.request();
        if let Err(errors) = validate_signup(&request) {
            self.errors = super::form_errors(errors);
            return;
        }
        self.errors.clear();

        let auth = ctx.api.auth();
        self.pending = Some(ctx.spawn(async move { auth.register(&request).await }));
    }

    /// Registration stays on this view; the user signs in afterwards.
    pub fn poll(&mut self, ctx: &AppContext) -> Option<Route> {
        match take_ready(&mut self.pending)? {
            Ok(_) => {
                ctx.notifier.show_snack_bar("Successfully registered new user");
                self.password.clear();
                self.confirm_password.clear();
            }
            Err(e) => {
                tracing::warn!("[AUTH] Registration failed: {}", e);
                ctx.notifier.show_snack_bar("Registration error");
            }
        }
        None
    }
}

pub fn render(ui: &mut egui::Ui, state: &mut RegisterState, ctx: &AppContext) -> Option<Route> {
    let mut next = None;

    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(
            egui::RichText::new("Create account")
                .size(28.0)
                .color(colors::TEXT_PRIMARY),
        );
        ui.add_space(20.0);
    });

    super::form_row(ui, "Email:", &mut state.email, false);
    super::form_row(ui, "Username:", &mut state.username, false);
    super::form_row(ui, "First name:", &mut state.firstname, false);
    super::form_row(ui, "Last name:", &mut state.lastname, false);
    super::form_row(ui, "Password:", &mut state.password, true);
    super::form_row(ui, "Confirm:", &mut state.confirm_password, true);
    super::error_list(ui, &state.errors);
    ui.add_space(12.0);

    ui.horizontal(|ui| {
        let submit = ui.add_enabled(
            state.pending.is_none(),
            egui::Button::new(egui::RichText::new("Sign up").color(colors::TEXT_LIGHT))
                .fill(colors::ACCENT),
        );
        if submit.clicked() {
            state.submit(ctx);
        }
        if ui.button("Back to login").clicked() {
            next = Some(Route::Login);
        }
    });

    if state.pending.is_some() {
        super::loading(ui, "Creating account...");
    }

    next
}
