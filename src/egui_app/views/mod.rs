use eframe::egui;

use crate::egui_app::notification::Notifier;
use crate::egui_app::state::{AppState, ViewState};
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::Route;
use crate::shared::display::{decode_image, format_image, DecodedImage};
use crate::shared::error::SharedError;

pub mod add_post_view;
pub mod chat_view;
pub mod edit_user_view;
pub mod feed_view;
pub mod file_picker;
pub mod login_view;
pub mod navigation;
pub mod profile_view;
pub mod register_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    let route = state.route();
    let next = egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| navigation::render(ui, &mut state.nav, route))
        .inner;

    match next {
        Some(navigation::NavAction::Go(route)) => state.navigate(route),
        Some(navigation::NavAction::LogOut) => state.log_out(),
        None => {}
    }
}

pub fn render_toasts(ctx: &egui::Context, notifier: &Notifier) {
    let toasts = notifier.active();
    if toasts.is_empty() {
        return;
    }

    egui::TopBottomPanel::bottom("toasts")
        .frame(styles::toast_frame())
        .show(ctx, |ui| {
            for toast in toasts {
                ui.horizontal(|ui| {
                    ui.colored_label(colors::TEXT_LIGHT, &toast.text);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            notifier.dismiss(toast.id);
                        }
                    });
                });
            }
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let frame = egui::Frame::default()
        .fill(colors::BG_MAIN)
        .inner_margin(egui::Margin::same(16));

    let app = &state.ctx;
    let next = egui::CentralPanel::default()
        .frame(frame)
        .show(ctx, |ui| match &mut state.view {
            ViewState::Login(view) => login_view::render(ui, view, app),
            ViewState::Register(view) => register_view::render(ui, view, app),
            ViewState::Feed(view) => feed_view::render(ui, view, app),
            ViewState::AddPost(view) => add_post_view::render(ui, view, app),
            ViewState::Profile(view) => profile_view::render(ui, view, app),
            ViewState::Chat(view) => chat_view::render(ui, view, app),
        })
        .inner;

    if let Some(route) = next {
        state.navigate(route);
    }
}

/// Decode an optional base64 payload, logging and dropping bad ones
pub fn decode_slot(key: &str, payload: Option<&str>) -> Option<DecodedImage> {
    let url = format_image(payload.filter(|p| !p.is_empty()))?;
    match decode_image(key, &url) {
        Ok(image) => Some(image),
        Err(e) => {
            tracing::warn!("[UI] {}", e);
            None
        }
    }
}

pub fn show_image(ui: &mut egui::Ui, image: &DecodedImage, size: egui::Vec2) -> egui::Response {
    ui.add(
        egui::Image::from_bytes(image.uri.clone(), egui::load::Bytes::Shared(image.bytes.clone()))
            .fit_to_exact_size(size),
    )
}

/// Round profile picture with a placeholder when there is none
pub fn avatar(ui: &mut egui::Ui, image: Option<&DecodedImage>, size: f32) -> egui::Response {
    match image {
        Some(image) => ui.add(
            egui::Image::from_bytes(image.uri.clone(), egui::load::Bytes::Shared(image.bytes.clone()))
                .fit_to_exact_size(egui::vec2(size, size))
                .corner_radius(size / 2.0),
        ),
        None => {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
            ui.painter()
                .circle_filled(rect.center(), size / 2.0, colors::AVATAR_PLACEHOLDER);
            response
        }
    }
}

pub fn form_row(ui: &mut egui::Ui, label: &str, value: &mut String, password: bool) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [120.0, 24.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.add_sized(
            [280.0, 28.0],
            egui::TextEdit::singleline(value).password(password),
        );
    });
    ui.add_space(6.0);
}

pub fn error_list(ui: &mut egui::Ui, errors: &[String]) {
    for error in errors {
        ui.colored_label(colors::ERROR, error);
    }
}

/// Field messages for display next to a form
pub fn form_errors(errors: Vec<SharedError>) -> Vec<String> {
    errors
        .into_iter()
        .map(|e| match e {
            SharedError::ValidationError { message, .. } => message,
            other => other.to_string(),
        })
        .collect()
}

pub fn loading(ui: &mut egui::Ui, what: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(egui::RichText::new(what).color(colors::TEXT_SECONDARY));
    });
}

pub fn title(ui: &mut egui::Ui, route: Route) {
    ui.label(
        egui::RichText::new(route.title())
            .size(24.0)
            .strong()
            .color(colors::TEXT_PRIMARY),
    );
    ui.add_space(12.0);
}
