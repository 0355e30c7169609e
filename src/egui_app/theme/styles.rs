//! Theme Styling Functions
//!
//! Global visuals plus frame builders for the recurring surfaces: top bar,
//! toasts, post cards, chat panels and dialogs.

use eframe::egui::{self, Color32, CornerRadius, Stroke};
use super::colors;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();

    // Window styling
    style.visuals.window_fill = colors::BG_MAIN;
    style.visuals.window_stroke = Stroke::new(1.0, colors::CARD_BORDER);
    style.visuals.panel_fill = colors::BG_MAIN;
    style.visuals.extreme_bg_color = colors::INPUT_BG;

    // Widget styling
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors::TEXT_PRIMARY);
    style.visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors::SEPARATOR);

    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors::TEXT_PRIMARY);

    style.visuals.widgets.hovered.bg_fill = colors::ACCENT_HOVER;
    style.visuals.widgets.hovered.weak_bg_fill = colors::BUBBLE_INCOMING;

    style.visuals.widgets.active.bg_fill = colors::ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    // Selection color
    style.visuals.selection.bg_fill = colors::BUBBLE_OUTGOING;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_PRIMARY);

    ctx.set_style(style);
}

pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

pub fn toast_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOAST_BG)
        .inner_margin(egui::Margin::symmetric(16, 10))
}

/// One post in the feed
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(1.0, colors::CARD_BORDER))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(12))
        .outer_margin(egui::Margin::symmetric(0, 6))
}

/// Create a frame style for the chat list panel
pub fn chat_list_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CHAT_LIST_BG)
        .inner_margin(egui::Margin::same(8))
}

/// Create a frame style for outgoing message bubbles
pub fn outgoing_bubble_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BUBBLE_OUTGOING)
        .stroke(Stroke::new(1.0, colors::BUBBLE_BORDER))
        .corner_radius(CornerRadius {
            nw: 12,
            ne: 12,
            sw: 12,
            se: 4,
        })
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame style for incoming message bubbles
pub fn incoming_bubble_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BUBBLE_INCOMING)
        .stroke(Stroke::new(1.0, colors::BUBBLE_BORDER))
        .corner_radius(CornerRadius {
            nw: 12,
            ne: 12,
            sw: 4,
            se: 12,
        })
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame for modal dialogs
pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BG_MAIN)
        .stroke(Stroke::new(2.0, colors::BUBBLE_BORDER))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(egui::Margin::same(20))
        .shadow(egui::epaint::Shadow {
            offset: [0, 4],
            blur: 12,
            spread: 0,
            color: Color32::from_black_alpha(60),
        })
}
