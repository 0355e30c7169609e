//! Theme Module
//!
//! Color constants and frame builders shared by every view.
//!
//! ```rust,no_run
//! use eframe::egui;
//! use instaclone::egui_app::theme::{colors, styles};
//!
//! fn panel(ctx: &egui::Context) {
//!     styles::apply_global_theme(ctx);
//!     egui::CentralPanel::default()
//!         .frame(styles::card_frame())
//!         .show(ctx, |ui| ui.colored_label(colors::TEXT_PRIMARY, "hello"));
//! }
//! ```

pub mod colors;
pub mod styles;
