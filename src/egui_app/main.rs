/**
 * egui Native Desktop App - Main Entry Point
 *
 * Sets up logging and configuration, then hands control to eframe. All
 * state lives in `AppState`; this file only wires frames to it.
 */
use eframe::egui;
use instaclone::egui_app::theme::styles;
use instaclone::egui_app::{views, AppState, Config};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("instaclone=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("[APP] Ignoring unusable config file: {}", e);
            Config::new()
        }
    };
    tracing::info!("[APP] Using server {}", config.server_url());
    let state = AppState::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Instaclone",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(InstacloneApp { state }))
        }),
    )?;
    Ok(())
}

struct InstacloneApp {
    state: AppState,
}

impl eframe::App for InstacloneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.tick();

        views::render_top_bar(ctx, &mut self.state);
        views::render_toasts(ctx, &self.state.ctx.notifier);
        views::render_main_panel(ctx, &mut self.state);

        // Background work reports through channels; keep polling.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
