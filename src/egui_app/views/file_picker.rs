//! Image file selection for uploads
//!
//! The user types or pastes a path; the file is read off the UI thread and
//! checked to be an image before it can be uploaded.

use eframe::egui;
use std::path::PathBuf;

use crate::egui_app::state::AppContext;
use crate::egui_app::tasks::{take_ready, Pending};
use crate::egui_app::theme::colors;
use crate::shared::display::{image_from_bytes, DecodedImage};
use crate::shared::error::SharedError;

#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub preview: Option<DecodedImage>,
}

pub async fn read_image_file(path: PathBuf) -> Result<SelectedFile, SharedError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| SharedError::image(format!("cannot read {}: {}", path.display(), e)))?;
    image::guess_format(&bytes)
        .map_err(|_| SharedError::image(format!("{} is not an image", path.display())))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image.jpg")
        .to_string();
    let preview = image_from_bytes(&format!("upload-{}", name), bytes.clone()).ok();
    Ok(SelectedFile {
        name,
        bytes,
        preview,
    })
}

#[derive(Default)]
pub struct FilePicker {
    pub path: String,
    pub file: Option<SelectedFile>,
    pub error: Option<String>,
    reading: Option<Pending<Result<SelectedFile, SharedError>>>,
}

impl FilePicker {
    pub fn poll(&mut self) {
        match take_ready(&mut self.reading) {
            Some(Ok(file)) => {
                self.file = Some(file);
                self.error = None;
            }
            Some(Err(e)) => {
                self.file = None;
                self.error = Some(e.to_string());
            }
            None => {}
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub fn render(ui: &mut egui::Ui, picker: &mut FilePicker, ctx: &AppContext) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [280.0, 28.0],
            egui::TextEdit::singleline(&mut picker.path).hint_text("Path to an image file"),
        );
        let load = ui.add_enabled(
            picker.reading.is_none() && !picker.path.trim().is_empty(),
            egui::Button::new("Choose"),
        );
        if load.clicked() {
            let path = PathBuf::from(picker.path.trim());
            picker.reading = Some(ctx.spawn(read_image_file(path)));
        }
    });

    if let Some(error) = &picker.error {
        ui.colored_label(colors::ERROR, error);
    }
    if let Some(file) = &picker.file {
        ui.label(egui::RichText::new(&file.name).color(colors::TEXT_SECONDARY));
        if let Some(preview) = &file.preview {
            super::show_image(ui, preview, egui::vec2(160.0, 160.0));
        }
    }
}
