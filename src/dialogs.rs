//! Native dialog boundary. Everything here blocks until the user answers and
//! resolves to a plain value, keeping the rest of the app free of dialog
//! plumbing: `None` always means "cancelled, do nothing".

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::{Path, PathBuf};

/// Ask where to export the canvas. Restricted to PNG; `None` when the user
/// closes the dialog without picking a path.
pub fn ask_export_path() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("PNG image", &["png"])
        .set_file_name("drawing.png")
        .save_file()
}

pub fn notify_exported(path: &Path) {
    let _ = MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Easel")
        .set_description(format!("Image saved to {}", path.display()))
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn notify_error(message: &str) {
    let _ = MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Easel")
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
