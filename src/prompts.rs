//! In-app prompt windows (color, resize, text).
//!
//! Each prompt follows the same shape: an `open` flag, the fields being
//! edited, and a `ui` method that renders the window and returns `Some`
//! exactly once when the user confirms. Closing the window or pressing
//! Cancel resolves to nothing, which callers treat as "state unchanged".

use crate::canvas::model::{parse_canvas_size, CanvasBaseline, Color};
use eframe::egui::{self, color_picker, Color32};

/// What a confirmed color applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Brush,
    Background,
}

/// Color selection window with a picker and a hex field.
pub struct ColorPrompt {
    pub open: bool,
    target: ColorTarget,
    color: Color32,
    hex: String,
}

impl Default for ColorPrompt {
    fn default() -> Self {
        Self {
            open: false,
            target: ColorTarget::Brush,
            color: Color32::BLACK,
            hex: Color::BLACK.to_hex(),
        }
    }
}

impl ColorPrompt {
    pub fn open_for_brush(&mut self, current: Color) {
        self.open_for(ColorTarget::Brush, current);
    }

    pub fn open_for_background(&mut self, current: Color) {
        self.open_for(ColorTarget::Background, current);
    }

    fn open_for(&mut self, target: ColorTarget, current: Color) {
        self.open = true;
        self.target = target;
        self.color = current.to_color32();
        self.hex = current.to_hex();
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> Option<(ColorTarget, Color)> {
        if !self.open {
            return None;
        }
        let title = match self.target {
            ColorTarget::Brush => "Pick Color",
            ColorTarget::Background => "Canvas Color",
        };
        let mut open = self.open;
        let mut confirmed = None;
        egui::Window::new(title)
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                if color_picker::color_picker_color32(ui, &mut self.color, color_picker::Alpha::Opaque)
                {
                    self.hex = Color::from_color32(self.color).to_hex();
                }
                ui.horizontal(|ui| {
                    ui.label("Hex");
                    let response = ui.text_edit_singleline(&mut self.hex);
                    if response.changed() {
                        if let Some(color) = Color::from_hex(&self.hex) {
                            self.color = color.to_color32();
                        }
                    }
                });
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        confirmed = Some((self.target, Color::from_color32(self.color)));
                    }
                    if ui.button("Cancel").clicked() {
                        self.open = false;
                    }
                });
            });
        self.open = self.open && open && confirmed.is_none();
        confirmed
    }
}

/// Width/height prompt for resizing the canvas. Invalid input keeps the
/// window open and shows the validation message inline.
pub struct ResizePrompt {
    pub open: bool,
    width: String,
    height: String,
    error: Option<String>,
}

impl Default for ResizePrompt {
    fn default() -> Self {
        Self {
            open: false,
            width: String::new(),
            height: String::new(),
            error: None,
        }
    }
}

impl ResizePrompt {
    pub fn open_with(&mut self, current: CanvasBaseline) {
        self.open = true;
        self.width = current.width.to_string();
        self.height = current.height.to_string();
        self.error = None;
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> Option<(u32, u32)> {
        if !self.open {
            return None;
        }
        let mut open = self.open;
        let mut confirmed = None;
        egui::Window::new("Resize Canvas")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Width");
                    ui.text_edit_singleline(&mut self.width);
                });
                ui.horizontal(|ui| {
                    ui.label("Height");
                    ui.text_edit_singleline(&mut self.height);
                });
                if let Some(error) = &self.error {
                    ui.colored_label(Color32::RED, error);
                }
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        match parse_canvas_size(&self.width, &self.height) {
                            Ok(dimensions) => confirmed = Some(dimensions),
                            Err(message) => self.error = Some(message),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        self.open = false;
                    }
                });
            });
        self.open = self.open && open && confirmed.is_none();
        confirmed
    }
}

/// Single-line text prompt feeding text placement. An empty entry is treated
/// as a cancel.
pub struct TextPrompt {
    pub open: bool,
    entry: String,
}

impl Default for TextPrompt {
    fn default() -> Self {
        Self {
            open: false,
            entry: String::new(),
        }
    }
}

impl TextPrompt {
    pub fn open_blank(&mut self) {
        self.open = true;
        self.entry.clear();
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> Option<String> {
        if !self.open {
            return None;
        }
        let mut open = self.open;
        let mut confirmed = None;
        egui::Window::new("Add Text")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label("Text to place on the next canvas click:");
                let response = ui.text_edit_singleline(&mut self.entry);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.separator();
                ui.horizontal(|ui| {
                    if (ui.button("OK").clicked() || submitted) && !self.entry.is_empty() {
                        confirmed = Some(self.entry.clone());
                    }
                    if ui.button("Cancel").clicked() {
                        self.open = false;
                    }
                });
            });
        self.open = self.open && open && confirmed.is_none();
        confirmed
    }
}
