use crate::canvas::model::{
    MAX_BRUSH_WIDTH, MAX_TEXT_SIZE, MIN_BRUSH_WIDTH, MIN_TEXT_SIZE,
};
use crate::canvas::{CommandJournal, RasterSurface, SessionState, Tool};
use crate::prompts::{ColorPrompt, ColorTarget, ResizePrompt, TextPrompt};
use crate::{dialogs, export};
use eframe::egui::{self, Color32, PointerButton, Sense, TextureHandle, TextureOptions};

/// Preset widths offered next to the slider.
const BRUSH_WIDTH_PRESETS: [u32; 4] = [1, 2, 5, 10];

/// The paint window: toolbar, canvas and prompt windows.
///
/// All drawing flows through the command journal; the raster surface and the
/// display texture are refreshed from it once per frame, so what is exported
/// is always exactly what is on screen.
pub struct PaintApp {
    journal: CommandJournal,
    raster: RasterSurface,
    session: SessionState,
    texture: Option<TextureHandle>,
    color_prompt: ColorPrompt,
    resize_prompt: ResizePrompt,
    text_prompt: TextPrompt,
}

impl Default for PaintApp {
    fn default() -> Self {
        let journal = CommandJournal::default();
        let raster = RasterSurface::materialize(&journal);
        Self {
            journal,
            raster,
            session: SessionState::default(),
            texture: None,
            color_prompt: ColorPrompt::default(),
            resize_prompt: ResizePrompt::default(),
            text_prompt: TextPrompt::default(),
        }
    }
}

impl eframe::App for PaintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        self.handle_prompts(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| self.canvas(ui));
        });
    }
}

impl PaintApp {
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let save = ctx.input(|i| i.key_pressed(egui::Key::S) && i.modifiers.ctrl);
        let pick = ctx.input(|i| i.key_pressed(egui::Key::P) && i.modifiers.ctrl);
        if save {
            self.export_canvas();
        }
        if pick {
            self.color_prompt.open_for_brush(self.session.brush_color);
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Clear").clicked() {
                self.journal.clear();
                tracing::debug!("canvas cleared");
            }
            if ui.button("Pick Color").clicked() {
                self.color_prompt.open_for_brush(self.session.brush_color);
            }
            let swatch = egui::Button::new("   ").fill(self.session.brush_color.to_color32());
            if ui
                .add(swatch)
                .on_hover_text(self.session.brush_color.to_hex())
                .clicked()
            {
                self.color_prompt.open_for_brush(self.session.brush_color);
            }
            if ui.button("Save").clicked() {
                self.export_canvas();
            }
            if ui.button("Resize Canvas").clicked() {
                self.resize_prompt.open_with(self.journal.baseline());
            }
            if ui.button("Canvas Color").clicked() {
                self.color_prompt
                    .open_for_background(self.journal.baseline().background);
            }
            if ui.button("Add Text").clicked() {
                self.text_prompt.open_blank();
            }
        });

        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.session.tool == Tool::Brush, "Brush")
                .clicked()
            {
                self.session = self.session.select_brush();
            }
            if ui
                .selectable_label(self.session.tool == Tool::Eraser, "Eraser")
                .clicked()
            {
                self.session = self.session.select_eraser();
            }
            ui.separator();

            let mut width = self.session.brush_width;
            ui.add(egui::Slider::new(&mut width, MIN_BRUSH_WIDTH..=MAX_BRUSH_WIDTH).text("Width"));
            if width != self.session.brush_width {
                self.session = self.session.with_brush_width(width);
            }
            egui::ComboBox::from_id_source("brush-width-presets")
                .width(48.0)
                .selected_text(self.session.brush_width.to_string())
                .show_ui(ui, |ui| {
                    for preset in BRUSH_WIDTH_PRESETS {
                        if ui
                            .selectable_label(self.session.brush_width == preset, preset.to_string())
                            .clicked()
                        {
                            self.session = self.session.with_brush_width(preset);
                        }
                    }
                });
            ui.separator();

            let mut size = self.session.text_size;
            ui.add(
                egui::DragValue::new(&mut size)
                    .clamp_range(MIN_TEXT_SIZE..=MAX_TEXT_SIZE)
                    .prefix("Text "),
            );
            if size != self.session.text_size {
                self.session = self.session.with_text_size(size);
            }

            if self.session.pending_text.is_some() {
                ui.separator();
                ui.label("click the canvas to place the text");
            }
        });
    }

    fn handle_prompts(&mut self, ctx: &egui::Context) {
        if let Some((target, color)) = self.color_prompt.ui(ctx) {
            match target {
                ColorTarget::Brush => {
                    self.session = self.session.color_chosen(Some(color));
                }
                ColorTarget::Background => {
                    self.journal.set_background(color);
                    tracing::debug!(color = %color.to_hex(), "background recolored");
                }
            }
        }
        if let Some((width, height)) = self.resize_prompt.ui(ctx) {
            self.journal.resize(width, height);
            tracing::info!(width, height, "canvas resized");
        }
        if let Some(text) = self.text_prompt.ui(ctx) {
            self.session = self.session.text_queued(Some(text));
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let baseline = self.journal.baseline();
        let size = egui::vec2(baseline.width as f32, baseline.height as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::drag());
        let origin = response.rect.min;
        let to_canvas = |pos: egui::Pos2| -> (i32, i32) {
            ((pos.x - origin.x).floor() as i32, (pos.y - origin.y).floor() as i32)
        };

        if response.drag_started_by(PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let (next, command) = self.session.pointer_pressed(to_canvas(pos));
                self.session = next;
                if let Some(command) = command {
                    self.journal.record(command);
                }
            }
        } else if response.dragged_by(PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let (next, command) = self
                    .session
                    .pointer_moved(to_canvas(pos), baseline.background);
                self.session = next;
                if let Some(command) = command {
                    self.journal.record(command);
                }
            }
        }
        if response.drag_stopped_by(PointerButton::Primary) {
            self.session = self.session.pointer_released();
        }
        if response.drag_started_by(PointerButton::Secondary) {
            if let Some(pos) = response.interact_pointer_pos() {
                let (x, y) = to_canvas(pos);
                self.session = self.session.color_sampled(self.raster.sample(x, y));
            }
        }

        if self.raster.sync(&self.journal) || self.texture.is_none() {
            let image = self.raster.image();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.as_raw(),
            );
            match &mut self.texture {
                Some(texture) => texture.set(color_image, TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ui.ctx().load_texture("canvas", color_image, TextureOptions::NEAREST))
                }
            }
        }

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                response.rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        painter.rect_stroke(
            response.rect,
            0.0,
            ui.visuals().widgets.noninteractive.bg_stroke,
        );
    }

    fn export_canvas(&mut self) {
        // Cancelled save dialog is a silent no-op.
        let Some(path) = dialogs::ask_export_path() else {
            return;
        };
        let path = export::ensure_png_extension(path);
        self.raster.sync(&self.journal);
        match export::write_png(self.raster.image(), &path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "canvas exported");
                dialogs::notify_exported(&path);
            }
            Err(err) => {
                tracing::error!(?err, "canvas export failed");
                dialogs::notify_error(&format!("Could not save the image: {err:#}"));
            }
        }
    }
}
