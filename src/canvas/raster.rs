use crate::canvas::journal::CommandJournal;
use crate::canvas::model::{CanvasBaseline, CanvasCommand, Color};
use eframe::egui;
use image::RgbaImage;
use once_cell::sync::Lazy;

/// Pixel materialization of a [`CommandJournal`].
///
/// This is the buffer that gets exported and that the eyedropper samples.
/// `sync` keeps it aligned with the journal: appended commands are applied
/// incrementally, while a baseline change (clear, resize, recolor) triggers a
/// full replay onto a fresh buffer.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    baseline: CanvasBaseline,
    applied: usize,
    revision: u64,
    epoch: u64,
}

impl RasterSurface {
    pub fn materialize(journal: &CommandJournal) -> Self {
        let baseline = journal.baseline();
        let mut image = blank(baseline);
        for command in journal.commands() {
            apply_command(&mut image, command);
        }
        Self {
            image,
            baseline,
            applied: journal.commands().len(),
            revision: journal.revision(),
            epoch: journal.epoch(),
        }
    }

    /// Bring the buffer up to date with the journal. Returns `true` when the
    /// pixels changed, which is the display surface's cue to re-upload.
    pub fn sync(&mut self, journal: &CommandJournal) -> bool {
        if self.revision == journal.revision() {
            return false;
        }

        if self.epoch == journal.epoch() && journal.commands().len() >= self.applied {
            for command in &journal.commands()[self.applied..] {
                apply_command(&mut self.image, command);
            }
        } else {
            self.baseline = journal.baseline();
            self.image = blank(self.baseline);
            for command in journal.commands() {
                apply_command(&mut self.image, command);
            }
        }

        self.applied = journal.commands().len();
        self.revision = journal.revision();
        self.epoch = journal.epoch();
        true
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Read the color at a canvas coordinate. Out-of-bounds coordinates are
    /// rejected rather than clamped.
    pub fn sample(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        let pixel = self.image.get_pixel(x, y).0;
        Some(Color::rgb(pixel[0], pixel[1], pixel[2]))
    }
}

fn blank(baseline: CanvasBaseline) -> RgbaImage {
    RgbaImage::from_pixel(baseline.width, baseline.height, baseline.background.to_rgba())
}

fn apply_command(img: &mut RgbaImage, command: &CanvasCommand) {
    match command {
        CanvasCommand::Segment {
            from,
            to,
            color,
            width,
        } => draw_segment(img, *from, *to, *color, *width),
        CanvasCommand::Text {
            anchor,
            text,
            color,
            size,
        } => draw_text(img, *anchor, text, *color, *size),
    }
}

/// Stamp a round-capped segment by walking the line and dropping a disc at
/// each step. Integer coordinates address pixels, so discs are centered on
/// pixel centers.
fn draw_segment(img: &mut RgbaImage, from: (i32, i32), to: (i32, i32), color: Color, width: u32) {
    let start = (from.0 as f32 + 0.5, from.1 as f32 + 0.5);
    let dx = (to.0 - from.0) as f32;
    let dy = (to.1 - from.1) as f32;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;
    let radius = (width.max(1) as f32 / 2.0).max(0.5);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        draw_disc(img, (start.0 + dx * t, start.1 + dy * t), radius, color);
    }
}

fn draw_disc(img: &mut RgbaImage, center: (f32, f32), radius: f32, color: Color) {
    let radius_sq = radius * radius;
    let width = img.width() as i32;
    let height = img.height() as i32;
    let min_x = (center.0 - radius).floor().max(0.0) as i32;
    let max_x = (center.0 + radius).ceil().min((width - 1) as f32) as i32;
    let min_y = (center.1 - radius).floor().max(0.0) as i32;
    let max_y = (center.1 + radius).ceil().min((height - 1) as f32) as i32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - center.0;
            let dy = y as f32 + 0.5 - center.1;
            if dx * dx + dy * dy <= radius_sq {
                img.put_pixel(x as u32, y as u32, color.to_rgba());
            }
        }
    }
}

static STAMP_FONT: Lazy<Option<(ab_glyph::FontArc, egui::FontTweak)>> = Lazy::new(load_stamp_font);

/// The toolkit's default proportional font, so raster text matches what egui
/// draws on screen.
fn load_stamp_font() -> Option<(ab_glyph::FontArc, egui::FontTweak)> {
    let definitions = egui::FontDefinitions::default();
    let family = definitions.families.get(&egui::FontFamily::Proportional)?;
    let name = family.first()?;
    let data = definitions.font_data.get(name)?.clone();
    let font = match data.font {
        std::borrow::Cow::Borrowed(bytes) => {
            ab_glyph::FontRef::try_from_slice_and_index(bytes, data.index)
                .map(ab_glyph::FontArc::from)
                .ok()
        }
        std::borrow::Cow::Owned(bytes) => {
            ab_glyph::FontVec::try_from_vec_and_index(bytes, data.index)
                .map(ab_glyph::FontArc::from)
                .ok()
        }
    }?;
    Some((font, data.tweak))
}

fn draw_text(img: &mut RgbaImage, anchor: (i32, i32), text: &str, color: Color, size: f32) {
    use ab_glyph::{point, Font, ScaleFont};

    if text.is_empty() {
        return;
    }
    let Some((font, tweak)) = STAMP_FONT.as_ref() else {
        tracing::warn!("no stamp font available, text placement skipped");
        return;
    };

    let scaled = font.as_scaled(size * tweak.scale);
    let mut caret = point(
        anchor.0 as f32,
        anchor.1 as f32 + scaled.ascent() + tweak.y_offset * size,
    );
    for ch in text.chars() {
        let mut glyph = scaled.scaled_glyph(ch);
        glyph.position = caret;
        caret.x += scaled.h_advance(glyph.id);
        if let Some(outlined) = scaled.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                blend_coverage(
                    img,
                    x as i32 + bounds.min.x as i32,
                    y as i32 + bounds.min.y as i32,
                    color,
                    coverage,
                );
            });
        }
    }
}

/// Mix `color` into a pixel by glyph coverage so antialiased edges stay
/// smooth against the existing contents.
fn blend_coverage(img: &mut RgbaImage, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return;
    }
    let t = coverage.clamp(0.0, 1.0);
    if t <= 0.0 {
        return;
    }
    let pixel = img.get_pixel_mut(x as u32, y as u32);
    let mix = |dst: u8, src: u8| -> u8 {
        (dst as f32 * (1.0 - t) + src as f32 * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    pixel.0 = [
        mix(pixel.0[0], color.r),
        mix(pixel.0[1], color.g),
        mix(pixel.0[2], color.b),
        255,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journal(width: u32, height: u32, background: Color) -> CommandJournal {
        CommandJournal::new(CanvasBaseline {
            width,
            height,
            background,
        })
    }

    fn segment(from: (i32, i32), to: (i32, i32), color: Color, width: u32) -> CanvasCommand {
        CanvasCommand::Segment {
            from,
            to,
            color,
            width,
        }
    }

    #[test]
    fn blank_canvas_is_background_colored() {
        let raster = RasterSurface::materialize(&journal(8, 4, Color::rgb(10, 20, 30)));
        assert_eq!(raster.width(), 8);
        assert_eq!(raster.height(), 4);
        assert_eq!(raster.sample(0, 0), Some(Color::rgb(10, 20, 30)));
        assert_eq!(raster.sample(7, 3), Some(Color::rgb(10, 20, 30)));
    }

    #[test]
    fn segment_paints_line_with_round_caps() {
        let mut journal = journal(20, 10, Color::WHITE);
        journal.record(segment((2, 5), (12, 5), Color::BLACK, 3));
        let raster = RasterSurface::materialize(&journal);

        assert_eq!(raster.sample(7, 5), Some(Color::BLACK));
        assert_eq!(raster.sample(2, 5), Some(Color::BLACK));
        assert_eq!(raster.sample(12, 5), Some(Color::BLACK));
        assert_eq!(raster.sample(7, 0), Some(Color::WHITE));
    }

    #[test]
    fn incremental_sync_matches_full_replay() {
        let mut journal = journal(32, 32, Color::WHITE);
        let mut incremental = RasterSurface::materialize(&journal);

        journal.record(segment((0, 0), (31, 31), Color::BLACK, 2));
        assert!(incremental.sync(&journal));
        journal.record(segment((0, 31), (31, 0), Color::rgb(200, 0, 0), 4));
        assert!(incremental.sync(&journal));
        assert!(!incremental.sync(&journal));

        let replayed = RasterSurface::materialize(&journal);
        assert_eq!(incremental.image(), replayed.image());
    }

    #[test]
    fn clear_then_sample_returns_background() {
        let mut journal = journal(16, 16, Color::WHITE);
        journal.record(segment((0, 8), (15, 8), Color::BLACK, 5));
        let mut raster = RasterSurface::materialize(&journal);
        assert_eq!(raster.sample(8, 8), Some(Color::BLACK));

        journal.clear();
        assert!(raster.sync(&journal));
        for (x, y) in [(0, 0), (8, 8), (15, 15)] {
            assert_eq!(raster.sample(x, y), Some(Color::WHITE));
        }
    }

    #[test]
    fn resize_reports_new_dimensions_and_preserves_inner_content() {
        let mut journal = journal(40, 40, Color::WHITE);
        journal.record(segment((5, 5), (5, 5), Color::BLACK, 3));
        journal.record(segment((30, 30), (30, 30), Color::BLACK, 3));
        let mut raster = RasterSurface::materialize(&journal);

        journal.resize(20, 10);
        assert!(raster.sync(&journal));
        assert_eq!(raster.width(), 20);
        assert_eq!(raster.height(), 10);
        assert_eq!(raster.sample(5, 5), Some(Color::BLACK));
        assert_eq!(raster.sample(30, 30), None);
    }

    #[test]
    fn background_recolor_replays_strokes_over_new_background() {
        let mut journal = journal(16, 16, Color::WHITE);
        journal.record(segment((0, 8), (15, 8), Color::BLACK, 3));
        let mut raster = RasterSurface::materialize(&journal);

        journal.set_background(Color::rgb(0, 0, 200));
        assert!(raster.sync(&journal));
        assert_eq!(raster.sample(8, 8), Some(Color::BLACK));
        assert_eq!(raster.sample(8, 0), Some(Color::rgb(0, 0, 200)));
    }

    #[test]
    fn sample_out_of_bounds_is_rejected() {
        let raster = RasterSurface::materialize(&journal(8, 8, Color::WHITE));
        assert_eq!(raster.sample(-1, 0), None);
        assert_eq!(raster.sample(0, -1), None);
        assert_eq!(raster.sample(8, 0), None);
        assert_eq!(raster.sample(0, 8), None);
    }

    #[test]
    fn text_stamp_changes_pixels_near_anchor() {
        let mut journal = journal(80, 40, Color::WHITE);
        journal.record(CanvasCommand::Text {
            anchor: (2, 2),
            text: "Easel".to_string(),
            color: Color::BLACK,
            size: 20.0,
        });
        let raster = RasterSurface::materialize(&journal);

        let mut touched = false;
        for y in 0..40 {
            for x in 0..80 {
                if raster.sample(x, y) != Some(Color::WHITE) {
                    touched = true;
                }
            }
        }
        assert!(touched, "text placement left the canvas blank");
    }
}
