/// Largest accepted canvas edge. Keeps a typo in the resize prompt from
/// allocating a multi-gigabyte buffer.
pub const MAX_CANVAS_DIM: u32 = 4096;

pub const MIN_BRUSH_WIDTH: u32 = 1;
pub const MAX_BRUSH_WIDTH: u32 = 10;

pub const MIN_TEXT_SIZE: f32 = 6.0;
pub const MAX_TEXT_SIZE: f32 = 48.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Brush,
    Eraser,
    Text,
}

/// Opaque RGB color. `#rrggbb` is the interchange form used by the hex field
/// in the color prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_color32(self) -> eframe::egui::Color32 {
        eframe::egui::Color32::from_rgb(self.r, self.g, self.b)
    }

    pub fn from_color32(color: eframe::egui::Color32) -> Self {
        Self::rgb(color.r(), color.g(), color.b())
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

/// Canvas dimensions plus background color. Everything drawn since the last
/// clear is replayed over this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasBaseline {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl Default for CanvasBaseline {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            background: Color::WHITE,
        }
    }
}

/// One recorded drawing operation in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Segment {
        from: (i32, i32),
        to: (i32, i32),
        color: Color,
        width: u32,
    },
    Text {
        anchor: (i32, i32),
        text: String,
        color: Color,
        size: f32,
    },
}

/// Validate the resize prompt's raw input. The error string is shown to the
/// user verbatim.
pub fn parse_canvas_size(width: &str, height: &str) -> Result<(u32, u32), String> {
    let parse = |label: &str, raw: &str| -> Result<u32, String> {
        let value: u32 = raw
            .trim()
            .parse()
            .map_err(|_| format!("{label} must be a whole number"))?;
        if value == 0 {
            return Err(format!("{label} must be at least 1"));
        }
        if value > MAX_CANVAS_DIM {
            return Err(format!("{label} must be at most {MAX_CANVAS_DIM}"));
        }
        Ok(value)
    };
    Ok((parse("width", width)?, parse("height", height)?))
}
