use crate::canvas::model::{
    CanvasCommand, Color, Tool, MAX_BRUSH_WIDTH, MAX_TEXT_SIZE, MIN_BRUSH_WIDTH, MIN_TEXT_SIZE,
};

/// Tool state carried between events.
///
/// Handlers take the state by reference and return the updated value together
/// with any command to record, so each event reads the state it was
/// dispatched with and nothing couples handlers through hidden mutation.
/// Dialog outcomes arrive as `Option` values: `Some` confirms, `None` is a
/// cancelled dialog and leaves the state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub tool: Tool,
    pub brush_color: Color,
    pub brush_width: u32,
    pub text_size: f32,
    pub pending_text: Option<String>,
    pub last_point: Option<(i32, i32)>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            brush_color: Color::BLACK,
            brush_width: 2,
            text_size: 18.0,
            pending_text: None,
            last_point: None,
        }
    }
}

impl SessionState {
    /// Color a stroke stamps with right now. Erasing overwrites with the
    /// canvas background, which is the documented color-stamp semantic rather
    /// than true transparency.
    pub fn stroke_color(&self, background: Color) -> Color {
        match self.tool {
            Tool::Eraser => background,
            Tool::Brush | Tool::Text => self.brush_color,
        }
    }

    /// Primary button pressed at a canvas coordinate. Consumes pending text
    /// when there is any; otherwise the point becomes the start of a stroke.
    pub fn pointer_pressed(&self, point: (i32, i32)) -> (Self, Option<CanvasCommand>) {
        if self.tool == Tool::Text {
            let mut next = self.clone();
            let Some(text) = next.pending_text.take() else {
                return (next, None);
            };
            next.tool = Tool::Brush;
            next.last_point = None;
            let command = CanvasCommand::Text {
                anchor: point,
                text,
                color: self.brush_color,
                size: self.text_size,
            };
            return (next, Some(command));
        }

        let mut next = self.clone();
        next.last_point = Some(point);
        (next, None)
    }

    /// Primary-button drag sample. Emits the segment from the previous sample
    /// to this one; the first sample after a press or release only seeds the
    /// last point.
    pub fn pointer_moved(
        &self,
        point: (i32, i32),
        background: Color,
    ) -> (Self, Option<CanvasCommand>) {
        if self.tool == Tool::Text {
            return (self.clone(), None);
        }

        let mut next = self.clone();
        let command = next.last_point.map(|from| CanvasCommand::Segment {
            from,
            to: point,
            color: self.stroke_color(background),
            width: self.brush_width,
        });
        next.last_point = Some(point);
        (next, command)
    }

    /// Primary button released. The next drag starts a fresh stroke.
    pub fn pointer_released(&self) -> Self {
        let mut next = self.clone();
        next.last_point = None;
        next
    }

    /// Eyedropper result from sampling the raster. `None` (out of bounds) is
    /// a no-op.
    pub fn color_sampled(&self, sampled: Option<Color>) -> Self {
        let mut next = self.clone();
        if let Some(color) = sampled {
            next.brush_color = color;
        }
        next
    }

    /// Outcome of the color picker dialog.
    pub fn color_chosen(&self, choice: Option<Color>) -> Self {
        let mut next = self.clone();
        if let Some(color) = choice {
            next.brush_color = color;
        }
        next
    }

    /// Outcome of the text prompt. A confirmed non-empty string arms text
    /// placement for the next canvas click.
    pub fn text_queued(&self, entry: Option<String>) -> Self {
        let mut next = self.clone();
        match entry {
            Some(text) if !text.is_empty() => {
                next.pending_text = Some(text);
                next.tool = Tool::Text;
                next.last_point = None;
            }
            _ => {}
        }
        next
    }

    pub fn select_brush(&self) -> Self {
        let mut next = self.clone();
        next.tool = Tool::Brush;
        next
    }

    pub fn select_eraser(&self) -> Self {
        let mut next = self.clone();
        next.tool = Tool::Eraser;
        next
    }

    pub fn with_brush_width(&self, width: u32) -> Self {
        let mut next = self.clone();
        next.brush_width = width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH);
        next
    }

    pub fn with_text_size(&self, size: f32) -> Self {
        let mut next = self.clone();
        next.text_size = size.clamp(MIN_TEXT_SIZE, MAX_TEXT_SIZE);
        next
    }
}
