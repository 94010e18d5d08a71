use crate::canvas::model::{CanvasBaseline, CanvasCommand, Color};

/// Append-only record of everything drawn since the last clear.
///
/// The journal is the single authority for canvas contents: the raster buffer
/// and the on-screen texture are both materialized from it, so the two can
/// never disagree about what was drawn. Lifecycle operations mutate the
/// baseline instead of the command list; `revision` advances on every change
/// so downstream surfaces know when to refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandJournal {
    baseline: CanvasBaseline,
    commands: Vec<CanvasCommand>,
    revision: u64,
    epoch: u64,
}

impl Default for CommandJournal {
    fn default() -> Self {
        Self::new(CanvasBaseline::default())
    }
}

impl CommandJournal {
    pub fn new(baseline: CanvasBaseline) -> Self {
        Self {
            baseline,
            commands: Vec::new(),
            revision: 0,
            epoch: 0,
        }
    }

    pub fn baseline(&self) -> CanvasBaseline {
        self.baseline
    }

    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Advances whenever the baseline changes (clear, resize, recolor).
    /// Surfaces that materialized an older epoch must replay from scratch
    /// rather than apply appended commands incrementally.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn record(&mut self, command: CanvasCommand) {
        self.commands.push(command);
        self.revision += 1;
    }

    /// Discard all drawn content, keeping dimensions and background.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.revision += 1;
        self.epoch += 1;
    }

    /// Change the canvas dimensions. Recorded commands are kept; replay clips
    /// anything outside the new bounds.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.baseline.width = width;
        self.baseline.height = height;
        self.revision += 1;
        self.epoch += 1;
    }

    /// Change the background color. Recorded commands are kept and replayed
    /// over the new background.
    pub fn set_background(&mut self, background: Color) {
        self.baseline.background = background;
        self.revision += 1;
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(x: i32) -> CanvasCommand {
        CanvasCommand::Segment {
            from: (x, 0),
            to: (x, 10),
            color: Color::BLACK,
            width: 1,
        }
    }

    #[test]
    fn record_appends_and_bumps_revision() {
        let mut journal = CommandJournal::default();
        assert_eq!(journal.revision(), 0);

        journal.record(segment(1));
        journal.record(segment(2));
        assert_eq!(journal.commands().len(), 2);
        assert_eq!(journal.revision(), 2);
    }

    #[test]
    fn clear_drops_commands_but_keeps_baseline() {
        let mut journal = CommandJournal::new(CanvasBaseline {
            width: 64,
            height: 32,
            background: Color::rgb(200, 10, 10),
        });
        journal.record(segment(1));

        journal.clear();
        assert!(journal.commands().is_empty());
        assert_eq!(journal.baseline().width, 64);
        assert_eq!(journal.baseline().background, Color::rgb(200, 10, 10));
    }

    #[test]
    fn resize_and_recolor_keep_recorded_commands() {
        let mut journal = CommandJournal::default();
        journal.record(segment(5));
        let before = journal.revision();

        journal.resize(100, 50);
        journal.set_background(Color::BLACK);

        assert_eq!(journal.commands().len(), 1);
        assert_eq!(journal.baseline().width, 100);
        assert_eq!(journal.baseline().height, 50);
        assert_eq!(journal.baseline().background, Color::BLACK);
        assert_eq!(journal.revision(), before + 2);
    }
}
