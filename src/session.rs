//! An editing session: pristine source bytes plus the operation log.
//!
//! The session is the caller-facing layer over the replay engine. It owns
//! the one invariant everything else depends on: the source bytes loaded at
//! the start of a session are held immutably for its whole duration and are
//! what every render decodes — operations compound on the pristine source,
//! never on a previously transformed output. Loading a new source replaces
//! the bytes and clears the log wholesale.
//!
//! Undo and redo are cursor movement on the log; a render after an undo
//! simply replays the shorter prefix. A failed render leaves the session
//! untouched, so the caller can surface the error and keep the prior
//! preview.

use crate::format::OutputFormat;
use crate::imaging::{ImageCodec, Quality};
use crate::ops::{EditOp, LogEntry, OperationError, OperationLog};
use crate::pipeline::{PipelineError, PipelineResult, apply_pipeline};

pub struct EditSession {
    original: Vec<u8>,
    log: OperationLog,
}

impl EditSession {
    /// Start a session over the given source bytes.
    pub fn new(original: Vec<u8>) -> Self {
        Self {
            original,
            log: OperationLog::new(),
        }
    }

    /// Replace the source image. The previous log is cleared wholesale.
    pub fn load(&mut self, original: Vec<u8>) {
        self.original = original;
        self.log.clear();
    }

    /// The pristine source bytes, exactly as loaded.
    pub fn original(&self) -> &[u8] {
        &self.original
    }

    /// Validate and record an edit. Rejected edits leave the log unchanged.
    pub fn append(&mut self, op: EditOp) -> Result<(), OperationError> {
        self.log.append(op)
    }

    pub fn undo(&mut self) -> bool {
        self.log.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.log.redo()
    }

    /// The active history, oldest first, for audit display.
    pub fn history(&self) -> &[LogEntry] {
        self.log.active()
    }

    /// The format most recently chosen through a [`EditOp::ConvertFormat`]
    /// in the active log, if any. Purely a reading of the audit trail —
    /// rendering still takes the target format explicitly.
    pub fn chosen_format(&self) -> Option<OutputFormat> {
        self.log.active().iter().rev().find_map(|entry| match entry.op {
            EditOp::ConvertFormat { to } => Some(to),
            _ => None,
        })
    }

    /// Replay the active log from the pristine source and encode.
    pub fn render(
        &self,
        codec: &impl ImageCodec,
        target_format: OutputFormat,
        quality: Quality,
    ) -> Result<PipelineResult, PipelineError> {
        let ops = self.log.active_ops();
        apply_pipeline(codec, &self.original, &ops, target_format, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RasterCodec;
    use crate::imaging::codec::tests::sample_png;

    fn session_over(width: u32, height: u32) -> EditSession {
        EditSession::new(sample_png(width, height))
    }

    #[test]
    fn render_replays_from_pristine_source() {
        let codec = RasterCodec::new();
        let mut session = session_over(400, 300);
        session.append(EditOp::RotateRight).unwrap();

        let first = session.render(&codec, OutputFormat::Png, Quality::default()).unwrap();
        assert_eq!((first.width, first.height), (300, 400));

        // A second rotate compounds on the source, not on the first render:
        // two rotations of 400x300 land back at 400x300.
        session.append(EditOp::RotateRight).unwrap();
        let second = session.render(&codec, OutputFormat::Png, Quality::default()).unwrap();
        assert_eq!((second.width, second.height), (400, 300));

        // The source bytes were never overwritten
        assert_eq!(session.original(), sample_png(400, 300));
    }

    #[test]
    fn undo_renders_the_shorter_prefix() {
        let codec = RasterCodec::new();
        let mut session = session_over(400, 300);
        session.append(EditOp::RotateRight).unwrap();
        session
            .append(EditOp::Resize {
                width: Some(100),
                height: Some(100),
            })
            .unwrap();

        assert!(session.undo());
        let result = session.render(&codec, OutputFormat::Png, Quality::default()).unwrap();
        assert_eq!((result.width, result.height), (300, 400));

        assert!(session.redo());
        let result = session.render(&codec, OutputFormat::Png, Quality::default()).unwrap();
        assert_eq!((result.width, result.height), (100, 100));
    }

    #[test]
    fn load_replaces_source_and_clears_log() {
        let mut session = session_over(40, 30);
        session.append(EditOp::FlipHorizontal).unwrap();

        session.load(sample_png(20, 20));
        assert!(session.history().is_empty());

        let codec = RasterCodec::new();
        let result = session.render(&codec, OutputFormat::Png, Quality::default()).unwrap();
        assert_eq!((result.width, result.height), (20, 20));
    }

    #[test]
    fn chosen_format_reads_latest_convert_entry() {
        let mut session = session_over(10, 10);
        assert_eq!(session.chosen_format(), None);

        session
            .append(EditOp::ConvertFormat {
                to: OutputFormat::Jpeg,
            })
            .unwrap();
        session.append(EditOp::FlipVertical).unwrap();
        session
            .append(EditOp::ConvertFormat {
                to: OutputFormat::Webp,
            })
            .unwrap();
        assert_eq!(session.chosen_format(), Some(OutputFormat::Webp));

        // Undoing past the last convert changes the reading
        session.undo();
        assert_eq!(session.chosen_format(), Some(OutputFormat::Jpeg));
    }

    #[test]
    fn failed_render_leaves_session_intact() {
        let codec = RasterCodec::new();
        let mut session = EditSession::new(b"corrupt".to_vec());
        session.append(EditOp::RotateRight).unwrap();

        assert!(session.render(&codec, OutputFormat::Png, Quality::default()).is_err());
        // History survives; a caller can show the error and carry on
        assert_eq!(session.history().len(), 1);
    }
}
