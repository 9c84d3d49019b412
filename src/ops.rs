//! The edit operation log: typed operations, append-only history, undo cursor.
//!
//! Operations are a closed sum type — a malformed operation kind is a
//! compile-time impossibility, and the only runtime validation left is the
//! zero-dimension resize check performed once, at append time. Replay never
//! validates: the engine treats anything the log can hold as total input.
//!
//! ## Log shape
//!
//! [`OperationLog`] is an arena plus an index. Entries are immutable once
//! appended and never reordered; "current state" is the cursor, so undo and
//! redo are index movement, and appending after an undo truncates the redo
//! tail first. The whole log is cleared wholesale when a new source image is
//! loaded — there is no partial removal.
//!
//! ## Textual forms
//!
//! Every operation has a flag form (for `--op`) and a JSON form (for ops
//! files), both round-tripping:
//!
//! - `"rotate-right"`, `"rotate-left"`, `"flip-h"`, `"flip-v"`
//! - `"resize=800x600"`, `"resize=800x"` (width only), `"resize=x600"`
//! - `"convert=png"`
//!
//! JSON uses the same kebab-case tags: `"rotate-right"`,
//! `{"resize":{"width":800,"height":null}}`, `{"convert-format":{"to":"png"}}`.

use crate::format::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("resize dimensions must be positive (got {width:?} x {height:?})")]
    ZeroResizeDimension {
        width: Option<u32>,
        height: Option<u32>,
    },
}

/// A single non-destructive edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditOp {
    RotateRight,
    RotateLeft,
    FlipHorizontal,
    FlipVertical,
    Resize {
        width: Option<u32>,
        height: Option<u32>,
    },
    /// No pixel effect; records the user's chosen export format so the log
    /// is a complete audit trail of intent. The target format is applied
    /// only at the final encode.
    ConvertFormat { to: OutputFormat },
}

impl EditOp {
    /// Append-time validation. Replay is deliberately more permissive.
    fn validate(&self) -> Result<(), OperationError> {
        if let EditOp::Resize { width, height } = self
            && (*width == Some(0) || *height == Some(0))
        {
            return Err(OperationError::ZeroResizeDimension {
                width: *width,
                height: *height,
            });
        }
        Ok(())
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::RotateRight => f.write_str("rotate-right"),
            EditOp::RotateLeft => f.write_str("rotate-left"),
            EditOp::FlipHorizontal => f.write_str("flip-h"),
            EditOp::FlipVertical => f.write_str("flip-v"),
            EditOp::Resize { width, height } => {
                let w = width.map(|v| v.to_string()).unwrap_or_default();
                let h = height.map(|v| v.to_string()).unwrap_or_default();
                write!(f, "resize={w}x{h}")
            }
            EditOp::ConvertFormat { to } => write!(f, "convert={to}"),
        }
    }
}

impl FromStr for EditOp {
    type Err = String;

    /// Parse the flag form. See the [module docs](self) for the grammar.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "rotate-right" => return Ok(EditOp::RotateRight),
            "rotate-left" => return Ok(EditOp::RotateLeft),
            "flip-h" | "flip-horizontal" => return Ok(EditOp::FlipHorizontal),
            "flip-v" | "flip-vertical" => return Ok(EditOp::FlipVertical),
            _ => {}
        }
        if let Some(spec) = normalized.strip_prefix("resize=") {
            return parse_resize(spec);
        }
        if let Some(name) = normalized.strip_prefix("convert=") {
            let to = name.parse::<OutputFormat>()?;
            return Ok(EditOp::ConvertFormat { to });
        }
        Err(format!(
            "unknown operation '{value}'. Expected rotate-right, rotate-left, flip-h, \
             flip-v, resize=WxH, or convert=FORMAT"
        ))
    }
}

fn parse_resize(spec: &str) -> Result<EditOp, String> {
    let parse_side = |side: &str| -> Result<Option<u32>, String> {
        if side.is_empty() {
            return Ok(None);
        }
        match side.parse::<u32>() {
            Ok(0) => Err(format!("resize dimension must be positive in '{spec}'")),
            Ok(v) => Ok(Some(v)),
            Err(_) => Err(format!("invalid resize dimension '{side}' in '{spec}'")),
        }
    };

    let (width, height) = match spec.split_once('x') {
        Some((w, h)) => (parse_side(w)?, parse_side(h)?),
        // Bare number means width
        None => (parse_side(spec)?, None),
    };
    if width.is_none() && height.is_none() {
        return Err(format!("resize needs at least one dimension, got '{spec}'"));
    }
    Ok(EditOp::Resize { width, height })
}

/// An appended operation plus its creation timestamp, kept for audit and
/// ordering display. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub op: EditOp,
    pub recorded_at: SystemTime,
}

/// Append-only operation history with an undo cursor.
#[derive(Debug, Clone, Default)]
pub struct OperationLog {
    entries: Vec<LogEntry>,
    cursor: usize,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append, discarding any redo tail past the cursor.
    pub fn append(&mut self, op: EditOp) -> Result<(), OperationError> {
        op.validate()?;
        self.entries.truncate(self.cursor);
        self.entries.push(LogEntry {
            op,
            recorded_at: SystemTime::now(),
        });
        self.cursor = self.entries.len();
        Ok(())
    }

    /// Step the cursor back one operation. Returns false at the beginning.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step the cursor forward over an undone operation. Returns false at
    /// the end.
    pub fn redo(&mut self) -> bool {
        if self.cursor == self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Drop the whole history, redo tail included.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// The entries up to the cursor — what a replay executes, in insertion
    /// order.
    pub fn active(&self) -> &[LogEntry] {
        &self.entries[..self.cursor]
    }

    /// The active operations, cloned for handing to the replay engine.
    pub fn active_ops(&self) -> Vec<EditOp> {
        self.active().iter().map(|entry| entry.op.clone()).collect()
    }

    /// Number of active operations (excludes an undone tail).
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }
}
