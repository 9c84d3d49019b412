//! # Darkroom
//!
//! A non-destructive raster image editing core. The source image is loaded
//! once and held immutably; edits are an append-only log of typed
//! operations; every preview or export replays the whole log against the
//! pristine source and encodes once.
//!
//! # Architecture: Replay, Not Mutation
//!
//! ```text
//! original bytes ──decode──▶ buffer ──op₁──▶ ... ──opₙ──▶ buffer ──encode──▶ export
//!        ▲                                                                    │
//!        └──────────────── every render starts here ◀────────────────────────┘
//! ```
//!
//! Operations never compound on a mutated image — they always compound on
//! the pristine source. That one invariant buys three properties:
//!
//! - **Deterministic replay**: the same (bytes, log, format, quality) always
//!   produces the same output, byte for byte.
//! - **Trivial undo**: "current state" is just an index into the log;
//!   undoing is replaying a shorter prefix.
//! - **No generation loss**: a JPEG rotated ten times is decoded and
//!   re-encoded once, not ten times.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`format`] | Closed output-format enum with total extension/MIME mappings |
//! | [`imaging`] | Pixel layer — codec seam, pure transforms, dimension math |
//! | [`ops`] | Typed edit operations and the append-only log with undo cursor |
//! | [`pipeline`] | Stateless replay engine: decode → fold ops → encode |
//! | [`session`] | Source bytes + log + undo/redo, the caller-facing surface |
//! | [`thumbs`] | Memoized center-crop thumbnails, always PNG, mutex-guarded |
//! | [`config`] | Optional flat `darkroom.toml` loading and validation |
//! | [`output`] | CLI output formatting — pure format functions |
//!
//! # Design Decisions
//!
//! ## Closed Format Set
//!
//! Export formats are a five-variant enum (JPEG, PNG, BMP, GIF, WEBP) with
//! exhaustive matches for extensions and MIME types in both directions.
//! There is no "unknown format defaults to JPEG" path; adding a format is a
//! compile-time checklist, not a runtime fallback.
//!
//! ## Surfaced WEBP Fallback
//!
//! When the compiled-in encoders cannot write WEBP, the codec substitutes
//! PNG and says so: the returned format always names the bytes actually
//! written, so filenames and MIME labels derived from it are never wrong.
//!
//! ## Pure-Rust Imaging
//!
//! All codecs come from the `image` crate — pure Rust, statically linked,
//! no system dependencies. The five decoders and encoders this tool needs
//! are compiled in via cargo features and nothing else is.
//!
//! ## Permissive Replay, Strict Append
//!
//! The engine never rejects an operation: an unbounded resize replays as a
//! no-op so replay is total over any log. Validation happens exactly once,
//! at append time, where a zero-dimension resize is refused. One strict
//! point, no mid-replay surprises.

pub mod config;
pub mod format;
pub mod imaging;
pub mod ops;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod thumbs;
