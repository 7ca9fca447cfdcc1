//! Waveform data model for the onda raw PCM editor.
//!
//! This crate holds the state the editor mutates and nothing else:
//!
//! - [`Wave`]: one sample buffer plus its metadata and selection bounds,
//!   with the in-place editing primitives (reverse, gain scaling)
//! - [`Session`]: the ordered wave collection and the active-wave cursor
//!   every command addresses
//!
//! File I/O and playback live in `onda-io`; line parsing and the
//! interactive loop live in the `onda` binary. Keeping this crate free of
//! I/O means every invariant (selection resolution, frame arithmetic,
//! the modified flag) is testable without touching a disk or a device.

mod session;
mod wave;

pub use session::Session;
pub use wave::{Bound, BoundOp, BoundUnit, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE, Wave};

/// Addressing errors reported to the operator.
///
/// Both variants leave the session untouched; they exist so the shell can
/// print a message and keep going.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `s <index>` command named a wave outside the session.
    #[error("wave [{0}] doesn't exist")]
    WaveNotFound(i64),

    /// A wave-addressed command ran while no wave was selected.
    #[error("no wave selected")]
    NoSelection,
}

/// Convenience result type for session operations.
pub type Result<T> = std::result::Result<T, Error>;
