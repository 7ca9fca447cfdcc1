//! Raw sample I/O for the onda editor.
//!
//! This crate provides:
//!
//! - **Byte-order codec**: [`decode`] and [`encode`] between headerless
//!   f32 byte streams and sample buffers, plus whole-file
//!   [`read_samples`] / [`write_samples`]
//! - **Wave I/O**: [`load_wave`] and [`save_wave`] building and
//!   persisting `onda_core::Wave`s
//! - **Playback**: [`play`] for streaming a buffer to an output device
//!
//! The streams this crate reads and writes carry no header: sample rate
//! and channel count are external knowledge, and the only on-disk
//! convention is the byte order ([`ByteOrder`]).

mod codec;
mod stream;
mod wave_io;

pub use codec::{ByteOrder, decode, encode, read_samples, write_samples};
pub use stream::play;
pub use wave_io::{load_wave, save_wave};

use std::path::PathBuf;

/// Error types for raw I/O and playback.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to open or read a stream file.
    #[error("unable to read {path}: {source}")]
    Read {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or write a stream file.
    #[error("unable to write {path}: {source}")]
    Write {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A format name other than `f32le` / `f32be`.
    #[error("unknown wave format '{0}' (expected f32le or f32be)")]
    UnknownFormat(String),

    /// Audio stream setup or runtime error.
    #[error("audio stream error: {0}")]
    Stream(String),

    /// No audio output device available on the system.
    #[error("no audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("device not found: {0}")]
    DeviceNotFound(String),
}

/// Convenience result type for raw I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
