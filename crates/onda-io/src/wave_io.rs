//! Loading and saving waves as raw f32 streams.

use crate::codec::{self, ByteOrder};
use crate::Result;
use onda_core::Wave;
use std::path::Path;

/// Load a raw f32 stream into a new wave.
///
/// The stream has no metadata, so `sample_rate` and `channels` come from
/// the caller; zero for either falls back to the 48 kHz / stereo
/// defaults. The wave's name is the path as given, its selection is
/// unset and its modified flag is clear.
pub fn load_wave<P: AsRef<Path>>(
    path: P,
    order: ByteOrder,
    sample_rate: u32,
    channels: u16,
) -> Result<Wave> {
    let path = path.as_ref();
    let samples = codec::read_samples(path, order)?;
    let wave = Wave::from_samples(path.to_string_lossy(), samples, sample_rate, channels);
    tracing::info!(
        name = %wave.name,
        frames = wave.frames(),
        sample_rate = wave.sample_rate,
        channels = wave.channels,
        "loaded wave"
    );
    Ok(wave)
}

/// Write the wave's entire buffer to `path`, overwriting.
///
/// Selection bounds are ignored; a write always persists the full
/// buffer.
pub fn save_wave<P: AsRef<Path>>(wave: &Wave, path: P, order: ByteOrder) -> Result<()> {
    let path = path.as_ref();
    codec::write_samples(path, wave.samples(), order)?;
    tracing::info!(
        name = %wave.name,
        path = %path.display(),
        frames = wave.frames(),
        "saved wave"
    );
    Ok(())
}
