//! Playback of an interleaved sample buffer via cpal.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Extract device name via `description()` (cpal 0.17+).
fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Play an interleaved buffer once, blocking until it finishes.
///
/// `samples` is interleaved with `channels` samples per frame, exactly
/// as the wave stores it. The device plays at its own default
/// configuration; frames are mapped onto the device layout (mono output
/// mixes the first two channels down, stereo passes them through,
/// channels past the second are silenced). Returns early when `stop` is
/// raised, which is how Ctrl-C interrupts playback without tearing down
/// the shell.
pub fn play(
    samples: Arc<[f32]>,
    channels: u16,
    sample_rate: u32,
    device: Option<&str>,
    stop: Arc<AtomicBool>,
) -> Result<()> {
    let host = cpal::default_host();
    let device = match device {
        Some(name) => find_output_device(&host, name)?,
        None => host.default_output_device().ok_or(Error::NoDevice)?,
    };
    let config = device
        .default_output_config()
        .map_err(|e| Error::Stream(e.to_string()))?;

    let src_channels = channels.max(1) as usize;
    let out_channels = config.channels() as usize;
    let total_frames = samples.len() / src_channels;
    if total_frames == 0 {
        return Ok(());
    }

    tracing::info!(
        device = %device_name(&device).unwrap_or_else(|_| "unknown".into()),
        device_rate = config.sample_rate(),
        wave_rate = sample_rate,
        frames = total_frames,
        "starting playback"
    );
    if config.sample_rate() != sample_rate {
        tracing::warn!(
            wave_rate = sample_rate,
            device_rate = config.sample_rate(),
            "device rate differs from wave rate; playing without resampling"
        );
    }

    let done = Arc::new(AtomicBool::new(false));
    let position = Arc::new(AtomicUsize::new(0));

    let cb_done = Arc::clone(&done);
    let cb_position = Arc::clone(&position);
    let cb_samples = Arc::clone(&samples);

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let frames = data.len() / out_channels;
                let mut pos = cb_position.load(Ordering::Relaxed);

                for i in 0..frames {
                    let idx = i * out_channels;
                    if pos >= total_frames {
                        data[idx..].fill(0.0);
                        cb_done.store(true, Ordering::Relaxed);
                        break;
                    }

                    let frame = &cb_samples[pos * src_channels..(pos + 1) * src_channels];
                    let (l, r) = if src_channels == 1 {
                        (frame[0], frame[0])
                    } else {
                        (frame[0], frame[1])
                    };

                    if out_channels == 1 {
                        data[idx] = (l + r) * 0.5;
                    } else {
                        data[idx] = l;
                        data[idx + 1] = r;
                        for c in 2..out_channels {
                            data[idx + c] = 0.0;
                        }
                    }

                    pos += 1;
                }

                cb_position.store(pos, Ordering::Relaxed);
            },
            |err| tracing::error!("output stream error: {err}"),
            None,
        )
        .map_err(|e| Error::Stream(e.to_string()))?;

    stream.play().map_err(|e| Error::Stream(e.to_string()))?;

    while !done.load(Ordering::Relaxed) && !stop.load(Ordering::Relaxed) {
        std::thread::sleep(Duration::from_millis(50));
    }
    // Give the device one more buffer to drain the tail before the
    // stream drops.
    std::thread::sleep(Duration::from_millis(50));

    Ok(())
}

/// Find an output device by index, exact name, or partial name.
fn find_output_device(host: &Host, name_or_index: &str) -> Result<Device> {
    let devices: Vec<_> = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();

    // Try parsing as index first
    if let Ok(index) = name_or_index.parse::<usize>() {
        return devices.get(index).cloned().ok_or_else(|| {
            Error::DeviceNotFound(format!(
                "output device index {} (only {} devices available)",
                index,
                devices.len()
            ))
        });
    }

    // Try exact match
    for device in &devices {
        if device_name(device).is_ok_and(|n| n == name_or_index) {
            return Ok(device.clone());
        }
    }

    // Try case-insensitive partial match
    let search_lower = name_or_index.to_lowercase();
    let mut matches: Vec<_> = devices
        .iter()
        .filter(|d| {
            device_name(d).is_ok_and(|name| name.to_lowercase().contains(&search_lower))
        })
        .cloned()
        .collect();

    if matches.is_empty() {
        Err(Error::DeviceNotFound(format!(
            "no output device matching '{name_or_index}'"
        )))
    } else {
        Ok(matches.remove(0))
    }
}
