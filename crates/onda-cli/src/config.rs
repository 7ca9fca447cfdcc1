//! Startup defaults loaded from the user configuration file.
//!
//! The file lives at `<config dir>/onda/config.toml` (e.g.
//! `~/.config/onda/config.toml` on Linux) and supplies the stream
//! conventions used when the matching command-line flag is absent:
//!
//! ```toml
//! format = "f32be"
//! sample_rate = 44100
//! channels = 1
//! ```
//!
//! A missing file means built-in defaults; a file that exists but does
//! not parse is an error at startup rather than a silent fallback.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application name used for the config directory.
const APP_NAME: &str = "onda";

/// Stream defaults used when no command-line flag overrides them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Byte-order name (`f32le` or `f32be`).
    pub format: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            format: "f32le".to_string(),
            sample_rate: 48000,
            channels: 2,
        }
    }
}

impl Defaults {
    /// Path of the user config file.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join("config.toml")
    }

    /// Load the user config file, falling back to built-ins when absent.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load defaults from an explicit path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let defaults =
            toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(defaults)
    }
}
