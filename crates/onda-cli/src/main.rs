//! Onda - interactive editor for raw f32 PCM streams.

mod command;
mod config;
mod shell;

use anyhow::Context;
use clap::Parser;
use onda_core::Session;
use onda_io::ByteOrder;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

/// Interactive editor for headerless 32-bit float PCM streams.
///
/// Raw streams carry no metadata, so the byte order, sample rate and
/// channel count given here apply to every file loaded in this session.
#[derive(Parser)]
#[command(name = "onda", version, about = "Interactive editor for raw f32 PCM streams", long_about = None)]
struct Cli {
    /// Wave files to load at startup, in order
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Stream byte order: f32le or f32be
    #[arg(short, long)]
    format: Option<String>,

    /// Sample rate of loaded streams, in Hz
    #[arg(short, long)]
    sample_rate: Option<u32>,

    /// Channel count of loaded streams
    #[arg(short, long)]
    channels: Option<u16>,

    /// Playback device (index, exact name, or partial name)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Log to stderr so the REPL output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let defaults = config::Defaults::load()?;

    let order: ByteOrder = cli
        .format
        .as_deref()
        .unwrap_or(&defaults.format)
        .parse()
        .context("check -f / the config file")?;
    let sample_rate = cli.sample_rate.unwrap_or(defaults.sample_rate);
    let channels = cli.channels.unwrap_or(defaults.channels);

    let mut session = Session::new();
    for path in &cli.files {
        let wave = onda_io::load_wave(path, order, sample_rate, channels)?;
        session.add(wave);
    }
    tracing::info!(waves = session.len(), %order, sample_rate, channels, "session ready");

    // Ctrl-C interrupts playback instead of killing the shell mid-edit.
    let interrupt = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&interrupt);
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))?;

    let mut shell = shell::Shell::new(
        session,
        shell::StreamDefaults {
            order,
            sample_rate,
            channels,
        },
        cli.output,
        interrupt,
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell.run(&mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
