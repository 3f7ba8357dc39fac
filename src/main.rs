//! Plays one or more sine tones on the default output device until the
//! duration elapses or Enter is pressed.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufRead;
use std::thread;
use std::time::Duration;
use tonestream::config::{
    DEFAULT_BUFFER_SIZE, DEFAULT_CHANNELS, DEFAULT_FREQUENCY, DEFAULT_MASTER_GAIN,
    DEFAULT_SAMPLE_RATE,
};
use tonestream::{
    AudioOutput, BridgeSettings, Normalization, SampleFormat, SineOscillator, StopSignal,
    StreamSettings, StreamingBridge,
};

/// Continuous sine tone generator
#[derive(Parser, Debug)]
#[command(name = "tonestream")]
#[command(about = "Stream phase-continuous sine tones to the default audio device")]
struct Cli {
    /// Tone frequency in Hz; repeat to mix several tones
    #[arg(short, long = "frequency", default_values_t = [DEFAULT_FREQUENCY])]
    frequencies: Vec<f64>,

    /// Samples per second
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Frames per driver callback
    #[arg(short, long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Master volume applied after mixing
    #[arg(short, long, default_value_t = DEFAULT_MASTER_GAIN)]
    gain: f64,

    /// Output sample format: i16, i32, u16 or f32
    #[arg(long, default_value = "i16")]
    format: SampleFormat,

    /// How summed tones are kept in range: divide or clip
    #[arg(long, default_value = "divide")]
    normalization: Normalization,

    /// Output channels (each carries the same tone)
    #[arg(long, default_value_t = DEFAULT_CHANNELS)]
    channels: u16,

    /// Stop after this many seconds instead of waiting for Enter
    #[arg(short, long)]
    duration: Option<f64>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Everything is validated before the device is opened.
    let settings = StreamSettings {
        sample_rate: cli.sample_rate,
        channels: cli.channels,
        buffer_size: cli.buffer_size,
        sample_format: cli.format,
    };
    settings.validate()?;
    let duration = cli
        .duration
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("--duration must be a non-negative number of seconds")?;

    let mut bridge = StreamingBridge::new(BridgeSettings {
        buffer_size: cli.buffer_size,
        master_gain: cli.gain,
        normalization: cli.normalization,
    })?;
    for &frequency in &cli.frequencies {
        bridge.add_oscillator(SineOscillator::new(frequency, cli.sample_rate)?);
    }

    let output = AudioOutput::open(settings, bridge).context("failed to open audio output")?;
    output.start().context("failed to start audio output")?;

    let outcome = match duration {
        Some(duration) => {
            tracing::info!("playing {:?} for {:.1}s", cli.frequencies, duration.as_secs_f64());
            output.wait_timeout(duration).map(|_| ())
        }
        None => {
            tracing::info!("playing {:?}, press Enter to stop", cli.frequencies);
            let stop = output.stop_handle();
            thread::spawn(move || stop_on_enter(std::io::stdin().lock(), &stop));
            output.wait()
        }
    };

    // The stream is released before a failure is reported.
    drop(output);
    if let Err(err) = &outcome {
        let cause = if err.is_device_error() {
            "a device failure"
        } else {
            "an error"
        };
        tracing::error!("playback ended by {}: {}", cause, err);
    }
    outcome.context("audio output failed")?;
    Ok(())
}

/// Requests a stop once a line arrives on `input`.
///
/// A closed or unreadable input leaves playback running, so the tone can
/// still be ended by `--duration` or a signal. Returns true if a stop was
/// requested.
fn stop_on_enter(mut input: impl BufRead, stop: &StopSignal) -> bool {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => {
            tracing::warn!("stdin is closed, Enter cannot stop playback");
            false
        }
        Ok(_) => {
            stop.request_stop();
            true
        }
        Err(err) => {
            tracing::warn!("failed to read stdin, Enter cannot stop playback: {}", err);
            false
        }
    }
}
