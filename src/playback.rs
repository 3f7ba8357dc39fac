//! Audio output through cpal.
//!
//! [`AudioOutput`] is the device collaborator: it opens the default output
//! device, hands the [`StreamingBridge`] to cpal's data callback, and releases
//! the stream when dropped, whichever way the owner exits.

use crate::bridge::{StopSignal, StreamingBridge};
use crate::config::StreamSettings;
use crate::sample::{OutputSample, SampleFormat};
use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// An open output stream fed by a streaming bridge.
///
/// The bridge is moved into the audio callback, so the real-time thread
/// never takes a lock. Control happens through the bridge's [`StopSignal`].
///
/// ```no_run
/// use std::time::Duration;
/// use tonestream::{AudioOutput, SineOscillator, StreamSettings, StreamingBridge};
///
/// let settings = StreamSettings::default();
/// let bridge = StreamingBridge::new(settings.bridge_settings())?
///     .with_oscillator(SineOscillator::new(200.0, settings.sample_rate)?);
///
/// let output = AudioOutput::open(settings, bridge)?;
/// output.start()?;
/// output.wait_timeout(Duration::from_secs(2))?;
/// // dropping `output` stops and closes the stream
/// # Ok::<(), tonestream::Error>(())
/// ```
pub struct AudioOutput {
    stream: cpal::Stream,
    settings: StreamSettings,
    stop: StopSignal,
}

impl AudioOutput {
    /// Opens the default output device with `settings`.
    ///
    /// Settings and the bridge are validated before the device is touched.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for bad settings or an empty bridge,
    /// and `Error::Device` if no device is available or the stream cannot be
    /// built.
    pub fn open(settings: StreamSettings, bridge: StreamingBridge) -> Result<Self> {
        settings.validate()?;
        bridge.validate_ready(settings.sample_rate)?;
        let frames = u32::try_from(settings.buffer_size).map_err(|_| {
            Error::invalid_parameter(
                "buffer_size",
                settings.buffer_size,
                "does not fit the driver's frame count",
            )
        })?;
        if bridge.settings().buffer_size != settings.buffer_size {
            debug!(
                bridge = bridge.settings().buffer_size,
                stream = settings.buffer_size,
                "bridge block size differs from stream buffer size, requests will be chunked"
            );
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::device("no output device available"))?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let config = cpal::StreamConfig {
            channels: settings.channels,
            sample_rate: cpal::SampleRate(settings.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(frames),
        };
        let stop = bridge.stop_signal();

        let stream = match settings.sample_format {
            SampleFormat::I16 => build_stream::<i16>(&device, &config, bridge)?,
            SampleFormat::I32 => build_stream::<i32>(&device, &config, bridge)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, bridge)?,
            SampleFormat::F32 => build_stream::<f32>(&device, &config, bridge)?,
        };

        info!(
            device = %device_name,
            sample_rate = settings.sample_rate,
            channels = settings.channels,
            buffer_size = settings.buffer_size,
            format = %settings.sample_format,
            bits = settings.sample_format.bits(),
            "opened audio stream"
        );

        Ok(Self {
            stream,
            settings,
            stop,
        })
    }

    /// Starts pulling buffers from the bridge.
    ///
    /// # Errors
    ///
    /// Returns `Error::Device` if the driver refuses to start the stream.
    pub fn start(&self) -> Result<()> {
        self.stream.play()?;
        info!(
            deadline_ms = self.settings.buffer_period().as_secs_f64() * 1000.0,
            "audio stream started"
        );
        Ok(())
    }

    /// A handle that ends playback from any thread.
    pub fn stop_handle(&self) -> StopSignal {
        self.stop.clone()
    }

    /// The settings the stream was opened with.
    pub fn settings(&self) -> &StreamSettings {
        &self.settings
    }

    /// Blocks until a stop is requested.
    ///
    /// # Errors
    ///
    /// Returns `Error::Device` if the stream ended because the device failed
    /// rather than because a stop was requested.
    pub fn wait(&self) -> Result<()> {
        self.stop.wait();
        self.check_failure()
    }

    /// Blocks until a stop is requested or `timeout` elapses.
    ///
    /// Returns `Ok(true)` if the stop was requested.
    ///
    /// # Errors
    ///
    /// Returns `Error::Device` if the device failed while playing.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<bool> {
        let stopped = self.stop.wait_timeout(timeout);
        self.check_failure()?;
        Ok(stopped)
    }

    /// Surfaces a failure reported by the device's error callback.
    fn check_failure(&self) -> Result<()> {
        match self.stop.take_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Drop for AudioOutput {
    fn drop(&mut self) {
        self.stop.request_stop();
        if let Err(err) = self.stream.pause() {
            warn!("failed to stop audio stream: {}", err);
        }
        info!("released audio stream");
    }
}

/// Builds an output stream whose callback renders into `S` samples.
fn build_stream<S>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut bridge: StreamingBridge,
) -> Result<cpal::Stream>
where
    S: OutputSample + cpal::SizedSample,
{
    let channels = usize::from(config.channels);
    let stop = bridge.stop_signal();

    let stream = device.build_output_stream(
        config,
        move |data: &mut [S], _: &cpal::OutputCallbackInfo| {
            bridge.fill_frames(data, channels);
        },
        move |err: cpal::StreamError| {
            error!("audio stream error: {}", err);
            stop.fail(err.into());
        },
        None,
    )?;
    Ok(stream)
}
