//! The streaming bridge between the audio driver and the oscillators.
//!
//! The driver calls [`StreamingBridge::on_buffer_request`] once per buffer
//! period on its own real-time thread. The bridge pulls one block from every
//! oscillator, sums them, scales the sum into range, converts it to the
//! driver's sample format and returns. Nothing on that path allocates, locks,
//! or blocks: the mix buffers are sized once at construction.

mod stop;

pub use stop::StopSignal;

use crate::config::{BridgeSettings, Normalization};
use crate::sample::OutputSample;
use crate::{AudioSignal, Error, Result, Signal};
use tracing::debug;

/// What the driver should do after consuming a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Keep streaming
    Continue,
    /// A stop was requested; the block is silence
    Stop,
}

impl Continuation {
    /// Returns true for `Continuation::Continue`.
    pub fn is_continue(self) -> bool {
        self == Continuation::Continue
    }
}

/// Owns the oscillators and answers driver buffer requests.
///
/// # Examples
///
/// ```
/// use tonestream::{BridgeSettings, Continuation, SineOscillator, StreamingBridge};
///
/// let mut bridge = StreamingBridge::new(BridgeSettings::default())?;
/// bridge.add_oscillator(SineOscillator::new(200.0, 44100)?);
/// bridge.add_oscillator(SineOscillator::new(400.0, 44100)?);
///
/// let mut out = [0i16; 1024];
/// assert_eq!(bridge.on_buffer_request(&mut out), Continuation::Continue);
///
/// bridge.stop_signal().request_stop();
/// assert_eq!(bridge.on_buffer_request(&mut out), Continuation::Stop);
/// assert!(out.iter().all(|&s| s == 0));
/// # Ok::<(), tonestream::Error>(())
/// ```
pub struct StreamingBridge {
    settings: BridgeSettings,
    oscillators: Vec<Box<dyn AudioSignal + Send>>,
    /// Running sum for the current block
    mix: Vec<f64>,
    /// One oscillator's block before it is added to `mix`
    scratch: Vec<f64>,
    stop: StopSignal,
}

impl StreamingBridge {
    /// Creates a bridge with no oscillators.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the settings fail validation.
    pub fn new(settings: BridgeSettings) -> Result<Self> {
        settings.validate()?;
        debug!(
            buffer_size = settings.buffer_size,
            master_gain = settings.master_gain,
            normalization = ?settings.normalization,
            "created streaming bridge"
        );
        Ok(Self {
            settings,
            oscillators: Vec::new(),
            mix: vec![0.0; settings.buffer_size],
            scratch: vec![0.0; settings.buffer_size],
            stop: StopSignal::new(),
        })
    }

    /// Adds a source to the mix.
    ///
    /// Call this before handing the bridge to the driver; it may allocate.
    /// The source's sample rate is checked against the stream's by
    /// [`validate_ready`](Self::validate_ready).
    pub fn add_oscillator(&mut self, oscillator: impl AudioSignal + Send + 'static) {
        let sample_rate = oscillator.sample_rate();
        self.oscillators.push(Box::new(oscillator));
        debug!(
            count = self.oscillators.len(),
            sample_rate, "added oscillator to bridge"
        );
    }

    /// Builder form of [`add_oscillator`](Self::add_oscillator).
    pub fn with_oscillator(mut self, oscillator: impl AudioSignal + Send + 'static) -> Self {
        self.add_oscillator(oscillator);
        self
    }

    /// Number of sources in the mix.
    pub fn oscillator_count(&self) -> usize {
        self.oscillators.len()
    }

    /// The settings this bridge was built with.
    pub fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    /// A handle for requesting a stop from any thread.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Checks that the bridge has something to play at `sample_rate`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if no oscillator has been added, or
    /// naming `sample_rate` if any oscillator was built for a different rate
    /// than the stream's (it would play at the wrong pitch).
    pub fn validate_ready(&self, sample_rate: u32) -> Result<()> {
        if self.oscillators.is_empty() {
            return Err(Error::invalid_parameter(
                "oscillators",
                0,
                "at least one oscillator is required",
            ));
        }
        if let Some(mismatch) = self
            .oscillators
            .iter()
            .map(|oscillator| oscillator.sample_rate())
            .find(|&rate| rate != sample_rate)
        {
            return Err(Error::invalid_parameter(
                "sample_rate",
                format!("{} (oscillator at {})", sample_rate, mismatch),
                "every oscillator must run at the stream's sample rate",
            ));
        }
        Ok(())
    }

    /// Fills a mono driver buffer.
    ///
    /// Writes exactly `out.len()` samples and returns
    /// `Continuation::Continue` unless a stop has been requested, in which
    /// case the buffer is silence and the oscillators do not advance.
    pub fn on_buffer_request<S: OutputSample>(&mut self, out: &mut [S]) -> Continuation {
        self.fill_frames(out, 1)
    }

    /// Fills an interleaved driver buffer, writing the same sample to every
    /// channel of a frame.
    ///
    /// Requests longer than the configured buffer size are rendered in
    /// buffer-size chunks, so the oscillators see one continuous stream
    /// either way.
    pub fn fill_frames<S: OutputSample>(&mut self, out: &mut [S], channels: usize) -> Continuation {
        if self.stop.is_stopped() {
            out.fill(S::SILENCE);
            return Continuation::Stop;
        }

        let channels = channels.max(1);
        let frame_count = out.len().div_ceil(channels);
        let mut start = 0;
        while start < frame_count {
            let frames = (frame_count - start).min(self.settings.buffer_size);
            self.render(frames);

            let begin = start * channels;
            let end = ((start + frames) * channels).min(out.len());
            for (frame, &value) in out[begin..end]
                .chunks_mut(channels)
                .zip(&self.mix[..frames])
            {
                frame.fill(S::from_normalized(value));
            }
            start += frames;
        }
        Continuation::Continue
    }

    /// Mixes `frames` samples into `self.mix`, scaled and clamped to [-1.0, 1.0].
    fn render(&mut self, frames: usize) {
        let mix = &mut self.mix[..frames];
        let scratch = &mut self.scratch[..frames];
        mix.fill(0.0);

        for oscillator in self.oscillators.iter_mut() {
            oscillator.process(scratch);
            for (sum, &sample) in mix.iter_mut().zip(scratch.iter()) {
                *sum += sample;
            }
        }

        let scale = match self.settings.normalization {
            Normalization::DivideByCount => {
                self.settings.master_gain / self.oscillators.len().max(1) as f64
            }
            Normalization::HardClip => self.settings.master_gain,
        };
        for sample in mix.iter_mut() {
            *sample = (*sample * scale).clamp(-1.0, 1.0);
        }
    }
}
