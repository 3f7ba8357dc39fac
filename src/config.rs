//! Stream and bridge configuration.

use crate::error::{check_buffer_size, check_sample_rate};
use crate::sample::SampleFormat;
use crate::{Error, Result};
use std::str::FromStr;
use std::time::Duration;

/// The sample rate of the audio stream, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
/// The number of frames requested per driver callback.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;
/// Master volume applied after mixing.
pub const DEFAULT_MASTER_GAIN: f64 = 0.5;
/// Tone played when no frequency is given.
pub const DEFAULT_FREQUENCY: f64 = 200.0;
/// Output channel count.
pub const DEFAULT_CHANNELS: u16 = 1;

/// How the bridge keeps a sum of oscillators inside [-1.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Divide the sum by the number of oscillators.
    #[default]
    DivideByCount,
    /// Leave the sum as is and clamp each sample to [-1.0, 1.0].
    HardClip,
}

impl FromStr for Normalization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "divide" | "divide-by-count" => Ok(Normalization::DivideByCount),
            "clip" | "hard-clip" => Ok(Normalization::HardClip),
            _ => Err(Error::invalid_parameter(
                "normalization",
                s,
                "expected `divide` or `clip`",
            )),
        }
    }
}

/// Parameters negotiated with the audio driver when the stream is opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamSettings {
    /// Samples per second.
    pub sample_rate: u32,
    /// Interleaved channels; every channel carries the same mono signal.
    pub channels: u16,
    /// Frames per driver callback.
    pub buffer_size: usize,
    /// Sample representation handed to the driver.
    pub sample_format: SampleFormat,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            sample_format: SampleFormat::default(),
        }
    }
}

impl StreamSettings {
    /// Checks every field before any audio hardware is touched.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_sample_rate(self.sample_rate)?;
        check_buffer_size(self.buffer_size)?;
        if self.channels == 0 {
            return Err(Error::invalid_parameter(
                "channels",
                self.channels,
                "must be at least one channel",
            ));
        }
        Ok(())
    }

    /// Real-time deadline for one callback: `buffer_size / sample_rate`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonestream::StreamSettings;
    ///
    /// let period = StreamSettings::default().buffer_period();
    /// assert_eq!(period.as_micros(), 23_219);
    /// ```
    pub fn buffer_period(&self) -> Duration {
        Duration::from_secs_f64(self.buffer_size as f64 / f64::from(self.sample_rate))
    }

    /// Bridge settings sized for this stream.
    pub fn bridge_settings(&self) -> BridgeSettings {
        BridgeSettings {
            buffer_size: self.buffer_size,
            ..BridgeSettings::default()
        }
    }
}

/// Mixing parameters for a [`StreamingBridge`](crate::StreamingBridge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BridgeSettings {
    /// Frames per block; scratch buffers are allocated to this size once.
    pub buffer_size: usize,
    /// Scalar applied to the normalized mix.
    pub master_gain: f64,
    /// Policy for keeping the sum of oscillators in range.
    pub normalization: Normalization,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            master_gain: DEFAULT_MASTER_GAIN,
            normalization: Normalization::default(),
        }
    }
}

impl BridgeSettings {
    /// Checks buffer size and gain.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for a zero buffer size or a gain that
    /// is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        check_buffer_size(self.buffer_size)?;
        if !(self.master_gain.is_finite() && self.master_gain >= 0.0) {
            return Err(Error::invalid_parameter(
                "master_gain",
                self.master_gain,
                "must be a finite, non-negative scalar",
            ));
        }
        Ok(())
    }
}
