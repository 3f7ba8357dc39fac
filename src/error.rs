//! Error types for tone generation and streaming.

use std::fmt;

/// Errors raised by oscillators, the streaming bridge, and the device layer.
///
/// Construction-time validation produces [`Error::InvalidParameter`] before any
/// audio hardware is touched. Steady-state generation never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A construction parameter was out of range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// The audio device could not be opened, started, or stopped.
    #[error("device error: {0}")]
    Device(String),

    /// A sample could not be represented in the output format.
    #[error("sample {value} cannot be represented as {format}")]
    FormatConversion {
        value: f64,
        format: crate::sample::SampleFormat,
    },
}

impl Error {
    /// Creates an invalid parameter error naming the offending parameter.
    pub fn invalid_parameter(
        name: &'static str,
        value: impl fmt::Display,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Creates a device error.
    pub fn device(details: impl Into<String>) -> Self {
        Self::Device(details.into())
    }

    /// Check if this error indicates a device problem
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::Device(_))
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Rejects frequencies that are not strictly positive and finite.
pub(crate) fn check_frequency(frequency: f64) -> Result<f64> {
    if frequency.is_finite() && frequency > 0.0 {
        Ok(frequency)
    } else {
        Err(Error::invalid_parameter(
            "frequency",
            frequency,
            "must be a positive, finite number of Hz",
        ))
    }
}

/// Rejects a zero sample rate.
pub(crate) fn check_sample_rate(sample_rate: u32) -> Result<u32> {
    if sample_rate == 0 {
        Err(Error::invalid_parameter(
            "sample_rate",
            sample_rate,
            "must be a positive number of samples per second",
        ))
    } else {
        Ok(sample_rate)
    }
}

/// Rejects a zero buffer size.
pub(crate) fn check_buffer_size(buffer_size: usize) -> Result<usize> {
    if buffer_size == 0 {
        Err(Error::invalid_parameter(
            "buffer_size",
            buffer_size,
            "must be at least one frame",
        ))
    } else {
        Ok(buffer_size)
    }
}

#[cfg(feature = "playback")]
impl From<cpal::BuildStreamError> for Error {
    fn from(err: cpal::BuildStreamError) -> Self {
        Self::device(format!("failed to build stream: {}", err))
    }
}

#[cfg(feature = "playback")]
impl From<cpal::PlayStreamError> for Error {
    fn from(err: cpal::PlayStreamError) -> Self {
        Self::device(format!("failed to start stream: {}", err))
    }
}

#[cfg(feature = "playback")]
impl From<cpal::PauseStreamError> for Error {
    fn from(err: cpal::PauseStreamError) -> Self {
        Self::device(format!("failed to stop stream: {}", err))
    }
}

#[cfg(feature = "playback")]
impl From<cpal::StreamError> for Error {
    fn from(err: cpal::StreamError) -> Self {
        Self::device(format!("stream failed while playing: {}", err))
    }
}
