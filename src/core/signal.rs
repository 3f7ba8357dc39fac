//! Core signal trait and pitch control.
//!
//! This module provides the fundamental `Signal` trait that represents
//! any source of audio samples, and the `Pitched` trait for sources with a
//! tunable frequency.

use crate::Result;

/// Common interface for all signal sources.
///
/// This trait defines the two ways a source can be pulled:
/// - Single sample generation via `next_sample()`
/// - Block generation via `process()`
///
/// `process()` is the operation the streaming bridge calls once per buffer
/// period. The caller owns the buffer, so producing a block never allocates.
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// A sample value, typically between -1.0 and 1.0 for audio signals
    fn next_sample(&mut self) -> f64;

    /// Generates `buffer.len()` consecutive samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    /// Implementors may override this for more efficient block processing,
    /// but the result must equal calling `next_sample()` in a loop.
    ///
    /// An empty buffer must leave the signal's state untouched.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

impl<S: Signal + ?Sized> Signal for Box<S> {
    fn next_sample(&mut self) -> f64 {
        (**self).next_sample()
    }

    fn process(&mut self, buffer: &mut [f64]) {
        (**self).process(buffer)
    }
}

/// Implementation of `Signal` for `f64` representing a constant signal value.
///
/// Useful for DC offsets and for testing the mix path with known levels.
///
/// # Examples
///
/// ```
/// use tonestream::Signal;
///
/// let mut constant = 0.5_f64;
/// assert_eq!(constant.next_sample(), 0.5);
///
/// let mut buffer = vec![0.0; 4];
/// constant.process(&mut buffer);
/// assert_eq!(buffer, vec![0.5, 0.5, 0.5, 0.5]);
/// ```
impl Signal for f64 {
    fn next_sample(&mut self) -> f64 {
        *self
    }

    fn process(&mut self, buffer: &mut [f64]) {
        buffer.fill(*self);
    }
}

/// Minimal trait for anything with a controllable pitch.
///
/// # Examples
///
/// ```
/// use tonestream::{Pitched, SineOscillator};
///
/// let mut osc = SineOscillator::new(440.0, 44100)?;
/// assert_eq!(osc.frequency(), 440.0);
///
/// osc.set_frequency(880.0)?;
/// assert_eq!(osc.frequency(), 880.0);
///
/// // Non-positive frequencies are rejected
/// assert!(osc.set_frequency(0.0).is_err());
/// # Ok::<(), tonestream::Error>(())
/// ```
pub trait Pitched {
    /// Sets the frequency of the signal.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `freq` is not a positive, finite
    /// number. The current frequency is kept in that case.
    fn set_frequency(&mut self, freq: f64) -> Result<()>;

    /// Gets the current frequency of the signal in Hz.
    fn frequency(&self) -> f64;
}
