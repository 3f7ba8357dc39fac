//! Audio signal trait for sample-rate-aware signals.

use crate::Signal;

/// A `Signal` that is generated at a known sample rate.
///
/// The rate is a runtime value fixed at construction.
/// [`StreamingBridge::validate_ready`](crate::StreamingBridge::validate_ready)
/// rejects sources whose rate differs from the stream's before playback starts.
///
/// # Examples
///
/// ```
/// use tonestream::{AudioSignal, SineOscillator};
///
/// let osc = SineOscillator::new(440.0, 44100)?;
/// assert_eq!(osc.sample_rate(), 44100);
/// # Ok::<(), tonestream::Error>(())
/// ```
pub trait AudioSignal: Signal {
    /// Gets the sample rate at which this audio is being generated, in Hz.
    fn sample_rate(&self) -> u32;
}
