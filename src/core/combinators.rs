//! Signal combinators.
//!
//! Only fixed-level scaling is provided: per-oscillator amplitude before the
//! streaming bridge sums its sources.

use crate::{AudioSignal, Signal};

/// Scales a signal by a fixed factor (gain/attenuation).
///
/// Values greater than 1.0 amplify the signal, while values between 0.0 and
/// 1.0 attenuate it.
///
/// # Examples
///
/// ```
/// use tonestream::{Gain, Signal, SineOscillator};
///
/// let osc = SineOscillator::new(440.0, 44100)?;
/// let mut quieter = Gain { source: osc, gain: 0.5 };
/// let mut block = [0.0; 64];
/// quieter.process(&mut block);
/// assert!(block.iter().all(|s| s.abs() <= 0.5));
/// # Ok::<(), tonestream::Error>(())
/// ```
pub struct Gain<S: Signal> {
    pub source: S,
    pub gain: f64,
}

impl<S: Signal> Signal for Gain<S> {
    fn next_sample(&mut self) -> f64 {
        self.source.next_sample() * self.gain
    }

    fn process(&mut self, buffer: &mut [f64]) {
        self.source.process(buffer);
        for sample in buffer.iter_mut() {
            *sample *= self.gain;
        }
    }
}

impl<S: AudioSignal> AudioSignal for Gain<S> {
    fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }
}

/// Extension trait providing combinator methods for all signals.
pub trait SignalExt: Signal + Sized {
    /// Applies a gain factor to this signal.
    fn gain(self, gain: f64) -> Gain<Self> {
        Gain { source: self, gain }
    }
}

impl<S: Signal> SignalExt for S {}
