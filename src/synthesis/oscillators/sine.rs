//! Sine wave oscillator implementation.

use super::{FrequencyControl, Oscillator};
use crate::{Error, Result};
use crate::core::Pitched;
use crate::error::{check_frequency, check_sample_rate};
use crate::{AudioSignal, Signal};
use std::f64::consts::TAU;
use tracing::debug;

/// Largest accepted starting position.
///
/// Leaves half the counter range for samples produced after the offset, so
/// the position cannot wrap during any realistic session.
pub const MAX_PHASE_OFFSET: u64 = u64::MAX / 2;

/// A sine wave oscillator driven by an integer sample counter.
///
/// The phase of sample `n` is computed directly from `n` rather than by
/// adding a per-sample increment, so there is no cumulative floating-point
/// drift however long the stream runs. Consecutive blocks are exactly
/// phase-continuous: producing `n1` then `n2` samples gives the same values
/// as producing `n1 + n2` samples in one call.
///
/// # Examples
///
/// ```
/// use tonestream::{Signal, SineOscillator};
///
/// // Create a 440 Hz (A4 note) oscillator at 44.1 kHz sample rate
/// let mut osc = SineOscillator::new(440.0, 44100)?;
/// let mut block = [0.0; 1024];
/// osc.process(&mut block);
/// assert_eq!(block[0], 0.0);
/// # Ok::<(), tonestream::Error>(())
/// ```
#[derive(Debug)]
pub struct SineOscillator {
    sample_rate: u32,
    /// Frequency currently in effect, in Hz
    frequency: f64,
    /// Pending frequency, written by other threads
    control: FrequencyControl,
    /// Samples emitted so far (plus any initial offset)
    position: u64,
    /// Position at which `frequency` took effect
    epoch: u64,
    /// Phase reached at `epoch`, in cycles within [0.0, 1.0)
    epoch_cycles: f64,
}

impl SineOscillator {
    /// Creates a new sine oscillator starting at phase zero.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency of the sine wave in Hz
    /// * `sample_rate` - Sample rate in Hz, matching the output stream
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `frequency` is not positive and
    /// finite or `sample_rate` is zero.
    pub fn new(frequency: f64, sample_rate: u32) -> Result<Self> {
        Self::with_phase_offset(frequency, sample_rate, 0)
    }

    /// Creates a sine oscillator whose first sample is sample number `offset`
    /// of the waveform.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for a bad frequency or sample rate,
    /// or if `offset` exceeds [`MAX_PHASE_OFFSET`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tonestream::{Signal, SineOscillator};
    ///
    /// let mut from_start = SineOscillator::new(100.0, 44100)?;
    /// let mut skipped = SineOscillator::with_phase_offset(100.0, 44100, 10)?;
    ///
    /// let block = from_start.produce_block(11);
    /// assert!((block[10] - skipped.next_sample()).abs() < 1e-12);
    /// # Ok::<(), tonestream::Error>(())
    /// ```
    pub fn with_phase_offset(frequency: f64, sample_rate: u32, offset: u64) -> Result<Self> {
        let frequency = check_frequency(frequency)?;
        let sample_rate = check_sample_rate(sample_rate)?;
        if offset > MAX_PHASE_OFFSET {
            return Err(Error::invalid_parameter(
                "phase_offset",
                offset,
                "leaves no room for the sample counter to advance",
            ));
        }
        debug!(frequency, sample_rate, offset, "created sine oscillator");
        Ok(Self {
            sample_rate,
            frequency,
            control: FrequencyControl::new(frequency),
            position: offset,
            epoch: 0,
            epoch_cycles: 0.0,
        })
    }

    /// Returns a handle that changes this oscillator's frequency from any
    /// thread without blocking the audio thread.
    pub fn frequency_control(&self) -> FrequencyControl {
        self.control.clone()
    }

    /// Produces the next `count` samples as a new vector.
    ///
    /// This allocates; the real-time path uses [`Signal::process`] with a
    /// preallocated buffer instead. `produce_block(0)` returns an empty
    /// vector and leaves the oscillator untouched.
    pub fn produce_block(&mut self, count: usize) -> Vec<f64> {
        let mut block = vec![0.0; count];
        self.process(&mut block);
        block
    }

    /// Phase of sample number `position`, in cycles within [0.0, 1.0).
    ///
    /// Elapsed samples are split into whole seconds and a remainder so the
    /// products stay small: `f * q` only contributes its fractional part and
    /// `f * rem / rate` is bounded by `f`.
    fn cycles_at(&self, position: u64) -> f64 {
        let rate = u64::from(self.sample_rate);
        let elapsed = position - self.epoch;
        let whole_seconds = elapsed / rate;
        let rem = elapsed % rate;

        let cycles = self.epoch_cycles
            + (self.frequency * whole_seconds as f64).fract()
            + self.frequency * rem as f64 / f64::from(self.sample_rate);
        cycles.fract()
    }

    fn sample_at(&self, position: u64) -> f64 {
        (TAU * self.cycles_at(position)).sin()
    }

    /// Switches to `frequency` at the current position without a phase jump.
    fn retune(&mut self, frequency: f64) {
        self.epoch_cycles = self.cycles_at(self.position);
        self.epoch = self.position;
        self.frequency = frequency;
    }

    /// Applies any frequency written through a `FrequencyControl`.
    fn sync_frequency(&mut self) {
        let requested = self.control.get();
        if requested.to_bits() != self.frequency.to_bits() {
            self.retune(requested);
        }
    }
}

impl Signal for SineOscillator {
    fn next_sample(&mut self) -> f64 {
        self.sync_frequency();
        let sample = self.sample_at(self.position);
        self.position += 1;
        sample
    }

    fn process(&mut self, buffer: &mut [f64]) {
        if buffer.is_empty() {
            return;
        }
        self.sync_frequency();
        for (offset, sample) in (0u64..).zip(buffer.iter_mut()) {
            *sample = self.sample_at(self.position + offset);
        }
        self.position += buffer.len() as u64;
    }
}

impl AudioSignal for SineOscillator {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Pitched for SineOscillator {
    fn set_frequency(&mut self, frequency: f64) -> Result<()> {
        self.control.set(frequency)?;
        self.retune(frequency);
        Ok(())
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl Oscillator for SineOscillator {
    fn reset(&mut self) {
        self.position = 0;
        self.epoch = 0;
        self.epoch_cycles = 0.0;
    }

    fn position(&self) -> u64 {
        self.position
    }
}
