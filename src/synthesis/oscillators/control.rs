//! Lock-free frequency handoff between a control thread and the audio thread.

use crate::Result;
use crate::error::check_frequency;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared handle for changing an oscillator's pitch from another thread.
///
/// The frequency lives in a single atomic word (the bits of an `f64`), so the
/// writer never blocks the audio thread and the audio thread never blocks the
/// writer. The oscillator reads the slot once at the start of every block.
///
/// # Examples
///
/// ```
/// use tonestream::{Signal, SineOscillator};
///
/// let mut osc = SineOscillator::new(200.0, 44100)?;
/// let control = osc.frequency_control();
///
/// std::thread::spawn(move || control.set(400.0)).join().unwrap()?;
///
/// let mut block = [0.0; 256];
/// osc.process(&mut block);
/// # Ok::<(), tonestream::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyControl {
    bits: Arc<AtomicU64>,
}

impl FrequencyControl {
    pub(crate) fn new(frequency: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(frequency.to_bits())),
        }
    }

    /// Requests a new frequency in Hz.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `frequency` is not positive and
    /// finite; the pending value is left unchanged.
    pub fn set(&self, frequency: f64) -> Result<()> {
        let frequency = check_frequency(frequency)?;
        self.bits.store(frequency.to_bits(), Ordering::Relaxed);
        Ok(())
    }

    /// Returns the most recently requested frequency.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}
