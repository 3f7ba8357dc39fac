//! Core trait definitions for oscillators.

use crate::core::Pitched;

/// Oscillators are pitched signals with additional state control.
///
/// This trait extends `Pitched` to add oscillator-specific functionality
/// like state reset. All oscillators have controllable frequency (via `Pitched`)
/// and can reset their internal state to initial conditions.
pub trait Oscillator: Pitched {
    /// Resets the oscillator to its initial state.
    ///
    /// The sample position goes back to zero. An oscillator must be reset
    /// before it is reused for an unrelated tone, otherwise the new tone
    /// starts from a stale phase.
    fn reset(&mut self);

    /// Number of samples emitted so far.
    fn position(&self) -> u64;
}
