//! Oscillator implementations for audio synthesis.
//!
//! This module contains the core `Oscillator` trait, the phase-continuous
//! `SineOscillator`, and the `FrequencyControl` handle for live pitch changes.

mod control;
mod sine;
mod traits;

pub use control::FrequencyControl;
pub use sine::{MAX_PHASE_OFFSET, SineOscillator};
pub use traits::Oscillator;
