//! Audio synthesis components.
//!
//! Tone generators that the streaming bridge pulls blocks from.

pub mod oscillators;

pub use oscillators::{FrequencyControl, Oscillator, SineOscillator};
