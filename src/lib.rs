//! Tonestream - real-time, click-free tone generation for pull-based audio drivers.
//!
//! Oscillators produce blocks of samples whose phase is computed from an
//! integer sample counter, so consecutive blocks join without a
//! discontinuity. A [`StreamingBridge`] owns the oscillators, mixes them,
//! and answers the driver's buffer requests in the driver's sample format.
//! The `playback` feature adds a cpal-backed device layer.

pub mod bridge;
pub mod config;
pub mod core;
pub mod error;
#[cfg(feature = "playback")]
pub mod playback;
pub mod sample;
pub mod synthesis;

// Re-export commonly used types at the crate root
pub use bridge::{Continuation, StopSignal, StreamingBridge};
pub use config::{BridgeSettings, Normalization, StreamSettings};
pub use crate::core::{AudioSignal, Gain, Pitched, Signal, SignalExt};
pub use error::{Error, Result};
#[cfg(feature = "playback")]
pub use playback::AudioOutput;
pub use sample::{OutputSample, SampleFormat};
pub use synthesis::{FrequencyControl, Oscillator, SineOscillator};
