//! Core signal types and traits.
//!
//! This module provides the fundamental abstractions used throughout the
//! library:
//! - `Signal` trait for all sample sources
//! - `AudioSignal` trait for sample-rate-aware signals
//! - `Pitched` trait for sources with a tunable frequency
//! - `Gain` combinator and `SignalExt` for per-source levels

mod audio;
pub mod combinators;
mod signal;

pub use audio::AudioSignal;
pub use combinators::{Gain, SignalExt};
pub use signal::{Pitched, Signal};
