//! Output sample representations.
//!
//! The streaming bridge mixes in `f64` and converts to whatever the audio
//! driver negotiated at stream-open time. Conversion always rounds to the
//! nearest representable value and scales full-scale symmetrically, so
//! `1.0` and `-1.0` map to the same magnitude.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Sample formats the bridge can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFormat {
    /// Signed 16-bit PCM
    #[default]
    I16,
    /// Signed 32-bit PCM
    I32,
    /// Unsigned 16-bit PCM (offset binary, silence at 32768)
    U16,
    /// 32-bit float in [-1.0, 1.0]
    F32,
}

impl SampleFormat {
    /// Bit depth of one sample.
    pub fn bits(self) -> u32 {
        match self {
            SampleFormat::I16 | SampleFormat::U16 => 16,
            SampleFormat::I32 | SampleFormat::F32 => 32,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleFormat::I16 => "i16",
            SampleFormat::I32 => "i32",
            SampleFormat::U16 => "u16",
            SampleFormat::F32 => "f32",
        };
        f.write_str(name)
    }
}

impl FromStr for SampleFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i16" => Ok(SampleFormat::I16),
            "i32" => Ok(SampleFormat::I32),
            "u16" => Ok(SampleFormat::U16),
            "f32" => Ok(SampleFormat::F32),
            _ => Err(Error::invalid_parameter(
                "sample_format",
                s,
                "expected one of i16, i32, u16, f32",
            )),
        }
    }
}

/// A sample type the bridge can write into a driver buffer.
///
/// # Examples
///
/// ```
/// use tonestream::OutputSample;
///
/// assert_eq!(i16::from_normalized(1.0), 32767);
/// assert_eq!(i16::from_normalized(-1.0), -32767);
/// assert_eq!(u16::SILENCE, 32768);
/// assert!(i16::try_from_normalized(1.5).is_err());
/// ```
pub trait OutputSample: Copy + Send + 'static {
    /// The format this type represents.
    const FORMAT: SampleFormat;

    /// The value written for silence.
    const SILENCE: Self;

    /// Converts a sample in [-1.0, 1.0], rounding to the nearest value.
    ///
    /// Out-of-range input saturates at full scale.
    fn from_normalized(value: f64) -> Self;

    /// Converts back to [-1.0, 1.0].
    fn to_normalized(self) -> f64;

    /// Converts a sample, rejecting values outside [-1.0, 1.0].
    ///
    /// # Errors
    ///
    /// Returns `Error::FormatConversion` for NaN, infinities, or values out of
    /// range.
    fn try_from_normalized(value: f64) -> Result<Self> {
        if value.is_finite() && (-1.0..=1.0).contains(&value) {
            Ok(Self::from_normalized(value))
        } else {
            Err(Error::FormatConversion {
                value,
                format: Self::FORMAT,
            })
        }
    }
}

const I16_SCALE: f64 = i16::MAX as f64;
const I32_SCALE: f64 = i32::MAX as f64;

impl OutputSample for i16 {
    const FORMAT: SampleFormat = SampleFormat::I16;
    const SILENCE: Self = 0;

    fn from_normalized(value: f64) -> Self {
        // float-to-int `as` saturates
        (value * I16_SCALE).round() as i16
    }

    fn to_normalized(self) -> f64 {
        (f64::from(self) / I16_SCALE).max(-1.0)
    }
}

impl OutputSample for i32 {
    const FORMAT: SampleFormat = SampleFormat::I32;
    const SILENCE: Self = 0;

    fn from_normalized(value: f64) -> Self {
        (value * I32_SCALE).round() as i32
    }

    fn to_normalized(self) -> f64 {
        (f64::from(self) / I32_SCALE).max(-1.0)
    }
}

impl OutputSample for u16 {
    const FORMAT: SampleFormat = SampleFormat::U16;
    const SILENCE: Self = 32768;

    fn from_normalized(value: f64) -> Self {
        ((value * I16_SCALE).round() + 32768.0) as u16
    }

    fn to_normalized(self) -> f64 {
        ((f64::from(self) - 32768.0) / I16_SCALE).max(-1.0)
    }
}

impl OutputSample for f32 {
    const FORMAT: SampleFormat = SampleFormat::F32;
    const SILENCE: Self = 0.0;

    fn from_normalized(value: f64) -> Self {
        value as f32
    }

    fn to_normalized(self) -> f64 {
        f64::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i16_full_scale() {
        assert_eq!(i16::from_normalized(1.0), i16::MAX);
        assert_eq!(i16::from_normalized(-1.0), -i16::MAX);
        assert_eq!(i16::from_normalized(0.0), 0);
    }

    #[test]
    fn test_i16_rounds_instead_of_truncating() {
        assert_eq!(i16::from_normalized(0.6 / I16_SCALE), 1);
        assert_eq!(i16::from_normalized(-0.6 / I16_SCALE), -1);
        assert_eq!(i16::from_normalized(0.4 / I16_SCALE), 0);
    }

    #[test]
    fn test_i16_round_trip() {
        for value in -i16::MAX..=i16::MAX {
            assert_eq!(i16::from_normalized(value.to_normalized()), value);
        }
        assert_eq!(i16::MIN.to_normalized(), -1.0);
    }

    #[test]
    fn test_u16_round_trip() {
        for value in 1..=u16::MAX {
            assert_eq!(u16::from_normalized(value.to_normalized()), value);
        }
        assert_eq!(u16::from_normalized(0.0), u16::SILENCE);
        assert_eq!(u16::from_normalized(1.0), u16::MAX);
        assert_eq!(u16::from_normalized(-1.0), 1);
    }

    #[test]
    fn test_i32_extremes() {
        assert_eq!(i32::from_normalized(1.0), i32::MAX);
        assert_eq!(i32::from_normalized(-1.0), -i32::MAX);
        assert_eq!(i32::from_normalized(0.5).to_normalized(), 1_073_741_824.0 / I32_SCALE);
    }

    #[test]
    fn test_saturates_out_of_range() {
        assert_eq!(i16::from_normalized(3.0), i16::MAX);
        assert_eq!(i16::from_normalized(-3.0), i16::MIN);
        assert_eq!(u16::from_normalized(3.0), u16::MAX);
    }

    #[test]
    fn test_try_from_normalized() {
        assert_eq!(i16::try_from_normalized(0.5).unwrap(), 16384);
        for bad in [1.0001, -1.5, f64::NAN, f64::INFINITY] {
            match i16::try_from_normalized(bad) {
                Err(Error::FormatConversion { format, .. }) => {
                    assert_eq!(format, SampleFormat::I16)
                }
                other => panic!("Expected FormatConversion, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("i16".parse::<SampleFormat>().unwrap(), SampleFormat::I16);
        assert_eq!("F32".parse::<SampleFormat>().unwrap(), SampleFormat::F32);
        assert!("f16".parse::<SampleFormat>().is_err());
        assert_eq!(SampleFormat::U16.to_string(), "u16");
        assert_eq!(SampleFormat::I32.bits(), 32);
    }
}
