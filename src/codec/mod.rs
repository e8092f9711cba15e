pub mod buffer;
pub mod primitive;
pub mod reading;

use std::fmt;
use std::str::FromStr;

pub use buffer::{Buffer, ByteBuffer};
pub use reading::Readings;

/// How floating-point fields are put on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatEncoding {
    /// Legacy layout: floats occupy zero bytes and always decode as 0.0.
    /// Needed to read existing logs written with zero-width floats.
    #[default]
    None,
    /// 8-byte big-endian IEEE-754 binary64, exact round trip
    Ieee754,
}

impl FromStr for FloatEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "legacy" => Ok(FloatEncoding::None),
            "ieee754" | "f64" => Ok(FloatEncoding::Ieee754),
            other => Err(format!("unknown float encoding '{}'", other)),
        }
    }
}

impl fmt::Display for FloatEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatEncoding::None => f.write_str("none"),
            FloatEncoding::Ieee754 => f.write_str("ieee754"),
        }
    }
}

/// Reading encoder/decoder for one wire layout
///
/// Encoder and decoder must agree on the float encoding; the wire carries no
/// marker for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Codec {
    floats: FloatEncoding,
}

impl Codec {
    pub fn new(floats: FloatEncoding) -> Self {
        Codec { floats }
    }

    pub fn float_encoding(&self) -> FloatEncoding {
        self.floats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_encoding() {
        assert_eq!("none".parse(), Ok(FloatEncoding::None));
        assert_eq!(" IEEE754 ".parse(), Ok(FloatEncoding::Ieee754));
        assert!("half".parse::<FloatEncoding>().is_err());
    }

    #[test]
    fn test_default_codec_is_legacy() {
        assert_eq!(Codec::default().float_encoding(), FloatEncoding::None);
    }
}
