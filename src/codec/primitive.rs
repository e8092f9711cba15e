//! Encoding of the atomic field types used by readings
//!
//! | Type    | Wire form                                             |
//! |---------|-------------------------------------------------------|
//! | integer | 8 bytes, big-endian two's complement                  |
//! | byte    | 1 raw byte                                            |
//! | text    | UTF-8 bytes followed by a single `0x00` terminator    |
//! | float   | depends on [`FloatEncoding`]: nothing, or 8 bytes BE  |
//!
//! Every integer is written at the full 8-byte width regardless of its logical
//! type, so narrow fields are widened on encode and range-checked on decode.

use super::buffer::ByteBuffer;
use super::FloatEncoding;
use crate::error::{CodecError, Result};

pub const INT_WIDTH: usize = 8;
pub const FLOAT_WIDTH: usize = 8;
pub const TEXT_TERMINATOR: u8 = 0x00;

pub fn put_int(buf: &mut ByteBuffer, value: i64) {
    buf.append_n(&value.to_be_bytes());
}

pub fn take_int(buf: &mut ByteBuffer) -> Result<i64> {
    let remaining = buf.len();
    buf.remove_array::<INT_WIDTH>()
        .map(i64::from_be_bytes)
        .ok_or_else(|| CodecError::unexpected_end(INT_WIDTH, remaining))
}

/// Unsigned 64-bit values are stored as their two's complement bit pattern.
pub fn put_u64(buf: &mut ByteBuffer, value: u64) {
    put_int(buf, value as i64);
}

pub fn take_u64(buf: &mut ByteBuffer) -> Result<u64> {
    take_int(buf).map(|v| v as u64)
}

/// Decode an integer and narrow it to the field's logical type
pub fn take_narrow<T: TryFrom<i64>>(buf: &mut ByteBuffer, field: &'static str) -> Result<T> {
    let value = take_int(buf)?;
    T::try_from(value).map_err(|_| CodecError::out_of_range(field, value))
}

pub fn put_byte(buf: &mut ByteBuffer, value: u8) {
    buf.append(value);
}

pub fn take_byte(buf: &mut ByteBuffer) -> Result<u8> {
    buf.remove_front()
        .ok_or_else(|| CodecError::unexpected_end(1, 0))
}

pub fn put_text(buf: &mut ByteBuffer, text: &str) -> Result<()> {
    let bytes = text.as_bytes();
    if let Some(offset) = bytes.iter().position(|b| *b == TEXT_TERMINATOR) {
        return Err(CodecError::TextContainsNul { offset });
    }
    buf.append_n(bytes);
    buf.append(TEXT_TERMINATOR);
    Ok(())
}

/// Consume bytes up to and including the terminator
///
/// Nothing is consumed when the terminator is missing.
pub fn take_text(buf: &mut ByteBuffer) -> Result<String> {
    let len = buf
        .position(|b| *b == TEXT_TERMINATOR)
        .ok_or(CodecError::UnterminatedText {
            remaining: buf.len(),
        })?;

    let mut bytes = Vec::with_capacity(len);
    for _ in 0..len {
        bytes.push(take_byte(buf)?);
    }
    take_byte(buf)?; // terminator

    String::from_utf8(bytes).map_err(|_| CodecError::InvalidText)
}

pub fn put_float(buf: &mut ByteBuffer, value: f32, encoding: FloatEncoding) {
    match encoding {
        FloatEncoding::None => {}
        FloatEncoding::Ieee754 => buf.append_n(&f64::from(value).to_be_bytes()),
    }
}

pub fn take_float(buf: &mut ByteBuffer, encoding: FloatEncoding) -> Result<f32> {
    match encoding {
        FloatEncoding::None => Ok(0.0),
        FloatEncoding::Ieee754 => {
            let remaining = buf.len();
            buf.remove_array::<FLOAT_WIDTH>()
                .map(|bytes| f64::from_be_bytes(bytes) as f32)
                .ok_or_else(|| CodecError::unexpected_end(FLOAT_WIDTH, remaining))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_is_eight_bytes_big_endian() {
        let mut buf = ByteBuffer::new();
        put_int(&mut buf, 0xD3);
        assert_eq!(buf.to_vec(), vec![0, 0, 0, 0, 0, 0, 0, 0xD3]);
        assert_eq!(take_int(&mut buf), Ok(0xD3));
    }

    #[test]
    fn test_negative_int_round_trip() {
        let mut buf = ByteBuffer::new();
        put_int(&mut buf, -2);
        assert_eq!(buf.to_vec(), vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]);
        assert_eq!(take_int(&mut buf), Ok(-2));
    }

    #[test]
    fn test_short_int_fails_without_consuming() {
        let mut buf = ByteBuffer::from(vec![0, 0, 0]);
        assert_eq!(take_int(&mut buf), Err(CodecError::unexpected_end(8, 3)));
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_u64_keeps_high_bit() {
        let mut buf = ByteBuffer::new();
        put_u64(&mut buf, u64::MAX);
        assert_eq!(take_u64(&mut buf), Ok(u64::MAX));
    }

    #[test]
    fn test_narrow_rejects_out_of_range() {
        let mut buf = ByteBuffer::new();
        put_int(&mut buf, 300);
        assert_eq!(
            take_narrow::<u8>(&mut buf, "humidity"),
            Err(CodecError::out_of_range("humidity", 300))
        );
    }

    #[test]
    fn test_byte() {
        let mut buf = ByteBuffer::new();
        put_byte(&mut buf, 0xAB);
        assert_eq!(take_byte(&mut buf), Ok(0xAB));
        assert_eq!(take_byte(&mut buf), Err(CodecError::unexpected_end(1, 0)));
    }

    #[test]
    fn test_empty_text_is_one_terminator() {
        let mut buf = ByteBuffer::new();
        put_text(&mut buf, "").unwrap();
        assert_eq!(buf.to_vec(), vec![0x00]);
        assert_eq!(take_text(&mut buf), Ok(String::new()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_text_stops_at_terminator() {
        let mut buf = ByteBuffer::from(b"NNE\0rest".as_slice());
        assert_eq!(take_text(&mut buf), Ok("NNE".to_string()));
        assert_eq!(buf.to_vec(), b"rest".to_vec());
    }

    #[test]
    fn test_unterminated_text() {
        let mut buf = ByteBuffer::from(b"abc".as_slice());
        assert_eq!(
            take_text(&mut buf),
            Err(CodecError::UnterminatedText { remaining: 3 })
        );
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_text_with_nul_is_rejected() {
        let mut buf = ByteBuffer::new();
        assert_eq!(
            put_text(&mut buf, "a\0b"),
            Err(CodecError::TextContainsNul { offset: 1 })
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn test_invalid_utf8_text() {
        let mut buf = ByteBuffer::from(vec![0xC3, 0x28, 0x00]);
        assert_eq!(take_text(&mut buf), Err(CodecError::InvalidText));
    }

    #[test]
    fn test_legacy_float_writes_nothing() {
        let mut buf = ByteBuffer::new();
        put_float(&mut buf, 21.5, FloatEncoding::None);
        assert!(buf.is_empty());

        buf.append_n(&[1, 2, 3]);
        assert_eq!(take_float(&mut buf, FloatEncoding::None), Ok(0.0));
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_ieee754_float_round_trip() {
        let mut buf = ByteBuffer::new();
        put_float(&mut buf, -3.25, FloatEncoding::Ieee754);
        assert_eq!(buf.len(), FLOAT_WIDTH);
        assert_eq!(take_float(&mut buf, FloatEncoding::Ieee754), Ok(-3.25));
    }

    #[test]
    fn test_ieee754_short_float() {
        let mut buf = ByteBuffer::from(vec![0x40, 0x09]);
        assert_eq!(
            take_float(&mut buf, FloatEncoding::Ieee754),
            Err(CodecError::unexpected_end(FLOAT_WIDTH, 2))
        );
    }
}
