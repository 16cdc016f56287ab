//! Typed buffer encoding: values → order-preserving bytes.

use bytes::BufMut;

use super::tag;
use crate::error::TypedBufError;
use crate::types::TypedRef;

/// Where nil sorts relative to every other value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NilOrder {
    #[default]
    First,
    Last,
}

/// Encodes a single value into the buffer.
///
/// Fails only for byte strings longer than [`tag::MAX_BYTES_LEN`]; nothing
/// is written in that case.
pub fn encode_value(
    buf: &mut impl BufMut,
    value: TypedRef<'_>,
    nils: NilOrder,
) -> Result<(), TypedBufError> {
    match value {
        TypedRef::Nil => encode_nil(buf, nils),
        TypedRef::Bool(b) => encode_bool(buf, b),
        TypedRef::Int(i) => encode_int(buf, i),
        TypedRef::Uint(u) => encode_uint(buf, u),
        TypedRef::Bytes(b) => return encode_bytes(buf, b),
    }
    Ok(())
}

pub fn encode_nil(buf: &mut impl BufMut, nils: NilOrder) {
    buf.put_u8(match nils {
        NilOrder::First => tag::NIL_FIRST,
        NilOrder::Last => tag::NIL_LAST,
    });
}

pub fn encode_bool(buf: &mut impl BufMut, value: bool) {
    buf.put_u8(if value { tag::TRUE } else { tag::FALSE });
}

/// Encodes a signed integer using the fewest payload bytes.
///
/// Values in -8..=7 fit in the tag. Otherwise the payload is the big-endian
/// value with redundant sign bytes stripped, and the tag records its width:
/// wider payloads get higher tags for positive values and lower tags for
/// negative ones.
pub fn encode_int(buf: &mut impl BufMut, value: i64) {
    match value {
        tag::SMALL_INT_MIN..=-1 => {
            buf.put_u8(tag::SMALL_NEGATIVE | (value as u8 & tag::SMALL_INT_MASK));
        }
        0..=tag::SMALL_INT_MAX => buf.put_u8(tag::SMALL_POSITIVE | value as u8),
        _ if value < 0 => {
            // Leading 0xFF bytes are restored on decode.
            let len = 8 - (!value).leading_zeros() as usize / 8;
            buf.put_u8(tag::INT_NEGATIVE + (8 - len) as u8);
            buf.put_slice(&value.to_be_bytes()[8 - len..]);
        }
        _ => {
            let len = payload_len(value as u64);
            buf.put_u8(tag::INT_POSITIVE + (len - 1) as u8);
            buf.put_slice(&value.to_be_bytes()[8 - len..]);
        }
    }
}

/// Encodes an unsigned integer using the fewest payload bytes.
pub fn encode_uint(buf: &mut impl BufMut, value: u64) {
    if value <= tag::SMALL_UINT_MAX {
        buf.put_u8(tag::UINT + value as u8);
    } else {
        let len = payload_len(value);
        buf.put_u8(tag::UINT_VAR + len as u8);
        buf.put_slice(&value.to_be_bytes()[8 - len..]);
    }
}

/// Encodes a byte string: tag, optional length extension, then the raw bytes.
pub fn encode_bytes(buf: &mut impl BufMut, value: &[u8]) -> Result<(), TypedBufError> {
    let (t, width, ext) = bytes_header(value.len() as u64)?;
    buf.put_u8(t);
    buf.put_uint(ext, width);
    buf.put_slice(value);
    Ok(())
}

/// Picks the length band for a byte string of `len` bytes.
///
/// Returns the tag, the width of the length extension and the biased length
/// stored in it.
pub fn bytes_header(len: u64) -> Result<(u8, usize, u64), TypedBufError> {
    const DIRECT: u64 = tag::MAX_DIRECT_BYTES as u64;
    const LEN_1: u64 = tag::BYTES_1_OFFSET as u64;
    const LEN_2: u64 = tag::BYTES_2_OFFSET as u64;
    const LEN_4: u64 = tag::BYTES_4_OFFSET as u64;

    match len {
        0..=DIRECT => Ok((tag::BYTES + len as u8, 0, 0)),
        LEN_1..LEN_2 => Ok((tag::BYTES_LEN_1, 1, len - LEN_1)),
        LEN_2..LEN_4 => Ok((tag::BYTES_LEN_2, 2, len - LEN_2)),
        _ if len <= tag::MAX_BYTES_LEN => Ok((tag::BYTES_LEN_4, 4, len - LEN_4)),
        _ => Err(TypedBufError::Oversize {
            len,
            max: tag::MAX_BYTES_LEN,
        }),
    }
}

/// Number of bytes [`encode_value`] writes for `value`.
pub fn encoded_len(value: TypedRef<'_>) -> usize {
    match value {
        TypedRef::Nil | TypedRef::Bool(_) => 1,
        TypedRef::Int(i) => match i {
            tag::SMALL_INT_MIN..=tag::SMALL_INT_MAX => 1,
            _ if i < 0 => 1 + 8 - (!i).leading_zeros() as usize / 8,
            _ => 1 + payload_len(i as u64),
        },
        TypedRef::Uint(u) if u <= tag::SMALL_UINT_MAX => 1,
        TypedRef::Uint(u) => 1 + payload_len(u),
        TypedRef::Bytes(b) => {
            let width = bytes_header(b.len() as u64).map_or(4, |(_, width, _)| width);
            1 + width + b.len()
        }
    }
}

/// Big-endian byte count of `value` without leading zero bytes, at least 1.
fn payload_len(value: u64) -> usize {
    (8 - value.leading_zeros() as usize / 8).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn int(i: i64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_int(&mut buf, i);
        buf
    }

    fn uint(u: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_uint(&mut buf, u);
        buf
    }

    fn bytes(b: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_bytes(&mut buf, b).unwrap();
        buf
    }

    #[test]
    fn encode_nil_sentinels() {
        let mut buf = BytesMut::new();
        encode_nil(&mut buf, NilOrder::First);
        encode_nil(&mut buf, NilOrder::Last);
        assert_eq!(&buf[..], &[0x00, 0xFF]);
    }

    #[test]
    fn encode_booleans() {
        let mut buf = BytesMut::new();
        encode_bool(&mut buf, false);
        encode_bool(&mut buf, true);
        assert_eq!(&buf[..], &[0x0E, 0x0F]);
    }

    #[test]
    fn encode_small_ints() {
        assert_eq!(int(0), [0xE0]);
        assert_eq!(int(1), [0xE1]);
        assert_eq!(int(7), [0xE7]);
        assert_eq!(int(-1), [0x6F]);
        assert_eq!(int(-8), [0x68]);
    }

    #[test]
    fn encode_positive_ints() {
        assert_eq!(int(8), [0xE8, 0x08]);
        assert_eq!(int(255), [0xE8, 0xFF]);
        assert_eq!(int(256), [0xE9, 0x01, 0x00]);
        assert_eq!(int(1000), [0xE9, 0x03, 0xE8]);
        let mut max = vec![0xEF];
        max.extend_from_slice(&i64::MAX.to_be_bytes());
        assert_eq!(int(i64::MAX), max);
    }

    #[test]
    fn encode_negative_ints() {
        assert_eq!(int(-9), [0x67, 0xF7]);
        assert_eq!(int(-256), [0x67, 0x00]);
        assert_eq!(int(-257), [0x66, 0xFE, 0xFF]);
        assert_eq!(int(-1000), [0x66, 0xFC, 0x18]);
        let mut min = vec![0x60];
        min.extend_from_slice(&i64::MIN.to_be_bytes());
        assert_eq!(int(i64::MIN), min);
    }

    #[test]
    fn encode_uints() {
        assert_eq!(uint(0), [0x80]);
        assert_eq!(uint(16), [0x90]);
        assert_eq!(uint(17), [0x91, 0x11]);
        assert_eq!(uint(0xFF), [0x91, 0xFF]);
        assert_eq!(uint(0x1122), [0x92, 0x11, 0x22]);
        assert_eq!(uint(0x11_2233), [0x93, 0x11, 0x22, 0x33]);
        assert_eq!(
            uint(0x1122_3344_5566_7788),
            [0x98, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]
        );
    }

    #[test]
    fn encode_short_bytes() {
        assert_eq!(bytes(b""), [0x10]);
        assert_eq!(bytes(b"dog"), [0x13, b'd', b'o', b'g']);
        let s = [7u8; 60];
        assert_eq!(bytes(&s)[0], 0x4C);
        assert_eq!(bytes(&s).len(), 61);
    }

    #[test]
    fn encode_bytes_length_bands() {
        let s = vec![0u8; 70_000];

        let b = bytes(&s[..61]);
        assert_eq!(&b[..2], &[0x4D, 0x00]);
        assert_eq!(b.len(), 2 + 61);

        let b = bytes(&s[..300]);
        assert_eq!(&b[..2], &[0x4D, 239]);

        let b = bytes(&s[..316]);
        assert_eq!(&b[..2], &[0x4D, 0xFF]);

        let b = bytes(&s[..317]);
        assert_eq!(&b[..3], &[0x4E, 0x00, 0x00]);

        let b = bytes(&s[..65_852]);
        assert_eq!(&b[..3], &[0x4E, 0xFF, 0xFF]);

        let b = bytes(&s[..65_853]);
        assert_eq!(&b[..5], &[0x4F, 0, 0, 0, 0]);

        let b = bytes(&s);
        assert_eq!(&b[..5], &[0x4F, 0, 0, 0x10, 0x33]);
        assert_eq!(b.len(), 5 + 70_000);
    }

    #[test]
    fn bytes_header_bands() {
        assert_eq!(bytes_header(0), Ok((0x10, 0, 0)));
        assert_eq!(bytes_header(60), Ok((0x4C, 0, 0)));
        assert_eq!(bytes_header(61), Ok((0x4D, 1, 0)));
        assert_eq!(bytes_header(316), Ok((0x4D, 1, 0xFF)));
        assert_eq!(bytes_header(317), Ok((0x4E, 2, 0)));
        assert_eq!(bytes_header(65_852), Ok((0x4E, 2, 0xFFFF)));
        assert_eq!(bytes_header(65_853), Ok((0x4F, 4, 0)));
    }

    #[test]
    fn bytes_header_caps_at_largest_band() {
        assert_eq!(
            bytes_header(tag::MAX_BYTES_LEN),
            Ok((tag::BYTES_LEN_4, 4, 0xFFFF_FFFF))
        );
        assert_eq!(
            bytes_header(tag::MAX_BYTES_LEN + 1),
            Err(TypedBufError::Oversize {
                len: tag::MAX_BYTES_LEN + 1,
                max: tag::MAX_BYTES_LEN,
            })
        );
        assert_eq!(
            bytes_header(u64::MAX),
            Err(TypedBufError::Oversize {
                len: u64::MAX,
                max: tag::MAX_BYTES_LEN,
            })
        );
    }

    #[test]
    fn encode_value_dispatches() {
        let mut buf = BytesMut::new();
        encode_value(&mut buf, TypedRef::Nil, NilOrder::Last).unwrap();
        encode_value(&mut buf, TypedRef::Int(3), NilOrder::Last).unwrap();
        encode_value(&mut buf, TypedRef::Bytes(b"a"), NilOrder::Last).unwrap();
        assert_eq!(&buf[..], &[0xFF, 0xE3, 0x11, b'a']);
    }

    #[test]
    fn encoded_len_matches_output() {
        let values = [
            TypedRef::Nil,
            TypedRef::Bool(true),
            TypedRef::Int(-3),
            TypedRef::Int(-1000),
            TypedRef::Int(i64::MIN),
            TypedRef::Int(1 << 40),
            TypedRef::Uint(16),
            TypedRef::Uint(u64::MAX),
            TypedRef::Bytes(&[1u8; 400]),
        ];
        for v in values {
            let mut buf = Vec::new();
            encode_value(&mut buf, v, NilOrder::First).unwrap();
            assert_eq!(encoded_len(v), buf.len(), "{v}");
        }
    }
}
