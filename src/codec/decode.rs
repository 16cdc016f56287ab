//! Typed buffer decoding: bytes → values.

use bytes::Buf;

use super::tag::{self, Tag};
use crate::error::TypedBufError;
use crate::types::TypedRef;

/// Decodes the first value in `buf`.
///
/// Returns the value and the bytes that follow it. Byte strings borrow from
/// `buf`. An empty input yields [`TypedBufError::EmptyBuffer`].
pub fn decode_one(buf: &[u8]) -> Result<(TypedRef<'_>, &[u8]), TypedBufError> {
    let Some((&t, rest)) = buf.split_first() else {
        return Err(TypedBufError::EmptyBuffer);
    };

    match tag::classify(t) {
        Tag::Nil => Ok((TypedRef::Nil, rest)),
        Tag::Bool(b) => Ok((TypedRef::Bool(b), rest)),
        Tag::SmallInt(i) => Ok((TypedRef::Int(i), rest)),
        Tag::SmallUint(u) => Ok((TypedRef::Uint(u), rest)),

        Tag::Int { negative, len } => {
            let (payload, rest) = take(rest, len, t)?;
            // Seeding with all ones restores the stripped sign bytes.
            let seed = if negative { -1i64 } else { 0 };
            let value = payload
                .iter()
                .fold(seed, |acc, &b| (acc << 8) | i64::from(b));
            Ok((TypedRef::Int(value), rest))
        }

        Tag::Uint(len) => {
            let (mut payload, rest) = take(rest, len, t)?;
            Ok((TypedRef::Uint(payload.get_uint(len)), rest))
        }

        Tag::Bytes(len) => {
            let (payload, rest) = take(rest, len, t)?;
            Ok((TypedRef::Bytes(payload), rest))
        }

        Tag::BytesExt { width, offset } => {
            let (mut ext, rest) = take(rest, width, t)?;
            let len = usize::try_from(ext.get_uint(width))
                .ok()
                .and_then(|n| n.checked_add(offset))
                .ok_or_else(|| {
                    TypedBufError::corrupted(format!("byte string length overflows at 0x{t:02X}"))
                })?;
            let (payload, rest) = take(rest, len, t)?;
            Ok((TypedRef::Bytes(payload), rest))
        }

        Tag::Reserved(category) => {
            tracing::trace!(tag = t, category = category.name(), "reserved tag");
            Err(TypedBufError::corrupted(format!(
                "tag 0x{t:02X} is reserved for {} values",
                category.name()
            )))
        }

        Tag::Unknown => {
            tracing::trace!(tag = t, "unknown tag");
            Err(TypedBufError::corrupted(format!("unknown tag: 0x{t:02X}")))
        }
    }
}

/// Splits `needed` bytes off the front of `buf`.
fn take(buf: &[u8], needed: usize, t: u8) -> Result<(&[u8], &[u8]), TypedBufError> {
    if buf.len() < needed {
        tracing::trace!(tag = t, needed, remaining = buf.len(), "truncated value");
        Err(TypedBufError::corrupted(format!(
            "tag 0x{t:02X} needs {needed} bytes but only {} remaining",
            buf.len()
        )))
    } else {
        Ok(buf.split_at(needed))
    }
}
