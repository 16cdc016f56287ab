//! Walks a tuple key one value at a time.

use bytes::Bytes;

use crate::codec::decode::decode_one;
use crate::error::TypedBufError;
use crate::types::{TypedRef, TypedValue};

/// A cursor over the values of an encoded tuple.
///
/// The unread part of the buffer is always available through
/// [`remaining`](Self::remaining), so decoding can stop after any value and
/// resume later with `TupleReader::new(remaining)`.
#[derive(Debug, Clone)]
pub struct TupleReader<'a> {
    rest: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> TupleReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            rest: buf,
            offset: 0,
            failed: false,
        }
    }

    /// Bytes not yet decoded.
    pub fn remaining(&self) -> &'a [u8] {
        self.rest
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Decodes the next value, or returns `None` at the end of the buffer.
    ///
    /// On error the cursor does not move, so `remaining()` starts at the
    /// offending tag.
    pub fn next_value(&mut self) -> Result<Option<TypedRef<'a>>, TypedBufError> {
        match decode_one(self.rest) {
            Ok((value, rest)) => {
                self.offset += self.rest.len() - rest.len();
                self.rest = rest;
                Ok(Some(value))
            }
            Err(e) if e.is_empty_buffer() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Decodes the next value and requires it to be an unsigned integer.
    pub fn next_uint(&mut self) -> Result<Option<u64>, TypedBufError> {
        let before = (self.rest, self.offset);
        match self.next_value()? {
            None => Ok(None),
            Some(TypedRef::Uint(u)) => Ok(Some(u)),
            Some(other) => {
                (self.rest, self.offset) = before;
                Err(TypedBufError::TypeMismatch {
                    expected: "uint",
                    found: other.kind(),
                })
            }
        }
    }
}

impl<'a> Iterator for TupleReader<'a> {
    type Item = Result<TypedRef<'a>, TypedBufError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_value() {
            Ok(value) => value.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Decodes every value in `buf`, copying byte strings.
pub fn decode_all(buf: &[u8]) -> Result<Vec<TypedValue>, TypedBufError> {
    collect_values(buf, TypedRef::to_value)
}

/// Decodes every value in `buf`. Byte strings share `buf`'s allocation.
pub fn decode_all_bytes(buf: &Bytes) -> Result<Vec<TypedValue>, TypedBufError> {
    collect_values(buf, |value| match value {
        TypedRef::Bytes(b) => TypedValue::Bytes(buf.slice_ref(b)),
        other => other.to_value(),
    })
}

/// Decodes a buffer holding only unsigned integers.
pub fn decode_uints(buf: &[u8]) -> Result<Vec<u64>, TypedBufError> {
    let mut reader = TupleReader::new(buf);
    let mut values = Vec::new();
    while let Some(u) = reader.next_uint().inspect_err(|e| log_abort(&reader, e))? {
        values.push(u);
    }
    Ok(values)
}

fn collect_values<'a>(
    buf: &'a [u8],
    mut f: impl FnMut(&TypedRef<'a>) -> TypedValue,
) -> Result<Vec<TypedValue>, TypedBufError> {
    let mut reader = TupleReader::new(buf);
    let mut values = Vec::new();
    while let Some(value) = reader.next_value().inspect_err(|e| log_abort(&reader, e))? {
        values.push(f(&value));
    }
    Ok(values)
}

fn log_abort(reader: &TupleReader<'_>, e: &TypedBufError) {
    tracing::debug!(offset = reader.offset(), error = %e, "tuple decode aborted");
}
