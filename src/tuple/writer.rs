//! Builds tuple keys by appending encoded values.

use std::any::Any;

use bytes::{Bytes, BytesMut};

use crate::codec::encode::{self, NilOrder};
use crate::error::TypedBufError;
use crate::types::{TypedRef, TypedValue};

/// Appends encoded values to a growing key buffer.
///
/// Values are written back to back with no separators; each encoding carries
/// its own length. Nil values use the writer's [`NilOrder`].
#[derive(Debug, Default)]
pub struct TupleWriter {
    buf: BytesMut,
    nils: NilOrder,
}

impl TupleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nil_order(nils: NilOrder) -> Self {
        Self {
            buf: BytesMut::new(),
            nils,
        }
    }

    pub fn nil_order(&self) -> NilOrder {
        self.nils
    }

    /// Appends any value convertible to a [`TypedValue`].
    pub fn push(&mut self, value: impl Into<TypedValue>) -> Result<&mut Self, TypedBufError> {
        let value = value.into();
        self.push_ref(value.view())
    }

    /// Appends a borrowed value without copying byte strings.
    pub fn push_ref(&mut self, value: TypedRef<'_>) -> Result<&mut Self, TypedBufError> {
        self.buf.reserve(encode::encoded_len(value));
        encode::encode_value(&mut self.buf, value, self.nils)?;
        Ok(self)
    }

    /// Appends a dynamically typed value, rejecting types with no encoding.
    pub fn push_any(&mut self, value: &dyn Any) -> Result<&mut Self, TypedBufError> {
        let value = TypedValue::from_any(value)?;
        self.push_ref(value.view())
    }

    pub fn push_nil(&mut self) -> &mut Self {
        encode::encode_nil(&mut self.buf, self.nils);
        self
    }

    pub fn push_bool(&mut self, value: bool) -> &mut Self {
        encode::encode_bool(&mut self.buf, value);
        self
    }

    pub fn push_int(&mut self, value: i64) -> &mut Self {
        encode::encode_int(&mut self.buf, value);
        self
    }

    pub fn push_uint(&mut self, value: u64) -> &mut Self {
        encode::encode_uint(&mut self.buf, value);
        self
    }

    pub fn push_bytes(&mut self, value: &[u8]) -> Result<&mut Self, TypedBufError> {
        encode::encode_bytes(&mut self.buf, value)?;
        Ok(self)
    }

    /// Appends each element as an unsigned integer. No count is written, so
    /// the array should be the last part of the key.
    pub fn push_uints(&mut self, values: &[u64]) -> &mut Self {
        for &u in values {
            encode::encode_uint(&mut self.buf, u);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer and returns the encoded key.
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Encodes `values` in order into a single key.
pub fn encode_tuple<'a, I>(values: I, nils: NilOrder) -> Result<Bytes, TypedBufError>
where
    I: IntoIterator,
    I::Item: Into<TypedRef<'a>>,
{
    let mut writer = TupleWriter::with_nil_order(nils);
    for value in values {
        writer.push_ref(value.into())?;
    }
    Ok(writer.finish())
}
