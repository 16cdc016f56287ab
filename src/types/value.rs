//! Typed scalar values.

use std::any::Any;
use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::codec::encode::{self, NilOrder};
use crate::error::TypedBufError;

/// A scalar value that can be stored in a typed buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypedValue {
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Bytes(Bytes),
}

/// A borrowed view of a decoded value. Byte strings point into the source
/// buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedRef<'a> {
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Bytes(&'a [u8]),
}

impl TypedValue {
    /// Returns the value as an i64, if it is an `Int` variant.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a u64, if it is a `Uint` variant.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(&b[..]),
            _ => None,
        }
    }

    /// Returns the value as a string, if it is a `Bytes` variant holding UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Name of the value's category, used in error messages.
    pub fn kind(&self) -> &'static str {
        self.view().kind()
    }

    /// Borrows this value as a [`TypedRef`].
    pub fn view(&self) -> TypedRef<'_> {
        match self {
            Self::Nil => TypedRef::Nil,
            Self::Bool(b) => TypedRef::Bool(*b),
            Self::Int(i) => TypedRef::Int(*i),
            Self::Uint(u) => TypedRef::Uint(*u),
            Self::Bytes(b) => TypedRef::Bytes(b),
        }
    }

    /// Encodes this value on its own, with nil sorting first.
    pub fn encode(&self) -> Result<Bytes, TypedBufError> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        encode::encode_value(&mut buf, self.view(), NilOrder::First)?;
        Ok(buf.freeze())
    }

    /// Number of bytes this value occupies when encoded.
    pub fn encoded_len(&self) -> usize {
        encode::encoded_len(self.view())
    }

    /// Converts a dynamically typed value.
    ///
    /// Accepts `()` (as nil), `bool`, every native integer width, `String`,
    /// `&'static str`, `Vec<u8>`, `Bytes` and `TypedValue` itself. Anything
    /// else, doubles included, has no encoding.
    pub fn from_any(value: &dyn Any) -> Result<Self, TypedBufError> {
        macro_rules! downcast {
            ($($ty:ty),* $(,)?) => {
                $(
                    if let Some(v) = value.downcast_ref::<$ty>() {
                        return Ok(Self::from(v.clone()));
                    }
                )*
            };
        }

        if value.is::<()>() {
            return Ok(Self::Nil);
        }
        if let Some(v) = value.downcast_ref::<TypedValue>() {
            return Ok(v.clone());
        }
        downcast!(
            bool,
            i8,
            i16,
            i32,
            i64,
            isize,
            u8,
            u16,
            u32,
            u64,
            usize,
            String,
            &'static str,
            Vec<u8>,
            Bytes,
        );

        let name = if value.is::<f64>() {
            "f64"
        } else if value.is::<f32>() {
            "f32"
        } else {
            "unknown type"
        };
        Err(TypedBufError::UnsupportedType(name.to_string()))
    }
}

impl<'a> TypedRef<'a> {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(u) => Some(*u),
            _ => None,
        }
    }

    /// Returns the payload of a byte string without copying.
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the payload as a string, if it is a byte string holding UTF-8.
    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Bytes(_) => "bytes",
        }
    }

    /// Copies this view into an owned [`TypedValue`].
    pub fn to_value(&self) -> TypedValue {
        match *self {
            Self::Nil => TypedValue::Nil,
            Self::Bool(b) => TypedValue::Bool(b),
            Self::Int(i) => TypedValue::Int(i),
            Self::Uint(u) => TypedValue::Uint(u),
            Self::Bytes(b) => TypedValue::Bytes(Bytes::copy_from_slice(b)),
        }
    }
}

impl<'a> From<&'a TypedValue> for TypedRef<'a> {
    fn from(v: &'a TypedValue) -> Self {
        v.view()
    }
}

impl From<TypedRef<'_>> for TypedValue {
    fn from(v: TypedRef<'_>) -> Self {
        v.to_value()
    }
}

// -- Convenience conversions --

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TypedValue {
                fn from(i: $ty) -> Self {
                    Self::Int(i as i64)
                }
            }
        )*
    };
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TypedValue {
                fn from(u: $ty) -> Self {
                    Self::Uint(u as u64)
                }
            }
        )*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        Self::Bytes(Bytes::from(s))
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        Self::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<Vec<u8>> for TypedValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(b))
    }
}

impl From<&[u8]> for TypedValue {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Bytes> for TypedValue {
    fn from(b: Bytes) -> Self {
        Self::Bytes(b)
    }
}

impl<T: Into<TypedValue>> From<Option<T>> for TypedValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

impl fmt::Display for TypedRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}u"),
            Self::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => write!(f, "\"{s}\""),
                Err(_) => write!(f, "<{} bytes>", b.len()),
            },
        }
    }
}
