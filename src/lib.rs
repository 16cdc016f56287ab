//! typedbuf — order-preserving binary encoding of typed scalar tuples.
//!
//! Values (nil, booleans, signed and unsigned 64-bit integers and byte
//! strings) are encoded so that comparing the encodings byte by byte gives
//! the same order as comparing the values. A tuple is the concatenation of
//! its values' encodings, which makes it usable as a composite key in any
//! sorted store.
//!
//! # Architecture
//!
//! - **`codec`** — Tag scheme, per-value encoders and the single-value decoder
//! - **`tuple`** — Key building (`TupleWriter`) and cursor-based decoding
//!   (`TupleReader`)
//! - **`types`** — `TypedValue` and its borrowed view `TypedRef`
//! - **`error`** — `TypedBufError`
//!
//! Comparing keys whose values differ in kind at the same position is not
//! meaningful.

pub mod codec;
pub mod error;
pub mod tuple;
pub mod types;

pub use codec::{decode_one, NilOrder};
pub use error::TypedBufError;
pub use tuple::{
    decode_all, decode_all_bytes, decode_uints, encode_tuple, TupleReader, TupleWriter,
};
pub use types::{TypedRef, TypedValue};

use codec::tag;

/// Nil, sorting before every other value.
pub const NIL_FIRST: &[u8] = &[tag::NIL_FIRST];
/// Nil, sorting after every other value.
pub const NIL_LAST: &[u8] = &[tag::NIL_LAST];
pub const TRUE: &[u8] = &[tag::TRUE];
pub const FALSE: &[u8] = &[tag::FALSE];
pub const ZERO: &[u8] = &[tag::SMALL_POSITIVE];
pub const ONE: &[u8] = &[tag::SMALL_POSITIVE | 1];
pub const MINUS_ONE: &[u8] = &[tag::SMALL_NEGATIVE | tag::SMALL_INT_MASK];
/// The smallest signed integer that fits in the tag, -8.
pub const SMALL_NEGATIVE: &[u8] = &[tag::SMALL_NEGATIVE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_constants_match_encoders() {
        assert_eq!(TypedValue::Nil.encode().unwrap().as_ref(), NIL_FIRST);
        assert_eq!(TypedValue::Bool(true).encode().unwrap().as_ref(), TRUE);
        assert_eq!(TypedValue::Bool(false).encode().unwrap().as_ref(), FALSE);
        assert_eq!(TypedValue::Int(0).encode().unwrap().as_ref(), ZERO);
        assert_eq!(TypedValue::Int(1).encode().unwrap().as_ref(), ONE);
        assert_eq!(TypedValue::Int(-1).encode().unwrap().as_ref(), MINUS_ONE);
        assert_eq!(TypedValue::Int(-8).encode().unwrap().as_ref(), SMALL_NEGATIVE);
        assert_eq!(
            encode_tuple([&TypedValue::Nil], NilOrder::Last).unwrap().as_ref(),
            NIL_LAST
        );
    }
}
