//! Order-preserving typed buffer format.
//!
//! Each value is a tag byte, optionally followed by length-extension bytes
//! and a big-endian payload. Comparing two encodings byte by byte orders them
//! the same way as the values they hold, provided both are of the same kind.

pub mod decode;
pub mod encode;
pub mod tag;

pub use decode::decode_one;
pub use encode::{encode_value, encoded_len, NilOrder};
