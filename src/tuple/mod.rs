//! Tuples: unseparated concatenations of encoded values.

pub mod reader;
pub mod writer;

pub use reader::{decode_all, decode_all_bytes, decode_uints, TupleReader};
pub use writer::{encode_tuple, TupleWriter};
