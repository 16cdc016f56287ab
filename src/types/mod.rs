//! Scalar value types carried in typed buffers.

mod value;

pub use value::{TypedRef, TypedValue};
