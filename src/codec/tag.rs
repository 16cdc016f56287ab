//! Tag byte constants and classification.
//!
//! The leading byte of every encoded value selects its category and, for most
//! categories, either a small literal or the number of bytes that follow.
//! Categories are laid out so that the numeric order of tag bytes matches the
//! order of the values they encode:
//!
//! | Range       | Category                                      |
//! |-------------|-----------------------------------------------|
//! | `0x00`      | nil (first)                                   |
//! | `0x0E–0x0F` | boolean                                       |
//! | `0x10–0x4F` | byte string                                   |
//! | `0x50–0x5F` | date / compact date (reserved)                |
//! | `0x60–0x6F` | negative integer                              |
//! | `0x70–0x7F` | negative double (reserved)                    |
//! | `0x80–0x98` | unsigned integer                              |
//! | `0xD0–0xDF` | compact date, positive (reserved)             |
//! | `0xE0–0xEF` | non-negative integer                          |
//! | `0xF0–0xF7` | positive double (reserved)                    |
//! | `0xFF`      | nil (last)                                    |

// Nil
pub const NIL_FIRST: u8 = 0x00;
pub const NIL_LAST: u8 = 0xFF;

// Boolean
pub const FALSE: u8 = 0x0E;
pub const TRUE: u8 = 0x0F;

// Byte strings
// Direct band: BYTES + len for 0..=60 bytes (0x10..=0x4C).
pub const BYTES: u8 = 0x10;
pub const BYTES_LEN_1: u8 = 0x4D;
pub const BYTES_LEN_2: u8 = 0x4E;
pub const BYTES_LEN_4: u8 = 0x4F;

/// Longest byte string stored with the length in the tag itself.
pub const MAX_DIRECT_BYTES: usize = 60;
/// Length subtracted before writing the 1-byte length extension.
pub const BYTES_1_OFFSET: usize = MAX_DIRECT_BYTES + 1;
/// Length subtracted before writing the 2-byte length extension.
pub const BYTES_2_OFFSET: usize = BYTES_1_OFFSET + 0x100;
/// Length subtracted before writing the 4-byte length extension.
pub const BYTES_4_OFFSET: usize = BYTES_2_OFFSET + 0x1_0000;
/// Longest encodable byte string.
pub const MAX_BYTES_LEN: u64 = BYTES_4_OFFSET as u64 + u32::MAX as u64;

// Dates (reserved)
pub const DATE: u8 = 0x50;
pub const COMPACT_DATE_NEGATIVE: u8 = 0x54;
pub const COMPACT_DATE_POSITIVE: u8 = 0xD4;

// Signed integers
// Negative, compacted: INT_NEGATIVE + (8 - payload bytes), 0x60..=0x67.
pub const INT_NEGATIVE: u8 = 0x60;
// Small negative literals -8..=-1: 0x68..=0x6F.
pub const SMALL_NEGATIVE: u8 = 0x68;
// Small non-negative literals 0..=7: 0xE0..=0xE7.
pub const SMALL_POSITIVE: u8 = 0xE0;
// Positive, compacted: INT_POSITIVE + (payload bytes - 1), 0xE8..=0xEF.
pub const INT_POSITIVE: u8 = 0xE8;

pub const SMALL_INT_MIN: i64 = -8;
pub const SMALL_INT_MAX: i64 = 7;
pub const SMALL_INT_MASK: u8 = 0x07;

// Doubles (reserved)
pub const DOUBLE_NEGATIVE_INFINITY: u8 = 0x74;
pub const DOUBLE_NEGATIVE_VALUE: u8 = 0x75;
pub const DOUBLE_NEGATIVE_ZERO: u8 = 0x76;
pub const DOUBLE_POSITIVE_ZERO: u8 = 0xF4;
pub const DOUBLE_POSITIVE_VALUE: u8 = 0xF5;
pub const DOUBLE_POSITIVE_INFINITY: u8 = 0xF6;
pub const DOUBLE_NAN: u8 = 0xF7;

// Unsigned integers
// Small literals 0..=16: 0x80..=0x90.
pub const UINT: u8 = 0x80;
// Compacted: UINT_VAR + payload bytes, 0x91..=0x98.
pub const UINT_VAR: u8 = 0x90;
pub const SMALL_UINT_MAX: u64 = 16;

/// A reserved category with tags assigned but no decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
    Date,
    Double,
}

impl Reserved {
    pub fn name(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Double => "double",
        }
    }
}

/// What a single tag byte announces about the value it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Nil,
    Bool(bool),
    /// Byte string whose length is carried in the tag.
    Bytes(usize),
    /// Byte string whose length follows in `width` big-endian bytes,
    /// biased by `offset`.
    BytesExt { width: usize, offset: usize },
    /// Signed literal carried in the tag.
    SmallInt(i64),
    /// Signed integer with `len` payload bytes.
    Int { negative: bool, len: usize },
    /// Unsigned literal carried in the tag.
    SmallUint(u64),
    /// Unsigned integer with `len` payload bytes.
    Uint(usize),
    Reserved(Reserved),
    Unknown,
}

/// Classifies a tag byte against the tag scheme.
pub const fn classify(tag: u8) -> Tag {
    match tag {
        NIL_FIRST | NIL_LAST => Tag::Nil,
        FALSE => Tag::Bool(false),
        TRUE => Tag::Bool(true),
        BYTES..BYTES_LEN_1 => Tag::Bytes((tag - BYTES) as usize),
        BYTES_LEN_1 => Tag::BytesExt {
            width: 1,
            offset: BYTES_1_OFFSET,
        },
        BYTES_LEN_2 => Tag::BytesExt {
            width: 2,
            offset: BYTES_2_OFFSET,
        },
        BYTES_LEN_4 => Tag::BytesExt {
            width: 4,
            offset: BYTES_4_OFFSET,
        },
        0x50..=0x5F | 0xD0..=0xDF => Tag::Reserved(Reserved::Date),
        INT_NEGATIVE..SMALL_NEGATIVE => Tag::Int {
            negative: true,
            len: 8 - (tag & SMALL_INT_MASK) as usize,
        },
        // Sign-extend the low three bits.
        SMALL_NEGATIVE..=0x6F => {
            Tag::SmallInt((tag & SMALL_INT_MASK) as i64 | !(SMALL_INT_MASK as i64))
        }
        0x70..=0x7F | 0xF0..=0xF7 => Tag::Reserved(Reserved::Double),
        UINT..=0x90 => Tag::SmallUint((tag - UINT) as u64),
        0x91..=0x98 => Tag::Uint((tag - UINT_VAR) as usize),
        SMALL_POSITIVE..INT_POSITIVE => Tag::SmallInt((tag & SMALL_INT_MASK) as i64),
        INT_POSITIVE..=0xEF => Tag::Int {
            negative: false,
            len: (tag & SMALL_INT_MASK) as usize + 1,
        },
        _ => Tag::Unknown,
    }
}
