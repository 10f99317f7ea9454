//! Self-describing bit streams for catching schema drift.
//!
//! The debug streams decorate a regular writer or reader and put an
//! 11-bit tag in front of every typed field: a 4-bit [`TypeCode`]
//! followed by the 7-bit width of the field. When reading, the tag
//! is verified against the operation being performed, so that an
//! encoder and decoder which disagree on the layout of a message
//! fail loudly instead of producing garbage.
//!
//! Tagged streams are not compatible with untagged ones in either
//! direction. Both ends of a stream must agree on whether tags are
//! in use.

use std::fmt;

use thiserror::Error;

mod reader;
pub use reader::DebugBitReader;

mod writer;
pub use writer::DebugBitWriter;

/// Number of bits encoding the [`TypeCode`] of a tag.
pub const TYPE_BITS: u32 = 4;

/// Number of bits encoding the field width of a tag.
pub const WIDTH_BITS: u32 = 7;

/// The type of a field as recorded in its debug tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeCode {
    Uint16 = 1,
    Int16 = 2,
    Uint32 = 3,
    Uint64 = 4,
    Uint8 = 5,
    /// A sign-magnitude field of arbitrary width.
    Signed = 6,
    /// A raw unsigned field of arbitrary width.
    Unsigned = 7,
    Int32 = 9,
}

impl TypeCode {
    /// Looks up the [`TypeCode`] for its raw tag value.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            1 => Self::Uint16,
            2 => Self::Int16,
            3 => Self::Uint32,
            4 => Self::Uint64,
            5 => Self::Uint8,
            6 => Self::Signed,
            7 => Self::Unsigned,
            9 => Self::Int32,
            _ => return None,
        })
    }

    /// Gets the human-readable name of the type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uint16 => "uint16",
            Self::Int16 => "int16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uint8 => "uint8",
            Self::Signed => "signed",
            Self::Unsigned => "unsigned",
            Self::Int32 => "int32",
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn raw_name(raw: &u32) -> &'static str {
    TypeCode::from_raw(*raw).map_or("unknown", TypeCode::name)
}

/// A debug tag which does not describe the field being read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TagMismatch {
    /// The stream holds a field of a different type.
    #[error("expected {expected} but received {} (type {actual})", raw_name(.actual))]
    Type { expected: TypeCode, actual: u32 },

    /// The stream holds a field of the right type, but with a
    /// different width.
    #[error("expected {expected} bits for {kind} but received {actual}")]
    Width {
        kind: TypeCode,
        expected: u32,
        actual: u32,
    },
}
