//! Provides bit-exact packing of integer fields into octets.
//!
//! Fields of 1 to 32 bits are packed MSB-first into 32-bit words,
//! which are laid out in big-endian byte order. Wider values are
//! split into 32-bit halves, most significant half first.
//!
//! [`BitWriter`] serializes into a fixed-capacity buffer and can be
//! rewound to patch previously written fields. [`BitReader`] is its
//! counterpart, consuming octets from any [`OctetSource`] up to a
//! declared number of bits.
//!
//! Both implement the [`BitWrite`] and [`BitRead`] traits, which are
//! also implemented by the [`debug`] decorators. These interleave a
//! type and width tag with every field to catch disagreements about
//! the layout between encoder and decoder.
//!
//! # Example
//!
//! ```
//! use brook_bit_buf::{BitRead, BitReader, BitWrite, BitWriter};
//!
//! # fn main() -> brook_bit_buf::Result<()> {
//! let mut writer = BitWriter::new(16);
//!
//! // Reserve a length prefix and patch it once the size is known.
//! let prefix = writer.tell();
//! writer.write_bits(0, 6)?;
//! writer.write_signed_bits(-12, 9)?;
//! writer.write_uint16(0xBEEF)?;
//!
//! let end = writer.tell();
//! writer.rewind(prefix)?;
//! writer.write_bits((end - prefix - 6) as u32, 6)?;
//! writer.rewind(end)?;
//!
//! let octets = writer.into_octets();
//! let mut reader = BitReader::new(&octets[..], end);
//!
//! assert_eq!(reader.read_bits(6)?, 25);
//! assert_eq!(reader.read_signed_bits(9)?, -12);
//! assert_eq!(reader.read_uint16()?, 0xBEEF);
//! assert!(reader.is_eof());
//! # Ok(())
//! # }
//! ```

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod debug;

mod error;
pub use error::{Error, Result};

pub mod octets;
pub use octets::{OctetSink, OctetSource};

mod options;
pub use options::{StreamFlags, StreamOptions};

mod reader;
pub use reader::BitReader;

mod stream;
pub use stream::{BitRead, BitWrite};

pub mod utils;

mod writer;
pub use writer::BitWriter;
