//! Runtime selection between plain and debug-tagged streams.

use bitflags::bitflags;

use crate::{
    debug::{DebugBitReader, DebugBitWriter},
    octets::OctetSource,
    BitRead, BitReader, BitWrite, BitWriter,
};

bitflags! {
    /// Configuration bits to customize stream behavior.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct StreamFlags: u32 {
        /// Every typed field is preceded by a debug tag which
        /// is verified upon reading.
        const DEBUG_TAGS = 1 << 0;
    }
}

/// Stream configuration which influences how data is laid out.
///
/// Writers and readers for the same data must be created from
/// equal options.
#[derive(Clone, Copy, Debug)]
pub struct StreamOptions {
    /// The [`StreamFlags`] to use.
    pub flags: StreamFlags,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self::new(StreamFlags::empty())
    }
}

impl StreamOptions {
    /// Creates options with the given flags.
    pub const fn new(flags: StreamFlags) -> Self {
        Self { flags }
    }

    /// Creates options for debug-tagged streams.
    pub const fn debug() -> Self {
        Self::new(StreamFlags::DEBUG_TAGS)
    }

    /// Creates a writer able to hold `octet_capacity` octets.
    pub fn writer(self, octet_capacity: usize) -> Box<dyn BitWrite> {
        let writer = BitWriter::new(octet_capacity);
        if self.flags.contains(StreamFlags::DEBUG_TAGS) {
            Box::new(DebugBitWriter::new(writer))
        } else {
            Box::new(writer)
        }
    }

    /// Creates a reader of at most `bit_count` bits from `source`.
    pub fn reader<'a, S>(self, source: S, bit_count: usize) -> Box<dyn BitRead + 'a>
    where
        S: OctetSource + 'a,
    {
        let reader = BitReader::new(source, bit_count);
        if self.flags.contains(StreamFlags::DEBUG_TAGS) {
            Box::new(DebugBitReader::new(reader))
        } else {
            Box::new(reader)
        }
    }
}
