use super::{TypeCode, TYPE_BITS, WIDTH_BITS};
use crate::{
    error::Result,
    stream::{BitRead, BitWrite},
    utils::check_width,
};

/// A [`BitWrite`] decorator which tags every typed field with its
/// [`TypeCode`] and width.
///
/// Tags are emitted through the raw write path of the inner stream,
/// immediately followed by the field itself.
#[derive(Debug)]
pub struct DebugBitWriter<W> {
    inner: W,
}

impl<W: BitWrite> DebugBitWriter<W> {
    /// Wraps `inner` into a tagging writer.
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Gets a reference to the wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Consumes the decorator and returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    // Writes a tag for a field of `count` bits, followed by the field
    // itself through `write`.
    //
    // When either does not fit, the stream is rewound to where the tag
    // started so that no orphaned tag is left behind.
    fn write_tagged<F>(&mut self, code: TypeCode, count: u32, write: F) -> Result<()>
    where
        F: FnOnce(&mut W) -> Result<()>,
    {
        let start = self.inner.tell();

        let res = self
            .inner
            .write_raw_bits(code as u32, TYPE_BITS)
            .and_then(|()| self.inner.write_raw_bits(count, WIDTH_BITS))
            .and_then(|()| write(&mut self.inner));

        if res.is_err() {
            log::debug!("Discarding {code} tag at bit {start}");
            self.inner.rewind(start)?;
        }

        res
    }
}

impl<W: BitWrite> BitWrite for DebugBitWriter<W> {
    #[inline]
    fn tell(&self) -> usize {
        self.inner.tell()
    }

    fn write_bits(&mut self, value: u32, count: u32) -> Result<()> {
        check_width(count, 1)?;
        self.write_tagged(TypeCode::Unsigned, count, |w| w.write_bits(value, count))
    }

    fn write_raw_bits(&mut self, value: u32, count: u32) -> Result<()> {
        self.inner.write_raw_bits(value, count)
    }

    fn write_signed_bits(&mut self, value: i32, count: u32) -> Result<()> {
        check_width(count, 2)?;
        self.write_tagged(TypeCode::Signed, count, |w| w.write_signed_bits(value, count))
    }

    fn write_uint8(&mut self, value: u8) -> Result<()> {
        self.write_tagged(TypeCode::Uint8, u8::BITS, |w| w.write_uint8(value))
    }

    fn write_uint16(&mut self, value: u16) -> Result<()> {
        self.write_tagged(TypeCode::Uint16, u16::BITS, |w| w.write_uint16(value))
    }

    fn write_int16(&mut self, value: i16) -> Result<()> {
        self.write_tagged(TypeCode::Int16, i16::BITS, |w| w.write_int16(value))
    }

    fn write_uint32(&mut self, value: u32) -> Result<()> {
        self.write_tagged(TypeCode::Uint32, u32::BITS, |w| w.write_uint32(value))
    }

    fn write_int32(&mut self, value: i32) -> Result<()> {
        self.write_tagged(TypeCode::Int32, i32::BITS, |w| w.write_int32(value))
    }

    fn write_uint64(&mut self, value: u64) -> Result<()> {
        self.write_tagged(TypeCode::Uint64, u64::BITS, |w| w.write_uint64(value))
    }

    // Copied bits are opaque to us, so they are passed through as is.
    fn write_bits_from_stream(
        &mut self,
        reader: &mut dyn BitRead,
        bit_count: usize,
    ) -> Result<()> {
        self.inner.write_bits_from_stream(reader, bit_count)
    }

    fn rewind(&mut self, position: usize) -> Result<()> {
        self.inner.rewind(position)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }

    fn octets(&mut self) -> &[u8] {
        self.inner.octets()
    }

    fn copy_octets(&mut self, target: &mut [u8]) -> Result<usize> {
        self.inner.copy_octets(target)
    }
}
