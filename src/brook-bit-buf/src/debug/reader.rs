use super::{TagMismatch, TypeCode, TYPE_BITS, WIDTH_BITS};
use crate::{error::Result, stream::BitRead, utils::check_width};

/// A [`BitRead`] decorator which verifies the debug tag in front of
/// every typed field.
///
/// A tag which does not match the operation being performed fails
/// the read with [`Error::DebugTag`](crate::Error::DebugTag) before
/// the field itself is touched.
#[derive(Debug)]
pub struct DebugBitReader<R> {
    inner: R,
}

impl<R: BitRead> DebugBitReader<R> {
    /// Wraps `inner` into a tag-verifying reader.
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Gets a reference to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Consumes the decorator and returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn check_tag(&mut self, expected: TypeCode, count: u32) -> Result<()> {
        let actual = self.inner.read_raw_bits(TYPE_BITS)?;
        if actual != expected as u32 {
            log::warn!("Debug tag mismatch at bit {}", self.inner.tell());
            return Err(TagMismatch::Type { expected, actual }.into());
        }

        let width = self.inner.read_raw_bits(WIDTH_BITS)?;
        if width != count {
            log::warn!("Debug tag mismatch at bit {}", self.inner.tell());
            return Err(TagMismatch::Width {
                kind: expected,
                expected: count,
                actual: width,
            }
            .into());
        }

        log::trace!("Verified {expected} tag for {count} bits");

        Ok(())
    }
}

impl<R: BitRead> BitRead for DebugBitReader<R> {
    #[inline]
    fn tell(&self) -> usize {
        self.inner.tell()
    }

    #[inline]
    fn remaining_bits(&self) -> usize {
        self.inner.remaining_bits()
    }

    fn read_bits(&mut self, count: u32) -> Result<u32> {
        check_width(count, 1)?;
        self.check_tag(TypeCode::Unsigned, count)?;
        self.inner.read_bits(count)
    }

    fn read_raw_bits(&mut self, count: u32) -> Result<u32> {
        self.inner.read_raw_bits(count)
    }

    fn read_signed_bits(&mut self, count: u32) -> Result<i32> {
        check_width(count, 2)?;
        self.check_tag(TypeCode::Signed, count)?;
        self.inner.read_signed_bits(count)
    }

    fn read_uint8(&mut self) -> Result<u8> {
        self.check_tag(TypeCode::Uint8, u8::BITS)?;
        self.inner.read_uint8()
    }

    fn read_uint16(&mut self) -> Result<u16> {
        self.check_tag(TypeCode::Uint16, u16::BITS)?;
        self.inner.read_uint16()
    }

    fn read_int16(&mut self) -> Result<i16> {
        self.check_tag(TypeCode::Int16, i16::BITS)?;
        self.inner.read_int16()
    }

    fn read_uint32(&mut self) -> Result<u32> {
        self.check_tag(TypeCode::Uint32, u32::BITS)?;
        self.inner.read_uint32()
    }

    fn read_int32(&mut self) -> Result<i32> {
        self.check_tag(TypeCode::Int32, i32::BITS)?;
        self.inner.read_int32()
    }

    fn read_uint64(&mut self) -> Result<u64> {
        self.check_tag(TypeCode::Uint64, u64::BITS)?;
        self.inner.read_uint64()
    }
}
