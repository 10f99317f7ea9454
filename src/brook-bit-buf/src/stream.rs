//! The capability sets shared by the plain and debug-tagged streams.
//!
//! Both traits are object safe so that the stream flavour can be
//! picked at runtime through [`StreamOptions`](crate::StreamOptions).
//! Typed operations come with default implementations reducing them
//! to the bit-level primitives; decorators override them to inject
//! their own behavior before delegating.

use crate::{
    error::Result,
    utils::{check_width, join_signed, split_signed},
};

/// A sink for bit-granular fields, packed MSB-first.
pub trait BitWrite {
    /// Gets the number of bits committed to the stream so far.
    fn tell(&self) -> usize;

    /// Writes the low `count` bits of `value`, with `count` in
    /// `1..=32`. Upper bits of `value` are ignored.
    fn write_bits(&mut self, value: u32, count: u32) -> Result<()>;

    /// Writes bits without any decoration a stream may add to
    /// typed fields.
    fn write_raw_bits(&mut self, value: u32, count: u32) -> Result<()> {
        self.write_bits(value, count)
    }

    /// Writes a sign-magnitude value: a sign flag followed by
    /// `count - 1` bits of magnitude.
    ///
    /// Magnitudes that don't fit are truncated and a zero may be
    /// encoded with either sign. See [`split_signed`].
    fn write_signed_bits(&mut self, value: i32, count: u32) -> Result<()> {
        check_width(count, 2)?;

        let (sign, magnitude) = split_signed(value, count);
        self.write_bits(sign, 1)?;
        self.write_bits(magnitude, count - 1)
    }

    fn write_uint8(&mut self, value: u8) -> Result<()> {
        self.write_bits(value as u32, u8::BITS)
    }

    fn write_uint16(&mut self, value: u16) -> Result<()> {
        self.write_bits(value as u32, u16::BITS)
    }

    fn write_int16(&mut self, value: i16) -> Result<()> {
        self.write_signed_bits(value as i32, i16::BITS)
    }

    fn write_uint32(&mut self, value: u32) -> Result<()> {
        self.write_bits(value, u32::BITS)
    }

    fn write_int32(&mut self, value: i32) -> Result<()> {
        self.write_signed_bits(value, i32::BITS)
    }

    /// Writes a 64-bit value as two 32-bit halves, upper half first.
    fn write_uint64(&mut self, value: u64) -> Result<()> {
        self.write_bits((value >> 32) as u32, u32::BITS)?;
        self.write_bits(value as u32, u32::BITS)
    }

    /// Copies `bit_count` bits verbatim from `reader` into this stream.
    ///
    /// Bits are moved in 32-bit chunks followed by the remainder. A
    /// failure aborts the copy but leaves everything transferred up
    /// to that point in place on both ends.
    fn write_bits_from_stream(
        &mut self,
        reader: &mut dyn BitRead,
        bit_count: usize,
    ) -> Result<()> {
        let word = u32::BITS as usize;
        for _ in 0..bit_count / word {
            let chunk = reader.read_raw_bits(u32::BITS)?;
            self.write_raw_bits(chunk, u32::BITS)?;
        }

        let rest = (bit_count % word) as u32;
        if rest != 0 {
            let chunk = reader.read_raw_bits(rest)?;
            self.write_raw_bits(chunk, rest)?;
        }

        Ok(())
    }

    /// Moves the write cursor to bit `position`, so the bits from
    /// there onwards get overwritten by subsequent writes.
    fn rewind(&mut self, position: usize) -> Result<()>;

    /// Flushes the pending partial word into the output.
    fn close(&mut self) -> Result<()>;

    /// Gets a view of all octets written so far.
    ///
    /// Pending bits are made visible without consuming them, so
    /// writing may continue afterwards.
    fn octets(&mut self) -> &[u8];

    /// Copies all octets written so far into `target`, returning
    /// how many were copied.
    fn copy_octets(&mut self, target: &mut [u8]) -> Result<usize>;
}

/// A source of bit-granular fields, unpacked MSB-first.
pub trait BitRead {
    /// Gets the number of bits consumed from the stream so far.
    fn tell(&self) -> usize;

    /// Gets the number of bits left until the declared end of
    /// the stream.
    fn remaining_bits(&self) -> usize;

    /// Whether the declared end of the stream has been reached.
    fn is_eof(&self) -> bool {
        self.remaining_bits() == 0
    }

    /// Reads `count` bits, with `count` in `1..=32`.
    fn read_bits(&mut self, count: u32) -> Result<u32>;

    /// Reads bits without verifying any decoration a stream may
    /// expect in front of typed fields.
    fn read_raw_bits(&mut self, count: u32) -> Result<u32> {
        self.read_bits(count)
    }

    /// Reads a sign-magnitude value as produced by
    /// [`BitWrite::write_signed_bits`].
    fn read_signed_bits(&mut self, count: u32) -> Result<i32> {
        check_width(count, 2)?;

        let sign = self.read_bits(1)?;
        let magnitude = self.read_bits(count - 1)?;
        Ok(join_signed(sign, magnitude))
    }

    fn read_uint8(&mut self) -> Result<u8> {
        self.read_bits(u8::BITS).map(|v| v as u8)
    }

    fn read_uint16(&mut self) -> Result<u16> {
        self.read_bits(u16::BITS).map(|v| v as u16)
    }

    fn read_int16(&mut self) -> Result<i16> {
        self.read_signed_bits(i16::BITS).map(|v| v as i16)
    }

    fn read_uint32(&mut self) -> Result<u32> {
        self.read_bits(u32::BITS)
    }

    fn read_int32(&mut self) -> Result<i32> {
        self.read_signed_bits(i32::BITS)
    }

    /// Reads a 64-bit value from two 32-bit halves, upper half first.
    fn read_uint64(&mut self) -> Result<u64> {
        let upper = self.read_bits(u32::BITS)? as u64;
        let lower = self.read_bits(u32::BITS)? as u64;
        Ok(upper << 32 | lower)
    }
}
