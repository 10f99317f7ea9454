//! Byte-level contracts for the data feeding into and out of bit
//! streams.
//!
//! Bit streams only ever need to pull the next octet from their
//! input or append one to their output, so these traits are kept
//! as minimal as that.

use std::io::{self, Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

/// A sequential producer of octets.
pub trait OctetSource {
    /// Reads the next octet, or [`None`] when the end of data is
    /// reached.
    fn read_octet(&mut self) -> io::Result<Option<u8>>;
}

/// A sequential consumer of octets.
pub trait OctetSink {
    /// Appends a single octet.
    fn write_octet(&mut self, octet: u8) -> io::Result<()>;

    /// Appends all of `octets` in order.
    fn write_octets(&mut self, octets: &[u8]) -> io::Result<()> {
        octets.iter().try_for_each(|&o| self.write_octet(o))
    }
}

impl OctetSource for &[u8] {
    #[inline]
    fn read_octet(&mut self) -> io::Result<Option<u8>> {
        match self.split_first() {
            Some((&octet, rest)) => {
                *self = rest;
                Ok(Some(octet))
            }
            None => Ok(None),
        }
    }
}

impl<S: OctetSource + ?Sized> OctetSource for &mut S {
    #[inline]
    fn read_octet(&mut self) -> io::Result<Option<u8>> {
        (**self).read_octet()
    }
}

impl OctetSink for Vec<u8> {
    #[inline]
    fn write_octet(&mut self, octet: u8) -> io::Result<()> {
        self.push(octet);
        Ok(())
    }

    #[inline]
    fn write_octets(&mut self, octets: &[u8]) -> io::Result<()> {
        self.extend_from_slice(octets);
        Ok(())
    }
}

/// Adapts any [`Read`] or [`Write`] implementor into an octet
/// source or sink.
#[derive(Debug)]
pub struct IoOctets<T>(pub T);

impl<T> IoOctets<T> {
    /// Consumes the adapter and returns the wrapped value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<R: Read> OctetSource for IoOctets<R> {
    fn read_octet(&mut self) -> io::Result<Option<u8>> {
        match self.0.read_u8() {
            Ok(octet) => Ok(Some(octet)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<W: Write> OctetSink for IoOctets<W> {
    fn write_octet(&mut self, octet: u8) -> io::Result<()> {
        self.0.write_u8(octet)
    }

    fn write_octets(&mut self, octets: &[u8]) -> io::Result<()> {
        self.0.write_all(octets)
    }
}
