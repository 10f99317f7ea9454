use crate::{
    error::{Error, Result},
    octets::OctetSource,
    stream::BitRead,
    utils::{check_width, cold, mask, WORD_BITS},
};

/// A buffer which enables bit-based deserialization of data.
///
/// Fields are unpacked MSB-first from big-endian 32-bit words, as
/// produced by [`BitWriter`](crate::BitWriter).
///
/// The reader is constructed with a declared length in bits, which
/// acts as the logical end of the stream regardless of how many
/// octets the [`OctetSource`] still has to offer. Reads crossing
/// that length fail with [`Error::Eof`].
#[derive(Debug)]
pub struct BitReader<S> {
    // Where the lookahead words are fetched from.
    source: S,

    // The most recently filled word; the valid bits are
    // the low `held` ones.
    acc: u32,

    // The number of bits available for consumption from `acc`.
    held: u32,

    // Bits left until the declared end of the stream.
    remaining: usize,

    // Total number of consumed bits.
    tell: usize,
}

impl<'a> BitReader<&'a [u8]> {
    /// Creates a [`BitReader`] over a byte slice, with a declared
    /// length covering all of it.
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self::new(data, data.len() << 3)
    }
}

impl<S: OctetSource> BitReader<S> {
    /// Creates a new [`BitReader`] which reads at most `bit_count`
    /// bits from `source`.
    pub fn new(source: S, bit_count: usize) -> Self {
        Self {
            source,
            acc: 0,
            held: 0,
            remaining: bit_count,
            tell: 0,
        }
    }

    /// Gets the bits currently buffered in the reader.
    #[inline]
    pub fn buffered_bits(&self) -> u32 {
        self.held
    }

    /// Consumes the reader and returns the octet source.
    pub fn into_inner(self) -> S {
        self.source
    }

    // Takes `count` bits off the top of the buffered ones.
    #[inline]
    fn take(&mut self, count: u32) -> u32 {
        debug_assert!(count <= self.held);

        self.held -= count;
        let bits = self.acc.checked_shr(self.held).unwrap_or(0) & mask(count);

        self.remaining -= count as usize;
        self.tell += count as usize;

        bits
    }

    // Fetches up to one word from the source, returning it
    // right-justified along with its number of valid bits.
    //
    // At the end of the physical data, fewer than 32 bits are
    // returned.
    fn next_word(&mut self) -> Result<(u32, u32)> {
        let mut acc = 0;
        let mut held = 0;

        while held < WORD_BITS {
            match self.source.read_octet()? {
                Some(octet) => {
                    acc = acc << u8::BITS | octet as u32;
                    held += u8::BITS;
                }
                None => {
                    cold();
                    break;
                }
            }
        }

        log::trace!("Filled {held} bits at bit {}", self.tell);

        Ok((acc, held))
    }
}

impl<S: OctetSource> BitRead for BitReader<S> {
    #[inline]
    fn tell(&self) -> usize {
        self.tell
    }

    #[inline]
    fn remaining_bits(&self) -> usize {
        self.remaining
    }

    fn read_bits(&mut self, count: u32) -> Result<u32> {
        check_width(count, 1)?;

        if count as usize > self.remaining {
            cold();
            return Err(Error::Eof {
                count,
                tell: self.tell,
            });
        }

        if count <= self.held {
            return Ok(self.take(count));
        }

        // The field straddles two words. Fetch the next one before
        // consuming anything, so a short read leaves no trace.
        let high_count = self.held;
        let (acc, held) = self.next_word()?;

        let low_count = count - high_count;
        if low_count > held {
            // Both parts are shorter than `count` together, so they
            // fit into one word for subsequent reads.
            self.acc = (self.acc & mask(high_count)) << held | acc;
            self.held = high_count + held;

            cold();
            return Err(Error::Eof {
                count,
                tell: self.tell,
            });
        }

        let high = self.take(high_count);
        self.acc = acc;
        self.held = held;
        let low = self.take(low_count);

        Ok(high.checked_shl(low_count).unwrap_or(0) | low)
    }
}
