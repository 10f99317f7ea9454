use byteorder::{BigEndian, ByteOrder};

use crate::{
    error::{Error, Result},
    octets::OctetSink,
    stream::BitWrite,
    utils::{check_width, cold, mask, WORD_BITS},
};

// Size of an accumulator word in the backing buffer.
const WORD_OCTETS: usize = (WORD_BITS / u8::BITS) as usize;

/// A fixed-capacity buffer which enables bit-based serialization of
/// data.
///
/// Fields are packed MSB-first into 32-bit words which are stored in
/// big-endian byte order. The buffer never grows; writes which do
/// not fit into the capacity requested at construction fail with
/// [`Error::Overflow`].
///
/// Because all octets stay addressable, the writer can be rewound to
/// an earlier position to patch fields written before, such as length
/// prefixes. Octets past the rewound position keep their contents
/// until they are overwritten, so rewinding back to the previous end
/// resumes the stream with all fields intact.
#[derive(Debug)]
pub struct BitWriter {
    // The backing storage, sized to a multiple of whole words.
    octets: Vec<u8>,

    // Offset of the word the accumulator is stored to.
    cursor: usize,

    // Bits which are not stored to the backing buffer yet,
    // justified towards the MSB.
    acc: u32,

    // How many bits in `acc` are currently filled.
    //
    // Full words are stored eagerly, so this stays below 32
    // in between operations.
    held: u32,

    // Total number of committed bits.
    tell: usize,
}

impl BitWriter {
    /// Creates a [`BitWriter`] able to hold `octet_capacity` octets,
    /// rounded up to a multiple of 4.
    pub fn new(octet_capacity: usize) -> Self {
        Self {
            octets: vec![0; octet_capacity.next_multiple_of(WORD_OCTETS)],
            cursor: 0,
            acc: 0,
            held: 0,
            tell: 0,
        }
    }

    /// Gets the total number of bits the writer can hold.
    #[inline]
    pub fn capacity_bits(&self) -> usize {
        self.octets.len() << 3
    }

    /// Gets the number of octets covering all committed bits.
    #[inline]
    pub fn written_octets(&self) -> usize {
        self.tell.div_ceil(u8::BITS as usize)
    }

    /// Closes the writer and returns the written octets.
    pub fn into_octets(mut self) -> Vec<u8> {
        self.flush_partial();

        let len = self.written_octets();
        self.octets.truncate(len);
        self.octets
    }

    /// Closes the writer and appends the written octets to `sink`.
    ///
    /// Returns the number of octets appended.
    pub fn close_into<S: OctetSink + ?Sized>(&mut self, sink: &mut S) -> Result<usize> {
        self.flush_partial();

        let len = self.written_octets();
        sink.write_octets(&self.octets[..len])?;

        Ok(len)
    }

    // Adds `count` bits of `value` into the free space of the
    // accumulator. The caller must make sure they fit.
    #[inline]
    fn push(&mut self, value: u32, count: u32) {
        self.held += count;
        assert!(
            self.held <= WORD_BITS,
            "bit accumulator overflow: {} bits held",
            self.held
        );

        self.acc |= (value & mask(count)) << (WORD_BITS - self.held);
        self.tell += count as usize;
    }

    // Copies the held bits into the word at the cursor, without
    // consuming them.
    //
    // The stored bits past the held ones are kept, since they may
    // belong to fields which are still valid after a rewind.
    #[inline]
    fn store(&mut self) {
        // A cursor one past the buffer only occurs when it is
        // full, and then there are no pending bits to store.
        if let Some(word) = self.octets.get_mut(self.cursor..self.cursor + WORD_OCTETS) {
            let kept = BigEndian::read_u32(word) & mask(WORD_BITS - self.held);
            BigEndian::write_u32(word, self.acc | kept);
        }
    }

    // Stores the full accumulator and starts over with the next word.
    fn flush_word(&mut self) {
        debug_assert_eq!(self.held, WORD_BITS);
        self.store();

        log::trace!("Flushed word {:#010X} at octet {}", self.acc, self.cursor);

        self.cursor += WORD_OCTETS;
        self.acc = 0;
        self.held = 0;
    }

    // Stores only the octets covering the held bits, with the
    // unused bits of the last one being zero.
    fn flush_partial(&mut self) {
        let len = self.held.div_ceil(u8::BITS) as usize;
        let word = self.acc.to_be_bytes();
        self.octets[self.cursor..self.cursor + len].copy_from_slice(&word[..len]);
    }
}

impl BitWrite for BitWriter {
    #[inline]
    fn tell(&self) -> usize {
        self.tell
    }

    fn write_bits(&mut self, value: u32, count: u32) -> Result<()> {
        check_width(count, 1)?;

        let capacity = self.capacity_bits();
        if self.tell + count as usize > capacity {
            cold();
            return Err(Error::Overflow { capacity });
        }

        let room = WORD_BITS - self.held;
        if count > room {
            // The value straddles two words. Its high bits complete
            // the current word, its low bits start the next one.
            let low = count - room;
            self.push(value >> low, room);
            self.flush_word();
            self.push(value, low);
        } else {
            self.push(value, count);
            if self.held == WORD_BITS {
                self.flush_word();
            }
        }

        debug_assert_eq!(
            self.cursor * u8::BITS as usize + self.held as usize,
            self.tell
        );
        Ok(())
    }

    fn rewind(&mut self, position: usize) -> Result<()> {
        let capacity = self.capacity_bits();
        if position > capacity {
            return Err(Error::RewindOutOfRange { position, capacity });
        }

        // Make sure the word we're leaving has all pending bits.
        self.store();

        let word_bits = WORD_BITS as usize;
        self.cursor = position / word_bits * WORD_OCTETS;
        self.held = (position % word_bits) as u32;
        self.tell = position;

        // Reload the bits before `position` from the stored word.
        self.acc = match self.octets.get(self.cursor..self.cursor + WORD_OCTETS) {
            Some(word) => BigEndian::read_u32(word) & !mask(WORD_BITS - self.held),
            None => 0,
        };

        log::debug!("Rewound writer to bit {position}");

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.flush_partial();

        log::debug!("Closed writer at bit {}", self.tell);

        Ok(())
    }

    fn octets(&mut self) -> &[u8] {
        self.store();

        let len = self.written_octets();
        &self.octets[..len]
    }

    fn copy_octets(&mut self, target: &mut [u8]) -> Result<usize> {
        let octets = self.octets();
        let len = octets.len();

        match target.get_mut(..len) {
            Some(dest) => {
                dest.copy_from_slice(octets);
                Ok(len)
            }
            None => Err(Error::BufferTooSmall {
                needed: len,
                available: target.len(),
            }),
        }
    }
}
