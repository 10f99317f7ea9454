//! Conversions between human-readable bit strings and octets.
//!
//! Bit strings list bits MSB-first, one character per bit. Any
//! character other than `0` and `1` is ignored, so spacing like
//! `"1100 1010 1111"` may be used for legibility.

/// Packs a bit string into octets.
///
/// Returns the packed octets together with the number of
/// significant bits. A trailing partial octet is zero-padded
/// towards its LSB.
pub fn from_str(bits: &str) -> (Vec<u8>, usize) {
    let mut octets = Vec::with_capacity(bits.len().div_ceil(u8::BITS as usize));
    let mut count = 0;

    for bit in bits.bytes().filter(|&c| c == b'0' || c == b'1') {
        let shift = 7 - (count & 7);
        if shift == 7 {
            octets.push(0);
        }

        if bit == b'1' {
            // The push above guarantees a last element.
            if let Some(last) = octets.last_mut() {
                *last |= 1 << shift;
            }
        }

        count += 1;
    }

    (octets, count)
}

/// Renders octets as a bit string, eight characters per octet.
pub fn to_string(octets: &[u8]) -> String {
    let mut out = String::with_capacity(octets.len() * u8::BITS as usize);
    for &octet in octets {
        for shift in (0..u8::BITS).rev() {
            out.push(if octet >> shift & 1 != 0 { '1' } else { '0' });
        }
    }
    out
}
