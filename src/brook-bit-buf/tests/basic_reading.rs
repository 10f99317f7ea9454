use std::io::{self, Cursor, Read};

use brook_bit_buf::{octets::IoOctets, BitRead, BitReader, Error, Result};
use brook_utils::bits;

const DATA: [u8; 8] = [0xCA, 0xFE, 0xDE, 0xAD, 0xC0, 0xDE, 0xFF, 0x00];

#[test]
fn read_ten_bits() -> Result<()> {
    let mut reader = BitReader::from_slice(&DATA);

    assert_eq!(reader.read_bits(10)?, 0b1100101011);
    assert_eq!(reader.tell(), 10);
    assert_eq!(reader.remaining_bits(), 54);

    Ok(())
}

#[test]
fn read_straddling_words() -> Result<()> {
    let mut reader = BitReader::from_slice(&DATA);

    reader.read_bits(12)?;
    assert_eq!(reader.read_bits(32)?, 0xEDEADC0D);
    assert_eq!(reader.read_bits(20)?, 0xEFF00);
    assert!(reader.is_eof());

    Ok(())
}

#[test]
fn reject_bad_widths() {
    let mut reader = BitReader::from_slice(&DATA);

    assert!(matches!(reader.read_bits(33), Err(Error::Width(33))));
    assert!(matches!(reader.read_bits(0), Err(Error::Width(0))));
    assert!(matches!(reader.read_signed_bits(1), Err(Error::Width(1))));
    assert_eq!(reader.tell(), 0);
}

#[test]
fn read_past_declared_length() -> Result<()> {
    let mut reader = BitReader::from_slice(&DATA);

    for _ in 0..10 {
        reader.read_bits(5)?;
    }
    reader.read_bits(8)?;

    assert!(matches!(
        reader.read_bits(7),
        Err(Error::Eof { count: 7, tell: 58 })
    ));

    Ok(())
}

#[test]
fn declared_length_ends_before_octets() -> Result<()> {
    let mut reader = BitReader::new(&DATA[..], 20);

    assert_eq!(reader.read_bits(16)?, 0xCAFE);
    assert!(matches!(
        reader.read_bits(5),
        Err(Error::Eof { count: 5, tell: 16 })
    ));

    // A failed read consumes nothing.
    assert_eq!(reader.read_bits(4)?, 0xD);
    assert!(reader.is_eof());

    Ok(())
}

#[test]
fn octets_end_before_declared_length() -> Result<()> {
    let mut reader = BitReader::new(&DATA[..5], 64);

    assert_eq!(reader.read_bits(32)?, 0xCAFEDEAD);
    assert_eq!(reader.read_bits(4)?, 0xC);
    assert!(matches!(
        reader.read_bits(8),
        Err(Error::Eof { count: 8, .. })
    ));

    Ok(())
}

#[test]
fn octets_end_inside_straddling_read() -> Result<()> {
    let mut reader = BitReader::new(&DATA[..1], 64);

    assert_eq!(reader.read_bits(4)?, 0xC);
    assert!(matches!(
        reader.read_bits(8),
        Err(Error::Eof { count: 8, tell: 4 })
    ));

    // The bits which were there are still readable.
    assert_eq!(reader.tell(), 4);
    assert_eq!(reader.remaining_bits(), 60);
    assert_eq!(reader.read_bits(4)?, 0xA);

    assert!(matches!(
        reader.read_bits(1),
        Err(Error::Eof { count: 1, tell: 8 })
    ));
    assert!(reader.into_inner().is_empty());

    Ok(())
}

#[test]
fn read_composites() -> Result<()> {
    let (octets, count) = bits::from_str(concat!(
        "10101011",
        "1100110111101111",
        "00000001001000110100010101100111",
        "1000100110101011110011011110111100000000000100010010001000110011",
        "1 000000000000010",
        "0 0000000000000000000000000000011",
    ));
    let mut reader = BitReader::new(&octets[..], count);

    assert_eq!(reader.read_uint8()?, 0xAB);
    assert_eq!(reader.read_uint16()?, 0xCDEF);
    assert_eq!(reader.read_uint32()?, 0x0123_4567);
    assert_eq!(reader.read_uint64()?, 0x89AB_CDEF_0011_2233);
    assert_eq!(reader.read_int16()?, -2);
    assert_eq!(reader.read_int32()?, 3);
    assert!(reader.is_eof());

    Ok(())
}

#[test]
fn read_signed_zero() -> Result<()> {
    let (octets, count) = bits::from_str("0 000 1 000");
    let mut reader = BitReader::new(&octets[..], count);

    assert_eq!(reader.read_signed_bits(4)?, 0);
    assert_eq!(reader.read_signed_bits(4)?, 0);

    Ok(())
}

#[test]
fn read_from_io_source() -> Result<()> {
    let mut reader = BitReader::new(IoOctets(Cursor::new(DATA.to_vec())), 64);

    assert_eq!(reader.read_uint16()?, 0xCAFE);
    assert_eq!(reader.read_uint32()?, 0xDEADC0DE);

    Ok(())
}

struct Failing;

impl Read for Failing {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
    }
}

#[test]
fn propagate_source_errors() {
    let mut reader = BitReader::new(IoOctets(Failing), 32);

    assert!(matches!(reader.read_bits(8), Err(Error::Io(_))));
}
