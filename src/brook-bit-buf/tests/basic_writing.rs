use brook_bit_buf::{BitWrite, BitWriter, Error, Result};
use brook_utils::bits;

#[test]
fn write_straddling_words() -> Result<()> {
    let mut writer = BitWriter::new(1024);

    writer.write_bits(0xCAFED, 20)?;
    writer.write_bits(0xBEEF, 16)?;

    assert_eq!(writer.tell(), 36);
    assert_eq!(writer.octets(), &[0xCA, 0xFE, 0xDB, 0xEE, 0xF0]);

    Ok(())
}

#[test]
fn close_emits_partial_octets_only() -> Result<()> {
    let mut writer = BitWriter::new(1024);
    assert!(writer.octets().is_empty());

    writer.write_bits(0xCAFE, 32)?;
    assert_eq!(writer.octets().len(), 4);

    writer.write_bits(0b11, 2)?;
    assert_eq!(writer.octets().len(), 5);

    writer.close()?;

    let octets = writer.octets();
    assert_eq!(octets, &[0x00, 0x00, 0xCA, 0xFE, 0xC0]);

    Ok(())
}

#[test]
fn octets_are_a_peek() -> Result<()> {
    let mut writer = BitWriter::new(8);

    writer.write_bits(0b101, 3)?;
    assert_eq!(writer.octets(), &[0b1010_0000]);
    assert_eq!(writer.octets(), &[0b1010_0000]);

    writer.write_bits(0b11111, 5)?;
    writer.write_bits(0x1, 1)?;
    assert_eq!(writer.octets(), &[0b1011_1111, 0b1000_0000]);
    assert_eq!(writer.tell(), 9);

    Ok(())
}

#[test]
fn write_masks_upper_bits() -> Result<()> {
    let mut writer = BitWriter::new(4);

    writer.write_bits(0xFFFF_FFF0, 4)?;
    writer.write_bits(0xFFFF_FF0F, 4)?;

    assert_eq!(writer.into_octets(), [0x0F]);

    Ok(())
}

#[test]
fn write_composites() -> Result<()> {
    let mut writer = BitWriter::new(32);

    writer.write_uint8(0xAB)?;
    writer.write_uint16(0xCDEF)?;
    writer.write_uint32(0x0123_4567)?;
    writer.write_uint64(0x89AB_CDEF_0011_2233)?;
    writer.write_int16(-2)?;
    writer.write_int32(3)?;

    let expected = bits::from_str(concat!(
        "10101011",
        "1100110111101111",
        "00000001001000110100010101100111",
        "1000100110101011110011011110111100000000000100010010001000110011",
        "1 000000000000010",
        "0 0000000000000000000000000000011",
    ));

    assert_eq!(writer.tell(), expected.1);
    assert_eq!(writer.into_octets(), expected.0);

    Ok(())
}

#[test]
fn write_signed_encodings() -> Result<()> {
    let mut writer = BitWriter::new(8);

    writer.write_signed_bits(-3, 4)?;
    writer.write_signed_bits(3, 4)?;
    // Magnitudes are truncated to their field width.
    writer.write_signed_bits(-9, 4)?;
    writer.write_signed_bits(i32::MIN, 32)?;

    let (expected, count) = bits::from_str("1011 0011 1001 1 0000000000000000000000000000000");
    assert_eq!(writer.tell(), count);
    assert_eq!(writer.into_octets(), expected);

    Ok(())
}

#[test]
fn reject_bad_widths() {
    let mut writer = BitWriter::new(8);

    assert!(matches!(writer.write_bits(1, 0), Err(Error::Width(0))));
    assert!(matches!(writer.write_bits(1, 33), Err(Error::Width(33))));
    assert!(matches!(writer.write_signed_bits(-1, 1), Err(Error::Width(1))));
    assert!(matches!(writer.write_signed_bits(1, 33), Err(Error::Width(33))));

    assert_eq!(writer.tell(), 0);
}

#[test]
fn reject_writes_past_capacity() -> Result<()> {
    let mut writer = BitWriter::new(4);

    writer.write_bits(0, 30)?;
    assert!(matches!(
        writer.write_bits(0x7, 3),
        Err(Error::Overflow { capacity: 32 })
    ));
    assert_eq!(writer.tell(), 30);

    writer.write_bits(0x3, 2)?;
    assert_eq!(writer.into_octets(), [0, 0, 0, 3]);

    Ok(())
}

#[test]
fn copy_and_sink_octets() -> Result<()> {
    let mut writer = BitWriter::new(8);
    writer.write_bits(0xCAFED, 20)?;

    let mut small = [0; 2];
    assert!(matches!(
        writer.copy_octets(&mut small),
        Err(Error::BufferTooSmall {
            needed: 3,
            available: 2
        })
    ));

    let mut target = [0; 8];
    assert_eq!(writer.copy_octets(&mut target)?, 3);
    assert_eq!(&target[..3], &[0xCA, 0xFE, 0xD0]);

    let mut sink = vec![0x11];
    assert_eq!(writer.close_into(&mut sink)?, 3);
    assert_eq!(sink, [0x11, 0xCA, 0xFE, 0xD0]);

    Ok(())
}

#[test]
fn straddling_fields_pad_final_octet() -> Result<()> {
    // Field widths which never sum up to whole words.
    let widths = [3, 17, 29, 1, 13, 7];

    let mut writer = BitWriter::new(16);
    for &width in &widths {
        writer.write_bits(u32::MAX, width)?;
    }

    let total: u32 = widths.iter().sum();
    let octets = writer.into_octets();

    assert_eq!(octets.len(), total.div_ceil(8) as usize);
    assert!(octets[..octets.len() - 1].iter().all(|&o| o == 0xFF));
    assert_eq!(octets[octets.len() - 1], 0xFF << (8 - total % 8));

    // Every written bit is set and only padding follows.
    let text = bits::to_string(&octets);
    assert_eq!(text.trim_end_matches('0').len(), total as usize);

    Ok(())
}
