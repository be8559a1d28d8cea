use super::info::*;
use super::kind::BtfKind;

#[test]
fn info_packing() {
    let info = pack_info(BtfKind::Struct, 3);
    assert_eq!(info, 0x0400_0003);
    assert_eq!(info_kind(info), BtfKind::Struct as u8);
    assert_eq!(info_vlen(info), 3);
}

#[test]
fn info_vlen_truncated_to_16_bits() {
    let info = pack_info(BtfKind::Enum, 0x1_0002);
    assert_eq!(info_vlen(info), 2);
    assert_eq!(info_kind(info), 6);
}

#[test]
fn int_word_signed_32() {
    let word = pack_int(IntEncoding::SIGNED, 0, 32);
    assert_eq!(word, 0x0100_0020);
    assert_eq!(int_encoding(word), IntEncoding::SIGNED);
    assert_eq!(int_offset(word), 0);
    assert_eq!(int_bits(word), 32);
}

#[test]
fn int_word_fields_masked() {
    let word = pack_int(IntEncoding::BOOL, 0x1ff, 0x108);
    assert_eq!(int_encoding(word), IntEncoding::BOOL);
    assert_eq!(int_offset(word), 0xff);
    assert_eq!(int_bits(word), 0x08);
}

#[test]
fn int_word_64_bit_width_wraps() {
    // 8 * 8 = 64 still fits; 32 bytes would wrap to 0.
    assert_eq!(int_bits(pack_int(IntEncoding::UNSIGNED, 0, 64)), 64);
    assert_eq!(int_bits(pack_int(IntEncoding::UNSIGNED, 0, 256)), 0);
}

#[test]
fn encoding_describe() {
    assert_eq!(IntEncoding::UNSIGNED.describe(), "UNSIGNED");
    assert_eq!(IntEncoding::SIGNED.describe(), "SIGNED");
    assert_eq!(IntEncoding::from_bits(3).describe(), "SIGNED|CHAR");
    assert_eq!(IntEncoding::from_bits(8).describe(), "0x8");
}

#[test]
fn encoding_from_bits_masks_high_nibble() {
    assert_eq!(IntEncoding::from_bits(0xf4), IntEncoding::BOOL);
    assert!(IntEncoding::from_bits(5).contains(IntEncoding::BOOL));
    assert!(IntEncoding::from_bits(5).contains(IntEncoding::SIGNED));
    assert!(!IntEncoding::from_bits(5).contains(IntEncoding::CHAR));
}
