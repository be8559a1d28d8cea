use super::kind::{BtfKind, KIND_NAMES};

#[test]
fn kind_roundtrip() {
    for v in 0..=13u8 {
        let kind = BtfKind::from_u8(v).unwrap();
        assert_eq!(kind as u8, v);
        assert_eq!(kind.name(), KIND_NAMES[v as usize]);
    }
    assert_eq!(BtfKind::from_u8(14), None);
    assert_eq!(BtfKind::from_u8(0xff), None);
}

#[test]
fn kind_names() {
    assert_eq!(BtfKind::Unknown.name(), "UNKNOWN");
    assert_eq!(BtfKind::Forward.name(), "FWD");
    assert_eq!(BtfKind::FuncProto.to_string(), "FUNC_PROTO");
}

#[test]
fn reference_kinds() {
    let refs: Vec<_> = (0..=13u8)
        .filter_map(BtfKind::from_u8)
        .filter(|k| k.is_reference())
        .collect();
    assert_eq!(
        refs,
        [
            BtfKind::Ptr,
            BtfKind::Forward,
            BtfKind::Typedef,
            BtfKind::Volatile,
            BtfKind::Const,
            BtfKind::Restrict,
        ]
    );
}

#[test]
fn sized_kinds() {
    assert!(BtfKind::Int.has_size());
    assert!(BtfKind::Enum.has_size());
    assert!(BtfKind::Struct.has_size());
    assert!(BtfKind::Union.has_size());
    assert!(!BtfKind::Array.has_size());
    assert!(!BtfKind::Ptr.has_size());
    assert!(!BtfKind::Func.has_size());
}

#[test]
fn chain_prefixes() {
    assert_eq!(BtfKind::Const.chain_prefix(), Some("const"));
    assert_eq!(BtfKind::Ptr.chain_prefix(), Some("ptr"));
    assert_eq!(BtfKind::Restrict.chain_prefix(), Some("restrict"));
    assert_eq!(BtfKind::Forward.chain_prefix(), None);
    assert_eq!(BtfKind::Int.chain_prefix(), None);
}
