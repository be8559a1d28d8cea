use btfgen_core::{Attr, DieId, DieTree, Tag, ate};
use btfgen_format::{
    BtfArray, BtfEnum, BtfKind, ByteWriter, Endian, IntEncoding, int_bits, int_encoding,
    int_offset,
};

use crate::entry::{Completion, TypeIds};
use crate::test_utils::{build, int, unit};
use crate::{Payload, StringTable, TypeEntry};

fn int_word(graph: &crate::TypeGraph<'_>, index: usize) -> u32 {
    match graph.entries()[index].payload() {
        Payload::Int { word } => *word,
        other => panic!("expected int payload, got {other:?}"),
    }
}

fn base(tree: &mut DieTree, cu: DieId, name: &str, size: u64, encoding: u8) -> DieId {
    tree.add_child(cu, Tag::BaseType)
        .name(name)
        .byte_size(size)
        .encoding(encoding)
        .id()
}

#[test]
fn int_words_by_encoding() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    base(&mut tree, cu, "_Bool", 1, ate::BOOLEAN);
    base(&mut tree, cu, "int", 4, ate::SIGNED);
    base(&mut tree, cu, "unsigned long", 8, ate::UNSIGNED);
    base(&mut tree, cu, "char", 1, ate::SIGNED_CHAR);
    base(&mut tree, cu, "unsigned char", 1, ate::UNSIGNED_CHAR);

    let graph = build(&tree, cu);
    let expected = [
        (IntEncoding::BOOL, 1, 8),
        (IntEncoding::SIGNED, 4, 32),
        (IntEncoding::UNSIGNED, 8, 64),
        (IntEncoding::CHAR, 1, 8),
        (IntEncoding::CHAR, 1, 8),
    ];
    assert_eq!(graph.len(), expected.len());

    for (i, (encoding, size, bits)) in expected.into_iter().enumerate() {
        let entry = &graph.entries()[i];
        assert_eq!(entry.kind(), BtfKind::Int);
        assert_eq!(entry.btf_type().size_or_type, size);
        let word = int_word(&graph, i);
        assert_eq!(int_encoding(word), encoding);
        assert_eq!(int_bits(word), bits);
        assert_eq!(int_offset(word), 0);
        assert_eq!(entry.size(), 16);
    }
}

#[test]
fn int_bit_size_and_offset_override() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let id = base(&mut tree, cu, "bits", 4, ate::UNSIGNED);
    tree.edit(id).int(Attr::BitSize, 0x103).int(Attr::BitOffset, 0x105);

    let graph = build(&tree, cu);
    let word = int_word(&graph, 0);
    assert_eq!(int_bits(word), 0x03);
    assert_eq!(int_offset(word), 0x05);
}

#[test]
fn int_width_wraps_at_eight_bits() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    base(&mut tree, cu, "__int256", 32, ate::SIGNED);
    base(&mut tree, cu, "__int128", 16, ate::SIGNED);

    let graph = build(&tree, cu);
    assert_eq!(int_bits(int_word(&graph, 0)), 0);
    assert_eq!(int_bits(int_word(&graph, 1)), 128);
}

#[test]
fn missing_byte_size_reads_zero() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    tree.add_child(cu, Tag::BaseType)
        .name("int")
        .encoding(ate::SIGNED);
    tree.add_child(cu, Tag::StructureType).name("s");

    let graph = build(&tree, cu);
    assert_eq!(graph.entries()[0].btf_type().size_or_type, 0);
    assert_eq!(int_bits(int_word(&graph, 0)), 0);
    assert_eq!(graph.entries()[1].btf_type().size_or_type, 0);
}

#[test]
fn enum_values_in_child_order() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let e = tree
        .add_child(cu, Tag::EnumerationType)
        .name("color")
        .byte_size(4)
        .id();
    tree.add_child(e, Tag::Enumerator)
        .name("RED")
        .int(Attr::ConstValue, 0);
    tree.add_child(e, Tag::Enumerator)
        .name("NEG")
        .int(Attr::ConstValue, -7);
    tree.add_child(e, Tag::Enumerator)
        .name("BIG")
        .int(Attr::ConstValue, 0x1_0000_0002);

    let graph = build(&tree, cu);
    let entry = &graph.entries()[0];
    assert_eq!(entry.kind(), BtfKind::Enum);
    assert_eq!(entry.vlen(), 3);
    assert_eq!(entry.size(), 12 + 3 * 8);

    let Payload::Enum { values } = entry.payload() else {
        panic!("expected enum payload");
    };
    let vals: Vec<_> = values.iter().map(|v| v.val).collect();
    assert_eq!(vals, [0, -7, 2]);
    let names: Vec<_> = values
        .iter()
        .map(|v: &BtfEnum| graph.strings().get_at_offset(v.name_off).unwrap())
        .collect();
    assert_eq!(names, ["RED", "NEG", "BIG"]);
}

#[test]
fn enum_ignores_non_enumerator_children() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let e = tree
        .add_child(cu, Tag::EnumerationType)
        .name("e")
        .byte_size(4)
        .id();
    tree.add_child(e, Tag::Enumerator)
        .name("A")
        .int(Attr::ConstValue, 1);
    tree.add_child(e, Tag::Other(0x39));

    let graph = build(&tree, cu);
    let Payload::Enum { values } = graph.entries()[0].payload() else {
        panic!("expected enum payload");
    };
    assert_eq!(values.len(), graph.entries()[0].vlen() as usize);
    assert_eq!(values.len(), 1);
}

fn array_var(tree: &mut DieTree, cu: DieId, elem: DieId) -> (DieId, DieId) {
    let arr = tree.add_child(cu, Tag::ArrayType).type_ref(elem).id();
    let var = tree.add_child(cu, Tag::Variable).name("buf").type_ref(arr).id();
    (arr, var)
}

fn array_payload(graph: &crate::TypeGraph<'_>, index: usize) -> BtfArray {
    match graph.entries()[index].payload() {
        Payload::Array { array } => *array,
        other => panic!("expected array payload, got {other:?}"),
    }
}

#[test]
fn array_from_count() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let int = int(&mut tree, cu);
    let (arr, var) = array_var(&mut tree, cu, int);
    tree.add_child(arr, Tag::SubrangeType)
        .type_ref(int)
        .int(Attr::Count, 16);

    let graph = build(&tree, cu);
    assert_eq!(graph.type_index(var), 2);
    let entry = &graph.entries()[1];
    assert_eq!(entry.kind(), BtfKind::Array);
    assert_eq!(entry.size(), 24);
    assert_eq!(graph.strings().get_at_offset(entry.name_off()), Some("buf"));
    assert_eq!(
        array_payload(&graph, 1),
        BtfArray {
            elem_type: 1,
            index_type: 1,
            nelems: 16,
        }
    );
}

#[test]
fn array_from_upper_bound() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let int = int(&mut tree, cu);
    let (arr, _) = array_var(&mut tree, cu, int);
    tree.add_child(arr, Tag::SubrangeType)
        .int(Attr::UpperBound, 9);

    let graph = build(&tree, cu);
    let array = array_payload(&graph, 1);
    assert_eq!(array.nelems, 10);
    assert_eq!(array.index_type, 0);
}

#[test]
fn array_uses_first_subrange_only() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let int = int(&mut tree, cu);
    let (arr, _) = array_var(&mut tree, cu, int);
    tree.add_child(arr, Tag::SubrangeType).int(Attr::Count, 3);
    tree.add_child(arr, Tag::SubrangeType).int(Attr::Count, 4);

    let graph = build(&tree, cu);
    assert_eq!(array_payload(&graph, 1).nelems, 3);
}

#[test]
fn array_without_subrange() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let int = int(&mut tree, cu);
    array_var(&mut tree, cu, int);

    let graph = build(&tree, cu);
    assert_eq!(
        array_payload(&graph, 1),
        BtfArray {
            elem_type: 1,
            index_type: 0,
            nelems: 0,
        }
    );
}

#[test]
fn member_offset_from_bit_offset_only() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let int = int(&mut tree, cu);
    let s = tree
        .add_child(cu, Tag::StructureType)
        .name("s")
        .byte_size(8)
        .id();
    tree.add_child(s, Tag::Member)
        .name("a")
        .type_ref(int)
        .int(Attr::DataMemberLocation, 0);
    tree.add_child(s, Tag::Member)
        .name("b")
        .type_ref(int)
        .int(Attr::DataMemberLocation, 4);
    tree.add_child(s, Tag::Member)
        .name("c")
        .type_ref(int)
        .int(Attr::DataMemberLocation, 4)
        .int(Attr::BitOffset, 29)
        .int(Attr::BitSize, 3);
    tree.add_child(s, Tag::Member)
        .name("d")
        .type_ref(int)
        .int(Attr::DataBitOffset, 40);

    let graph = build(&tree, cu);
    let Payload::Composite { members } = graph.entries()[1].payload() else {
        panic!("expected members");
    };
    let offsets: Vec<_> = members.iter().map(|m| m.offset).collect();
    assert_eq!(offsets, [0, 0, 29, 0]);
}

#[test]
fn unresolved_member_type_is_zero() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let float = crate::test_utils::float(&mut tree, cu);
    let s = tree
        .add_child(cu, Tag::UnionType)
        .byte_size(4)
        .id();
    tree.add_child(s, Tag::Member).name("f").type_ref(float);
    tree.add_child(s, Tag::Member).name("none");

    let graph = build(&tree, cu);
    assert_eq!(graph.len(), 1);
    let Payload::Composite { members } = graph.entries()[0].payload() else {
        panic!("expected members");
    };
    assert_eq!(members[0].type_id, 0);
    assert_eq!(members[1].type_id, 0);
    assert_eq!(graph.entries()[0].name_off(), 0);
}

#[test]
fn forward_declaration_is_reference_entry() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let fwd = tree
        .add_child(cu, Tag::StructureType)
        .name("opaque")
        .flag(Attr::Declaration)
        .id();
    tree.add_child(cu, Tag::PointerType).type_ref(fwd);

    let graph = build(&tree, cu);
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.entries()[0].kind(), BtfKind::Forward);
    assert_eq!(graph.entries()[0].payload(), &Payload::Reference);
    assert_eq!(graph.entries()[0].size(), 12);
    assert_eq!(graph.entries()[1].btf_type().size_or_type, 1);
}

/// Complete a single entry against an id map holding `known`.
fn complete_alone<'t>(entry: &mut TypeEntry<'t>, known: &[(DieId, u32)]) -> StringTable {
    let mut ids = TypeIds::default();
    for &(die, id) in known {
        ids.insert(die, id);
    }
    let mut strings = StringTable::new();
    let mut cx = Completion {
        ids: &ids,
        strings: &mut strings,
    };
    entry.complete(&mut cx);
    strings
}

#[test]
fn func_collects_parameters() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let int = int(&mut tree, cu);
    let f = tree
        .add_child(cu, Tag::Subprogram)
        .name("main")
        .type_ref(int)
        .id();
    tree.add_child(f, Tag::FormalParameter).name("argc").type_ref(int);
    tree.add_child(f, Tag::LexicalBlock);
    tree.add_child(f, Tag::FormalParameter).name("argv");

    let mut entry = TypeEntry::new(BtfKind::Func, tree.die(f), 1).unwrap();
    assert_eq!(entry.vlen(), 2);
    assert_eq!(entry.size(), 12 + 2 * 4);

    let strings = complete_alone(&mut entry, &[(int, 0)]);
    assert_eq!(strings.get_at_offset(entry.name_off()), Some("main"));
    assert_eq!(entry.payload(), &Payload::Func { params: vec![1, 0] });
}

#[test]
fn func_name_falls_back_to_type() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let int = int(&mut tree, cu);
    let named_by_type = tree.add_child(cu, Tag::SubroutineType).type_ref(int).id();
    let nameless = tree.add_child(cu, Tag::SubroutineType).id();
    tree.add_child(nameless, Tag::FormalParameter).type_ref(int);

    let mut entry = TypeEntry::new(BtfKind::FuncProto, tree.die(named_by_type), 0).unwrap();
    let strings = complete_alone(&mut entry, &[]);
    assert_eq!(strings.get_at_offset(entry.name_off()), Some("int"));

    let mut entry = TypeEntry::new(BtfKind::FuncProto, tree.die(nameless), 0).unwrap();
    let strings = complete_alone(&mut entry, &[(int, 0)]);
    assert_eq!(entry.name_off(), 0);
    assert_eq!(strings.len(), 1);
    assert_eq!(entry.payload(), &Payload::Func { params: vec![1] });
}

#[test]
fn unknown_kind_builds_nothing() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    assert!(TypeEntry::new(BtfKind::Unknown, tree.die(cu), 0).is_none());
}

#[test]
fn encode_matches_size() {
    let mut tree = DieTree::new();
    let cu = unit(&mut tree);
    let int = int(&mut tree, cu);
    let s = tree
        .add_child(cu, Tag::StructureType)
        .name("s")
        .byte_size(4)
        .id();
    tree.add_child(s, Tag::Member).name("x").type_ref(int);
    let graph = build(&tree, cu);

    for entry in graph.entries() {
        let mut w = ByteWriter::new(Endian::Little);
        entry.encode(&mut w);
        assert_eq!(w.len() as u32, entry.size());
    }
}
