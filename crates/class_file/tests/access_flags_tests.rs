use jvmparse_class_file::{
    decode_flags, ClassAccessFlags, MethodAccessFlags, CLASS_ACCESS_FLAGS, METHOD_ACCESS_FLAGS,
};

const TABLE: &[(&str, u16)] = &[("PUBLIC", 0x0001), ("FINAL", 0x0010)];

#[test]
fn test_single_flag() {
    assert_eq!(vec!["PUBLIC"], decode_flags(0x0001, TABLE));
}

#[test]
fn test_flags_in_table_order() {
    assert_eq!(vec!["PUBLIC", "FINAL"], decode_flags(0x0011, TABLE));

    let reversed = [("FINAL", 0x0010), ("PUBLIC", 0x0001)];
    assert_eq!(vec!["FINAL", "PUBLIC"], decode_flags(0x0011, &reversed));
}

#[test]
fn test_no_flags() {
    assert!(decode_flags(0x0000, TABLE).is_empty());
}

#[test]
fn test_unknown_bits_are_ignored() {
    assert_eq!(vec!["FINAL"], decode_flags(0x8010, TABLE));
}

#[test]
fn test_table_depends_on_call_site() {
    assert_eq!(vec!["SUPER"], decode_flags(0x0020, CLASS_ACCESS_FLAGS));
    assert_eq!(vec!["SYNCHRONIZED"], decode_flags(0x0020, METHOD_ACCESS_FLAGS));
}

#[test]
fn test_names_follow_declaration_order() {
    let flags = ClassAccessFlags::ENUM | ClassAccessFlags::FINAL | ClassAccessFlags::PUBLIC;
    assert_eq!(vec!["PUBLIC", "FINAL", "ENUM"], flags.names());

    let flags = MethodAccessFlags::from_bits_retain(0x1049);
    assert_eq!(
        vec!["PUBLIC", "STATIC", "BRIDGE", "SYNTHETIC"],
        flags.names()
    );
}
