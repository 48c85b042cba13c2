use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodAccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
    }
}

pub const CLASS_ACCESS_FLAGS: &[(&str, u16)] = &[
    ("PUBLIC", ClassAccessFlags::PUBLIC.bits()),
    ("FINAL", ClassAccessFlags::FINAL.bits()),
    ("SUPER", ClassAccessFlags::SUPER.bits()),
    ("INTERFACE", ClassAccessFlags::INTERFACE.bits()),
    ("ABSTRACT", ClassAccessFlags::ABSTRACT.bits()),
    ("SYNTHETIC", ClassAccessFlags::SYNTHETIC.bits()),
    ("ANNOTATION", ClassAccessFlags::ANNOTATION.bits()),
    ("ENUM", ClassAccessFlags::ENUM.bits()),
    ("MODULE", ClassAccessFlags::MODULE.bits()),
];

// 0x0020 and 0x0040 mean SUPER / BRIDGE depending on where they appear, hence
// the separate table.
pub const METHOD_ACCESS_FLAGS: &[(&str, u16)] = &[
    ("PUBLIC", MethodAccessFlags::PUBLIC.bits()),
    ("PRIVATE", MethodAccessFlags::PRIVATE.bits()),
    ("PROTECTED", MethodAccessFlags::PROTECTED.bits()),
    ("STATIC", MethodAccessFlags::STATIC.bits()),
    ("FINAL", MethodAccessFlags::FINAL.bits()),
    ("SYNCHRONIZED", MethodAccessFlags::SYNCHRONIZED.bits()),
    ("BRIDGE", MethodAccessFlags::BRIDGE.bits()),
    ("VARARGS", MethodAccessFlags::VARARGS.bits()),
    ("NATIVE", MethodAccessFlags::NATIVE.bits()),
    ("ABSTRACT", MethodAccessFlags::ABSTRACT.bits()),
    ("STRICT", MethodAccessFlags::STRICT.bits()),
    ("SYNTHETIC", MethodAccessFlags::SYNTHETIC.bits()),
];

/// Returns the names in `table` whose mask is set in `value`, in table order.
pub fn decode_flags(value: u16, table: &[(&'static str, u16)]) -> Vec<&'static str> {
    table
        .iter()
        .filter(|(_, mask)| value & mask != 0)
        .map(|(name, _)| *name)
        .collect()
}

impl ClassAccessFlags {
    pub fn names(&self) -> Vec<&'static str> {
        decode_flags(self.bits(), CLASS_ACCESS_FLAGS)
    }
}

impl MethodAccessFlags {
    pub fn names(&self) -> Vec<&'static str> {
        decode_flags(self.bits(), METHOD_ACCESS_FLAGS)
    }
}
