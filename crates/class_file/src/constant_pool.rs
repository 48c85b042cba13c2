use crate::{ClassFileError, Result};

/// Resolves `$index` in `$cp` and yields the payload of the `$i` variant, or
/// `BadIndex` if the entry is missing or of another kind.
macro_rules! matches_cp_info {
    ($cp:expr, $index:expr, $i:ident) => {{
        let index: u16 = $index;
        match $cp.get(index)? {
            $crate::constant_pool::CpInfo::$i(n) => Ok(n),
            _ => Err($crate::ClassFileError::BadIndex {
                index,
                expected: stringify!($i),
            }),
        }
    }};
}

#[derive(Debug, Default)]
pub struct ConstantPool {
    cp_infos: Vec<CpInfo>,
}
impl ConstantPool {
    pub fn new(cp_infos: Vec<CpInfo>) -> Self {
        Self { cp_infos }
    }

    /// Looks up an entry by its 1-based index.
    pub fn get(&self, index: u16) -> Result<&CpInfo> {
        (index as usize)
            .checked_sub(1)
            .and_then(|i| self.cp_infos.get(i))
            .ok_or(ClassFileError::BadIndex {
                index,
                expected: "constant pool entry",
            })
    }

    /// Raw bytes of the Utf8 entry at `index`.
    pub fn utf8(&self, index: u16) -> Result<&[u8]> {
        matches_cp_info!(self, index, Utf8).map(Vec::as_slice)
    }

    pub fn utf8_str(&self, index: u16) -> Result<&str> {
        Ok(std::str::from_utf8(self.utf8(index)?)?)
    }

    pub fn len(&self) -> usize {
        self.cp_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cp_infos.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CpInfo> {
        self.cp_infos.iter()
    }
}
impl<'a> IntoIterator for &'a ConstantPool {
    type Item = &'a CpInfo;
    type IntoIter = std::slice::Iter<'a, CpInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.cp_infos.iter()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum CpInfo {
    MethodRef(RefInfo),
    FieldRef(RefInfo),
    Class(ClassInfo),
    NameAndType(NameAndTypeInfo),
    Utf8(Vec<u8>),
    String { string_index: u16 },
    InvokeDynamic(InvokeDynamicInfo),
    MethodHandle(MethodHandleInfo),
    Float(f32),
    Integer(i32),
}
impl CpInfo {
    pub fn tag(&self) -> u8 {
        match self {
            CpInfo::Utf8(_) => 1,
            CpInfo::Integer(_) => 3,
            CpInfo::Float(_) => 4,
            CpInfo::Class(_) => 7,
            CpInfo::String { .. } => 8,
            CpInfo::FieldRef(_) => 9,
            CpInfo::MethodRef(_) => 10,
            CpInfo::NameAndType(_) => 12,
            CpInfo::MethodHandle(_) => 15,
            CpInfo::InvokeDynamic(_) => 18,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct RefInfo {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ClassInfo {
    // Must point at a Utf8 entry holding the class name in internal form.
    pub name_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct NameAndTypeInfo {
    pub name_index: u16,
    pub descriptor_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct InvokeDynamicInfo {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodHandleInfo {
    pub reference_kind: u8,
    pub reference_index: u16,
}
