use std::fmt;

use crate::ConstantPool;

#[derive(Debug, Default)]
pub struct Attributes(pub Vec<Attribute>);
impl Attributes {
    pub fn find_by_name<'a: 'b, 'b>(
        &'a self,
        name: &'b [u8],
        constant_pool: &'b ConstantPool,
    ) -> impl Iterator<Item = &'a Attribute> + 'b {
        self.0.iter().filter(move |a| {
            constant_pool
                .utf8(a.attribute_name_index)
                .map_or(false, |n| n == name)
        })
    }

    pub fn code(&self) -> Option<&CodeAttribute> {
        self.0.iter().find_map(|a| match &a.info {
            AttributeInfo::Code(code) => Some(code),
            _ => None,
        })
    }

    pub fn line_number_table(&self) -> Option<&[LineNumberTableEntry]> {
        self.0.iter().find_map(|a| match &a.info {
            AttributeInfo::LineNumberTable(table) => Some(table.as_slice()),
            _ => None,
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug)]
pub struct Attribute {
    pub attribute_name_index: u16,
    pub attribute_length: u32,
    pub info: AttributeInfo,
}

/// The attribute names this decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    BootstrapMethods,
    SourceFile,
    InnerClasses,
    Code,
    LineNumberTable,
}
impl AttributeKind {
    pub fn name(&self) -> &'static [u8] {
        match self {
            AttributeKind::BootstrapMethods => b"BootstrapMethods",
            AttributeKind::SourceFile => b"SourceFile",
            AttributeKind::InnerClasses => b"InnerClasses",
            AttributeKind::Code => b"Code",
            AttributeKind::LineNumberTable => b"LineNumberTable",
        }
    }
}

impl<'a> TryFrom<&'a [u8]> for AttributeKind {
    type Error = &'a [u8];

    fn try_from(name: &'a [u8]) -> std::result::Result<Self, Self::Error> {
        match name {
            b"BootstrapMethods" => Ok(AttributeKind::BootstrapMethods),
            b"SourceFile" => Ok(AttributeKind::SourceFile),
            b"InnerClasses" => Ok(AttributeKind::InnerClasses),
            b"Code" => Ok(AttributeKind::Code),
            b"LineNumberTable" => Ok(AttributeKind::LineNumberTable),
            _ => Err(name),
        }
    }
}

#[derive(Debug)]
pub enum AttributeInfo {
    BootstrapMethods(Vec<BootstrapMethod>),
    SourceFile { sourcefile_index: u16 },
    InnerClasses(Vec<InnerClass>),
    Code(CodeAttribute),
    LineNumberTable(Vec<LineNumberTableEntry>),
}
impl AttributeInfo {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeInfo::BootstrapMethods(_) => AttributeKind::BootstrapMethods,
            AttributeInfo::SourceFile { .. } => AttributeKind::SourceFile,
            AttributeInfo::InnerClasses(_) => AttributeKind::InnerClasses,
            AttributeInfo::Code(_) => AttributeKind::Code,
            AttributeInfo::LineNumberTable(_) => AttributeKind::LineNumberTable,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct BootstrapMethod {
    pub bootstrap_method_ref: u16,
    pub bootstrap_arguments: Vec<u16>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct InnerClass {
    pub inner_class_info_index: u16,
    pub outer_class_info_index: u16,
    pub inner_name_index: u16,
    pub inner_class_access_flags: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LineNumberTableEntry {
    pub start_pc: u16,
    pub line_number: u16,
}

pub struct CodeAttribute {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
    pub attributes: Attributes,
}
impl fmt::Debug for CodeAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeAttribute")
            .field("max_stack", &self.max_stack)
            .field("max_locals", &self.max_locals)
            .field("code", &format!("({} bytes)", self.code.len()))
            .field("attributes", &self.attributes)
            .finish()
    }
}
