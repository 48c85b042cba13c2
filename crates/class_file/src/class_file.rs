use std::io::Read;

use crate::{
    access_flags::{ClassAccessFlags, MethodAccessFlags},
    attributes::{Attribute, AttributeInfo, Attributes, BootstrapMethod},
    constant_pool::{ClassInfo, CpInfo, NameAndTypeInfo},
    parser::Parser,
    ClassFileError, ConstantPool, Result,
};

#[derive(Debug)]
pub struct ClassFile {
    /// (major, minor)
    pub version: (u16, u16),
    pub constant_pool: ConstantPool,
    pub access_flags: ClassAccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub methods: Vec<MethodInfo>,
    pub attributes: Attributes,
}
impl ClassFile {
    pub fn parse(bytes: impl Read) -> Result<ClassFile> {
        Parser::new(bytes).parse()
    }

    pub fn pool_entry(&self, index: u16) -> Result<&CpInfo> {
        self.constant_pool.get(index)
    }

    /// Follows a Class entry to the text of its name.
    pub fn resolve_class_name(&self, class_index: u16) -> Result<&str> {
        let ClassInfo { name_index } = matches_cp_info!(self.constant_pool, class_index, Class)?;

        self.constant_pool.utf8_str(*name_index)
    }

    /// Follows a NameAndType entry to the text of its name.
    pub fn resolve_member_name(&self, name_and_type_index: u16) -> Result<&str> {
        let NameAndTypeInfo { name_index, .. } =
            matches_cp_info!(self.constant_pool, name_and_type_index, NameAndType)?;

        self.constant_pool.utf8_str(*name_index)
    }

    /// Looks up entry `index` of the class-level BootstrapMethods attribute.
    /// If the class carries several such attributes, the first one is used.
    pub fn bootstrap_method(&self, index: u16) -> Result<&BootstrapMethod> {
        let bootstrap_methods = self
            .attributes
            .iter()
            .find_map(|a| match &a.info {
                AttributeInfo::BootstrapMethods(methods) => Some(methods),
                _ => None,
            })
            .ok_or(ClassFileError::NotFound("BootstrapMethods attribute"))?;

        bootstrap_methods
            .get(index as usize)
            .ok_or(ClassFileError::BadIndex {
                index,
                expected: "bootstrap method",
            })
    }

    pub fn find_methods_by_name(&self, name: &[u8]) -> Vec<&MethodInfo> {
        self.methods
            .iter()
            .filter(|m| {
                self.constant_pool
                    .utf8(m.name_index)
                    .map_or(false, |n| n == name)
            })
            .collect()
    }

    pub fn find_attributes_by_name(&self, name: &[u8]) -> Vec<&Attribute> {
        self.attributes
            .find_by_name(name, &self.constant_pool)
            .collect()
    }

    pub fn class_name(&self) -> Result<&str> {
        self.resolve_class_name(self.this_class)
    }

    pub fn super_class(&self) -> Result<Option<&str>> {
        // Only java/lang/Object has no direct superclass.
        if self.super_class == 0 {
            return Ok(None);
        }

        self.resolve_class_name(self.super_class).map(Some)
    }

    pub fn method_name(&self, method: &MethodInfo) -> Result<&str> {
        self.constant_pool.utf8_str(method.name_index)
    }

    pub fn method_descriptor(&self, method: &MethodInfo) -> Result<&str> {
        self.constant_pool.utf8_str(method.descriptor_index)
    }

    pub fn source_file(&self) -> Result<Option<&str>> {
        let sourcefile_index = self.attributes.iter().find_map(|a| match a.info {
            AttributeInfo::SourceFile { sourcefile_index } => Some(sourcefile_index),
            _ => None,
        });

        sourcefile_index
            .map(|index| self.constant_pool.utf8_str(index))
            .transpose()
    }
}

#[derive(Debug)]
pub struct MethodInfo {
    pub access_flags: MethodAccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}
