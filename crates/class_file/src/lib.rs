// https://docs.oracle.com/javase/specs/jvms/se17/html/jvms-4.html

#[macro_use]
mod constant_pool;
mod access_flags;
pub mod attributes;
mod class_file;
mod error;
mod parser;

use std::io::Read;

pub use self::class_file::{ClassFile, MethodInfo};
pub use access_flags::{
    decode_flags, ClassAccessFlags, MethodAccessFlags, CLASS_ACCESS_FLAGS, METHOD_ACCESS_FLAGS,
};
pub use constant_pool::{
    ClassInfo, ConstantPool, CpInfo, InvokeDynamicInfo, MethodHandleInfo, NameAndTypeInfo,
    RefInfo,
};
pub use error::ClassFileError;
pub use parser::{Parser, MAX_ATTRIBUTE_DEPTH};

pub type Result<T, E = ClassFileError> = std::result::Result<T, E>;

/// Decodes a complete class file from `source`.
pub fn decode(source: impl Read) -> Result<ClassFile> {
    ClassFile::parse(source)
}
