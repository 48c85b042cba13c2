use std::io::{BufRead, BufReader, Read};

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, trace, warn};

use crate::{
    attributes::{
        Attribute, AttributeInfo, AttributeKind, Attributes, BootstrapMethod, CodeAttribute,
        InnerClass, LineNumberTableEntry,
    },
    class_file::MethodInfo,
    constant_pool::{self, CpInfo},
    ClassAccessFlags, ClassFile, ClassFileError, ConstantPool, MethodAccessFlags, Result,
};

type Endian = BigEndian;

const MAGIC_IDENTIFIER: u32 = 0xCAFEBABE;

/// Deepest attribute nesting accepted. Only Code carries nested attributes,
/// so real class files never go past 1.
pub const MAX_ATTRIBUTE_DEPTH: usize = 8;

// Upper bound on what `read_bytes` reserves before the bytes have been read.
const MAX_PREALLOCATION: usize = 64 * 1024;

pub struct Parser<R> {
    r: BufReader<R>,
}
impl<R: Read> Parser<R> {
    pub fn new(r: R) -> Self {
        Self {
            r: BufReader::new(r),
        }
    }

    pub fn parse(&mut self) -> Result<ClassFile> {
        self.parse_magic_identifier()?;
        let version = self.parse_version()?;
        debug!("class file version {}.{}", version.0, version.1);

        let constant_pool = self.parse_constant_pool()?;
        let access_flags = ClassAccessFlags::from_bits_retain(self.read_u16()?);
        let this_class = self.read_u16()?;
        let super_class = self.read_u16()?;

        self.parse_interfaces()?;
        self.parse_fields()?;

        let methods_count = self.read_u16()?;
        debug!("decoding {} methods", methods_count);
        let methods = (0..methods_count)
            .map(|_| self.parse_method_info(&constant_pool))
            .collect::<Result<Vec<_>>>()?;

        let attributes_count = self.read_u16()?;
        debug!("decoding {} class attributes", attributes_count);
        let attributes = self.parse_attributes(attributes_count, &constant_pool, 0)?;

        Ok(ClassFile {
            version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            methods,
            attributes,
        })
    }

    fn parse_magic_identifier(&mut self) -> Result<()> {
        match self.read_u32()? {
            MAGIC_IDENTIFIER => Ok(()),
            magic_identifier => Err(ClassFileError::InvalidMagicIdentifier(magic_identifier)),
        }
    }

    fn parse_version(&mut self) -> Result<(u16, u16)> {
        let minor = self.read_u16()?;
        let major = self.read_u16()?;
        Ok((major, minor))
    }

    fn parse_interfaces(&mut self) -> Result<()> {
        match self.read_u16()? {
            0 => Ok(()),
            _ => Err(ClassFileError::UnsupportedFeature("interfaces")),
        }
    }

    fn parse_fields(&mut self) -> Result<()> {
        match self.read_u16()? {
            0 => Ok(()),
            _ => Err(ClassFileError::UnsupportedFeature("fields")),
        }
    }

    fn parse_method_info(&mut self, constant_pool: &ConstantPool) -> Result<MethodInfo> {
        let access_flags = MethodAccessFlags::from_bits_retain(self.read_u16()?);
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;
        let attributes_count = self.read_u16()?;
        let attributes = self.parse_attributes(attributes_count, constant_pool, 0)?;

        Ok(MethodInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    // A count of N announces N - 1 entries.
    fn parse_constant_pool(&mut self) -> Result<ConstantPool> {
        let constant_pool_count = self.read_u16()?;

        let count = (constant_pool_count as usize).saturating_sub(1);
        debug!("decoding {} constant pool entries", count);

        let mut res = Vec::with_capacity(count);
        for index in 1..=count {
            let cp_info = self.parse_cp_info()?;
            trace!("#{} = {:?}", index, cp_info);
            res.push(cp_info);
        }
        Ok(ConstantPool::new(res))
    }

    fn parse_cp_info(&mut self) -> Result<CpInfo> {
        let tag = self.read_u8()?;
        let cp_info = match tag {
            1 => self.parse_utf8()?,
            3 => CpInfo::Integer(self.read_i32()?),
            4 => CpInfo::Float(self.read_f32()?),
            7 => self.parse_class_info()?,
            8 => self.parse_string()?,
            9 => CpInfo::FieldRef(self.parse_ref_info()?),
            10 => CpInfo::MethodRef(self.parse_ref_info()?),
            12 => self.parse_name_and_type_info()?,
            15 => self.parse_method_handle()?,
            18 => self.parse_invoke_dynamic_info()?,
            _ => return Err(ClassFileError::UnsupportedConstantTag(tag)),
        };

        Ok(cp_info)
    }

    fn parse_utf8(&mut self) -> Result<CpInfo> {
        let length = self.read_u16()?;
        let bytes = self.read_bytes(length as usize)?;

        Ok(CpInfo::Utf8(bytes))
    }

    fn parse_class_info(&mut self) -> Result<CpInfo> {
        let name_index = self.read_u16()?;

        Ok(CpInfo::Class(constant_pool::ClassInfo { name_index }))
    }

    fn parse_string(&mut self) -> Result<CpInfo> {
        let string_index = self.read_u16()?;

        Ok(CpInfo::String { string_index })
    }

    fn parse_name_and_type_info(&mut self) -> Result<CpInfo> {
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;

        Ok(CpInfo::NameAndType(constant_pool::NameAndTypeInfo {
            name_index,
            descriptor_index,
        }))
    }

    fn parse_method_handle(&mut self) -> Result<CpInfo> {
        let reference_kind = self.read_u8()?;
        let reference_index = self.read_u16()?;

        Ok(CpInfo::MethodHandle(constant_pool::MethodHandleInfo {
            reference_kind,
            reference_index,
        }))
    }

    fn parse_invoke_dynamic_info(&mut self) -> Result<CpInfo> {
        let bootstrap_method_attr_index = self.read_u16()?;
        let name_and_type_index = self.read_u16()?;

        Ok(CpInfo::InvokeDynamic(constant_pool::InvokeDynamicInfo {
            bootstrap_method_attr_index,
            name_and_type_index,
        }))
    }

    fn parse_ref_info(&mut self) -> Result<constant_pool::RefInfo> {
        let class_index = self.read_u16()?;
        let name_and_type_index = self.read_u16()?;

        Ok(constant_pool::RefInfo {
            class_index,
            name_and_type_index,
        })
    }

    fn parse_attributes(
        &mut self,
        attributes_count: u16,
        constant_pool: &ConstantPool,
        depth: usize,
    ) -> Result<Attributes> {
        if depth > MAX_ATTRIBUTE_DEPTH {
            return Err(ClassFileError::UnsupportedFeature("nested attributes"));
        }

        (0..attributes_count)
            .map(|_| self.parse_attribute(constant_pool, depth))
            .collect::<Result<Vec<_>>>()
            .map(Attributes)
    }

    fn parse_attribute(&mut self, constant_pool: &ConstantPool, depth: usize) -> Result<Attribute> {
        let attribute_name_index = self.read_u16()?;
        let attribute_length = self.read_u32()?;

        let name = constant_pool.utf8(attribute_name_index)?;
        let kind = AttributeKind::try_from(name).map_err(|name| {
            ClassFileError::UnsupportedAttribute(String::from_utf8_lossy(name).into_owned())
        })?;
        trace!("{:?} attribute, {} bytes", kind, attribute_length);

        let bytes = self.read_bytes(attribute_length as usize)?;
        let mut payload = Parser::new(bytes.as_slice());
        let info = match kind {
            AttributeKind::BootstrapMethods => payload.parse_bootstrap_methods()?,
            AttributeKind::SourceFile => payload.parse_source_file()?,
            AttributeKind::InnerClasses => payload.parse_inner_classes()?,
            AttributeKind::Code => {
                AttributeInfo::Code(payload.parse_code_attribute(constant_pool, depth + 1)?)
            }
            AttributeKind::LineNumberTable => payload.parse_line_number_table()?,
        };

        let trailing = payload.remaining()?;
        if trailing > 0 {
            warn!("ignoring {} trailing bytes in {:?} attribute", trailing, kind);
        }

        Ok(Attribute {
            attribute_name_index,
            attribute_length,
            info,
        })
    }

    fn parse_bootstrap_methods(&mut self) -> Result<AttributeInfo> {
        let num_bootstrap_methods = self.read_u16()?;
        let bootstrap_methods = (0..num_bootstrap_methods)
            .map(|_| self.parse_bootstrap_method())
            .collect::<Result<Vec<_>>>()?;

        Ok(AttributeInfo::BootstrapMethods(bootstrap_methods))
    }

    fn parse_bootstrap_method(&mut self) -> Result<BootstrapMethod> {
        let bootstrap_method_ref = self.read_u16()?;
        let num_bootstrap_arguments = self.read_u16()?;
        let bootstrap_arguments = (0..num_bootstrap_arguments)
            .map(|_| self.read_u16())
            .collect::<Result<Vec<_>>>()?;

        Ok(BootstrapMethod {
            bootstrap_method_ref,
            bootstrap_arguments,
        })
    }

    fn parse_source_file(&mut self) -> Result<AttributeInfo> {
        let sourcefile_index = self.read_u16()?;

        Ok(AttributeInfo::SourceFile { sourcefile_index })
    }

    fn parse_inner_classes(&mut self) -> Result<AttributeInfo> {
        let number_of_classes = self.read_u16()?;
        let classes = (0..number_of_classes)
            .map(|_| self.parse_inner_class())
            .collect::<Result<Vec<_>>>()?;

        Ok(AttributeInfo::InnerClasses(classes))
    }

    fn parse_inner_class(&mut self) -> Result<InnerClass> {
        let inner_class_info_index = self.read_u16()?;
        let outer_class_info_index = self.read_u16()?;
        let inner_name_index = self.read_u16()?;
        let inner_class_access_flags = self.read_u16()?;

        Ok(InnerClass {
            inner_class_info_index,
            outer_class_info_index,
            inner_name_index,
            inner_class_access_flags,
        })
    }

    fn parse_line_number_table(&mut self) -> Result<AttributeInfo> {
        let line_number_table_length = self.read_u16()?;
        let line_number_table = (0..line_number_table_length)
            .map(|_| self.parse_line_number_table_entry())
            .collect::<Result<Vec<_>>>()?;

        Ok(AttributeInfo::LineNumberTable(line_number_table))
    }

    fn parse_line_number_table_entry(&mut self) -> Result<LineNumberTableEntry> {
        let start_pc = self.read_u16()?;
        let line_number = self.read_u16()?;

        Ok(LineNumberTableEntry {
            start_pc,
            line_number,
        })
    }

    fn parse_code_attribute(
        &mut self,
        constant_pool: &ConstantPool,
        depth: usize,
    ) -> Result<CodeAttribute> {
        let max_stack = self.read_u16()?;
        let max_locals = self.read_u16()?;
        let code_length = self.read_u32()?;
        let code = self.read_bytes(code_length as usize)?;

        let exception_table_length = self.read_u16()?;
        if exception_table_length != 0 {
            return Err(ClassFileError::UnsupportedFeature("exception_table"));
        }

        let attributes_count = self.read_u16()?;
        let attributes = self.parse_attributes(attributes_count, constant_pool, depth)?;

        Ok(CodeAttribute {
            max_stack,
            max_locals,
            code,
            attributes,
        })
    }

    /// Number of bytes left unread. Drains the reader.
    fn remaining(&mut self) -> Result<usize> {
        let mut count = 0;
        loop {
            let available = self.r.fill_buf()?.len();
            if available == 0 {
                return Ok(count);
            }
            count += available;
            self.r.consume(available);
        }
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(len.min(MAX_PREALLOCATION));
        self.r.by_ref().take(len as u64).read_to_end(&mut bytes)?;
        if bytes.len() < len {
            return Err(ClassFileError::TruncatedInput);
        }
        Ok(bytes)
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(self.r.read_u32::<Endian>()?)
    }

    fn read_u16(&mut self) -> Result<u16> {
        Ok(self.r.read_u16::<Endian>()?)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.r.read_u8()?)
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(self.r.read_i32::<Endian>()?)
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(self.r.read_f32::<Endian>()?)
    }
}
