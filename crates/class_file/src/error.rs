use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassFileError {
    #[error(transparent)]
    IOError(io::Error),
    #[error("Truncated input")]
    TruncatedInput,
    #[error("Invalid magic identifier: 0x{0:X}")]
    InvalidMagicIdentifier(u32),
    #[error("Unsupported constant pool tag: {0}")]
    UnsupportedConstantTag(u8),
    #[error("Unsupported attribute: {0}")]
    UnsupportedAttribute(String),
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(&'static str),
    #[error("Bad index {index}, expected {expected}")]
    BadIndex { index: u16, expected: &'static str },
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

// A reader running dry mid-field is a truncated class file, not an I/O failure.
impl From<io::Error> for ClassFileError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => ClassFileError::TruncatedInput,
            _ => ClassFileError::IOError(e),
        }
    }
}
