use thiserror::Error;

use crate::types::{DeclaredType, ValueKind};

#[derive(Debug, Clone, Error, miette::Diagnostic)]
pub enum MedianError {
    #[error("Invalid context: {0}")]
    InvalidContext(String),
    #[error("Unsupported type: {0}")]
    UnsupportedType(DeclaredType),
    #[error("Type mismatch: expected {expected} value, got {found}")]
    TypeMismatch { expected: ValueKind, found: ValueKind },
    #[error("Conversion error: {0}")]
    ConversionError(String),
    #[error("Parse error: {0}")]
    ParseIntError(#[from] std::num::ParseIntError),
    #[error("Parse error: {0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),
}

#[macro_export]
macro_rules! bail_invalid_context {
    ($($arg:tt)*) => {
        return Err($crate::error::MedianError::InvalidContext(format!($($arg)*)))
    };
}

#[macro_export]
macro_rules! bail_conversion_error {
    ($($arg:tt)*) => {
        return Err($crate::error::MedianError::ConversionError(format!($($arg)*)))
    };
}
