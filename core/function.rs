use log::{debug, trace};

use crate::compare::Comparator;
use crate::error::MedianError;
use crate::types::DeclaredType;
use crate::Result;

/// Registration descriptor for the `median` aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedianFunc;

impl MedianFunc {
    pub const NAME: &'static str = "median";
    /// Value arguments taken per row.
    pub const ARGS: usize = 1;
    pub const SUPPORTED_TYPES: [DeclaredType; 7] = [
        DeclaredType::Int2,
        DeclaredType::Int4,
        DeclaredType::Int8,
        DeclaredType::TimestampTz,
        DeclaredType::Float4,
        DeclaredType::Float8,
        DeclaredType::Text,
    ];

    pub fn accepts(declared: DeclaredType) -> bool {
        resolve_comparator(declared).is_ok()
    }
}

impl std::fmt::Display for MedianFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Self::NAME)
    }
}

/// Picks the comparator for the aggregate's bound argument type.
pub fn resolve_comparator(declared: DeclaredType) -> Result<Comparator> {
    let comparator = match declared {
        DeclaredType::Int2 => Comparator::Int16,
        DeclaredType::Int4 => Comparator::Int32,
        // timestamptz is carried as microseconds since the epoch
        DeclaredType::Int8 | DeclaredType::TimestampTz => Comparator::Int64,
        DeclaredType::Float4 => Comparator::Float32,
        DeclaredType::Float8 => Comparator::Float64,
        DeclaredType::Text => Comparator::Text,
        DeclaredType::Bool
        | DeclaredType::Numeric
        | DeclaredType::Date
        | DeclaredType::Bytea
        | DeclaredType::Other(_) => {
            debug!("{}: no comparator for {}", MedianFunc::NAME, declared);
            return Err(MedianError::UnsupportedType(declared));
        }
    };
    trace!("{}: {} resolved to {:?}", MedianFunc::NAME, declared, comparator);
    Ok(comparator)
}
