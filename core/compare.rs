use std::cmp::Ordering;

use crate::error::MedianError;
use crate::types::{Value, ValueKind};
use crate::Result;

/// Ordering for one supported value kind.
///
/// Floats compare numerically, so `-0.0` and `0.0` tie. Every NaN, whatever
/// its sign, ties with other NaNs and sorts after every number. Text is
/// ordered bytewise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Text,
}

impl Comparator {
    pub fn kind(&self) -> ValueKind {
        match self {
            Comparator::Int16 => ValueKind::SmallInt,
            Comparator::Int32 => ValueKind::Integer,
            Comparator::Int64 => ValueKind::BigInt,
            Comparator::Float32 => ValueKind::Real,
            Comparator::Float64 => ValueKind::Double,
            Comparator::Text => ValueKind::Text,
        }
    }

    pub fn check(&self, value: &Value) -> Result<()> {
        if value.kind() != self.kind() {
            return Err(MedianError::TypeMismatch {
                expected: self.kind(),
                found: value.kind(),
            });
        }
        Ok(())
    }

    pub fn compare(&self, lhs: &Value, rhs: &Value) -> Ordering {
        match (self, lhs, rhs) {
            (Comparator::Int16, Value::SmallInt(l), Value::SmallInt(r)) => l.cmp(r),
            (Comparator::Int32, Value::Integer(l), Value::Integer(r)) => l.cmp(r),
            (Comparator::Int64, Value::BigInt(l), Value::BigInt(r)) => l.cmp(r),
            (Comparator::Float32, Value::Real(l), Value::Real(r)) => l
                .partial_cmp(r)
                .unwrap_or_else(|| l.is_nan().cmp(&r.is_nan())),
            (Comparator::Float64, Value::Double(l), Value::Double(r)) => l
                .partial_cmp(r)
                .unwrap_or_else(|| l.is_nan().cmp(&r.is_nan())),
            (Comparator::Text, Value::Text(l), Value::Text(r)) => l.as_bytes().cmp(r.as_bytes()),
            // Mixed kinds never reach a chain (see `check`); order them by kind
            // so the comparison stays total.
            _ => lhs.kind().cmp(&rhs.kind()),
        }
    }
}
