use std::fmt::Display;

use crate::bail_conversion_error;
use crate::Result;

/// A single non-null contribution to the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    Real(f32),
    Double(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Text,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::SmallInt => "smallint",
            ValueKind::Integer => "integer",
            ValueKind::BigInt => "bigint",
            ValueKind::Real => "real",
            ValueKind::Double => "double",
            ValueKind::Text => "text",
        };
        write!(f, "{}", name)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::SmallInt(i) => write!(f, "{}", i),
            Value::Integer(i) => write!(f, "{}", i),
            Value::BigInt(i) => write!(f, "{}", i),
            Value::Real(fl) => write!(f, "{}", fl),
            Value::Double(fl) => write!(f, "{}", fl),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::SmallInt(_) => ValueKind::SmallInt,
            Value::Integer(_) => ValueKind::Integer,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::Real(_) => ValueKind::Real,
            Value::Double(_) => ValueKind::Double,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Interprets host text input as a value of `kind`.
    ///
    /// Numeric input is trimmed before parsing; text is taken verbatim.
    pub fn parse(kind: ValueKind, text: &str) -> Result<Value> {
        let value = match kind {
            ValueKind::SmallInt => Value::SmallInt(text.trim().parse()?),
            ValueKind::Integer => Value::Integer(text.trim().parse()?),
            ValueKind::BigInt => Value::BigInt(text.trim().parse()?),
            ValueKind::Real => Value::Real(text.trim().parse()?),
            ValueKind::Double => Value::Double(text.trim().parse()?),
            ValueKind::Text => Value::Text(text.to_string()),
        };
        Ok(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::SmallInt(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::BigInt(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Real(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

/// Type tag the host binds to the aggregate's argument.
///
/// Only some of these have a comparator; the rest are host types the
/// aggregate can be declared over but never accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Int2,
    Int4,
    Int8,
    TimestampTz,
    Float4,
    Float8,
    Text,
    Bool,
    Numeric,
    Date,
    Bytea,
    Other(u32),
}

impl Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclaredType::Int2 => write!(f, "int2"),
            DeclaredType::Int4 => write!(f, "int4"),
            DeclaredType::Int8 => write!(f, "int8"),
            DeclaredType::TimestampTz => write!(f, "timestamptz"),
            DeclaredType::Float4 => write!(f, "float4"),
            DeclaredType::Float8 => write!(f, "float8"),
            DeclaredType::Text => write!(f, "text"),
            DeclaredType::Bool => write!(f, "bool"),
            DeclaredType::Numeric => write!(f, "numeric"),
            DeclaredType::Date => write!(f, "date"),
            DeclaredType::Bytea => write!(f, "bytea"),
            DeclaredType::Other(oid) => write!(f, "other({})", oid),
        }
    }
}

impl DeclaredType {
    pub fn from_name(name: &str) -> Result<DeclaredType> {
        let declared = match name.trim().to_ascii_lowercase().as_str() {
            "int2" | "smallint" => DeclaredType::Int2,
            "int4" | "int" | "integer" => DeclaredType::Int4,
            "int8" | "bigint" => DeclaredType::Int8,
            "timestamptz" => DeclaredType::TimestampTz,
            "float4" | "real" => DeclaredType::Float4,
            "float8" | "double" | "double precision" => DeclaredType::Float8,
            "text" | "varchar" => DeclaredType::Text,
            "bool" | "boolean" => DeclaredType::Bool,
            "numeric" | "decimal" => DeclaredType::Numeric,
            "date" => DeclaredType::Date,
            "bytea" => DeclaredType::Bytea,
            other => bail_conversion_error!("unknown type name '{}'", other),
        };
        Ok(declared)
    }
}
