//! Types as seen by declarations and bodies

use std::fmt;

use crate::symbols::ClassId;

/// Handle into a `TypeContext`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Raw index, as printed in IR dumps
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type{}", self.0)
    }
}

/// Built-in value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// f64
    Number,
    /// UTF-8 text
    String,
    /// `true` or `false`
    Boolean,
    /// The `null` value
    Null,
    /// Return type of callables that produce nothing
    Void,
}

impl PrimitiveType {
    /// Interning order, so `ALL[i]` has id `i`
    pub const ALL: [PrimitiveType; 5] = [
        PrimitiveType::Number,
        PrimitiveType::String,
        PrimitiveType::Boolean,
        PrimitiveType::Null,
        PrimitiveType::Void,
    ];

    /// Source spelling
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Number => "number",
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Null => "null",
            PrimitiveType::Void => "void",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An interned type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Built-in value type
    Primitive(PrimitiveType),
    /// Nominal class type
    Class(ClassId),
    /// Unresolved
    Unknown,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(prim) => prim.fmt(f),
            Type::Class(class) => class.fmt(f),
            Type::Unknown => f.write_str("unknown"),
        }
    }
}
