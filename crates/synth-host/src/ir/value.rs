//! Operands: typed virtual registers and literal constants

#![allow(missing_docs)]

use std::fmt;

use crate::types::TypeId;

/// Register number, unique within one body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterId(pub u32);

impl RegisterId {
    pub fn new(id: u32) -> Self {
        RegisterId(id)
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A register together with the type it holds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Register {
    pub id: RegisterId,
    pub ty: TypeId,
}

impl Register {
    pub fn new(id: RegisterId, ty: TypeId) -> Self {
        Register { id, ty }
    }
}

/// Dumped as `r<n>:<type>`
impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.ty.as_u32())
    }
}

/// Source operand of an assignment
#[derive(Debug, Clone, PartialEq)]
pub enum IrValue {
    Register(Register),
    Constant(IrConstant),
}

impl fmt::Display for IrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrValue::Register(reg) => reg.fmt(f),
            IrValue::Constant(constant) => constant.fmt(f),
        }
    }
}

/// Literal baked into a body
#[derive(Debug, Clone, PartialEq)]
pub enum IrConstant {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
}

impl fmt::Display for IrConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrConstant::Number(n) => n.fmt(f),
            // quoted so dumps show embedded whitespace
            IrConstant::String(text) => write!(f, "{text:?}"),
            IrConstant::Boolean(flag) => flag.fmt(f),
            IrConstant::Null => f.write_str("null"),
        }
    }
}
