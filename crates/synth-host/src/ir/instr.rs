//! Three-address instructions

#![allow(missing_docs)]

use std::fmt;

use super::value::{IrValue, Register};
use crate::symbols::{CallableId, ClassId};

#[derive(Debug, Clone, PartialEq)]
pub enum IrInstr {
    /// `dest = value`
    Assign { dest: Register, value: IrValue },

    /// Run constructor `target` on `this`, which is already allocated
    DelegatingConstructorCall {
        this: Register,
        target: CallableId,
        args: Vec<Register>,
    },

    /// Reset the fields `class` itself declares on `this`, in declaration
    /// order. Inherited slots are left to the superclass constructor.
    InstanceInitializer { this: Register, class: ClassId },

    /// `dest = object.field`
    LoadField {
        dest: Register,
        object: Register,
        field: u16,
    },

    /// `object.field = value`
    StoreField {
        object: Register,
        field: u16,
        value: Register,
    },
}

impl fmt::Display for IrInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrInstr::Assign { dest, value } => write!(f, "{} = {}", dest, value),
            IrInstr::DelegatingConstructorCall { this, target, args } => {
                let args: Vec<String> = args.iter().map(Register::to_string).collect();
                write!(f, "delegate {} -> {}({})", this, target, args.join(", "))
            }
            IrInstr::InstanceInitializer { this, class } => {
                write!(f, "init_fields {} as {}", this, class)
            }
            IrInstr::LoadField {
                dest,
                object,
                field,
            } => write!(f, "{} = {}.field{}", dest, object, field),
            IrInstr::StoreField {
                object,
                field,
                value,
            } => write!(f, "{}.field{} = {}", object, field, value),
        }
    }
}
