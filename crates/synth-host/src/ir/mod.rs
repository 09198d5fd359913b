//! Intermediate Representation (IR) for synthesized bodies
//!
//! Body generators hand the host one `IrFunction` per callable. The IR is
//! three-address code in basic blocks, the same shape the host lowers user
//! code into.
//!
//! # Structure
//!
//! - `IrModule` - Container for one compilation's lowered functions and classes
//! - `IrFunction` - A callable body with parameters and basic blocks
//! - `BasicBlock` - A sequence of instructions with a single entry and exit
//! - `IrInstr` - Three-address code instructions
//! - `Register` - Virtual registers with type information
//! - `FunctionBuilder` - Incremental construction of an `IrFunction`

pub mod block;
pub mod builder;
pub mod function;
pub mod instr;
pub mod module;
pub mod pretty;
pub mod value;

pub use block::{BasicBlock, BasicBlockId, Terminator};
pub use builder::FunctionBuilder;
pub use function::IrFunction;
pub use instr::IrInstr;
pub use module::{IrClass, IrField, IrModule};
pub use pretty::PrettyPrint;
pub use value::{IrConstant, IrValue, Register, RegisterId};
