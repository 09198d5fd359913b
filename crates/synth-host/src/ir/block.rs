//! Basic blocks
//!
//! Straight-line instruction runs closed by exactly one terminator.

#![allow(missing_docs)]

use std::fmt;

use super::instr::IrInstr;
use super::value::Register;

/// Index of a block within its function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasicBlockId(pub u32);

impl fmt::Display for BasicBlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

/// Block of a function body
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    pub id: BasicBlockId,
    /// Label shown in dumps
    pub label: Option<String>,
    /// Body, terminator excluded
    pub instructions: Vec<IrInstr>,
    /// `Unreachable` until the builder closes the block
    pub terminator: Terminator,
}

impl BasicBlock {
    /// An open block with no instructions
    pub fn new(id: BasicBlockId) -> Self {
        BasicBlock {
            id,
            label: None,
            instructions: Vec::new(),
            terminator: Terminator::Unreachable,
        }
    }

    /// An open block carrying a dump label
    pub fn with_label(id: BasicBlockId, label: impl Into<String>) -> Self {
        let mut block = BasicBlock::new(id);
        block.label = Some(label.into());
        block
    }

    /// Append an instruction before the terminator
    pub fn add_instr(&mut self, instr: IrInstr) {
        self.instructions.push(instr);
    }

    /// Close the block
    pub fn set_terminator(&mut self, term: Terminator) {
        self.terminator = term;
    }

    /// Blocks control may continue to
    pub fn successors(&self) -> Option<BasicBlockId> {
        self.terminator.target()
    }

    /// Whether a real terminator was set
    pub fn is_terminated(&self) -> bool {
        self.terminator != Terminator::Unreachable
    }

    /// Instruction count, terminator excluded
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the block holds no instructions
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// How control leaves a block
#[derive(Debug, Clone, PartialEq)]
pub enum Terminator {
    /// Continue in another block
    Jump(BasicBlockId),
    /// Leave the function; constructors return nothing
    Return(Option<Register>),
    /// No terminator yet
    Unreachable,
}

impl Terminator {
    /// Jump target, if any
    pub fn target(&self) -> Option<BasicBlockId> {
        match self {
            Terminator::Jump(target) => Some(*target),
            Terminator::Return(_) | Terminator::Unreachable => None,
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Jump(target) => write!(f, "jump {}", target),
            Terminator::Return(Some(reg)) => write!(f, "return {}", reg),
            Terminator::Return(None) => f.write_str("return"),
            Terminator::Unreachable => f.write_str("unreachable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::value::RegisterId;
    use crate::types::TypeId;

    #[test]
    fn test_new_block_is_open() {
        let block = BasicBlock::with_label(BasicBlockId(0), "entry");
        assert_eq!(block.label.as_deref(), Some("entry"));
        assert!(block.is_empty());
        assert!(!block.is_terminated());
        assert_eq!(block.successors(), None);
    }

    #[test]
    fn test_terminators() {
        let reg = Register::new(RegisterId::new(0), TypeId(1));
        assert_eq!(Terminator::Jump(BasicBlockId(3)).target(), Some(BasicBlockId(3)));
        assert_eq!(Terminator::Return(Some(reg.clone())).target(), None);
        assert_eq!(Terminator::Return(Some(reg)).to_string(), "return r0:1");
        assert_eq!(Terminator::Return(None).to_string(), "return");
    }
}
