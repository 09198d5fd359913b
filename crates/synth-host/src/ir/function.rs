//! Lowered callable bodies
//!
//! Member bodies take their receiver as parameter 0; constructors return
//! `void`.

#![allow(missing_docs)]

use super::block::{BasicBlock, BasicBlockId, Terminator};
use super::value::Register;
use crate::span::Span;
use crate::symbols::CallableId;
use crate::types::TypeId;

/// Body of one callable
#[derive(Debug, Clone)]
pub struct IrFunction {
    /// Declaration this body belongs to
    pub callable: CallableId,
    pub params: Vec<Register>,
    pub return_ty: TypeId,
    /// Kept in insertion order, which is also dump order
    pub blocks: Vec<BasicBlock>,
    pub entry_block: BasicBlockId,
    /// `Span::SYNTHETIC` unless lowered from source
    pub source_span: Span,
}

impl IrFunction {
    pub fn new(callable: CallableId, params: Vec<Register>, return_ty: TypeId) -> Self {
        IrFunction {
            callable,
            params,
            return_ty,
            blocks: Vec::new(),
            entry_block: BasicBlockId(0),
            source_span: Span::SYNTHETIC,
        }
    }

    /// Display name, same as the callable id
    pub fn name(&self) -> String {
        self.callable.to_string()
    }

    /// Append `block`, returning its id
    pub fn add_block(&mut self, block: BasicBlock) -> BasicBlockId {
        let id = block.id;
        self.blocks.push(block);
        id
    }

    fn position(&self, id: BasicBlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == id)
    }

    pub fn get_block(&self, id: BasicBlockId) -> Option<&BasicBlock> {
        self.position(id).map(|at| &self.blocks[at])
    }

    pub fn get_block_mut(&mut self, id: BasicBlockId) -> Option<&mut BasicBlock> {
        let at = self.position(id)?;
        self.blocks.get_mut(at)
    }

    pub fn entry(&self) -> Option<&BasicBlock> {
        self.get_block(self.entry_block)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Instructions over all blocks, terminators not counted
    pub fn instruction_count(&self) -> usize {
        self.blocks.iter().map(BasicBlock::len).sum()
    }

    /// Registers handed back by `return` terminators
    pub fn returned_registers(&self) -> impl Iterator<Item = &Register> {
        self.blocks.iter().filter_map(|block| match &block.terminator {
            Terminator::Return(Some(reg)) => Some(reg),
            Terminator::Return(None) | Terminator::Jump(_) | Terminator::Unreachable => None,
        })
    }

    /// Structural check: an existing entry, every block closed, every jump
    /// landing on a known block.
    pub fn validate(&self) -> Result<(), String> {
        if self.entry().is_none() {
            return Err(if self.blocks.is_empty() {
                "body has no blocks".to_string()
            } else {
                format!("missing entry {}", self.entry_block)
            });
        }

        let open = self.blocks.iter().find(|block| !block.is_terminated());
        if let Some(block) = open {
            return Err(format!("{} has no terminator", block.id));
        }

        self.blocks
            .iter()
            .find_map(|block| {
                block
                    .successors()
                    .filter(|&target| self.position(target).is_none())
                    .map(|target| format!("{} jumps to unknown {}", block.id, target))
            })
            .map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::value::RegisterId;
    use crate::symbols::FqName;

    fn body(returns: TypeId, terminator: Terminator) -> IrFunction {
        let callable = CallableId::top_level(FqName::root(), "noop");
        let mut func = IrFunction::new(callable, vec![], returns);
        let mut block = BasicBlock::new(BasicBlockId(0));
        block.set_terminator(terminator);
        func.add_block(block);
        func
    }

    #[test]
    fn test_empty_body_is_invalid() {
        let callable = CallableId::top_level(FqName::root(), "noop");
        let func = IrFunction::new(callable, vec![], TypeId(4));
        assert_eq!(func.validate().unwrap_err(), "body has no blocks");
    }

    #[test]
    fn test_closed_body_is_valid() {
        let func = body(TypeId(4), Terminator::Return(None));
        assert!(func.validate().is_ok());
        assert!(func.source_span.is_synthetic());
        assert_eq!(func.returned_registers().count(), 0);
    }

    #[test]
    fn test_jump_to_unknown_block() {
        let func = body(TypeId(4), Terminator::Jump(BasicBlockId(7)));
        assert_eq!(func.validate().unwrap_err(), "bb0 jumps to unknown bb7");
    }

    #[test]
    fn test_returned_registers() {
        let reg = Register::new(RegisterId::new(0), TypeId(1));
        let func = body(TypeId(1), Terminator::Return(Some(reg.clone())));
        assert_eq!(func.returned_registers().collect::<Vec<_>>(), vec![&reg]);
    }
}
