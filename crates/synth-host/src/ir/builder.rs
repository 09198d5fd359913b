//! Incremental construction of IR function bodies

use super::block::{BasicBlock, BasicBlockId, Terminator};
use super::function::IrFunction;
use super::instr::IrInstr;
use super::value::{IrConstant, IrValue, Register, RegisterId};
use crate::symbols::CallableId;
use crate::types::TypeId;

/// Builds one `IrFunction`, allocating registers and appending to the
/// current block.
pub struct FunctionBuilder {
    func: IrFunction,
    current_block: BasicBlockId,
    next_register: u32,
    next_block: u32,
}

impl FunctionBuilder {
    /// Start a function with an empty entry block
    pub fn new(callable: CallableId, return_ty: TypeId) -> Self {
        let mut func = IrFunction::new(callable, Vec::new(), return_ty);
        let entry = func.add_block(BasicBlock::with_label(BasicBlockId(0), "entry"));
        func.entry_block = entry;
        Self {
            func,
            current_block: entry,
            next_register: 0,
            next_block: 1,
        }
    }

    /// Allocate a fresh register
    pub fn alloc_register(&mut self, ty: TypeId) -> Register {
        let reg = Register::new(RegisterId::new(self.next_register), ty);
        self.next_register += 1;
        reg
    }

    /// Declare the next parameter
    pub fn param(&mut self, ty: TypeId) -> Register {
        let reg = self.alloc_register(ty);
        self.func.params.push(reg.clone());
        reg
    }

    /// Start a new block and make it current
    pub fn new_block(&mut self, label: impl Into<String>) -> BasicBlockId {
        let id = BasicBlockId(self.next_block);
        self.next_block += 1;
        self.func.add_block(BasicBlock::with_label(id, label));
        self.current_block = id;
        id
    }

    /// Add an instruction to the current block
    pub fn emit(&mut self, instr: IrInstr) {
        if let Some(block) = self.func.get_block_mut(self.current_block) {
            block.add_instr(instr);
        }
    }

    /// Emit a constant into a fresh register
    pub fn constant(&mut self, value: IrConstant, ty: TypeId) -> Register {
        let dest = self.alloc_register(ty);
        self.emit(IrInstr::Assign {
            dest: dest.clone(),
            value: IrValue::Constant(value),
        });
        dest
    }

    /// Set the terminator of the current block
    pub fn terminate(&mut self, term: Terminator) {
        if let Some(block) = self.func.get_block_mut(self.current_block) {
            block.set_terminator(term);
        }
    }

    /// Finish the body
    pub fn finish(self) -> IrFunction {
        self.func
    }
}
