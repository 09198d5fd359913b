//! Lowered program
//!
//! One `IrModule` holds every body and class layout produced by a
//! compilation. The public vectors keep insertion order for dumps.

#![allow(missing_docs)]

use rustc_hash::FxHashMap;

use super::function::IrFunction;
use crate::symbols::{CallableId, ClassId};
use crate::types::TypeId;

#[derive(Debug, Clone)]
pub struct IrModule {
    pub name: String,
    pub functions: Vec<IrFunction>,
    pub classes: Vec<IrClass>,
    by_callable: FxHashMap<CallableId, usize>,
    by_class: FxHashMap<ClassId, usize>,
}

impl IrModule {
    pub fn new(name: impl Into<String>) -> Self {
        IrModule {
            name: name.into(),
            functions: Vec::new(),
            classes: Vec::new(),
            by_callable: FxHashMap::default(),
            by_class: FxHashMap::default(),
        }
    }

    /// Insert a body; a second body for the same callable shadows the first
    /// in lookups.
    pub fn add_function(&mut self, func: IrFunction) {
        let slot = self.functions.len();
        self.by_callable.insert(func.callable.clone(), slot);
        self.functions.push(func);
    }

    pub fn add_class(&mut self, class: IrClass) {
        let slot = self.classes.len();
        self.by_class.insert(class.id.clone(), slot);
        self.classes.push(class);
    }

    pub fn get_function(&self, callable: &CallableId) -> Option<&IrFunction> {
        let slot = *self.by_callable.get(callable)?;
        self.functions.get(slot)
    }

    pub fn get_class(&self, id: &ClassId) -> Option<&IrClass> {
        let slot = *self.by_class.get(id)?;
        self.classes.get(slot)
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn total_instruction_count(&self) -> usize {
        self.functions.iter().map(IrFunction::instruction_count).sum()
    }
}

/// Runtime layout of a class
#[derive(Debug, Clone)]
pub struct IrClass {
    pub id: ClassId,
    /// Inherited slots first, root-most class first, then the class's own
    pub fields: Vec<IrField>,
    pub methods: Vec<CallableId>,
    pub constructor: Option<CallableId>,
    /// `None` only for the root class
    pub parent: Option<ClassId>,
}

impl IrClass {
    pub fn new(id: ClassId) -> Self {
        IrClass {
            id,
            fields: Vec::new(),
            methods: Vec::new(),
            constructor: None,
            parent: None,
        }
    }

    /// Append a slot declared by `owner` and return its index
    pub fn add_field(&mut self, owner: &ClassId, name: impl Into<String>, ty: TypeId) -> u16 {
        let index = u16::try_from(self.fields.len()).unwrap_or(u16::MAX);
        self.fields.push(IrField {
            owner: owner.clone(),
            name: name.into(),
            ty,
            index,
        });
        index
    }

    /// Slots declared by `owner` itself, in declaration order
    pub fn fields_declared_by<'a>(
        &'a self,
        owner: &'a ClassId,
    ) -> impl Iterator<Item = &'a IrField> + 'a {
        self.fields.iter().filter(move |field| &field.owner == owner)
    }
}

/// One object slot
#[derive(Debug, Clone)]
pub struct IrField {
    /// Class whose declaration introduced the slot
    pub owner: ClassId,
    pub name: String,
    pub ty: TypeId,
    pub index: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::block::{BasicBlock, BasicBlockId, Terminator};
    use crate::symbols::FqName;

    fn class(name: &str) -> ClassId {
        ClassId::new(FqName::parse("demo"), name)
    }

    #[test]
    fn test_inherited_slots_come_first() {
        let (base, derived) = (class("Base"), class("Derived"));
        let mut layout = IrClass::new(derived.clone());
        assert_eq!(layout.add_field(&base, "x", TypeId(0)), 0);
        assert_eq!(layout.add_field(&derived, "y", TypeId(0)), 1);

        let own: Vec<u16> = layout.fields_declared_by(&derived).map(|f| f.index).collect();
        assert_eq!(own, vec![1]);
        let inherited: Vec<&str> =
            layout.fields_declared_by(&base).map(|f| f.name.as_str()).collect();
        assert_eq!(inherited, vec!["x"]);
        assert_eq!(layout.fields_declared_by(&class("Other")).count(), 0);
    }

    #[test]
    fn test_module_lookup() {
        let point = class("Point");
        let mut module = IrModule::new("main");
        module.add_class(IrClass::new(point.clone()));

        let callable = CallableId::constructor(&point);
        let mut func = IrFunction::new(callable.clone(), vec![], TypeId(4));
        let mut block = BasicBlock::new(BasicBlockId(0));
        block.set_terminator(Terminator::Return(None));
        func.add_block(block);
        module.add_function(func);

        assert!(module.get_class(&point).is_some());
        assert!(module.get_function(&callable).is_some());
        assert!(module.get_function(&CallableId::member(&point, "x")).is_none());
        assert_eq!(module.class_count(), 1);
        assert_eq!(module.function_count(), 1);
        assert_eq!(module.total_instruction_count(), 0);
    }
}
