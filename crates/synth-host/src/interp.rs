//! IR evaluator
//!
//! Executes a lowered [`Program`] directly: enough to construct objects and
//! call their methods so synthesized bodies can be observed end to end.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::RuntimeError;
use crate::ir::{IrConstant, IrFunction, IrInstr, IrValue, Register, RegisterId, Terminator};
use crate::session::{Program, ROOT_CLASS};
use crate::symbols::{CallableId, ClassId, Name};
use crate::types::{PrimitiveType, TypeId};

const MAX_CALL_DEPTH: usize = 256;

/// Handle to a heap object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef(usize);

/// A runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Also the result of a body returning nothing
    Null,
    /// Boolean
    Bool(bool),
    /// Number
    Number(f64),
    /// String
    String(String),
    /// Heap object
    Object(ObjectRef),
}

impl Value {
    /// The string payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn from_constant(constant: &IrConstant) -> Self {
        match constant {
            IrConstant::Number(n) => Value::Number(*n),
            IrConstant::String(s) => Value::String(s.clone()),
            IrConstant::Boolean(b) => Value::Bool(*b),
            IrConstant::Null => Value::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Object(obj) => write!(f, "<object #{}>", obj.0),
        }
    }
}

/// Observable side effects, recorded in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// A constructor body started running
    ConstructorEntered(CallableId),
    /// A class wrote initial values into the fields it declares
    FieldsInitialized(ClassId),
}

#[derive(Debug)]
struct Object {
    class: ClassId,
    fields: Vec<Value>,
}

/// Evaluator over one lowered program
pub struct Interpreter<'p> {
    program: &'p Program,
    heap: Vec<Object>,
    events: Vec<RuntimeEvent>,
    depth: usize,
}

impl<'p> Interpreter<'p> {
    /// Create an evaluator with an empty heap
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            heap: Vec::new(),
            events: Vec::new(),
            depth: 0,
        }
    }

    /// Events recorded so far
    pub fn events(&self) -> &[RuntimeEvent] {
        &self.events
    }

    /// Class of a live object
    pub fn class_of(&self, obj: ObjectRef) -> Option<&ClassId> {
        self.heap.get(obj.0).map(|o| &o.class)
    }

    /// Allocate an instance of `class` and run its no-argument constructor
    pub fn construct(&mut self, class: &ClassId) -> Result<ObjectRef, RuntimeError> {
        let program = self.program;
        let layout = program
            .module()
            .get_class(class)
            .ok_or_else(|| RuntimeError::UnknownClass {
                class: class.to_string(),
            })?;

        let obj = ObjectRef(self.heap.len());
        self.heap.push(Object {
            class: class.clone(),
            fields: vec![Value::Null; layout.fields.len()],
        });

        if let Some(ctor) = &layout.constructor {
            self.invoke(ctor, Some(obj), Vec::new())?;
        }
        Ok(obj)
    }

    /// Call method `name` on `obj`, searching up the class chain
    pub fn call_method(
        &mut self,
        obj: ObjectRef,
        name: &Name,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let class = self.object(obj)?.class.clone();
        let callable = self.find_method(&class, name)?;
        self.invoke(&callable, Some(obj), args)
    }

    fn find_method(&self, class: &ClassId, name: &Name) -> Result<CallableId, RuntimeError> {
        let module = self.program.module();
        let mut current = Some(class.clone());

        while let Some(id) = current {
            let callable = CallableId::member(&id, name.clone());
            if module.get_function(&callable).is_some() {
                return Ok(callable);
            }
            current = module.get_class(&id).and_then(|c| c.parent.clone());
        }

        Err(RuntimeError::NoBody {
            callable: CallableId::member(class, name.clone()).to_string(),
        })
    }

    fn object(&self, obj: ObjectRef) -> Result<&Object, RuntimeError> {
        self.heap.get(obj.0).ok_or_else(|| RuntimeError::TypeError {
            message: format!("dangling object reference #{}", obj.0),
        })
    }

    fn invoke(
        &mut self,
        callable: &CallableId,
        this: Option<ObjectRef>,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::StackOverflow);
        }

        if callable.name.is_init() {
            self.events
                .push(RuntimeEvent::ConstructorEntered(callable.clone()));
        }

        // The root constructor has no lowered body
        if callable.owner.as_ref() == Some(&*ROOT_CLASS) && callable.name.is_init() {
            return Ok(Value::Null);
        }

        let program = self.program;
        let func = program
            .module()
            .get_function(callable)
            .ok_or_else(|| RuntimeError::NoBody {
                callable: callable.to_string(),
            })?;

        self.depth += 1;
        let result = self.run(func, this, args);
        self.depth -= 1;
        result
    }

    fn run(
        &mut self,
        func: &IrFunction,
        this: Option<ObjectRef>,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let incoming: Vec<Value> = this.map(Value::Object).into_iter().chain(args).collect();
        if incoming.len() != func.params.len() {
            return Err(RuntimeError::TypeError {
                message: format!(
                    "'{}' expects {} argument(s), got {}",
                    func.name(),
                    func.params.len(),
                    incoming.len()
                ),
            });
        }

        let mut frame = Frame {
            callable: func.name(),
            registers: FxHashMap::default(),
        };
        for (param, value) in func.params.iter().zip(incoming) {
            frame.registers.insert(param.id, value);
        }

        let mut block_id = func.entry_block;
        loop {
            let block = func
                .get_block(block_id)
                .ok_or_else(|| RuntimeError::Unreachable {
                    callable: frame.callable.clone(),
                })?;

            for instr in &block.instructions {
                self.exec(&mut frame, instr)?;
            }

            match &block.terminator {
                Terminator::Jump(target) => block_id = *target,
                Terminator::Return(Some(reg)) => return frame.read(reg),
                Terminator::Return(None) => return Ok(Value::Null),
                Terminator::Unreachable => {
                    return Err(RuntimeError::Unreachable {
                        callable: frame.callable,
                    })
                }
            }
        }
    }

    fn exec(&mut self, frame: &mut Frame, instr: &IrInstr) -> Result<(), RuntimeError> {
        match instr {
            IrInstr::Assign { dest, value } => {
                let value = match value {
                    IrValue::Register(src) => frame.read(src)?,
                    IrValue::Constant(c) => Value::from_constant(c),
                };
                frame.registers.insert(dest.id, value);
            }
            IrInstr::DelegatingConstructorCall { this, target, args } => {
                let obj = frame.read_object(this)?;
                let args = frame.read_all(args)?;
                self.invoke(target, Some(obj), args)?;
            }
            IrInstr::InstanceInitializer { this, class } => {
                let obj = frame.read_object(this)?;
                let program = self.program;
                let unknown = |class: &ClassId| RuntimeError::UnknownClass {
                    class: class.to_string(),
                };
                program.module().get_class(class).ok_or_else(|| unknown(class))?;

                // slots come from the object's own layout, which also holds
                // every field inherited from `class`
                let object_class = self.object(obj)?.class.clone();
                let layout = program
                    .module()
                    .get_class(&object_class)
                    .ok_or_else(|| unknown(&object_class))?;
                let initial: Vec<(u16, Value)> = layout
                    .fields_declared_by(class)
                    .map(|f| (f.index, self.zero_value(f.ty)))
                    .collect();
                if initial.is_empty() {
                    return Ok(());
                }

                let object = self.object_mut(obj)?;
                for (index, value) in initial {
                    let slot = object
                        .fields
                        .get_mut(usize::from(index))
                        .ok_or_else(|| field_error(index))?;
                    *slot = value;
                }
                self.events.push(RuntimeEvent::FieldsInitialized(class.clone()));
            }
            IrInstr::LoadField {
                dest,
                object,
                field,
            } => {
                let obj = frame.read_object(object)?;
                let value = self
                    .object(obj)?
                    .fields
                    .get(*field as usize)
                    .cloned()
                    .ok_or_else(|| field_error(*field))?;
                frame.registers.insert(dest.id, value);
            }
            IrInstr::StoreField {
                object,
                field,
                value,
            } => {
                let obj = frame.read_object(object)?;
                let value = frame.read(value)?;
                let slot = self
                    .object_mut(obj)?
                    .fields
                    .get_mut(*field as usize)
                    .ok_or_else(|| field_error(*field))?;
                *slot = value;
            }
        }
        Ok(())
    }

    fn object_mut(&mut self, obj: ObjectRef) -> Result<&mut Object, RuntimeError> {
        self.heap.get_mut(obj.0).ok_or_else(|| RuntimeError::TypeError {
            message: format!("dangling object reference #{}", obj.0),
        })
    }

    fn zero_value(&self, ty: TypeId) -> Value {
        match self.program.types().as_primitive(ty) {
            Some(PrimitiveType::Number) => Value::Number(0.0),
            Some(PrimitiveType::Boolean) => Value::Bool(false),
            _ => Value::Null,
        }
    }
}

fn field_error(field: u16) -> RuntimeError {
    RuntimeError::TypeError {
        message: format!("no field {}", field),
    }
}

struct Frame {
    callable: String,
    registers: FxHashMap<RegisterId, Value>,
}

impl Frame {
    fn read(&self, reg: &Register) -> Result<Value, RuntimeError> {
        self.registers
            .get(&reg.id)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedRegister {
                register: reg.to_string(),
                callable: self.callable.clone(),
            })
    }

    fn read_object(&self, reg: &Register) -> Result<ObjectRef, RuntimeError> {
        match self.read(reg)? {
            Value::Object(obj) => Ok(obj),
            other => Err(RuntimeError::TypeError {
                message: format!("expected object in {}, found {}", reg, other),
            }),
        }
    }

    fn read_all(&self, regs: &[Register]) -> Result<Vec<Value>, RuntimeError> {
        regs.iter().map(|r| self.read(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::ExtensionStorage;
    use crate::session::Frontend;

    fn empty_program() -> Program {
        Frontend::new("main", ExtensionStorage::new()).lower().unwrap()
    }

    #[test]
    fn test_construct_root_records_event() {
        let program = empty_program();
        let mut interp = Interpreter::new(&program);

        let obj = interp.construct(&ROOT_CLASS).unwrap();
        assert_eq!(interp.class_of(obj), Some(&*ROOT_CLASS));
        assert_eq!(
            interp.events(),
            &[RuntimeEvent::ConstructorEntered(CallableId::constructor(&ROOT_CLASS))]
        );
    }

    #[test]
    fn test_unknown_class_and_method() {
        let program = empty_program();
        let mut interp = Interpreter::new(&program);

        let missing = ClassId::parse("foo.Missing").unwrap();
        assert!(matches!(
            interp.construct(&missing),
            Err(RuntimeError::UnknownClass { .. })
        ));

        let obj = interp.construct(&ROOT_CLASS).unwrap();
        let err = interp.call_method(obj, &Name::new("foo"), Vec::new()).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::NoBody {
                callable: "synth.Any.foo".to_string()
            }
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::String("Hello world".into()).to_string(), "Hello world");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::String("x".into()).as_str(), Some("x"));
        assert_eq!(Value::Number(1.0).as_str(), None);
    }
}
