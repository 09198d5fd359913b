//! Body synthesis
//!
//! Fills the declarations stamped with the plugin's key. Dispatch is an
//! exhaustive match over [`CatalogEntry`]; a stamped callable the catalog
//! does not know is a fatal error, never an empty body.

use synth_host::ir::{FunctionBuilder, IrConstant, IrFunction, IrInstr, Terminator};
use synth_host::{
    BodyContext, BodyGenerator, CallableId, CallableSymbol, ClassId, GenerationKey,
    SynthesisError,
};

use crate::catalog::{CatalogEntry, GREETING};

/// Backend half of the plugin
#[derive(Debug, Clone)]
pub struct SimpleBodyGenerator {
    key: GenerationKey,
}

impl SimpleBodyGenerator {
    /// Create a body generator for declarations stamped with `key`
    pub fn new(key: GenerationKey) -> Self {
        Self { key }
    }

    fn entry(
        &self,
        callable: &CallableSymbol,
        key: GenerationKey,
    ) -> Result<CatalogEntry, SynthesisError> {
        if key != self.key || callable.origin.key() != Some(self.key) {
            return Err(unrecognized(&callable.id));
        }
        CatalogEntry::of_callable(&callable.id).ok_or_else(|| unrecognized(&callable.id))
    }

    fn owner(callable: &CallableSymbol) -> Result<&ClassId, SynthesisError> {
        callable
            .id
            .owner
            .as_ref()
            .ok_or_else(|| unrecognized(&callable.id))
    }
}

fn unrecognized(id: &CallableId) -> SynthesisError {
    SynthesisError::UnrecognizedCallable {
        callable: id.to_string(),
    }
}

/// `return "Hello world"`, with the receiver as parameter 0
fn greeting_body(function: &CallableSymbol, owner: &ClassId, ctx: &BodyContext<'_>) -> IrFunction {
    let types = ctx.types();
    let receiver_ty = types
        .lookup_class_type(owner)
        .unwrap_or_else(|| types.unknown_type());

    let mut builder = FunctionBuilder::new(function.id.clone(), function.return_ty);
    builder.param(receiver_ty);
    let value = builder.constant(IrConstant::String(GREETING.to_string()), types.string_type());
    builder.terminate(Terminator::Return(Some(value)));
    builder.finish()
}

fn check_return_type(
    function: &CallableSymbol,
    body: &IrFunction,
    ctx: &BodyContext<'_>,
) -> Result<(), SynthesisError> {
    match body.returned_registers().find(|reg| reg.ty != function.return_ty) {
        Some(reg) => Err(SynthesisError::ReturnTypeMismatch {
            callable: function.id.to_string(),
            expected: ctx.types().display(function.return_ty),
            actual: ctx.types().display(reg.ty),
        }),
        None => Ok(()),
    }
}

impl BodyGenerator for SimpleBodyGenerator {
    fn is_responsible_for(&self, key: Option<GenerationKey>) -> bool {
        key == Some(self.key)
    }

    fn generate_function_body(
        &self,
        function: &CallableSymbol,
        key: GenerationKey,
        ctx: &BodyContext<'_>,
    ) -> Result<IrFunction, SynthesisError> {
        let body = match self.entry(function, key)? {
            CatalogEntry::Foo => greeting_body(function, Self::owner(function)?, ctx),
            CatalogEntry::MyClass | CatalogEntry::Constructor => {
                return Err(unrecognized(&function.id))
            }
        };

        check_return_type(function, &body, ctx)?;
        tracing::debug!(callable = %function.id, "Synthesized function body");
        Ok(body)
    }

    fn generate_constructor_body(
        &self,
        constructor: &CallableSymbol,
        key: GenerationKey,
        ctx: &BodyContext<'_>,
    ) -> Result<IrFunction, SynthesisError> {
        match self.entry(constructor, key)? {
            CatalogEntry::Constructor => {}
            CatalogEntry::MyClass | CatalogEntry::Foo => return Err(unrecognized(&constructor.id)),
        }

        let owner = Self::owner(constructor)?;
        let class = ctx.class(owner).ok_or_else(|| unrecognized(&constructor.id))?;
        let superclass = ctx.superclass_of(class);
        let super_ctor = ctx
            .symbols()
            .no_arg_constructor(&superclass)
            .ok_or_else(|| SynthesisError::MissingSuperConstructor {
                callable: constructor.id.to_string(),
                class: superclass.to_string(),
            })?;

        let mut builder = FunctionBuilder::new(constructor.id.clone(), constructor.return_ty);
        let this = builder.param(constructor.return_ty);
        builder.emit(IrInstr::DelegatingConstructorCall {
            this: this.clone(),
            target: super_ctor.id.clone(),
            args: Vec::new(),
        });
        builder.emit(IrInstr::InstanceInitializer {
            this,
            class: owner.clone(),
        });
        builder.terminate(Terminator::Return(None));

        tracing::debug!(
            callable = %constructor.id,
            superclass = %superclass,
            "Synthesized constructor body"
        );
        Ok(builder.finish())
    }
}
