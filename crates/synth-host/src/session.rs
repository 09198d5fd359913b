//! Compilation driver
//!
//! [`Frontend`] answers name-resolution queries lazily by asking the
//! installed declaration generators, caching every answer in the symbol
//! table. [`Frontend::lower`] then consumes it, asks the body generators
//! for every generated callable and produces a [`Program`].

use std::sync::LazyLock;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{CompileError, CompileResult};
use crate::extension::{BodyContext, ExtensionStorage};
use crate::ir::{IrClass, IrFunction, IrModule};
use crate::span::Span;
use crate::symbols::{
    CallableId, CallableKind, CallableSymbol, ClassId, ClassSymbol, DeclarationOrigin,
    FqName, Name, SymbolTable,
};
use crate::types::TypeContext;

/// The host root class every class extends unless it names a supertype
pub static ROOT_CLASS: LazyLock<ClassId> =
    LazyLock::new(|| ClassId::new(FqName::parse("synth"), "Any"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Host,
    Provider(usize),
}

/// Lazy frontend of one compilation
pub struct Frontend {
    module_name: String,
    types: TypeContext,
    symbols: SymbolTable,
    extensions: ExtensionStorage,
    owners: FxHashMap<ClassId, Owner>,
    unresolved: FxHashSet<ClassId>,
}

impl Frontend {
    /// Start a compilation of `module_name` with the given extensions
    pub fn new(module_name: impl Into<String>, extensions: ExtensionStorage) -> Self {
        let mut types = TypeContext::new();
        let mut owners = FxHashMap::default();

        let root = ROOT_CLASS.clone();
        let root_ty = types.class_type(&root);
        let ctor_id = CallableId::constructor(&root);
        let ctor = CallableSymbol {
            id: ctor_id,
            kind: CallableKind::Constructor,
            params: Vec::new(),
            return_ty: root_ty,
            origin: DeclarationOrigin::Source,
            span: Span::SYNTHETIC,
        };
        let class = ClassSymbol {
            id: root.clone(),
            supertype: None,
            fields: Vec::new(),
            origin: DeclarationOrigin::Source,
            span: Span::SYNTHETIC,
        };
        let symbols = SymbolTable::with_builtin(class, vec![ctor]);
        owners.insert(root, Owner::Host);

        let (generators, bodies) = extensions.len();
        tracing::debug!(generators, bodies, "Frontend created");

        Self {
            module_name: module_name.into(),
            types,
            symbols,
            extensions,
            owners,
            unresolved: FxHashSet::default(),
        }
    }

    /// The type table
    pub fn types(&self) -> &TypeContext {
        &self.types
    }

    /// Symbols materialized so far
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Whether anything may live under `path`
    pub fn has_namespace(&self, path: &FqName) -> bool {
        ROOT_CLASS.package.prefixes().contains(path)
            || self
                .extensions
                .declaration_generators()
                .iter()
                .any(|g| g.has_namespace(path))
    }

    /// Class ids advertised directly in `package`, sorted
    pub fn top_level_classes(&self, package: &FqName) -> Vec<ClassId> {
        let mut ids: Vec<ClassId> = self
            .extensions
            .declaration_generators()
            .iter()
            .flat_map(|g| g.top_level_symbols())
            .filter_map(|d| d.as_class().cloned())
            .filter(|id| &id.package == package)
            .collect();
        if &ROOT_CLASS.package == package {
            ids.push(ROOT_CLASS.clone());
        }
        ids.sort();
        ids.dedup();
        ids
    }

    /// Resolve a class, asking providers the first time it is requested
    pub fn resolve_class(&mut self, id: &ClassId) -> Option<&ClassSymbol> {
        if self.owners.contains_key(id) {
            return self.symbols.class(id);
        }
        if self.unresolved.contains(id) {
            return None;
        }

        let mut winner: Option<(usize, ClassSymbol)> = None;
        for (index, generator) in self.extensions.declaration_generators().iter().enumerate() {
            if !generator.has_namespace(&id.package) {
                continue;
            }
            let Some(symbol) = generator.generate_class_like(id, &mut self.types) else {
                continue;
            };
            if winner.is_some() {
                tracing::warn!(
                    class = %id,
                    provider = index,
                    "Ignoring conflicting class declaration"
                );
            } else {
                winner = Some((index, symbol));
            }
        }

        let Some((index, symbol)) = winner else {
            tracing::trace!(class = %id, "No provider declares class");
            self.unresolved.insert(id.clone());
            return None;
        };

        tracing::debug!(class = %id, provider = index, origin = ?symbol.origin, "Resolved class");
        if self.symbols.define_class(symbol).is_err() {
            return None;
        }
        self.owners.insert(id.clone(), Owner::Provider(index));
        self.symbols.class(id)
    }

    /// Member names `owner` may have, sorted
    pub fn member_names(&self, owner: &ClassId) -> CompileResult<Vec<Name>> {
        let owner_kind = self.owner_of(owner)?;
        let mut names: Vec<Name> = match owner_kind {
            Owner::Host => self.symbols.members_of(owner).map(|c| c.id.name.clone()).collect(),
            Owner::Provider(index) => {
                let class = self.class_symbol(owner)?;
                self.extensions.declaration_generators()[index]
                    .callable_names(class)
                    .into_iter()
                    .collect()
            }
        };
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Resolve the callables called `name` on `owner`
    pub fn resolve_member(
        &mut self,
        owner: &ClassId,
        name: &Name,
    ) -> CompileResult<&[CallableSymbol]> {
        let id = CallableId::member(owner, name.clone());
        if self.symbols.has_callables(&id) {
            return Ok(self.symbols.callables(&id));
        }

        let unresolved = || CompileError::UnresolvedMember {
            owner: owner.to_string(),
            name: name.to_string(),
        };

        let Owner::Provider(index) = self.owner_of(owner)? else {
            return Err(unresolved());
        };

        let class = self.class_symbol(owner)?.clone();
        let generator = &self.extensions.declaration_generators()[index];
        if !generator.callable_names(&class).contains(name) {
            return Err(unresolved());
        }

        let members = generator.generate_members(&id, &class, &mut self.types);
        tracing::debug!(callable = %id, count = members.len(), "Resolved member");

        self.symbols
            .define_callables(id.clone(), members)
            .map_err(|e| CompileError::DuplicateSymbol {
                name: e.symbol.to_string(),
            })?;
        Ok(self.symbols.callables(&id))
    }

    /// Materialize every advertised class and all of its members
    pub fn resolve_all(&mut self) -> CompileResult<()> {
        let mut pending: Vec<ClassId> = self
            .extensions
            .declaration_generators()
            .iter()
            .flat_map(|g| g.top_level_symbols())
            .filter_map(|d| d.as_class().cloned())
            .collect();
        pending.sort();
        pending.dedup();

        let mut visited = FxHashSet::default();
        while let Some(id) = pending.pop() {
            if !visited.insert(id.clone()) {
                continue;
            }
            let supertype = match self.resolve_class(&id) {
                Some(class) => class.supertype.clone(),
                None => {
                    return Err(CompileError::UnresolvedClass {
                        class: id.to_string(),
                    })
                }
            };
            if let Some(parent) = supertype {
                pending.push(parent);
            }
            for name in self.member_names(&id)? {
                self.resolve_member(&id, &name)?;
            }
        }

        tracing::debug!(classes = self.symbols.class_count(), "Resolved all declarations");
        Ok(())
    }

    fn owner_of(&self, id: &ClassId) -> CompileResult<Owner> {
        self.owners
            .get(id)
            .copied()
            .ok_or_else(|| CompileError::UnresolvedClass {
                class: id.to_string(),
            })
    }

    fn class_symbol(&self, id: &ClassId) -> CompileResult<&ClassSymbol> {
        self.symbols
            .class(id)
            .ok_or_else(|| CompileError::UnresolvedClass {
                class: id.to_string(),
            })
    }

    /// Fill every generated callable with a body and build the program
    pub fn lower(self) -> CompileResult<Program> {
        let Frontend {
            module_name,
            types,
            symbols,
            extensions,
            ..
        } = self;

        let mut module = IrModule::new(module_name);

        for class in symbols.classes() {
            let mut ir_class = IrClass::new(class.id.clone());
            for declaring in superclass_chain(&symbols, class).into_iter().rev() {
                for field in &declaring.fields {
                    ir_class.add_field(&declaring.id, field.name.as_str(), field.ty);
                }
            }
            if class.id != *ROOT_CLASS {
                let parent = class.supertype.clone().unwrap_or_else(|| ROOT_CLASS.clone());
                ir_class.parent = Some(parent);
            }
            for member in symbols.members_of(&class.id) {
                if member.is_constructor() {
                    ir_class.constructor = Some(member.id.clone());
                } else if !ir_class.methods.contains(&member.id) {
                    ir_class.methods.push(member.id.clone());
                }
            }
            module.add_class(ir_class);
        }

        let ctx = BodyContext::new(&types, &symbols);
        for callable in symbols.all_callables() {
            let Some(key) = callable.origin.key() else {
                tracing::trace!(callable = %callable.id, "Skipping host callable");
                continue;
            };

            let mut responsible = extensions
                .body_generators()
                .iter()
                .filter(|g| g.is_responsible_for(Some(key)));
            let Some(generator) = responsible.next() else {
                return Err(CompileError::MissingBody {
                    callable: callable.id.to_string(),
                    key: key.to_string(),
                });
            };
            if responsible.next().is_some() {
                tracing::warn!(
                    callable = %callable.id,
                    key = %key,
                    "Multiple body generators claim key; using the first"
                );
            }

            let body = if callable.is_constructor() {
                generator.generate_constructor_body(callable, key, &ctx)?
            } else {
                generator.generate_function_body(callable, key, &ctx)?
            };
            check_body(callable, &body)?;

            tracing::debug!(
                callable = %callable.id,
                blocks = body.block_count(),
                instructions = body.instruction_count(),
                "Synthesized body"
            );
            module.add_function(body);
        }

        tracing::debug!(
            module = %module.name,
            classes = module.class_count(),
            functions = module.function_count(),
            instructions = module.total_instruction_count(),
            "Lowered module"
        );
        Ok(Program {
            types,
            symbols,
            module,
        })
    }
}

/// `class` followed by each materialized superclass, nearest first
fn superclass_chain<'a>(symbols: &'a SymbolTable, class: &'a ClassSymbol) -> Vec<&'a ClassSymbol> {
    let mut chain = vec![class];
    let mut next = class.supertype.as_ref();
    while let Some(id) = next {
        let Some(parent) = symbols.class(id) else {
            break;
        };
        if chain.iter().any(|seen| seen.id == parent.id) {
            break;
        }
        chain.push(parent);
        next = parent.supertype.as_ref();
    }
    chain
}

fn check_body(callable: &CallableSymbol, body: &IrFunction) -> CompileResult<()> {
    let invalid = |message: String| CompileError::InvalidIr {
        callable: callable.id.to_string(),
        message,
    };

    if body.callable != callable.id {
        return Err(invalid(format!("body implements '{}'", body.callable)));
    }
    body.validate().map_err(invalid)
}

/// A lowered compilation
pub struct Program {
    types: TypeContext,
    symbols: SymbolTable,
    module: IrModule,
}

impl Program {
    /// The type table
    pub fn types(&self) -> &TypeContext {
        &self.types
    }

    /// Every materialized symbol
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Lowered classes and function bodies
    pub fn module(&self) -> &IrModule {
        &self.module
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_seeds_root_class() {
        let mut frontend = Frontend::new("main", ExtensionStorage::new());
        let root = ROOT_CLASS.clone();

        assert!(frontend.resolve_class(&root).is_some());
        assert!(frontend.symbols().no_arg_constructor(&root).is_some());
        assert!(frontend.has_namespace(&FqName::root()));
        assert!(frontend.has_namespace(&FqName::parse("synth")));
        assert!(!frontend.has_namespace(&FqName::parse("foo")));
        assert_eq!(frontend.top_level_classes(&FqName::parse("synth")), vec![root.clone()]);
        assert_eq!(frontend.member_names(&root).unwrap(), vec![Name::init()]);
    }

    #[test]
    fn test_unknown_class_is_unresolved() {
        let mut frontend = Frontend::new("main", ExtensionStorage::new());
        let id = ClassId::parse("foo.bar.Nothing").unwrap();
        assert!(frontend.resolve_class(&id).is_none());
        assert_eq!(
            frontend.member_names(&id),
            Err(CompileError::UnresolvedClass {
                class: "foo.bar.Nothing".to_string()
            })
        );
    }

    #[test]
    fn test_lower_without_plugins() {
        let frontend = Frontend::new("main", ExtensionStorage::new());
        let program = frontend.lower().unwrap();

        assert_eq!(program.module().function_count(), 0);
        let root = program.module().get_class(&ROOT_CLASS).unwrap();
        assert!(root.parent.is_none());
        assert_eq!(root.constructor, Some(CallableId::constructor(&ROOT_CLASS)));
    }
}
