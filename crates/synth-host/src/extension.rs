//! Extension points
//!
//! Two registration slots: declaration generation (frontend) and body
//! generation (backend). A plugin fills both through its
//! [`CompilerPluginRegistrar`]; options reach it through its
//! [`CommandLineProcessor`].

use rustc_hash::FxHashSet;

use crate::config::CompilerConfiguration;
use crate::error::{ConfigError, SynthesisError};
use crate::ir::IrFunction;
use crate::key::GenerationKey;
use crate::session::ROOT_CLASS;
use crate::symbols::{
    CallableId, CallableSymbol, ClassId, ClassSymbol, FqName, Name, SymbolDescriptor, SymbolTable,
};
use crate::types::TypeContext;

/// Frontend provider of declarations, queried lazily by the driver.
///
/// Every query is answered from the provider's own fixed catalog and must
/// return structurally equal results when repeated. A query outside the
/// catalog answers `None` or an empty set: other providers may own it.
pub trait DeclarationGenerator {
    /// Every class-like symbol this provider can materialize
    fn top_level_symbols(&self) -> FxHashSet<SymbolDescriptor>;

    /// Whether this provider may contribute anything under `path`.
    ///
    /// Must be true for every prefix of every package in the catalog.
    fn has_namespace(&self, path: &FqName) -> bool;

    /// Materialize the class `id`, stamped with the provider's key
    fn generate_class_like(&self, id: &ClassId, types: &mut TypeContext) -> Option<ClassSymbol>;

    /// Member names `owner` may have, including [`Name::INIT`] if a
    /// constructor is generated
    fn callable_names(&self, owner: &ClassSymbol) -> FxHashSet<Name>;

    /// Materialize the callables named by `id` on `owner`
    fn generate_members(
        &self,
        id: &CallableId,
        owner: &ClassSymbol,
        types: &mut TypeContext,
    ) -> Vec<CallableSymbol>;
}

/// Read-only view of the resolved program handed to body generators
pub struct BodyContext<'a> {
    types: &'a TypeContext,
    symbols: &'a SymbolTable,
}

impl<'a> BodyContext<'a> {
    /// View over a resolved type table and symbol table
    pub fn new(types: &'a TypeContext, symbols: &'a SymbolTable) -> Self {
        Self { types, symbols }
    }

    /// The built-in type table
    pub fn types(&self) -> &'a TypeContext {
        self.types
    }

    /// Materialized symbols
    pub fn symbols(&self) -> &'a SymbolTable {
        self.symbols
    }

    /// Look up a materialized class
    pub fn class(&self, id: &ClassId) -> Option<&'a ClassSymbol> {
        self.symbols.class(id)
    }

    /// Superclass of `class`, defaulting to the host root class
    pub fn superclass_of(&self, class: &ClassSymbol) -> ClassId {
        class.supertype.clone().unwrap_or_else(|| ROOT_CLASS.clone())
    }
}

/// Backend provider of executable bodies for generated callables.
///
/// The driver calls the synthesis methods only after
/// [`BodyGenerator::is_responsible_for`] accepted the callable's key.
pub trait BodyGenerator {
    /// Whether callables stamped with `key` are this generator's to fill.
    /// `None` means the callable is not generated at all.
    fn is_responsible_for(&self, key: Option<GenerationKey>) -> bool;

    /// Body of a generated function
    fn generate_function_body(
        &self,
        function: &CallableSymbol,
        key: GenerationKey,
        ctx: &BodyContext<'_>,
    ) -> Result<IrFunction, SynthesisError>;

    /// Body of a generated constructor
    fn generate_constructor_body(
        &self,
        constructor: &CallableSymbol,
        key: GenerationKey,
        ctx: &BodyContext<'_>,
    ) -> Result<IrFunction, SynthesisError>;
}

/// The host's two extension slots
#[derive(Default)]
pub struct ExtensionStorage {
    declaration_generators: Vec<Box<dyn DeclarationGenerator>>,
    body_generators: Vec<Box<dyn BodyGenerator>>,
}

impl ExtensionStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a frontend declaration generator
    pub fn register_declaration_generator(&mut self, generator: Box<dyn DeclarationGenerator>) {
        self.declaration_generators.push(generator);
    }

    /// Install a backend body generator
    pub fn register_body_generator(&mut self, generator: Box<dyn BodyGenerator>) {
        self.body_generators.push(generator);
    }

    /// Installed declaration generators, in registration order
    pub fn declaration_generators(&self) -> &[Box<dyn DeclarationGenerator>] {
        &self.declaration_generators
    }

    /// Installed body generators, in registration order
    pub fn body_generators(&self) -> &[Box<dyn BodyGenerator>] {
        &self.body_generators
    }

    /// Counts of (declaration, body) generators
    pub fn len(&self) -> (usize, usize) {
        (self.declaration_generators.len(), self.body_generators.len())
    }

    /// Whether nothing is installed
    pub fn is_empty(&self) -> bool {
        self.declaration_generators.is_empty() && self.body_generators.is_empty()
    }

    /// Drop everything installed after the given counts
    pub(crate) fn truncate(&mut self, (generators, bodies): (usize, usize)) {
        self.declaration_generators.truncate(generators);
        self.body_generators.truncate(bodies);
    }
}

/// Plugin composition root, discovered through a service manifest
pub trait CompilerPluginRegistrar {
    /// Identity the build integration requests this plugin by
    fn plugin_id(&self) -> &str;

    /// Install the plugin's declaration and body generators
    fn register_extensions(&self, storage: &mut ExtensionStorage, config: &CompilerConfiguration);
}

/// A declared plugin option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOption {
    /// Key after the plugin id
    pub name: &'static str,
    /// Placeholder shown in help, e.g. `<mode>`
    pub value_description: &'static str,
    /// One-line help text
    pub description: &'static str,
    /// Compilation fails if the option is absent
    pub required: bool,
    /// Whether the option may be given more than once
    pub allow_multiple: bool,
}

/// Receives `plugin:<id>:<key>=<value>` options addressed to one plugin
pub trait CommandLineProcessor {
    /// Plugin id options are addressed to
    fn plugin_id(&self) -> &str;

    /// Declared options
    fn options(&self) -> &[CliOption];

    /// Apply one option to the configuration
    fn process_option(
        &self,
        name: &str,
        value: &str,
        config: &mut CompilerConfiguration,
    ) -> Result<(), ConfigError>;
}
