//! Synth Host
//!
//! The compiler-side surface a two-phase synthesis plugin hooks into:
//! - **Symbols**: names, namespace paths, class/callable descriptors (`symbols`)
//! - **Types**: the built-in type table (`types`)
//! - **Extension points**: declaration generation and body generation (`extension`)
//! - **Driver**: the lazy, query-driven frontend and the lowering backend (`session`)
//! - **IR**: three-address bodies handed back by body generators (`ir`)
//! - **Discovery**: service manifests and plugin attachment (`discovery`)
//!
//! # Example
//!
//! ```rust,ignore
//! use synth_host::{ExtensionStorage, Frontend, Interpreter};
//!
//! let mut storage = ExtensionStorage::new();
//! loader.attach("org.demo.synth", &mut config, &mut storage)?;
//!
//! let mut frontend = Frontend::new("main", storage);
//! frontend.resolve_all()?;
//! let program = frontend.lower()?;
//!
//! let mut interp = Interpreter::new(&program);
//! let obj = interp.construct(&class_id)?;
//! let value = interp.call_method(obj, &Name::new("foo"), Vec::new())?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod extension;
pub mod interp;
pub mod ir;
pub mod key;
pub mod session;
pub mod span;
pub mod symbols;
pub mod types;

pub use config::{parse_plugin_argument, CompilerConfiguration, PluginArgument};
pub use discovery::{
    CommandLineProcessorEntry, PluginLoader, RegistrarEntry, ServiceManifest,
    COMMAND_LINE_PROCESSOR_SERVICE, REGISTRAR_SERVICE,
};
pub use error::{CompileError, CompileResult, ConfigError, LoadError, RuntimeError, SynthesisError};
pub use extension::{
    BodyContext, BodyGenerator, CliOption, CommandLineProcessor, CompilerPluginRegistrar,
    DeclarationGenerator, ExtensionStorage,
};
pub use interp::{Interpreter, ObjectRef, RuntimeEvent, Value};
pub use key::GenerationKey;
pub use session::{Frontend, Program};
pub use span::Span;
pub use symbols::{
    CallableId, CallableKind, CallableSymbol, ClassId, ClassSymbol, DeclarationOrigin,
    FieldSymbol, FqName, Name, ParamSymbol, SymbolDescriptor, SymbolTable,
};
pub use types::{PrimitiveType, Type, TypeContext, TypeId};
