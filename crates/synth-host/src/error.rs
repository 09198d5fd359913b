//! Error types for plugin loading, configuration, compilation and evaluation
//!
//! Queries outside a provider's catalog are not errors; they answer with
//! `None` or an empty set. Everything here is fatal for the compilation.

use thiserror::Error;

/// Result alias for driver operations
pub type CompileResult<T> = Result<T, CompileError>;

/// Failures raised by a body generator
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SynthesisError {
    /// The generator owns the key but does not know this callable
    #[error("No body synthesis rule for generated callable '{callable}'")]
    UnrecognizedCallable {
        /// Callable that was advertised but cannot be filled
        callable: String,
    },

    /// Produced value type differs from the declared return type
    #[error("Body of '{callable}' returns {actual}, declared {expected}")]
    ReturnTypeMismatch {
        /// Callable
        callable: String,
        /// Declared return type
        expected: String,
        /// Type of the returned register
        actual: String,
    },

    /// The superclass has no no-argument constructor to delegate to
    #[error("Superclass '{class}' of '{callable}' has no no-argument constructor")]
    MissingSuperConstructor {
        /// Constructor being synthesized
        callable: String,
        /// Superclass searched
        class: String,
    },
}

/// Command-line and plugin option errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Option not declared by the plugin
    #[error("Unsupported option '{name}' for plugin '{plugin}'")]
    UnexpectedOption {
        /// Plugin id the option was addressed to
        plugin: String,
        /// Offending option name
        name: String,
    },

    /// Argument not of the form `plugin:<id>:<key>=<value>`
    #[error("Malformed plugin option '{raw}': expected plugin:<id>:<key>=<value>")]
    MalformedOption {
        /// Raw argument text
        raw: String,
    },

    /// A required option was not supplied
    #[error("Required option '{name}' for plugin '{plugin}' is missing")]
    MissingRequiredOption {
        /// Plugin id
        plugin: String,
        /// Option name
        name: String,
    },
}

/// Plugin discovery and attachment errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    /// A manifest line is not a valid implementation identifier
    #[error("Malformed service manifest '{service}' at line {line}: '{text}'")]
    MalformedManifest {
        /// Service the manifest describes
        service: String,
        /// 1-based line number
        line: usize,
        /// Offending text
        text: String,
    },

    /// No registered entry point matches a manifest identifier
    #[error("Service '{service}' names unknown implementation '{name}'")]
    UnknownEntryPoint {
        /// Service kind
        service: String,
        /// Implementation identifier
        name: String,
    },

    /// No discovered command-line processor has the requested id
    #[error("Plugin '{id}' was requested but no discovered plugin advertises it")]
    PluginNotFound {
        /// Requested plugin id
        id: String,
    },

    /// Registrar and processor disagree with the requested identity
    #[error("Plugin identity mismatch: requested '{requested}', registrar advertises '{advertised}'")]
    IdentityMismatch {
        /// Id the build requested
        requested: String,
        /// Id the registrar reports
        advertised: String,
    },

    /// A registrar installed only one half of its extension pair
    #[error("Plugin '{plugin}' registered {generators} declaration generator(s) but {bodies} body generator(s)")]
    IncompleteRegistration {
        /// Plugin id
        plugin: String,
        /// Declaration generators added
        generators: usize,
        /// Body generators added
        bodies: usize,
    },

    /// Option processing failed
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Compilation errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompileError {
    /// A member was requested that its owner's catalog never advertised
    #[error("Member '{name}' of '{owner}' was not advertised by its provider")]
    UnresolvedMember {
        /// Owning class
        owner: String,
        /// Requested member name
        name: String,
    },

    /// Members were requested for a class the frontend never materialized
    #[error("Class '{class}' is not resolved")]
    UnresolvedClass {
        /// Class id
        class: String,
    },

    /// A generated callable has no responsible body generator
    #[error("No body generator is responsible for generated callable '{callable}' (key {key})")]
    MissingBody {
        /// Callable
        callable: String,
        /// Key label the callable carries
        key: String,
    },

    /// A body generator failed
    #[error("Body synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    /// A synthesized body is structurally invalid
    #[error("Invalid IR for '{callable}': {message}")]
    InvalidIr {
        /// Callable
        callable: String,
        /// Validation message
        message: String,
    },

    /// Two providers defined the same symbol in the table
    #[error("Duplicate symbol '{name}'")]
    DuplicateSymbol {
        /// Symbol description
        name: String,
    },
}

/// Errors evaluating lowered IR
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuntimeError {
    /// No body was lowered for the callable
    #[error("Function '{callable}' has no body")]
    NoBody {
        /// Callable
        callable: String,
    },

    /// No class layout was lowered
    #[error("Class '{class}' is not defined")]
    UnknownClass {
        /// Class
        class: String,
    },

    /// Register read before being written
    #[error("Register {register} read before assignment in '{callable}'")]
    UndefinedRegister {
        /// Register
        register: String,
        /// Function being evaluated
        callable: String,
    },

    /// Wrong kind of value for the operation
    #[error("Type error: {message}")]
    TypeError {
        /// Description
        message: String,
    },

    /// Control reached an unterminated block
    #[error("Reached unreachable code in '{callable}'")]
    Unreachable {
        /// Function being evaluated
        callable: String,
    },

    /// Call nesting exceeded the evaluator limit
    #[error("Call stack exhausted")]
    StackOverflow,
}
