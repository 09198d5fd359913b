//! Symbols and symbol descriptors
//!
//! Names, namespace paths and the descriptors the host uses to ask
//! providers for declarations, plus the per-compilation table of
//! materialized symbols.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::key::GenerationKey;
use crate::span::Span;
use crate::types::TypeId;

/// A simple (unqualified) identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    /// Text of the constructor sentinel name
    pub const INIT: &'static str = "<init>";

    /// Create a name
    pub fn new(name: impl Into<String>) -> Self {
        Name(name.into())
    }

    /// The constructor sentinel
    pub fn init() -> Self {
        Name(Self::INIT.to_string())
    }

    /// Whether this is the constructor sentinel
    pub fn is_init(&self) -> bool {
        self.0 == Self::INIT
    }

    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::new(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name(s)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dotted namespace path (`foo.bar`). The empty path is the root namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FqName {
    segments: Vec<Name>,
}

impl FqName {
    /// The root namespace
    pub fn root() -> Self {
        FqName::default()
    }

    /// Parse a dotted path; empty segments are dropped
    pub fn parse(path: &str) -> Self {
        FqName {
            segments: path
                .split('.')
                .filter(|s| !s.is_empty())
                .map(Name::new)
                .collect(),
        }
    }

    /// Whether this is the root namespace
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path segments, outermost first
    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    /// Last segment, if any
    pub fn short_name(&self) -> Option<&Name> {
        self.segments.last()
    }

    /// Enclosing namespace (the root is its own parent)
    pub fn parent(&self) -> FqName {
        let mut segments = self.segments.clone();
        segments.pop();
        FqName { segments }
    }

    /// Child namespace
    pub fn child(&self, name: impl Into<Name>) -> FqName {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        FqName { segments }
    }

    /// Whether `self` is `other` or encloses it
    pub fn is_prefix_of(&self, other: &FqName) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// Every prefix of this path, from the root up to and including itself
    pub fn prefixes(&self) -> Vec<FqName> {
        (0..=self.segments.len())
            .map(|n| FqName {
                segments: self.segments[..n].to_vec(),
            })
            .collect()
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Identifies a class-like symbol: package plus short name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId {
    /// Enclosing namespace
    pub package: FqName,
    /// Short class name
    pub name: Name,
}

impl ClassId {
    /// A class called `name` in `package`
    pub fn new(package: FqName, name: impl Into<Name>) -> Self {
        ClassId {
            package,
            name: name.into(),
        }
    }

    /// Parse `foo.bar.MyClass` (last segment is the class name)
    pub fn parse(path: &str) -> Option<Self> {
        let fq = FqName::parse(path);
        let name = fq.short_name()?.clone();
        Some(ClassId::new(fq.parent(), name))
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_root() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

/// Identifies a callable (function or constructor)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallableId {
    /// Enclosing namespace
    pub package: FqName,
    /// Owning class for members; `None` for top-level functions
    pub owner: Option<ClassId>,
    /// Callable name; `<init>` for constructors
    pub name: Name,
}

impl CallableId {
    /// A member of `owner`
    pub fn member(owner: &ClassId, name: impl Into<Name>) -> Self {
        CallableId {
            package: owner.package.clone(),
            owner: Some(owner.clone()),
            name: name.into(),
        }
    }

    /// The constructor of `owner`
    pub fn constructor(owner: &ClassId) -> Self {
        Self::member(owner, Name::init())
    }

    /// A top-level function
    pub fn top_level(package: FqName, name: impl Into<Name>) -> Self {
        CallableId {
            package,
            owner: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for CallableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{}.{}", owner, self.name),
            None if self.package.is_root() => write!(f, "{}", self.name),
            None => write!(f, "{}.{}", self.package, self.name),
        }
    }
}

/// A requested or synthesized symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolDescriptor {
    /// Class-like symbol
    Class(ClassId),
    /// Function or constructor
    Callable(CallableId),
}

impl SymbolDescriptor {
    /// Namespace the symbol lives in
    pub fn package(&self) -> &FqName {
        match self {
            SymbolDescriptor::Class(id) => &id.package,
            SymbolDescriptor::Callable(id) => &id.package,
        }
    }

    /// The class id, if this describes a class
    pub fn as_class(&self) -> Option<&ClassId> {
        match self {
            SymbolDescriptor::Class(id) => Some(id),
            SymbolDescriptor::Callable(_) => None,
        }
    }
}

impl fmt::Display for SymbolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolDescriptor::Class(id) => write!(f, "class {}", id),
            SymbolDescriptor::Callable(id) => write!(f, "fun {}", id),
        }
    }
}

/// Where a declaration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationOrigin {
    /// User source or host built-in
    Source,
    /// Synthesized by the plugin owning this key
    Plugin(GenerationKey),
}

impl DeclarationOrigin {
    /// The generation key, if synthesized
    pub fn key(&self) -> Option<GenerationKey> {
        match self {
            DeclarationOrigin::Source => None,
            DeclarationOrigin::Plugin(key) => Some(*key),
        }
    }
}

/// A field of a class, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSymbol {
    /// Field name
    pub name: Name,
    /// Declared type
    pub ty: TypeId,
}

/// A materialized class-like symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSymbol {
    /// Class id
    pub id: ClassId,
    /// Superclass; `None` means the host root class
    pub supertype: Option<ClassId>,
    /// Fields declared by this class itself
    pub fields: Vec<FieldSymbol>,
    /// Source or generating plugin
    pub origin: DeclarationOrigin,
    /// `Span::SYNTHETIC` for generated classes
    pub span: Span,
}

/// Callable kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallableKind {
    /// Ordinary function or method
    Function,
    /// `<init>` of a class
    Constructor,
}

/// A callable parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamSymbol {
    /// Parameter name
    pub name: Name,
    /// Declared type
    pub ty: TypeId,
}

/// A materialized function or constructor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableSymbol {
    /// Callable id; overloads share one
    pub id: CallableId,
    /// Function or constructor
    pub kind: CallableKind,
    /// Parameters, receiver excluded
    pub params: Vec<ParamSymbol>,
    /// Declared return type; for constructors, the owning class type
    pub return_ty: TypeId,
    /// Source or generating plugin
    pub origin: DeclarationOrigin,
    /// `Span::SYNTHETIC` for generated callables
    pub span: Span,
}

impl CallableSymbol {
    /// Whether this is a constructor
    pub fn is_constructor(&self) -> bool {
        self.kind == CallableKind::Constructor
    }
}

/// Error indicating a duplicate symbol definition
#[derive(Debug, Clone)]
pub struct DuplicateSymbolError {
    /// Symbol that was already defined
    pub symbol: SymbolDescriptor,
}

/// Materialized symbols of one compilation
///
/// Insertion order is kept so lowering and dumps are deterministic.
#[derive(Debug, Default)]
pub struct SymbolTable {
    classes: FxHashMap<ClassId, ClassSymbol>,
    class_order: Vec<ClassId>,
    callables: FxHashMap<CallableId, Vec<CallableSymbol>>,
    callable_order: Vec<CallableId>,
}

impl SymbolTable {
    /// Create an empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding one built-in class and its constructors
    pub fn with_builtin(class: ClassSymbol, constructors: Vec<CallableSymbol>) -> Self {
        let ctor_id = CallableId::constructor(&class.id);
        SymbolTable {
            class_order: vec![class.id.clone()],
            classes: FxHashMap::from_iter([(class.id.clone(), class)]),
            callable_order: vec![ctor_id.clone()],
            callables: FxHashMap::from_iter([(ctor_id, constructors)]),
        }
    }

    /// Define a class
    ///
    /// Returns an error if a class with the same id already exists.
    pub fn define_class(&mut self, symbol: ClassSymbol) -> Result<(), DuplicateSymbolError> {
        if self.classes.contains_key(&symbol.id) {
            return Err(DuplicateSymbolError {
                symbol: SymbolDescriptor::Class(symbol.id),
            });
        }
        self.class_order.push(symbol.id.clone());
        self.classes.insert(symbol.id.clone(), symbol);
        Ok(())
    }

    /// Define the callables materialized for one id (overloads share an id)
    pub fn define_callables(
        &mut self,
        id: CallableId,
        symbols: Vec<CallableSymbol>,
    ) -> Result<(), DuplicateSymbolError> {
        if self.callables.contains_key(&id) {
            return Err(DuplicateSymbolError {
                symbol: SymbolDescriptor::Callable(id),
            });
        }
        self.callable_order.push(id.clone());
        self.callables.insert(id, symbols);
        Ok(())
    }

    /// Look up a class
    pub fn class(&self, id: &ClassId) -> Option<&ClassSymbol> {
        self.classes.get(id)
    }

    /// Whether callables for `id` were already materialized
    pub fn has_callables(&self, id: &CallableId) -> bool {
        self.callables.contains_key(id)
    }

    /// Callables materialized for `id` (empty if none)
    pub fn callables(&self, id: &CallableId) -> &[CallableSymbol] {
        self.callables.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// All classes in definition order
    pub fn classes(&self) -> impl Iterator<Item = &ClassSymbol> {
        self.class_order.iter().filter_map(|id| self.classes.get(id))
    }

    /// All callables in definition order
    pub fn all_callables(&self) -> impl Iterator<Item = &CallableSymbol> {
        self.callable_order
            .iter()
            .filter_map(|id| self.callables.get(id))
            .flatten()
    }

    /// Callables owned by `owner`, in definition order
    pub fn members_of<'a>(
        &'a self,
        owner: &'a ClassId,
    ) -> impl Iterator<Item = &'a CallableSymbol> {
        self.all_callables()
            .filter(move |c| c.id.owner.as_ref() == Some(owner))
    }

    /// Find the no-argument constructor of a class
    pub fn no_arg_constructor(&self, class: &ClassId) -> Option<&CallableSymbol> {
        self.callables(&CallableId::constructor(class))
            .iter()
            .find(|c| c.params.is_empty())
    }

    /// Number of materialized classes
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}
