//! The fixed catalog of synthesizable symbols

use synth_host::{CallableId, ClassId, FqName, Name};

/// Package of the generated class
pub const PACKAGE: &str = "foo.bar";

/// Short name of the generated class
pub const CLASS_NAME: &str = "MyClass";

/// Name of the generated member function
pub const FUNCTION_NAME: &str = "foo";

/// Value returned by the generated function
pub const GREETING: &str = "Hello world";

/// One synthesizable symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogEntry {
    /// `foo.bar.MyClass`
    MyClass,
    /// `foo.bar.MyClass.<init>()`
    Constructor,
    /// `foo.bar.MyClass.foo(): string`
    Foo,
}

impl CatalogEntry {
    /// Every entry
    pub const ALL: [CatalogEntry; 3] = [
        CatalogEntry::MyClass,
        CatalogEntry::Constructor,
        CatalogEntry::Foo,
    ];

    /// Package holding every catalog class
    pub fn package() -> FqName {
        FqName::parse(PACKAGE)
    }

    /// Id of the generated class
    pub fn class_id() -> ClassId {
        ClassId::new(Self::package(), CLASS_NAME)
    }

    /// Entry for a class id
    pub fn of_class(id: &ClassId) -> Option<CatalogEntry> {
        (*id == Self::class_id()).then_some(CatalogEntry::MyClass)
    }

    /// Entry for a callable id, matched on owner and name
    pub fn of_callable(id: &CallableId) -> Option<CatalogEntry> {
        let owner = id.owner.as_ref()?;
        if Self::of_class(owner)? != CatalogEntry::MyClass {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|entry| entry.member_name().as_ref() == Some(&id.name))
    }

    /// Member name for callable entries
    pub fn member_name(self) -> Option<Name> {
        match self {
            CatalogEntry::MyClass => None,
            CatalogEntry::Constructor => Some(Name::init()),
            CatalogEntry::Foo => Some(Name::new(FUNCTION_NAME)),
        }
    }

    /// Callable id for callable entries
    pub fn callable_id(self) -> Option<CallableId> {
        self.member_name()
            .map(|name| CallableId::member(&Self::class_id(), name))
    }
}
