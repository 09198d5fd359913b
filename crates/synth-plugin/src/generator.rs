//! Declaration generation
//!
//! Answers the host's lazy resolution queries from the fixed catalog. Every
//! answered symbol is stamped with the generator's key; anything outside
//! the catalog is declined with `None` or an empty set.

use rustc_hash::FxHashSet;
use synth_host::{
    CallableId, CallableKind, CallableSymbol, ClassId, ClassSymbol,
    DeclarationGenerator, DeclarationOrigin, FqName, GenerationKey, Name, PrimitiveType, Span,
    SymbolDescriptor, TypeContext, TypeId,
};

use crate::catalog::CatalogEntry;

/// Frontend half of the plugin
#[derive(Debug, Clone)]
pub struct SimpleClassGenerator {
    key: GenerationKey,
}

impl SimpleClassGenerator {
    /// Create a generator stamping declarations with `key`
    pub fn new(key: GenerationKey) -> Self {
        Self { key }
    }

    /// The key stamped on generated declarations
    pub fn key(&self) -> GenerationKey {
        self.key
    }

    fn owns(&self, owner: &ClassSymbol) -> bool {
        owner.origin.key() == Some(self.key) && CatalogEntry::of_class(&owner.id).is_some()
    }

    fn callable(
        &self,
        id: &CallableId,
        kind: CallableKind,
        return_ty: TypeId,
    ) -> CallableSymbol {
        CallableSymbol {
            id: id.clone(),
            kind,
            params: Vec::new(),
            return_ty,
            origin: DeclarationOrigin::Plugin(self.key),
            span: Span::SYNTHETIC,
        }
    }
}

impl DeclarationGenerator for SimpleClassGenerator {
    fn top_level_symbols(&self) -> FxHashSet<SymbolDescriptor> {
        [SymbolDescriptor::Class(CatalogEntry::class_id())]
            .into_iter()
            .collect()
    }

    fn has_namespace(&self, path: &FqName) -> bool {
        path.is_prefix_of(&CatalogEntry::package())
    }

    fn generate_class_like(&self, id: &ClassId, _types: &mut TypeContext) -> Option<ClassSymbol> {
        match CatalogEntry::of_class(id)? {
            CatalogEntry::MyClass => {
                tracing::debug!(class = %id, key = %self.key, "Generating class");
                Some(ClassSymbol {
                    id: id.clone(),
                    supertype: None,
                    fields: Vec::new(),
                    origin: DeclarationOrigin::Plugin(self.key),
                    span: Span::SYNTHETIC,
                })
            }
            CatalogEntry::Constructor | CatalogEntry::Foo => None,
        }
    }

    fn callable_names(&self, owner: &ClassSymbol) -> FxHashSet<Name> {
        if !self.owns(owner) {
            tracing::trace!(class = %owner.id, "Declining member names");
            return FxHashSet::default();
        }
        CatalogEntry::ALL
            .into_iter()
            .filter_map(CatalogEntry::member_name)
            .collect()
    }

    fn generate_members(
        &self,
        id: &CallableId,
        owner: &ClassSymbol,
        types: &mut TypeContext,
    ) -> Vec<CallableSymbol> {
        if !self.owns(owner) || id.owner.as_ref() != Some(&owner.id) {
            return Vec::new();
        }

        let symbol = match CatalogEntry::of_callable(id) {
            Some(CatalogEntry::Constructor) => {
                let class_ty = types.class_type(&owner.id);
                self.callable(id, CallableKind::Constructor, class_ty)
            }
            Some(CatalogEntry::Foo) => {
                let Some(string_ty) = types.lookup_named_type(PrimitiveType::String.name()) else {
                    return Vec::new();
                };
                self.callable(id, CallableKind::Function, string_ty)
            }
            Some(CatalogEntry::MyClass) | None => return Vec::new(),
        };

        tracing::debug!(callable = %id, key = %self.key, "Generating member");
        vec![symbol]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> SimpleClassGenerator {
        SimpleClassGenerator::new(GenerationKey::new("test"))
    }

    #[test]
    fn test_namespaces() {
        let gen = generator();
        assert!(gen.has_namespace(&FqName::root()));
        assert!(gen.has_namespace(&FqName::parse("foo")));
        assert!(gen.has_namespace(&FqName::parse("foo.bar")));
        assert!(!gen.has_namespace(&FqName::parse("foo.baz")));
        assert!(!gen.has_namespace(&FqName::parse("foo.bar.MyClass")));
        assert!(!gen.has_namespace(&FqName::parse("bar")));
    }

    #[test]
    fn test_members_of_foreign_class_are_declined() {
        let gen = generator();
        let mut types = TypeContext::new();
        let mut class = gen.generate_class_like(&CatalogEntry::class_id(), &mut types).unwrap();
        class.origin = DeclarationOrigin::Plugin(GenerationKey::new("other"));

        assert!(gen.callable_names(&class).is_empty());
        let foo = CatalogEntry::Foo.callable_id().unwrap();
        assert!(gen.generate_members(&foo, &class, &mut types).is_empty());
    }

    #[test]
    fn test_unknown_member_is_empty() {
        let gen = generator();
        let mut types = TypeContext::new();
        let class = gen.generate_class_like(&CatalogEntry::class_id(), &mut types).unwrap();
        let bar = CallableId::member(&class.id, "bar");
        assert!(gen.generate_members(&bar, &class, &mut types).is_empty());
    }
}
