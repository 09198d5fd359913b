//! Interned type table

use super::ty::{PrimitiveType, Type, TypeId};
use crate::symbols::ClassId;
use rustc_hash::FxHashMap;

/// Identical types share one `TypeId`.
#[derive(Debug, Clone)]
pub struct TypeContext {
    /// Indexed by `TypeId`
    types: Vec<Type>,

    ids: FxHashMap<Type, TypeId>,

    /// Primitive names (`string`, `number`, ...)
    by_name: FxHashMap<String, TypeId>,
}

impl Default for TypeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeContext {
    /// A table with every primitive and `Unknown` already interned
    pub fn new() -> Self {
        let mut ctx = TypeContext {
            types: Vec::new(),
            ids: FxHashMap::default(),
            by_name: FxHashMap::default(),
        };

        // Primitives occupy TypeId 0..=4 in PrimitiveType::ALL order
        for prim in PrimitiveType::ALL {
            let id = ctx.intern(Type::Primitive(prim));
            ctx.by_name.insert(prim.name().to_string(), id);
        }
        ctx.intern(Type::Unknown);

        ctx
    }

    /// Id of `Type::Unknown`, interned right after the primitives
    pub const UNKNOWN_TYPE_ID: u32 = 5;

    /// Id of `ty`, allocating one the first time it is seen
    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.ids.get(&ty) {
            return id;
        }

        let id = TypeId(self.types.len() as u32);
        self.types.push(ty.clone());
        self.ids.insert(ty, id);
        id
    }

    /// The type behind `id`
    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.0 as usize)
    }

    /// Id of `ty` if already interned
    pub fn lookup(&self, ty: &Type) -> Option<TypeId> {
        self.ids.get(ty).copied()
    }

    /// Primitive id by source name
    pub fn lookup_named_type(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Id of a primitive, fixed by its position in `PrimitiveType::ALL`
    pub fn builtin(&self, prim: PrimitiveType) -> TypeId {
        let index = PrimitiveType::ALL
            .iter()
            .position(|p| *p == prim)
            .unwrap_or(Self::UNKNOWN_TYPE_ID as usize);
        TypeId(index as u32)
    }

    /// `number`
    pub fn number_type(&self) -> TypeId {
        self.builtin(PrimitiveType::Number)
    }

    /// `string`
    pub fn string_type(&self) -> TypeId {
        self.builtin(PrimitiveType::String)
    }

    /// `void`
    pub fn void_type(&self) -> TypeId {
        self.builtin(PrimitiveType::Void)
    }

    /// Placeholder for types that could not be resolved
    pub fn unknown_type(&self) -> TypeId {
        TypeId(Self::UNKNOWN_TYPE_ID)
    }

    /// Nominal type of `class`
    pub fn class_type(&mut self, class: &ClassId) -> TypeId {
        self.intern(Type::Class(class.clone()))
    }

    /// Look up the nominal type of a class without interning
    pub fn lookup_class_type(&self, class: &ClassId) -> Option<TypeId> {
        self.lookup(&Type::Class(class.clone()))
    }

    /// Get the primitive behind a TypeId, if it is one
    pub fn as_primitive(&self, id: TypeId) -> Option<PrimitiveType> {
        match self.get(id) {
            Some(Type::Primitive(p)) => Some(*p),
            _ => None,
        }
    }

    /// Human-readable rendering of a type for diagnostics
    pub fn display(&self, id: TypeId) -> String {
        match self.get(id) {
            Some(ty) => ty.to_string(),
            None => format!("<invalid {}>", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::FqName;

    #[test]
    fn test_builtins_are_pre_interned() {
        let ctx = TypeContext::new();
        assert_eq!(ctx.number_type().as_u32(), 0);
        assert_eq!(ctx.string_type().as_u32(), 1);
        assert_eq!(ctx.void_type().as_u32(), 4);
        assert_eq!(ctx.lookup_named_type("string"), Some(ctx.string_type()));
        assert_eq!(ctx.as_primitive(ctx.string_type()), Some(PrimitiveType::String));
        assert_eq!(ctx.display(ctx.unknown_type()), "unknown");
    }

    #[test]
    fn test_class_type_interning() {
        let mut ctx = TypeContext::new();
        let id = ClassId::new(FqName::parse("foo.bar"), "MyClass");

        assert_eq!(ctx.lookup_class_type(&id), None);
        let first = ctx.class_type(&id);
        let second = ctx.class_type(&id);
        assert_eq!(first, second);
        assert_eq!(ctx.lookup_class_type(&id), Some(first));
        assert_eq!(ctx.display(first), "foo.bar.MyClass");
        assert_eq!(ctx.as_primitive(first), None);
    }
}
