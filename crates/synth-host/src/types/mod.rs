//! Type table
//!
//! Interned type representation. Built-in primitive types are pre-interned
//! at well-known ids so plugins resolve them against the host rather than
//! inventing their own.

pub mod context;
pub mod ty;

pub use context::TypeContext;
pub use ty::{PrimitiveType, Type, TypeId};
