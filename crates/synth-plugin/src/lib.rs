//! Synth Plugin
//!
//! A two-phase synthesis plugin. The frontend half ([`SimpleClassGenerator`])
//! declares `foo.bar.MyClass` with a constructor and `foo(): string`; the
//! backend half ([`SimpleBodyGenerator`]) fills exactly those declarations,
//! recognizing them by the [`GenerationKey`](synth_host::GenerationKey)
//! both halves share.
//!
//! - `keys` - the generation key
//! - `catalog` - the fixed set of synthesizable symbols
//! - `generator` - declaration queries
//! - `body` - body synthesis
//! - `registrar` - composition root
//! - `options` - command-line option processing
//! - `services` - discovery manifests and entry points

#![warn(rust_2018_idioms)]

pub mod body;
pub mod catalog;
pub mod generator;
pub mod keys;
pub mod options;
pub mod registrar;
pub mod services;

pub use body::SimpleBodyGenerator;
pub use catalog::CatalogEntry;
pub use generator::SimpleClassGenerator;
pub use keys::PluginKeys;
pub use options::SimpleCommandLineProcessor;
pub use registrar::SimplePluginRegistrar;
