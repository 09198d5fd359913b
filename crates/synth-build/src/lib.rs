//! Synth Build
//!
//! The build-integration side of the plugin: decides which compilations
//! get the plugin, which artifact provides it, and adds the runtime-support
//! library the generated symbols need. It never takes part in synthesis.

#![warn(rust_2018_idioms)]

pub mod subplugin;
pub mod unit;

pub use subplugin::{CompilerSubplugin, SubpluginOption, SynthSubplugin};
pub use unit::{ArtifactCoordinates, CompilationUnit, Dependency, DependencyScope};
