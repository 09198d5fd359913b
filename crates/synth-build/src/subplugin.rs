//! Build-side plugin description

use serde::Serialize;
use synth_identity::PluginIdentity;

use crate::unit::{ArtifactCoordinates, CompilationUnit, DependencyScope};

/// A key/value option forwarded to the compiler plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubpluginOption {
    pub key: String,
    pub value: String,
}

/// What a build needs to know to attach a compiler plugin
pub trait CompilerSubplugin {
    /// Whether the plugin applies to `unit`
    fn is_applicable(&self, unit: &CompilationUnit) -> bool;

    /// Id the compiler must find among discovered plugins
    fn plugin_id(&self) -> &str;

    /// Full identity of the plugin
    fn identity(&self) -> PluginIdentity;

    /// Artifact providing the compiler plugin
    fn plugin_artifact(&self) -> ArtifactCoordinates;

    /// Prepare `unit` for the plugin and return the options to pass it
    fn apply_to_compilation(&self, unit: &mut CompilationUnit) -> Vec<SubpluginOption>;
}

/// Build integration of the synth plugin
#[derive(Debug, Clone, Copy, Default)]
pub struct SynthSubplugin;

impl SynthSubplugin {
    /// Coordinates of the runtime-support library
    pub fn runtime_artifact(&self) -> ArtifactCoordinates {
        let identity = self.identity();
        ArtifactCoordinates::new(identity.group, identity.runtime_artifact, identity.version)
    }
}

impl CompilerSubplugin for SynthSubplugin {
    fn is_applicable(&self, _unit: &CompilationUnit) -> bool {
        true
    }

    fn plugin_id(&self) -> &str {
        synth_identity::PLUGIN_ID
    }

    fn identity(&self) -> PluginIdentity {
        PluginIdentity::current()
    }

    fn plugin_artifact(&self) -> ArtifactCoordinates {
        let identity = self.identity();
        ArtifactCoordinates::new(identity.group, identity.artifact, identity.version)
    }

    fn apply_to_compilation(&self, unit: &mut CompilationUnit) -> Vec<SubpluginOption> {
        let runtime = self.runtime_artifact();
        if unit.add_dependency(runtime.clone(), DependencyScope::Implementation) {
            tracing::debug!(unit = %unit.name, dependency = %runtime, "Added runtime support");
        }
        unit.request_plugin(self.plugin_id());
        Vec::new()
    }
}
