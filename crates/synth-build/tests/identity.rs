//! The build side and the compiler side agree on the plugin identity

use synth_build::{CompilationUnit, CompilerSubplugin, SynthSubplugin};
use synth_host::{
    CompilerConfiguration, CompilerPluginRegistrar, ExtensionStorage, LoadError, PluginLoader,
};
use synth_plugin::SimplePluginRegistrar;

fn loader() -> PluginLoader {
    PluginLoader::from_manifests(&synth_plugin::services::manifests().unwrap()).unwrap()
}

#[test]
fn test_registrar_and_build_share_identity() {
    let subplugin = SynthSubplugin;
    let registrar = SimplePluginRegistrar::new();

    assert_eq!(subplugin.plugin_id().as_bytes(), registrar.plugin_id().as_bytes());
    assert_eq!(subplugin.identity(), synth_identity::PluginIdentity::current());
    assert_eq!(subplugin.identity().id, registrar.plugin_id());
}

#[test]
fn test_requested_plugins_attach() {
    let mut unit = CompilationUnit::new("main");
    SynthSubplugin.apply_to_compilation(&mut unit);

    let loader = loader();
    let mut config = CompilerConfiguration::new(unit.name.clone());
    let mut storage = ExtensionStorage::new();
    for id in unit.requested_plugins() {
        loader.attach(id, &mut config, &mut storage).unwrap();
    }
    assert_eq!(storage.len(), (1, 1));
}

struct RenamedSubplugin;

impl CompilerSubplugin for RenamedSubplugin {
    fn is_applicable(&self, _unit: &CompilationUnit) -> bool {
        true
    }

    fn plugin_id(&self) -> &str {
        "org.demo.synth-renamed"
    }

    fn identity(&self) -> synth_identity::PluginIdentity {
        synth_identity::PluginIdentity {
            id: "org.demo.synth-renamed",
            ..synth_identity::PluginIdentity::current()
        }
    }

    fn plugin_artifact(&self) -> synth_build::ArtifactCoordinates {
        SynthSubplugin.plugin_artifact()
    }

    fn apply_to_compilation(
        &self,
        unit: &mut CompilationUnit,
    ) -> Vec<synth_build::SubpluginOption> {
        unit.request_plugin(self.plugin_id());
        Vec::new()
    }
}

#[test]
fn test_diverging_identity_fails_the_build() {
    let mut unit = CompilationUnit::new("main");
    RenamedSubplugin.apply_to_compilation(&mut unit);

    let loader = loader();
    let mut config = CompilerConfiguration::new("main");
    let mut storage = ExtensionStorage::new();
    let err = loader
        .attach(&unit.requested_plugins()[0], &mut config, &mut storage)
        .unwrap_err();

    assert_eq!(
        err,
        LoadError::PluginNotFound {
            id: "org.demo.synth-renamed".to_string()
        }
    );
    assert!(storage.is_empty());
}

#[test]
fn test_unit_serializes() {
    let mut unit = CompilationUnit::new("main");
    SynthSubplugin.apply_to_compilation(&mut unit);

    let json = serde_json::to_value(&unit).unwrap();
    assert_eq!(json["name"], "main");
    assert_eq!(json["dependencies"][0]["scope"], "implementation");
    assert_eq!(json["dependencies"][0]["coordinates"]["artifact"], "synth-runtime");
    assert_eq!(json["requested_plugins"][0], "org.demo.synth");
}
