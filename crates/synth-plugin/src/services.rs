//! Discovery manifests and entry points
//!
//! The manifest files under `services/` name the implementations below;
//! each one is submitted to the host's entry-point registry under exactly
//! that name.

use synth_host::{
    CommandLineProcessor, CommandLineProcessorEntry, CompilerPluginRegistrar, LoadError,
    RegistrarEntry, ServiceManifest, COMMAND_LINE_PROCESSOR_SERVICE, REGISTRAR_SERVICE,
};

use crate::options::SimpleCommandLineProcessor;
use crate::registrar::SimplePluginRegistrar;

/// Registrar manifest text
pub const REGISTRAR_MANIFEST: &str = include_str!("../services/synth_host.CompilerPluginRegistrar");

/// Command-line processor manifest text
pub const COMMAND_LINE_PROCESSOR_MANIFEST: &str =
    include_str!("../services/synth_host.CommandLineProcessor");

fn create_registrar() -> Box<dyn CompilerPluginRegistrar> {
    Box::new(SimplePluginRegistrar::new())
}

fn create_processor() -> Box<dyn CommandLineProcessor> {
    Box::new(SimpleCommandLineProcessor::new())
}

inventory::submit! {
    RegistrarEntry {
        name: "synth_plugin::registrar::SimplePluginRegistrar",
        create: create_registrar,
    }
}

inventory::submit! {
    CommandLineProcessorEntry {
        name: "synth_plugin::options::SimpleCommandLineProcessor",
        create: create_processor,
    }
}

/// Parsed manifests shipped with this crate
pub fn manifests() -> Result<Vec<ServiceManifest>, LoadError> {
    Ok(vec![
        ServiceManifest::parse(REGISTRAR_SERVICE, REGISTRAR_MANIFEST)?,
        ServiceManifest::parse(COMMAND_LINE_PROCESSOR_SERVICE, COMMAND_LINE_PROCESSOR_MANIFEST)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifests_name_one_implementation_each() {
        let manifests = manifests().unwrap();
        assert_eq!(manifests.len(), 2);
        assert_eq!(
            manifests[0].entries(),
            &["synth_plugin::registrar::SimplePluginRegistrar"]
        );
        assert_eq!(
            manifests[1].entries(),
            &["synth_plugin::options::SimpleCommandLineProcessor"]
        );
    }
}
