//! Composition root

use synth_host::{CompilerConfiguration, CompilerPluginRegistrar, ExtensionStorage};

use crate::body::SimpleBodyGenerator;
use crate::generator::SimpleClassGenerator;
use crate::keys::PluginKeys;

/// Installs the declaration and body generators of the plugin
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplePluginRegistrar;

impl SimplePluginRegistrar {
    /// Create the registrar
    pub fn new() -> Self {
        Self
    }

    /// Build both halves around one freshly created key
    pub fn compose() -> (SimpleClassGenerator, SimpleBodyGenerator) {
        let keys = PluginKeys::new();
        (
            SimpleClassGenerator::new(keys.generated()),
            SimpleBodyGenerator::new(keys.generated()),
        )
    }
}

impl CompilerPluginRegistrar for SimplePluginRegistrar {
    fn plugin_id(&self) -> &str {
        synth_identity::PLUGIN_ID
    }

    fn register_extensions(&self, storage: &mut ExtensionStorage, config: &CompilerConfiguration) {
        let (declarations, bodies) = Self::compose();
        tracing::debug!(
            plugin = synth_identity::PLUGIN_ID,
            module = %config.module_name,
            key = ?declarations.key(),
            "Registering extensions"
        );
        storage.register_declaration_generator(Box::new(declarations));
        storage.register_body_generator(Box::new(bodies));
    }
}
