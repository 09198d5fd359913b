//! Generation keys of the plugin

use synth_host::GenerationKey;

/// Keys stamped on everything the plugin declares
#[derive(Debug, Clone, Copy)]
pub struct PluginKeys {
    generated: GenerationKey,
}

impl PluginKeys {
    /// Fresh keys, distinct from every other instance
    pub fn new() -> Self {
        Self {
            generated: GenerationKey::new("SimpleClassGenerator"),
        }
    }

    /// Key of declarations made by the class generator
    pub fn generated(&self) -> GenerationKey {
        self.generated
    }
}

impl Default for PluginKeys {
    fn default() -> Self {
        Self::new()
    }
}
