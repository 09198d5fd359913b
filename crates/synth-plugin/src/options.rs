//! Command-line option processing
//!
//! The plugin declares no options; anything addressed to it is rejected.

use synth_host::{CliOption, CommandLineProcessor, CompilerConfiguration, ConfigError};

/// Option processor of the plugin
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleCommandLineProcessor;

impl SimpleCommandLineProcessor {
    /// Create the processor
    pub fn new() -> Self {
        Self
    }
}

impl CommandLineProcessor for SimpleCommandLineProcessor {
    fn plugin_id(&self) -> &str {
        synth_identity::PLUGIN_ID
    }

    fn options(&self) -> &[CliOption] {
        &[]
    }

    fn process_option(
        &self,
        name: &str,
        _value: &str,
        _config: &mut CompilerConfiguration,
    ) -> Result<(), ConfigError> {
        Err(ConfigError::UnexpectedOption {
            plugin: synth_identity::PLUGIN_ID.to_string(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_option_is_rejected() {
        let processor = SimpleCommandLineProcessor::new();
        let mut config = CompilerConfiguration::new("main");
        assert!(processor.options().is_empty());

        let err = processor.process_option("verbose", "true", &mut config).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnexpectedOption {
                plugin: "org.demo.synth".to_string(),
                name: "verbose".to_string(),
            }
        );
        assert!(err.to_string().contains("verbose"));
    }
}
