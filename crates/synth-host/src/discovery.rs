//! Plugin discovery
//!
//! Plugins ship one plain-text manifest per extension kind, each line naming
//! one implementation. Implementations make themselves known to the host by
//! submitting an entry under that name with `inventory::submit!`; the loader
//! resolves manifest lines against those entries, so a consumer never wires
//! entry points by hand.

use crate::config::CompilerConfiguration;
use crate::error::{ConfigError, LoadError};
use crate::extension::{CommandLineProcessor, CompilerPluginRegistrar, ExtensionStorage};

/// Service name of the registrar manifest
pub const REGISTRAR_SERVICE: &str = "synth_host.CompilerPluginRegistrar";

/// Service name of the command-line processor manifest
pub const COMMAND_LINE_PROCESSOR_SERVICE: &str = "synth_host.CommandLineProcessor";

/// A discoverable registrar implementation
pub struct RegistrarEntry {
    /// Identifier used in manifests
    pub name: &'static str,
    /// Constructor
    pub create: fn() -> Box<dyn CompilerPluginRegistrar>,
}

inventory::collect!(RegistrarEntry);

/// A discoverable command-line processor implementation
pub struct CommandLineProcessorEntry {
    /// Identifier used in manifests
    pub name: &'static str,
    /// Constructor
    pub create: fn() -> Box<dyn CommandLineProcessor>,
}

inventory::collect!(CommandLineProcessorEntry);

/// Parsed service manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceManifest {
    service: String,
    entries: Vec<String>,
}

impl ServiceManifest {
    /// Parse manifest text: one identifier per line, `#` starts a comment,
    /// blank lines are ignored.
    pub fn parse(service: impl Into<String>, text: &str) -> Result<Self, LoadError> {
        let service = service.into();
        let mut entries = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let content = match line.split_once('#') {
                Some((before, _)) => before,
                None => line,
            }
            .trim();

            if content.is_empty() {
                continue;
            }
            if !is_implementation_path(content) {
                return Err(LoadError::MalformedManifest {
                    service,
                    line: index + 1,
                    text: content.to_string(),
                });
            }
            if !entries.iter().any(|e| e == content) {
                entries.push(content.to_string());
            }
        }

        Ok(Self { service, entries })
    }

    /// Service this manifest describes
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Implementation identifiers, in file order without duplicates
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

fn is_implementation_path(text: &str) -> bool {
    text.split("::").all(|segment| {
        let mut chars = segment.chars();
        matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
            && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
    })
}

/// Discovered plugins, ready to be attached to a compilation
#[derive(Default)]
pub struct PluginLoader {
    registrars: Vec<Box<dyn CompilerPluginRegistrar>>,
    processors: Vec<Box<dyn CommandLineProcessor>>,
}

impl PluginLoader {
    /// Create a loader with nothing discovered
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate every implementation named by the manifests
    pub fn from_manifests(manifests: &[ServiceManifest]) -> Result<Self, LoadError> {
        let mut loader = Self::new();

        for manifest in manifests {
            for name in manifest.entries() {
                match manifest.service() {
                    REGISTRAR_SERVICE => {
                        let entry = inventory::iter::<RegistrarEntry>
                            .into_iter()
                            .find(|e| e.name == name)
                            .ok_or_else(|| unknown(manifest, name))?;
                        loader.registrars.push((entry.create)());
                    }
                    COMMAND_LINE_PROCESSOR_SERVICE => {
                        let entry = inventory::iter::<CommandLineProcessorEntry>
                            .into_iter()
                            .find(|e| e.name == name)
                            .ok_or_else(|| unknown(manifest, name))?;
                        loader.processors.push((entry.create)());
                    }
                    other => {
                        tracing::trace!(service = other, "Ignoring manifest for unknown service");
                    }
                }
            }
        }

        tracing::debug!(
            registrars = loader.registrars.len(),
            processors = loader.processors.len(),
            "Discovered plugin entry points"
        );
        Ok(loader)
    }

    /// Add a registrar directly
    pub fn with_registrar(mut self, registrar: Box<dyn CompilerPluginRegistrar>) -> Self {
        self.registrars.push(registrar);
        self
    }

    /// Add a command-line processor directly
    pub fn with_processor(mut self, processor: Box<dyn CommandLineProcessor>) -> Self {
        self.processors.push(processor);
        self
    }

    /// Ids advertised by discovered processors
    pub fn plugin_ids(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.plugin_id()).collect()
    }

    /// Attach the plugin the build requested as `requested_id`: hand its
    /// options to its processor, then let its registrar fill `storage`.
    /// An option the processor accepts without declaring it is still
    /// rejected.
    ///
    /// Nothing is installed if any step fails.
    pub fn attach(
        &self,
        requested_id: &str,
        config: &mut CompilerConfiguration,
        storage: &mut ExtensionStorage,
    ) -> Result<(), LoadError> {
        let processor = self
            .processors
            .iter()
            .find(|p| p.plugin_id() == requested_id)
            .ok_or_else(|| LoadError::PluginNotFound {
                id: requested_id.to_string(),
            })?;

        let registrar = self
            .registrars
            .iter()
            .find(|r| r.plugin_id() == requested_id)
            .ok_or_else(|| LoadError::IdentityMismatch {
                requested: requested_id.to_string(),
                advertised: self
                    .registrars
                    .iter()
                    .map(|r| r.plugin_id())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        apply_options(processor.as_ref(), config)?;

        let before = storage.len();
        registrar.register_extensions(storage, config);
        let after = storage.len();
        let generators = after.0 - before.0;
        let bodies = after.1 - before.1;

        if (generators == 0) != (bodies == 0) {
            storage.truncate(before);
            return Err(LoadError::IncompleteRegistration {
                plugin: requested_id.to_string(),
                generators,
                bodies,
            });
        }

        tracing::debug!(plugin = requested_id, generators, bodies, "Attached plugin");
        Ok(())
    }
}

fn unknown(manifest: &ServiceManifest, name: &str) -> LoadError {
    LoadError::UnknownEntryPoint {
        service: manifest.service().to_string(),
        name: name.to_string(),
    }
}

fn apply_options(
    processor: &dyn CommandLineProcessor,
    config: &mut CompilerConfiguration,
) -> Result<(), ConfigError> {
    let plugin = processor.plugin_id().to_string();
    let supplied = config.plugin_options(&plugin).to_vec();

    // the processor sees every option first and reports its own rejections
    for (name, value) in &supplied {
        processor.process_option(name, value, config)?;
        if !processor.options().iter().any(|o| o.name == name) {
            return Err(ConfigError::UnexpectedOption {
                plugin,
                name: name.clone(),
            });
        }
    }

    if let Some(missing) = processor
        .options()
        .iter()
        .find(|o| o.required && !supplied.iter().any(|(n, _)| n == o.name))
    {
        return Err(ConfigError::MissingRequiredOption {
            plugin,
            name: missing.name.to_string(),
        });
    }

    Ok(())
}
