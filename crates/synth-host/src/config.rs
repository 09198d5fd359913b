//! Compiler configuration and plugin option arguments

use rustc_hash::FxHashMap;

use crate::error::ConfigError;

/// One `plugin:<id>:<key>=<value>` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginArgument {
    /// Plugin the option is addressed to
    pub plugin_id: String,
    /// Option key
    pub name: String,
    /// Raw value, unparsed
    pub value: String,
}

/// Parse a `plugin:<id>:<key>=<value>` argument.
///
/// The id may itself contain `:`-free dots (`org.demo.synth`); the key is
/// everything between the last `:` before `=` and the `=`.
pub fn parse_plugin_argument(raw: &str) -> Result<PluginArgument, ConfigError> {
    let malformed = || ConfigError::MalformedOption {
        raw: raw.to_string(),
    };

    let rest = raw.strip_prefix("plugin:").ok_or_else(malformed)?;
    let (head, value) = rest.split_once('=').ok_or_else(malformed)?;
    let (plugin_id, name) = head.rsplit_once(':').ok_or_else(malformed)?;

    if plugin_id.is_empty() || name.is_empty() {
        return Err(malformed());
    }

    Ok(PluginArgument {
        plugin_id: plugin_id.to_string(),
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Settings for one compilation
#[derive(Debug, Clone, Default)]
pub struct CompilerConfiguration {
    /// Name of the module being compiled
    pub module_name: String,
    /// Raw options per plugin id, in command-line order
    plugin_options: FxHashMap<String, Vec<(String, String)>>,
    /// Values stored by command-line processors
    values: FxHashMap<String, Vec<String>>,
}

impl CompilerConfiguration {
    /// Create a configuration for `module_name`
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            ..Self::default()
        }
    }

    /// Record a parsed plugin argument
    pub fn add_plugin_argument(&mut self, arg: PluginArgument) {
        self.plugin_options
            .entry(arg.plugin_id)
            .or_default()
            .push((arg.name, arg.value));
    }

    /// Raw options addressed to `plugin_id`
    pub fn plugin_options(&self, plugin_id: &str) -> &[(String, String)] {
        self.plugin_options
            .get(plugin_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Plugin ids that received options
    pub fn plugins_with_options(&self) -> impl Iterator<Item = &str> {
        self.plugin_options.keys().map(|k| k.as_str())
    }

    /// Store a processed value under `key`
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Values stored under `key`
    pub fn get(&self, key: &str) -> &[String] {
        self.values.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plugin_argument() {
        let arg = parse_plugin_argument("plugin:org.demo.synth:greeting=Hi there").unwrap();
        assert_eq!(arg.plugin_id, "org.demo.synth");
        assert_eq!(arg.name, "greeting");
        assert_eq!(arg.value, "Hi there");

        let empty_value = parse_plugin_argument("plugin:p:flag=").unwrap();
        assert_eq!(empty_value.value, "");
    }

    #[test]
    fn test_parse_plugin_argument_rejects_malformed() {
        for raw in ["p:key=v", "plugin:key=v", "plugin:p:key", "plugin::key=v", "plugin:p:=v"] {
            assert_eq!(
                parse_plugin_argument(raw),
                Err(ConfigError::MalformedOption { raw: raw.to_string() }),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_configuration_groups_by_plugin() {
        let mut config = CompilerConfiguration::new("main");
        config.add_plugin_argument(parse_plugin_argument("plugin:a:x=1").unwrap());
        config.add_plugin_argument(parse_plugin_argument("plugin:a:y=2").unwrap());
        config.add_plugin_argument(parse_plugin_argument("plugin:b:x=3").unwrap());

        assert_eq!(config.plugin_options("a").len(), 2);
        assert_eq!(config.plugin_options("b"), &[("x".to_string(), "3".to_string())]);
        assert!(config.plugin_options("c").is_empty());

        config.put("a.x", "1");
        assert_eq!(config.get("a.x"), &["1".to_string()]);
    }
}
