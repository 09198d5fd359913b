//! Plugin identity
//!
//! One identifier ties the compiler plugin, its build integration and its
//! runtime-support artifact together. The values are generated at build
//! time from this crate's manifest metadata; nothing else hard-codes them.

use serde::Serialize;

include!(concat!(env!("OUT_DIR"), "/identity.rs"));

/// Published coordinates of the plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginIdentity {
    pub id: &'static str,
    pub group: &'static str,
    pub artifact: &'static str,
    pub runtime_artifact: &'static str,
    pub version: &'static str,
}

impl PluginIdentity {
    /// The identity generated for this build
    pub const fn current() -> Self {
        Self {
            id: PLUGIN_ID,
            group: GROUP,
            artifact: ARTIFACT,
            runtime_artifact: RUNTIME_ARTIFACT,
            version: VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_identity() {
        let identity = PluginIdentity::current();
        assert_eq!(identity.id, "org.demo.synth");
        assert_eq!(identity.group, "org.demo");
        assert_eq!(identity.artifact, "synth-plugin");
        assert_eq!(identity.runtime_artifact, "synth-runtime");
        assert_eq!(identity.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_identity_serializes() {
        let json = serde_json::to_value(PluginIdentity::current()).unwrap();
        assert_eq!(json["id"], "org.demo.synth");
        assert_eq!(json["runtime_artifact"], "synth-runtime");
    }
}
