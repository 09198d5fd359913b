//! Build script generating the plugin identity constants
//!
//! Reads `[package.metadata.plugin]` from this crate's manifest and writes
//! `identity.rs` into OUT_DIR so every consumer sees the same id.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Deserialize)]
struct Manifest {
    package: Package,
}

#[derive(Deserialize)]
struct Package {
    metadata: Metadata,
}

#[derive(Deserialize)]
struct Metadata {
    plugin: PluginMetadata,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PluginMetadata {
    id: String,
    group: String,
    artifact: String,
    runtime_artifact: String,
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let version = env::var("CARGO_PKG_VERSION").unwrap();

    let manifest_path = Path::new(&manifest_dir).join("Cargo.toml");
    println!("cargo:rerun-if-changed={}", manifest_path.display());

    let text = fs::read_to_string(&manifest_path).expect("Failed to read Cargo.toml");
    let manifest: Manifest = toml::from_str(&text).expect("Invalid [package.metadata.plugin]");
    let plugin = manifest.package.metadata.plugin;

    if plugin.id.trim().is_empty() {
        panic!("[package.metadata.plugin] id must not be empty");
    }

    let content = format!(
        "/// Identifier the host and build integration use for the plugin\n\
         pub const PLUGIN_ID: &str = {:?};\n\
         /// Publishing group of the plugin artifacts\n\
         pub const GROUP: &str = {:?};\n\
         /// Artifact name of the compiler plugin\n\
         pub const ARTIFACT: &str = {:?};\n\
         /// Artifact name of the runtime-support library\n\
         pub const RUNTIME_ARTIFACT: &str = {:?};\n\
         /// Version shared by all plugin artifacts\n\
         pub const VERSION: &str = {:?};\n",
        plugin.id, plugin.group, plugin.artifact, plugin.runtime_artifact, version
    );

    let out_path = Path::new(&out_dir).join("identity.rs");
    fs::write(&out_path, content).expect("Failed to write identity.rs");
}
