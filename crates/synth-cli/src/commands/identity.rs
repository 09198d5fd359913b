//! `synthc identity`: Print the plugin identity.

use synth_build::{CompilerSubplugin, SynthSubplugin};

pub fn execute(json: bool) -> anyhow::Result<()> {
    let subplugin = SynthSubplugin;
    let identity = subplugin.identity();

    if json {
        let value = serde_json::json!({
            "identity": identity,
            "plugin_artifact": subplugin.plugin_artifact(),
            "runtime_artifact": subplugin.runtime_artifact(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("id:       {}", identity.id);
    println!("plugin:   {}", subplugin.plugin_artifact());
    println!("runtime:  {}", subplugin.runtime_artifact());
    Ok(())
}
