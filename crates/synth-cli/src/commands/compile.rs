//! `synthc compile`: Compile a module and optionally run a generated method.

use anyhow::{anyhow, Context};
use synth_build::{CompilationUnit, CompilerSubplugin, SynthSubplugin};
use synth_host::ir::PrettyPrint;
use synth_host::{
    parse_plugin_argument, ClassId, CompilerConfiguration, ExtensionStorage, Frontend,
    Interpreter, Name, PluginArgument, PluginLoader,
};

pub struct CompileArgs {
    pub module: String,
    pub plugins: Vec<String>,
    pub plugin_options: Vec<String>,
    pub emit_ir: bool,
    pub call: Option<String>,
}

pub fn execute(args: CompileArgs) -> anyhow::Result<()> {
    let subplugin = SynthSubplugin;
    let mut unit = CompilationUnit::new(args.module.clone());
    let mut config = CompilerConfiguration::new(args.module);

    if subplugin.is_applicable(&unit) {
        for option in subplugin.apply_to_compilation(&mut unit) {
            config.add_plugin_argument(PluginArgument {
                plugin_id: subplugin.plugin_id().to_string(),
                name: option.key,
                value: option.value,
            });
        }
    }
    for id in args.plugins {
        unit.request_plugin(id);
    }
    for raw in &args.plugin_options {
        config.add_plugin_argument(parse_plugin_argument(raw)?);
    }

    let manifests = synth_plugin::services::manifests().context("Failed to read plugin manifests")?;
    let loader = PluginLoader::from_manifests(&manifests).context("Failed to discover plugins")?;

    let mut storage = ExtensionStorage::new();
    for id in unit.requested_plugins() {
        loader.attach(id, &mut config, &mut storage).with_context(|| {
            format!(
                "Failed to attach plugin '{}' (available: {})",
                id,
                loader.plugin_ids().join(", ")
            )
        })?;
    }
    for plugin in config.plugins_with_options() {
        if !unit.requested_plugins().iter().any(|id| id == plugin) {
            tracing::warn!(plugin, "Ignoring options for a plugin that is not attached");
        }
    }

    let mut frontend = Frontend::new(config.module_name.clone(), storage);
    frontend.resolve_all().context("Declaration resolution failed")?;
    let program = frontend.lower().context("Lowering failed")?;

    if args.emit_ir {
        print!("{}", program.module().pretty_print());
    }

    if let Some(target) = args.call {
        let (class_path, method) = target
            .rsplit_once('.')
            .ok_or_else(|| anyhow!("Expected CLASS.METHOD, got '{}'", target))?;
        let class = ClassId::parse(class_path)
            .ok_or_else(|| anyhow!("Expected CLASS.METHOD, got '{}'", target))?;

        let mut interp = Interpreter::new(&program);
        let obj = interp
            .construct(&class)
            .with_context(|| format!("Failed to construct '{}'", class))?;
        let value = interp
            .call_method(obj, &Name::new(method), Vec::new())
            .with_context(|| format!("Failed to call '{}'", target))?;
        println!("{}", value);
    }

    Ok(())
}
