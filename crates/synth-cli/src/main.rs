//! synthc
//!
//! Runs a compilation through the host with every discovered plugin the
//! build integration requests, then optionally dumps the lowered IR or
//! evaluates one generated method.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "synthc")]
#[command(about = "Compiler driver for the synth plugin", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a module with the synth plugin attached
    Compile {
        /// Module name
        #[arg(short, long, default_value = "main")]
        module: String,
        /// Additional plugin ids to attach
        #[arg(long = "plugin", value_name = "ID")]
        plugins: Vec<String>,
        /// Plugin option (plugin:<id>:<key>=<value>)
        #[arg(short = 'P', long = "plugin-option", value_name = "ARG")]
        plugin_options: Vec<String>,
        /// Print the lowered IR
        #[arg(long)]
        emit_ir: bool,
        /// Construct a class and call one of its methods (e.g. foo.bar.MyClass.foo)
        #[arg(long, value_name = "CLASS.METHOD")]
        call: Option<String>,
    },

    /// Print the plugin identity
    Identity {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compile {
            module,
            plugins,
            plugin_options,
            emit_ir,
            call,
        } => commands::compile::execute(commands::compile::CompileArgs {
            module,
            plugins,
            plugin_options,
            emit_ir,
            call,
        }),
        Commands::Identity { json } => commands::identity::execute(json),
    }
}
