use anyhow::Context;
use clap::{ArgAction, Parser};
use fmod_gen::GeneratorOptions;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "fortmodgen")]
#[command(about = "Generate a Fortran module and a layout-compatible C/C++ header from one descriptor")]
#[command(version, disable_help_flag = true)]
struct Cli {
    /// Descriptor document (.toml, .yaml/.yml or .json)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: PathBuf,

    /// Output stem; writes <STUB>.f90 and <STUB>.h
    #[arg(short = 'o', long = "output", value_name = "STUB")]
    output: PathBuf,

    /// Define the singleton instances in the header instead of declaring them extern
    #[arg(long = "define-instance")]
    define_instance: bool,

    /// Generate per-field copy/update helpers that access the instance directly
    #[arg(long = "inline-helpers")]
    inline_helpers: bool,

    /// Do not generate the C print helpers
    #[arg(long = "no-print")]
    no_print: bool,

    /// Do not generate the C++ overlay
    #[arg(long = "no-overlay")]
    no_overlay: bool,

    /// Namespace of the C++ overlay
    #[arg(long = "namespace", value_name = "NAME", default_value = "FortMod")]
    namespace: String,

    /// Log the descriptor summary and written files
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print the validated descriptor model as JSON
    #[arg(long = "print-model")]
    print_model: bool,

    /// Print help
    #[arg(short = 'h', long = "help", short_alias = '?', action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            extern_instance: !self.define_instance,
            inline_bridge_helpers: self.inline_helpers,
            emit_print: !self.no_print,
            emit_overlay: !self.no_overlay,
            namespace: self.namespace.clone(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,fmod_loader=info,fmod_gen=info,fortmodgen=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let module = fmod_loader::load_module(&cli.input)
        .with_context(|| format!("invalid descriptor {}", cli.input.display()))?;

    if cli.print_model {
        let json = serde_json::to_string_pretty(&module).context("failed to serialize model")?;
        println!("{}", json);
    }

    let artifacts = fmod_gen::generate(&module, &cli.generator_options())
        .with_context(|| format!("failed to generate code for module {}", module.name))?;
    let (native, header) = fmod_gen::write_artifacts(&artifacts, &cli.output)?;

    info!(
        "module {}: wrote {} and {}",
        module.name,
        native.display(),
        header.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}
