#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::Parser;
use commands::names::NameKind;
use commands::GeneratorArgs;
use jsveil_core::Config;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jsveil")]
#[command(author, version, about = "Identifier name generation for JavaScript obfuscation", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// List the identifier names generators
    Generators,

    /// Generate identifier names
    Names {
        #[command(flatten)]
        generator: GeneratorArgs,

        /// How many names to generate
        #[arg(long, short = 'n', default_value_t = 10)]
        count: usize,

        /// Which kind of name to request
        #[arg(long, value_enum, default_value_t = NameKind::Lexical)]
        kind: NameKind,

        /// Label to rename (with --kind label)
        #[arg(long)]
        label: Option<String>,

        /// Scope id for lexical requests
        #[arg(long, default_value_t = 1)]
        scope: usize,
    },

    /// Plan renames for a JSON scope description
    Plan {
        /// Scope description file (see `jsveil_core::plan::input`)
        input: PathBuf,

        #[command(flatten)]
        generator: GeneratorArgs,

        /// Rename global-scope bindings too
        #[arg(long)]
        rename_globals: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd.clone())
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Generators) => commands::generators::run(cli.json),
        Some(Commands::Names {
            generator,
            count,
            kind,
            label,
            scope,
        }) => {
            let span = tracing::info_span!("names", cmd = "names", cwd = %cwd.display());
            let _guard = span.enter();
            let options = generator.to_options(&config)?;
            commands::names::run(&options, kind, count, label.as_deref(), scope, cli.json)
        }
        Some(Commands::Plan {
            input,
            generator,
            rename_globals,
        }) => {
            let span = tracing::info_span!("plan", cmd = "plan", cwd = %cwd.display());
            let _guard = span.enter();
            let mut options = generator.to_options(&config)?;
            options.rename_globals |= rename_globals;
            commands::plan::run(&config.resolve_path(&input), &options, cli.json)
        }
    }
}
