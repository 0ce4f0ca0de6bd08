//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers which format what the context resolves.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use tagver_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // No command provided - show help
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        return handlers::completions::execute(shell);
    }

    // Bootstrap the CLI context (composition root)
    let config = CliConfig::from_args(&cli.sources, &cli.policy)?;
    let ctx = bootstrap(config);

    match command {
        Commands::Resolve { json } => handlers::resolve::execute(&ctx, json),
        Commands::Explain => handlers::explain::execute(&ctx),
        Commands::BuildNumber => handlers::build_number::execute(&ctx),
        Commands::ArtifactName {
            app_id,
            build_type,
            extension,
        } => handlers::artifact::execute(&ctx, &app_id, build_type, &extension),
        Commands::Fields { build_type } => handlers::fields::execute(&ctx, build_type),
        // Needs no resolution inputs; answered above
        Commands::Completions { shell } => handlers::completions::execute(shell),
    }
}
