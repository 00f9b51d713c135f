//! Freight Matrix CLI - Main entry point

use freight_cli::commands;
use freight_cli::opener::SystemOpener;
use freight_cli::{Cli, Commands, ConfigCommand, JsonFileStore};
use freight_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use std::process;
use tracing::error;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Handle markdown help generation
    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    // Ensure a command is provided
    let Some(ref command) = cli.command else {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    // Verbose mode logs debug to the console, otherwise warnings only
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("freight-cli")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().with_env_overrides().unwrap_or(log_config);

    // The CLI works without logging, so setup errors are ignored
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(&cli, command) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
fn execute_command(cli: &Cli, command: &Commands) -> freight_cli::Result<()> {
    match command {
        Commands::Preview { input, limit } => commands::preview::run(input, *limit),

        Commands::Stats { input, json } => commands::stats::run(input, *json),

        Commands::Export { input, options } => {
            let store = JsonFileStore::resolve(cli.config.clone())?;
            commands::export::run(input, options, &store, &SystemOpener)
        },

        Commands::Config { command } => {
            let store = JsonFileStore::resolve(cli.config.clone())?;
            match command {
                ConfigCommand::Get { key } => commands::config::get(&store, key),
                ConfigCommand::Set { key, value } => commands::config::set(&store, key, value),
                ConfigCommand::Show => commands::config::show(&store),
                ConfigCommand::Reset => commands::config::reset(&store),
            }
        },
    }
}
