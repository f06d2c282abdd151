//! Mylime CLI - resolves configuration, sets up logging, then runs a subcommand.

use clap::{CommandFactory, Parser};
use mylime::cli::{Cli, Commands, ConfigCommands};
use mylime::commands::{self, CommandResult};
use mylime::config::{EffectiveConfig, ResolveInputs, announce_config_file, resolve};
use mylime::logging::{self, initialize_logging};
use std::io;
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), mylime::Error> {
    let inputs = ResolveInputs::from_process(cli.flag_overrides(), cli.config.clone());
    let config = resolve(&inputs)?;
    announce_config_file(&config.config_file, &mut io::stderr())?;

    match initialize_logging(&config) {
        Some(logger) => logger.scope(|| {
            logging::log_effective_config(&config);
            run_command(cli.command, &config)
        }),
        None => run_command(cli.command, &config),
    }
}

fn run_command(command: Option<Commands>, config: &EffectiveConfig) -> Result<(), mylime::Error> {
    match command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show { json } => {
                output(&commands::config_show(config), json);
            }
        },
        None => {
            Cli::command().print_long_help()?;
        }
    }
    Ok(())
}

fn output<T: CommandResult>(result: &T, json: bool) {
    if json {
        println!("{}", result.to_json());
    } else {
        println!("{}", result.to_human());
    }
}
