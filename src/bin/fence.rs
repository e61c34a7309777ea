// src/bin/fence.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use fence::cli::{Cli, handlers};

// --- Command Definition and Registry ---

/// Defines a command, its aliases, and its handler function. The handler
/// signature is kept consistent across all commands: each handler owns its
/// own argument parsing.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all commands. Adding a command means
/// adding an entry to this static array.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "activate",
        aliases: &["a"],
        handler: handlers::activate::handle,
    },
    CommandDefinition {
        name: "create",
        aliases: &["c"],
        handler: handlers::create::handle,
    },
    CommandDefinition {
        name: "erase",
        aliases: &["e"],
        handler: handlers::erase::handle,
    },
    CommandDefinition {
        name: "nuke",
        aliases: &[],
        handler: handlers::nuke::handle,
    },
    CommandDefinition {
        name: "update",
        aliases: &["up"],
        handler: handlers::update::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

fn main() {
    if let Err(e) = run_cli(Cli::parse()) {
        // Argument errors (and `--help` on a subcommand) already know how to
        // present themselves; let clap print them with its own exit code.
        if let Some(clap_error) = e.downcast_ref::<clap::Error>() {
            clap_error.exit();
        }

        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Routes the raw argument vector: the first token selects a command, and
/// everything else (including an unrecognized or absent first token) goes to
/// the default `activate` handler, which is what makes bare `fence` print
/// the activation script path.
fn run_cli(cli: Cli) -> Result<()> {
    let mut args = cli.args;

    match args.first().map(String::as_str) {
        None => return handlers::activate::handle(Vec::new()),
        Some("help" | "--help" | "-h") => {
            Cli::command().print_long_help()?;
            return Ok(());
        }
        Some("--version" | "-V") => {
            print!("{}", Cli::command().render_version());
            return Ok(());
        }
        Some(_) => {}
    }

    if let Some(command) = args.first().and_then(|first| find_command(first)) {
        args.remove(0);
        (command.handler)(args)
    } else {
        handlers::activate::handle(args)
    }
}
