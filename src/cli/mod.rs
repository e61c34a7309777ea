// src/cli/mod.rs

use clap::Parser;

pub mod args;
pub mod handlers;

const AFTER_HELP: &str = "\
Commands:
  activate (a)   Print the path to the activation script of the fenced environment [default]
  create   (c)   Create the fenced environment and apply the enabled plugins
  update   (up)  Re-apply the enabled plugins to an existing environment
  erase    (e)   Erase the fenced environment
  nuke           Remove ALL fenced environments (asks for confirmation)

Run 'fence <command> --help' for the options a command accepts.";

/// fence: deterministic per-project virtual environments.
///
/// The first argument selects a command; everything after it belongs to that
/// command. With no command, `activate` is assumed, so the parser stays
/// permissive here and each handler owns its own argument grammar.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = AFTER_HELP,
    disable_help_subcommand = true,
    disable_help_flag = true,
    disable_version_flag = true,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(trailing_var_arg = true)]
pub struct Cli {
    /// The command and its arguments.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}
