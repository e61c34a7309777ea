// src/cli/handlers/activate.rs

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::cli::args::CommonArgs;
use crate::cli::handlers::commons;
use crate::system::shell::{self, Shell};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Prints the path to the activation script of the fenced environment."
)]
struct ActivateArgs {
    #[command(flatten)]
    common: CommonArgs,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let args = ActivateArgs::try_parse_from(&args)?;
    commons::init_logging(&args.common);

    let context = commons::resolve_project(&args.common, None)?;
    if !context.venv_dir.exists() {
        return Err(anyhow!(
            "virtual environment does not exist, create it with 'fence create'"
        ));
    }

    let script = context
        .venv_dir
        .join(shell::scripts_subdir())
        .join(Shell::detect().activate_script());

    // The calling shell's environment cannot be mutated from a child
    // process, so print the script path for the user (or their wrapper
    // function) to source.
    println!("{}", script.display());
    Ok(())
}
