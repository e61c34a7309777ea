// src/cli/args.rs

use clap::Args;

/// Options every command understands, flattened into each handler's parser.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonArgs {
    /// Use DIR as the project root instead of the current directory.
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<String>,

    /// Don't treat the project directory as a git repository.
    #[arg(short = 'p', long)]
    pub plain: bool,

    /// Use DIR as the virtualenv directory instead of the derived default.
    #[arg(short = 'D', long = "virtualenv-dir", value_name = "DIR")]
    pub virtualenv_dir: Option<String>,

    /// Use DIR as the fence home directory instead of `~/.fence`.
    #[arg(short = 'F', long = "fence-root", value_name = "DIR")]
    pub fence_root: Option<String>,

    /// Build the environment around this interpreter instead of the first
    /// `python3`/`python` found on PATH.
    #[arg(long, value_name = "PATH")]
    pub python: Option<String>,

    /// Read plugin configuration from FILE instead of `<fence-root>/fence.conf`.
    #[arg(short = 'f', long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Comma-separated list of plugins to apply; everything not listed is
    /// disabled. Defaults to all plugins.
    #[arg(short = 'P', long, value_delimiter = ',', num_args = 1..)]
    pub plugins: Vec<String>,

    /// Print debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Silence all console output.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
