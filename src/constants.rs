// src/constants.rs

/// The name of the fence home directory under the user's home (`~/.fence`).
pub const FENCE_DIR: &str = ".fence";

/// The name of the directory holding all fenced environments (inside the fence home).
pub const VIRTUALENVS_DIR: &str = "virtualenvs";

/// The name of the plugin configuration file (inside the fence home).
pub const CONFIG_FILENAME: &str = "fence.conf";

/// The requirements manifest looked for in the project directory.
pub const REQUIREMENTS_FILENAME: &str = "requirements.txt";

/// The environment-creation executable invoked to build new environments.
pub const VIRTUALENV_BIN: &str = "virtualenv";

/// Separator used between the project basename and the ancestor initials of a
/// derived environment key, and between the initials themselves.
pub const KEY_SEPARATOR: char = '.';

/// Separator between the environment key body and the interpreter version tag.
pub const VERSION_SEPARATOR: char = '-';
