// src/system/shell.rs

use std::env;
use std::path::PathBuf;

/// The shell families whose activation scripts differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    /// bash, zsh, dash, and everything else speaking POSIX `source`.
    Posix,
    Csh,
    Fish,
    Cmd,
    PowerShell,
}

impl Shell {
    /// Detects the caller's shell. On Unix the `SHELL` variable decides; on
    /// Windows a PowerShell host is recognized by the `PSModulePath` it
    /// exports, and anything else is treated as `cmd.exe`.
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            if env::var_os("PSModulePath").is_some() {
                Self::PowerShell
            } else {
                Self::Cmd
            }
        } else {
            env::var("SHELL")
                .map(|value| Self::from_shell_path(&value))
                .unwrap_or(Self::Posix)
        }
    }

    /// Classifies a `SHELL` value by its trailing executable name.
    pub fn from_shell_path(value: &str) -> Self {
        if value.ends_with("fish") {
            Self::Fish
        } else if value.ends_with("csh") {
            Self::Csh
        } else {
            Self::Posix
        }
    }

    /// The activation script the environment tool generates for this shell.
    pub fn activate_script(&self) -> &'static str {
        match self {
            Self::Posix => "activate",
            Self::Csh => "activate.csh",
            Self::Fish => "activate.fish",
            Self::Cmd => "activate.bat",
            Self::PowerShell => "activate.ps1",
        }
    }
}

/// The environment subdirectory holding executables and activation scripts.
pub fn scripts_subdir() -> &'static str {
    if cfg!(target_os = "windows") {
        "Scripts"
    } else {
        "bin"
    }
}

/// Looks an executable up on `PATH`, returning its full path. On Windows the
/// bare name is also tried with an `.exe` extension.
pub fn find_in_path(executable: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(executable);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(target_os = "windows") {
            let with_exe = dir.join(format!("{executable}.exe"));
            if with_exe.is_file() {
                return Some(with_exe);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_paths_classify_by_suffix() {
        assert_eq!(Shell::from_shell_path("/usr/bin/fish"), Shell::Fish);
        assert_eq!(Shell::from_shell_path("/bin/tcsh"), Shell::Csh);
        assert_eq!(Shell::from_shell_path("/bin/csh"), Shell::Csh);
        assert_eq!(Shell::from_shell_path("/bin/bash"), Shell::Posix);
        assert_eq!(Shell::from_shell_path("/usr/bin/zsh"), Shell::Posix);
    }

    #[test]
    fn each_shell_maps_to_its_activation_script() {
        assert_eq!(Shell::Posix.activate_script(), "activate");
        assert_eq!(Shell::Csh.activate_script(), "activate.csh");
        assert_eq!(Shell::Fish.activate_script(), "activate.fish");
        assert_eq!(Shell::Cmd.activate_script(), "activate.bat");
        assert_eq!(Shell::PowerShell.activate_script(), "activate.ps1");
    }

    #[cfg(unix)]
    #[test]
    fn scripts_live_under_bin_on_unix() {
        assert_eq!(scripts_subdir(), "bin");
    }

    #[cfg(unix)]
    #[test]
    fn find_in_path_locates_a_ubiquitous_tool() {
        // `sh` is mandated by POSIX; its presence on PATH is a safe bet.
        assert!(find_in_path("sh").is_some());
        assert!(find_in_path("definitely-not-a-real-binary-xyz").is_none());
    }
}
