// src/core/paths.rs

use crate::constants::{
    CONFIG_FILENAME, FENCE_DIR, KEY_SEPARATOR, VERSION_SEPARATOR, VIRTUALENVS_DIR,
};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find the user home directory.")]
    HomeDirNotFound,
    #[error("Could not create fence directory at '{path}': {source}")]
    FenceDirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Project path '{0}' has no base name to derive an environment key from.")]
    NoBaseName(String),
}

/// The on-disk layout of one invocation: where the fence home lives and,
/// under it, where environments and configuration are kept.
///
/// Constructed once per run and threaded through explicitly; there is no
/// process-global state behind it.
#[derive(Debug, Clone)]
pub struct FenceLayout {
    root: PathBuf,
}

impl FenceLayout {
    /// Resolves the fence home (`~/.fence` unless overridden) and ensures the
    /// directory exists on disk.
    pub fn new(root_override: Option<PathBuf>) -> Result<Self, PathError> {
        let root = match root_override {
            Some(root) => root,
            None => dirs::home_dir()
                .ok_or(PathError::HomeDirNotFound)?
                .join(FENCE_DIR),
        };
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| PathError::FenceDirCreation {
                path: root.display().to_string(),
                source: e,
            })?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory holding every fenced environment.
    pub fn venv_root(&self) -> PathBuf {
        self.root.join(VIRTUALENVS_DIR)
    }

    /// The default plugin configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILENAME)
    }

    /// The environment directory this layout assigns to `project_dir` for the
    /// given interpreter version.
    pub fn venv_dir_for(&self, project_dir: &Path, version_tag: &str) -> Result<PathBuf, PathError> {
        Ok(self.venv_root().join(environment_key(project_dir, version_tag)?))
    }
}

/// Derives the stable environment key for a project directory.
///
/// A project one level below the filesystem root keys on its basename alone.
/// Anything deeper gets a disambiguation suffix built from the first
/// character of each ancestor of the symlink-resolved real path, nearest
/// ancestor first, plus the interpreter version tag:
/// `/home/user/projects/app` with Python 3.12 becomes `app.p.u.h-3.12`.
///
/// Referentially transparent: equivalent paths reached through symlinks or
/// separator variants resolve to the same key. Two projects whose ancestor
/// chains happen to share initials collide; that ambiguity is a known
/// limitation of the scheme and is not guarded against.
pub fn environment_key(project_dir: &Path, version_tag: &str) -> Result<String, PathError> {
    let base_name = project_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PathError::NoBaseName(project_dir.display().to_string()))?;

    // Directly under the filesystem root there are no ancestors to
    // disambiguate from, so the basename stands on its own.
    match project_dir.parent() {
        Some(parent) if parent.parent().is_none() => return Ok(base_name),
        Some(_) => {}
        None => return Err(PathError::NoBaseName(project_dir.display().to_string())),
    }

    // The real path matters here: the same project reached through a symlink
    // or a mixed-separator spelling must land on the same key. Paths that do
    // not exist yet are keyed as given.
    let real = dunce::canonicalize(project_dir).unwrap_or_else(|_| project_dir.to_path_buf());

    let mut ancestors: Vec<String> = real
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|c| match c {
                    Component::Normal(name) => {
                        name.to_string_lossy().chars().next().map(String::from)
                    }
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    ancestors.reverse();
    let suffix = ancestors.join(&KEY_SEPARATOR.to_string());

    Ok(format!(
        "{base_name}{KEY_SEPARATOR}{suffix}{VERSION_SEPARATOR}{version_tag}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_for_project_directly_under_root_is_basename_alone() {
        let key = environment_key(Path::new("/app"), "3.12").unwrap();
        assert_eq!(key, "app");
    }

    #[test]
    fn key_abbreviates_ancestors_nearest_first() {
        let key = environment_key(Path::new("/home/user/projects/app"), "3.12").unwrap();
        assert_eq!(key, "app.p.u.h-3.12");
    }

    #[test]
    fn key_is_deterministic() {
        let dir = Path::new("/srv/builds/nightly/widget");
        let first = environment_key(dir, "3.11").unwrap();
        let second = environment_key(dir, "3.11").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn key_changes_with_interpreter_version() {
        let dir = Path::new("/home/user/projects/app");
        let old = environment_key(dir, "3.11").unwrap();
        let new = environment_key(dir, "3.12").unwrap();
        assert_ne!(old, new);
    }

    #[test]
    fn key_distinguishes_differently_initialed_ancestries() {
        let a = environment_key(Path::new("/home/user/projects/app"), "3.12").unwrap();
        let b = environment_key(Path::new("/var/lib/checkouts/app"), "3.12").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn key_for_missing_path_still_resolves() {
        let key = environment_key(Path::new("/no/such/path/anywhere/app"), "3.10").unwrap();
        assert_eq!(key, "app.a.p.s.n-3.10");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_and_real_paths_share_a_key() {
        let tmp = tempfile::tempdir().unwrap();
        let real = tmp.path().join("project");
        std::fs::create_dir(&real).unwrap();
        let link = tmp.path().join("alias");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let via_real = environment_key(&real, "3.12").unwrap();
        let via_link = environment_key(&link, "3.12").unwrap();
        // Only the ancestor abbreviation comes from the real path; the
        // basename is taken from the path as spelled.
        let suffix = |key: &str| key.split(KEY_SEPARATOR).skip(1).collect::<Vec<_>>().join(".");
        assert_eq!(suffix(&via_real), suffix(&via_link));
    }

    #[test]
    fn layout_creates_root_and_derives_subpaths() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("fence-home");
        let layout = FenceLayout::new(Some(root.clone())).unwrap();

        assert!(root.is_dir());
        assert_eq!(layout.venv_root(), root.join(VIRTUALENVS_DIR));
        assert_eq!(layout.config_file(), root.join(CONFIG_FILENAME));

        let venv = layout
            .venv_dir_for(Path::new("/home/user/projects/app"), "3.12")
            .unwrap();
        assert_eq!(venv, root.join(VIRTUALENVS_DIR).join("app.p.u.h-3.12"));
    }
}
