//! Configuration file lookup.
//!
//! Resolution order:
//!
//! 1. `--config` flag (explicit path, trusted as-is)
//! 2. `fsd-lint.toml` or `.fsd-lint.toml` in the checked directory or the
//!    nearest ancestor that has one
//! 3. `config.toml` in the global directory (`$FSD_LINT_CONFIG_DIR`, else
//!    `~/.fsd-lint/`)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to, or above, the checked directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; defaults apply.
    Default,
}

impl ConfigSource {
    /// The config file, unless defaults apply.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Was the config picked up from the global directory?
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["fsd-lint.toml", ".fsd-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for checking `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    // Relative check paths have no ancestors to walk otherwise.
    let project_dir = project_dir
        .canonicalize()
        .unwrap_or_else(|_| project_dir.to_path_buf());
    resolve_inner(&project_dir, explicit, global_config_dir())
}

/// `global_dir` is a parameter so tests need not touch the environment.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(project_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    let global = global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file());
    if let Some(candidate) = global {
        tracing::debug!("Found global config: {}", candidate.display());
        return ConfigSource::Global(candidate);
    }

    ConfigSource::Default
}

/// Nearest project config at or above `start`.
fn find_project_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// `$FSD_LINT_CONFIG_DIR`, else `~/.fsd-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("FSD_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".fsd-lint"))
}
