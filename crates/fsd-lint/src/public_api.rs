//! Public API boundary between slices.

use crate::config::FsdConfig;
use crate::layer::ModuleLocation;
use crate::paths::strip_extension;
use crate::specifier::ImportTarget;

/// Requires cross-slice imports to go through the slice's entry point.
#[derive(Debug, Clone)]
pub struct PublicApiGuard {
    entry_point: String,
    extensions: Vec<String>,
}

impl PublicApiGuard {
    /// Build the guard from config.
    #[must_use]
    pub fn new(config: &FsdConfig) -> Self {
        Self {
            entry_point: config.entry_point.clone(),
            extensions: config.extensions.clone(),
        }
    }

    /// Does `target` address the slice entry point?
    ///
    /// True for the slice root itself and for any path whose final segment,
    /// extension stripped, is the entry-point name.
    #[must_use]
    pub fn is_entry_point(&self, target: &ImportTarget) -> bool {
        target
            .path_after_slice
            .last()
            .map_or(true, |last| strip_extension(last, &self.extensions) == self.entry_point)
    }

    /// Does the import from `current` respect the target slice's public API?
    ///
    /// A module may reach any file of its own slice. Anything else must go
    /// through the entry point.
    #[must_use]
    pub fn is_public_api(&self, target: &ImportTarget, current: &ModuleLocation) -> bool {
        target.is_within(current) || self.is_entry_point(target)
    }
}
