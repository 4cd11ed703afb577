//! Relative import policy.
//!
//! Relative specifiers may only navigate inside the importing module's own
//! slice. Non-sliceable layers have no slice, so the whole layer counts as
//! one unit there: every folder of `app` may reach every other folder of
//! `app` relatively. A target that stops at a sliceable layer's directory
//! has no slice and is never inside the importer's.

use crate::config::FsdConfig;
use crate::layer::ModuleLocation;

/// Decides whether a relative import stays inside its slice.
#[derive(Debug, Clone)]
pub struct RelativeImportPolicy {
    non_sliceable: Vec<String>,
}

impl RelativeImportPolicy {
    /// Build the policy from config.
    #[must_use]
    pub fn new(config: &FsdConfig) -> Self {
        Self {
            non_sliceable: config.non_sliceable.clone(),
        }
    }

    /// Is a relative import from `current` into `target` allowed?
    #[must_use]
    pub fn allows(&self, current: &ModuleLocation, target: &ModuleLocation) -> bool {
        let same_slice = current.layer == target.layer && current.slice == target.slice;
        let same_unsliced_layer =
            self.non_sliceable.contains(&current.layer) && current.layer == target.layer;
        same_slice || same_unsliced_layer
    }
}
