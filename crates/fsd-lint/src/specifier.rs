//! Import specifier classification.
//!
//! Turns the literal text of an import into layer/slice coordinates without
//! consulting the filesystem.

use crate::config::FsdConfig;
use crate::layer::{ModuleLocation, PathResolver};
use crate::paths::{dirname, is_relative, join, normalize_separators};

/// Coordinates addressed by an alias specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTarget {
    /// Layer the alias maps to.
    pub layer: String,
    /// Segment after the alias, if any.
    pub slice: Option<String>,
    /// Segments after the slice.
    pub path_after_slice: Vec<String>,
}

impl ImportTarget {
    /// Does this target point into the module's own slice?
    ///
    /// Modules in non-sliceable layers have no slice and never match.
    #[must_use]
    pub fn is_within(&self, location: &ModuleLocation) -> bool {
        location.slice.is_some() && self.layer == location.layer && self.slice == location.slice
    }
}

/// How a specifier relates to the tracked source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportClass {
    /// Relative specifier resolving into a known layer. The slice is
    /// absent when the target is the layer directory itself.
    Relative(ModuleLocation),
    /// Alias specifier mapped to a configured layer.
    Alias(ImportTarget),
    /// Neither relative nor alias-prefixed (packages, bare assets).
    External,
    /// Carries a relative or alias marker but maps to no configured layer.
    Unrecognized,
}

/// Resolves import specifiers against the alias map and source root.
#[derive(Debug, Clone)]
pub struct SpecifierResolver {
    alias_prefix: String,
    /// (alias, layer_name) sorted by alias length descending.
    aliases: Vec<(String, String)>,
}

impl SpecifierResolver {
    /// Build a resolver from config.
    #[must_use]
    pub fn new(config: &FsdConfig) -> Self {
        let mut aliases: Vec<(String, String)> = config
            .aliases
            .iter()
            .filter(|(_, layer)| config.layer_names().any(|l| l == layer.as_str()))
            .map(|(alias, layer)| (alias.clone(), layer.clone()))
            .collect();
        // Longest alias first for correct matching
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self {
            alias_prefix: config.alias_prefix.clone(),
            aliases,
        }
    }

    /// Does the specifier start with the alias prefix?
    #[must_use]
    pub fn has_alias_prefix(&self, specifier: &str) -> bool {
        specifier.starts_with(&self.alias_prefix)
    }

    /// Classify `specifier` as imported from the module at `module_path`.
    #[must_use]
    pub fn classify(
        &self,
        specifier: &str,
        module_path: &str,
        paths: &PathResolver,
    ) -> ImportClass {
        if is_relative(specifier) {
            let module_path = normalize_separators(module_path);
            let resolved = join(dirname(&module_path), specifier);
            return paths
                .decompose_target(&resolved)
                .map_or(ImportClass::Unrecognized, ImportClass::Relative);
        }

        if !self.has_alias_prefix(specifier) {
            return ImportClass::External;
        }

        self.resolve_alias(specifier)
            .map_or(ImportClass::Unrecognized, ImportClass::Alias)
    }

    /// Map an alias specifier to its target, longest alias first.
    ///
    /// An alias matches when it equals the specifier or is followed by `/`.
    #[must_use]
    pub fn resolve_alias(&self, specifier: &str) -> Option<ImportTarget> {
        let (rest, layer) = self.aliases.iter().find_map(|(alias, layer)| {
            let rest = specifier.strip_prefix(alias.as_str())?;
            if rest.is_empty() || rest.starts_with('/') {
                Some((rest, layer))
            } else {
                None
            }
        })?;

        let mut segments = rest.split('/').filter(|s| !s.is_empty());
        let slice = segments.next().map(str::to_owned);
        let path_after_slice: Vec<String> = segments.map(str::to_owned).collect();

        Some(ImportTarget {
            layer: layer.clone(),
            slice,
            path_after_slice,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(specifier: &str, module: &str) -> ImportClass {
        let config = FsdConfig::default();
        let paths = PathResolver::new(&config);
        SpecifierResolver::new(&config).classify(specifier, module, &paths)
    }

    #[test]
    fn external_package_is_external() {
        assert_eq!(classify("react", "/src/app/index.ts"), ImportClass::External);
        assert_eq!(
            classify("styles.css", "/src/app/index.ts"),
            ImportClass::External
        );
    }

    #[test]
    fn scoped_package_is_unrecognized() {
        assert_eq!(
            classify("@tanstack/react-query", "/src/app/index.ts"),
            ImportClass::Unrecognized
        );
    }

    #[test]
    fn unknown_alias_layer_is_unrecognized() {
        assert_eq!(
            classify("@unknown/something", "/src/app/index.ts"),
            ImportClass::Unrecognized
        );
    }

    #[test]
    fn alias_requires_segment_boundary() {
        assert_eq!(
            classify("@entitiesx/user", "/src/app/index.ts"),
            ImportClass::Unrecognized
        );
    }

    #[test]
    fn alias_resolves_slice_and_rest() {
        let ImportClass::Alias(target) = classify("@entities/user/model/store", "/src/app/index.ts")
        else {
            panic!("expected alias");
        };
        assert_eq!(target.layer, "entities");
        assert_eq!(target.slice.as_deref(), Some("user"));
        assert_eq!(target.path_after_slice, vec!["model", "store"]);
    }

    #[test]
    fn slice_root_and_bare_layer() {
        let config = FsdConfig::default();
        let r = SpecifierResolver::new(&config);
        let root = r.resolve_alias("@features/auth").expect("alias");
        assert_eq!(root.slice.as_deref(), Some("auth"));
        assert!(root.path_after_slice.is_empty());

        let bare_layer = r.resolve_alias("@features").expect("alias");
        assert_eq!(bare_layer.slice, None);
        assert!(bare_layer.path_after_slice.is_empty());
    }

    #[test]
    fn longest_alias_wins() {
        let mut config = FsdConfig::default();
        config.aliases.insert("@/".into(), "shared".into());
        config.aliases.insert("@/entities".into(), "entities".into());
        config.alias_prefix = "@".into();
        let r = SpecifierResolver::new(&config);
        let target = r.resolve_alias("@/entities/user").expect("alias");
        assert_eq!(target.layer, "entities");
        assert_eq!(target.slice.as_deref(), Some("user"));
    }

    #[test]
    fn alias_to_unconfigured_layer_is_dropped() {
        let mut config = FsdConfig::default();
        config.aliases.insert("@core".into(), "core".into());
        let r = SpecifierResolver::new(&config);
        assert!(r.resolve_alias("@core/x").is_none());
    }

    #[test]
    fn relative_resolves_through_path_algebra() {
        assert_eq!(
            classify("../../app/providers", "/src/entities/user/model.ts"),
            ImportClass::Relative(ModuleLocation::unsliced("app"))
        );
        assert_eq!(
            classify("./model", "/src/entities/user/ui.ts"),
            ImportClass::Relative(ModuleLocation::sliced("entities", "user"))
        );
    }

    #[test]
    fn relative_to_layer_directory_keeps_layer() {
        assert_eq!(
            classify("..", "/src/entities/user/index.ts"),
            ImportClass::Relative(ModuleLocation::unsliced("entities"))
        );
        assert_eq!(
            classify("../../widgets", "/src/features/auth/index.ts"),
            ImportClass::Relative(ModuleLocation::unsliced("widgets"))
        );
    }

    #[test]
    fn relative_out_of_tree_is_unrecognized() {
        assert_eq!(
            classify("../../../config/env", "/src/entities/user/model.ts"),
            ImportClass::Unrecognized
        );
    }

    #[test]
    fn same_slice_detection() {
        let target = ImportTarget {
            layer: "entities".into(),
            slice: Some("user".into()),
            path_after_slice: vec![],
        };
        assert!(target.is_within(&ModuleLocation::sliced("entities", "user")));
        assert!(!target.is_within(&ModuleLocation::sliced("entities", "post")));
        assert!(!target.is_within(&ModuleLocation::unsliced("entities")));
    }
}
