//! Rewrites absolute same-slice imports as relative ones.

use crate::config::FsdConfig;
use crate::paths::{dirname, is_relative, join, normalize_separators, relative, strip_extension};
use crate::specifier::ImportTarget;

/// Computes the relative specifier that replaces an alias import pointing
/// into the importing module's own slice.
#[derive(Debug, Clone)]
pub struct AutofixGenerator {
    entry_point: String,
    extensions: Vec<String>,
}

impl AutofixGenerator {
    /// Build the generator from config.
    #[must_use]
    pub fn new(config: &FsdConfig) -> Self {
        Self {
            entry_point: config.entry_point.clone(),
            extensions: config.extensions.clone(),
        }
    }

    /// Relative replacement for `target` as seen from `module_path`.
    ///
    /// `slice_root` is the directory of the module's own slice. A target
    /// naming only the slice is pointed at the slice entry point.
    ///
    /// ```
    /// use fsd_lint::{AutofixGenerator, FsdConfig, SpecifierResolver};
    ///
    /// let config = FsdConfig::default();
    /// let target = SpecifierResolver::new(&config)
    ///     .resolve_alias("@entities/test/file2")
    ///     .unwrap();
    /// let fix = AutofixGenerator::new(&config).replacement(
    ///     &target,
    ///     "/src/entities/test/ui/file1.ts",
    ///     "/src/entities/test",
    /// );
    /// assert_eq!(fix, "../file2");
    /// ```
    #[must_use]
    pub fn replacement(&self, target: &ImportTarget, module_path: &str, slice_root: &str) -> String {
        let module_path = normalize_separators(module_path);
        let module_dir = dirname(&module_path);

        let inside = if target.path_after_slice.is_empty() {
            self.entry_point.clone()
        } else {
            target.path_after_slice.join("/")
        };
        let imported = join(slice_root, &inside);

        let rel = relative(module_dir, &imported);
        let rel = strip_extension(&rel, &self.extensions);
        if rel.is_empty() {
            ".".to_owned()
        } else if is_relative(rel) {
            rel.to_owned()
        } else {
            format!("./{rel}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specifier::SpecifierResolver;

    fn fix(specifier: &str, module: &str, slice_root: &str) -> String {
        let config = FsdConfig::default();
        let target = SpecifierResolver::new(&config)
            .resolve_alias(specifier)
            .expect("alias");
        AutofixGenerator::new(&config).replacement(&target, module, slice_root)
    }

    #[test]
    fn sibling_file_gets_dot_slash() {
        assert_eq!(
            fix("@entities/test/file2", "/src/entities/test/file1.ts", "/src/entities/test"),
            "./file2"
        );
    }

    #[test]
    fn nested_module_climbs_up() {
        assert_eq!(
            fix("@entities/test/file2", "/src/entities/test/ui/file1.ts", "/src/entities/test"),
            "../file2"
        );
    }

    #[test]
    fn slice_root_points_at_entry_point() {
        assert_eq!(
            fix("@entities/test", "/src/entities/test/ui/component.ts", "/src/entities/test"),
            "../index"
        );
        assert_eq!(
            fix("@entities/test", "/src/entities/test/a/b/c.ts", "/src/entities/test"),
            "../../index"
        );
        assert_eq!(
            fix("@entities/test", "/src/entities/test/file.ts", "/src/entities/test"),
            "./index"
        );
    }

    #[test]
    fn extension_is_stripped() {
        assert_eq!(
            fix("@entities/test/ui/Card.tsx", "/src/entities/test/model/store.ts", "/src/entities/test"),
            "../ui/Card"
        );
    }

    #[test]
    fn descending_into_subfolder() {
        assert_eq!(
            fix("@features/auth/ui/form/Field", "/src/features/auth/index.ts", "/src/features/auth"),
            "./ui/form/Field"
        );
    }

    #[test]
    fn own_directory_becomes_dot() {
        assert_eq!(
            fix("@entities/test/ui", "/src/entities/test/ui/file1.ts", "/src/entities/test"),
            "."
        );
    }

    #[test]
    fn windows_module_path() {
        assert_eq!(
            fix("@entities/test/file2", r"C:\web\src\entities\test\ui\file1.ts", "C:/web/src/entities/test"),
            "../file2"
        );
    }
}
