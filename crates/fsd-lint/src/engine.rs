//! Import classification engine.
//!
//! Evaluates every import-like construct of a module against the relative
//! import policy, the public API boundary and the layer hierarchy,
//! producing [`ViolationRecord`]s in a fixed order.

use crate::autofix::AutofixGenerator;
use crate::config::FsdConfig;
use crate::extractor::{FileAnalysis, ImportSite, ImportVisitor};
use crate::layer::{ModuleLocation, PathResolver};
use crate::paths::{is_relative, normalize_separators};
use crate::policy::LayerPolicyTable;
use crate::public_api::PublicApiGuard;
use crate::relative::RelativeImportPolicy;
use crate::specifier::{ImportClass, ImportTarget, SpecifierResolver};
use crate::violation::{messages, Fix, Reporter, ViolationKind, ViolationRecord};

/// Evaluates Feature-Sliced Design import rules.
///
/// Immutable after construction; share one instance across threads.
#[derive(Debug, Clone)]
pub struct FsdRuleEngine {
    paths: PathResolver,
    specifiers: SpecifierResolver,
    policy: LayerPolicyTable,
    relative: RelativeImportPolicy,
    public_api: PublicApiGuard,
    autofix: AutofixGenerator,
    entry_point: String,
    report_unknown_layers: bool,
}

impl FsdRuleEngine {
    /// Create a new engine from config.
    #[must_use]
    pub fn new(config: &FsdConfig) -> Self {
        Self {
            paths: PathResolver::new(config),
            specifiers: SpecifierResolver::new(config),
            policy: LayerPolicyTable::new(config),
            relative: RelativeImportPolicy::new(config),
            public_api: PublicApiGuard::new(config),
            autofix: AutofixGenerator::new(config),
            entry_point: config.entry_point.clone(),
            report_unknown_layers: config.report_unknown_layers,
        }
    }

    /// Start checking the module at `module_path`.
    ///
    /// Returns `None` when the module lies outside the tracked source tree
    /// or in an unknown layer; such modules are skipped entirely.
    #[must_use]
    pub fn module<R: Clone>(&self, module_path: &str) -> Option<ModuleCheck<'_, R>> {
        let path = normalize_separators(module_path);
        let Some(location) = self.paths.decompose(&path) else {
            tracing::debug!("{module_path}: outside tracked source tree, skipped");
            return None;
        };
        Some(ModuleCheck {
            engine: self,
            path,
            location,
            reporter: Reporter::new(),
        })
    }

    /// Evaluate `(specifier, reference)` pairs imported by `module_path`.
    pub fn evaluate<R, I, S>(&self, module_path: &str, specifiers: I) -> Vec<ViolationRecord<R>>
    where
        R: Clone,
        I: IntoIterator<Item = (S, R)>,
        S: AsRef<str>,
    {
        let Some(mut check) = self.module(module_path) else {
            return Vec::new();
        };
        for (specifier, reference) in specifiers {
            check.on_import_like(specifier.as_ref(), reference);
        }
        check.finish()
    }

    /// Evaluate every import site of an extracted file.
    ///
    /// `module_path` is the absolute path of the file; `analysis.file_path`
    /// is typically project-relative and not used for resolution.
    #[must_use]
    pub fn check<'a>(
        &self,
        module_path: &str,
        analysis: &'a FileAnalysis,
    ) -> Vec<ViolationRecord<&'a ImportSite>> {
        let Some(mut check) = self.module(module_path) else {
            return Vec::new();
        };
        analysis.visit(&mut check);
        check.finish()
    }

    fn check_specifier<R: Clone>(
        &self,
        module_path: &str,
        current: &ModuleLocation,
        specifier: &str,
        reference: &R,
        reporter: &mut Reporter<R>,
    ) {
        let class = self.specifiers.classify(specifier, module_path, &self.paths);
        tracing::trace!("{module_path}: \"{specifier}\" classified as {class:?}");
        match class {
            ImportClass::Relative(target) => {
                if !self.relative.allows(current, &target) {
                    reporter.report(
                        reference,
                        ViolationKind::RelativeImportViolation,
                        messages::relative_import(specifier),
                    );
                }
            }
            ImportClass::Alias(target) => {
                self.check_alias(module_path, current, &target, reference, reporter);
            }
            ImportClass::External => {}
            ImportClass::Unrecognized => {
                if self.report_unknown_layers
                    && !is_relative(specifier)
                    && self.specifiers.has_alias_prefix(specifier)
                {
                    reporter.report(
                        reference,
                        ViolationKind::UnknownLayer,
                        messages::unknown_layer(specifier),
                    );
                } else {
                    tracing::debug!("{module_path}: no layer for \"{specifier}\", ignored");
                }
            }
        }
    }

    fn check_alias<R: Clone>(
        &self,
        module_path: &str,
        current: &ModuleLocation,
        target: &ImportTarget,
        reference: &R,
        reporter: &mut Reporter<R>,
    ) {
        if target.is_within(current) {
            // Sliced modules always have a slice root.
            if let Some(slice_root) = self.paths.slice_root(module_path) {
                let replacement = self.autofix.replacement(target, module_path, &slice_root);
                reporter.report_with_fix(
                    reference,
                    ViolationKind::AbsoluteWithinSlice,
                    messages::absolute_within_slice(),
                    Fix { replacement },
                );
            }
            return;
        }

        if !self.public_api.is_public_api(target, current) {
            reporter.report(
                reference,
                ViolationKind::PublicApiViolation,
                messages::public_api(&self.entry_point),
            );
        }

        if !self.policy.allows(&current.layer, &target.layer) {
            reporter.report(
                reference,
                ViolationKind::InvalidImport,
                messages::invalid_import(
                    &current.layer,
                    &target.layer,
                    &self.policy.message(&current.layer),
                ),
            );
        }
    }
}

/// Checks the imports of one located module.
///
/// Implements [`ImportVisitor`], so a host can drive it straight from its
/// own syntax walk.
#[derive(Debug)]
pub struct ModuleCheck<'e, R> {
    engine: &'e FsdRuleEngine,
    path: String,
    location: ModuleLocation,
    reporter: Reporter<R>,
}

impl<R> ModuleCheck<'_, R> {
    /// Where the checked module sits.
    #[must_use]
    pub fn location(&self) -> &ModuleLocation {
        &self.location
    }
}

impl<R: Clone> ModuleCheck<'_, R> {
    /// Records collected so far, in evaluation order.
    #[must_use]
    pub fn finish(self) -> Vec<ViolationRecord<R>> {
        self.reporter.into_records()
    }
}

impl<R: Clone> ImportVisitor<R> for ModuleCheck<'_, R> {
    fn on_import_like(&mut self, specifier: &str, reference: R) {
        self.engine.check_specifier(
            &self.path,
            &self.location,
            specifier,
            &reference,
            &mut self.reporter,
        );
    }
}

/// One-shot evaluation with a freshly built engine.
///
/// Prefer [`FsdRuleEngine`] when checking many modules with one config.
pub fn evaluate<R, I, S>(module_path: &str, specifiers: I, config: &FsdConfig) -> Vec<ViolationRecord<R>>
where
    R: Clone,
    I: IntoIterator<Item = (S, R)>,
    S: AsRef<str>,
{
    FsdRuleEngine::new(config).evaluate(module_path, specifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(module: &str, specifier: &str) -> Vec<ViolationKind> {
        let engine = FsdRuleEngine::new(&FsdConfig::default());
        engine
            .evaluate(module, [(specifier, ())])
            .into_iter()
            .map(|r| r.kind)
            .collect()
    }

    #[test]
    fn public_api_import_from_app_is_ok() {
        assert!(kinds("/src/app/index.ts", "@entities/test").is_empty());
    }

    #[test]
    fn deep_import_from_app_breaks_public_api() {
        assert_eq!(
            kinds("/src/app/index.ts", "@entities/test/test"),
            vec![ViolationKind::PublicApiViolation]
        );
    }

    #[test]
    fn same_slice_alias_gets_fix() {
        let engine = FsdRuleEngine::new(&FsdConfig::default());
        let records = engine.evaluate("/src/entities/test/file1.ts", [("@entities/test/file2", 0)]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ViolationKind::AbsoluteWithinSlice);
        assert_eq!(
            records[0].fix.as_ref().map(|f| f.replacement.as_str()),
            Some("./file2")
        );
    }

    #[test]
    fn sibling_slice_deep_import_fires_both_in_order() {
        assert_eq!(
            kinds("/src/entities/test/ui/file1.ts", "@entities/test2/file2"),
            vec![ViolationKind::PublicApiViolation, ViolationKind::InvalidImport]
        );
    }

    #[test]
    fn relative_escape_to_app() {
        assert_eq!(
            kinds("/src/entities/user/model.ts", "../../app/providers"),
            vec![ViolationKind::RelativeImportViolation]
        );
    }

    #[test]
    fn invalid_import_message_names_layers() {
        let engine = FsdRuleEngine::new(&FsdConfig::default());
        let records = engine.evaluate("/src/entities/user/model.ts", [("@features/auth", ())]);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].message,
            "FSD violation: entities cannot import from features. Entities layer can import from shared"
        );
    }

    #[test]
    fn module_outside_tree_is_skipped() {
        assert!(kinds("config/vite.config.ts", "@entities/test/deep").is_empty());
        assert!(FsdRuleEngine::new(&FsdConfig::default())
            .module::<()>("/src/lib/x.ts")
            .is_none());
    }

    #[test]
    fn unknown_layer_is_silent_by_default() {
        assert!(kinds("/src/app/index.ts", "@unknown/something").is_empty());
    }

    #[test]
    fn unknown_layer_can_be_reported() {
        let mut config = FsdConfig::default();
        config.report_unknown_layers = true;
        let engine = FsdRuleEngine::new(&config);
        let records = engine.evaluate("/src/app/index.ts", [("@unknown/something", ())]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ViolationKind::UnknownLayer);
        assert_eq!(
            records[0].message,
            "FSD: Cannot determine layer for import \"@unknown/something\""
        );
        // Relative escapes and bare packages stay silent.
        assert!(engine
            .evaluate("/src/app/index.ts", [("../../outside", ()), ("react", ())])
            .is_empty());
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logs_at(level: tracing::Level, module: &str, specifier: &str) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            FsdRuleEngine::new(&FsdConfig::default()).evaluate(module, [(specifier, ())]);
        });
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn unrecognized_specifier_logs_at_debug() {
        let out = logs_at(tracing::Level::DEBUG, "/src/app/index.ts", "@unknown/something");
        assert!(out.contains("DEBUG"), "{out}");
        assert!(out.contains("no layer for \"@unknown/something\""), "{out}");
        assert!(!out.contains("classified as"), "{out}");
    }

    #[test]
    fn dispatch_logs_at_trace() {
        let out = logs_at(tracing::Level::TRACE, "/src/app/index.ts", "@entities/user");
        assert!(out.contains("TRACE"), "{out}");
        assert!(out.contains("\"@entities/user\" classified as Alias"), "{out}");
    }

    #[test]
    fn module_check_exposes_location() {
        let engine = FsdRuleEngine::new(&FsdConfig::default());
        let check = engine.module::<()>("/src/features/auth/ui/form.tsx").expect("tracked");
        assert_eq!(check.location(), &ModuleLocation::sliced("features", "auth"));
    }

    #[test]
    fn one_shot_evaluate_matches_engine() {
        let config = FsdConfig::default();
        let records = evaluate("/src/widgets/header/index.ts", [("@pages/main", 1u32)], &config);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ViolationKind::InvalidImport);
        assert_eq!(records[0].reference, 1);
    }
}
