//! # fsd-lint
//!
//! Feature-Sliced Design import conformance engine.
//!
//! A codebase is split into ordered layers (`app > processes > pages >
//! widgets > features > entities > shared`), layers into slices, slices into
//! segments. This crate decides, for every import of every module, whether
//! the import respects that structure:
//!
//! - [`PathResolver`] maps a module path to its (layer, slice) coordinates
//! - [`SpecifierResolver`] classifies specifiers as relative, alias, or external
//! - [`LayerPolicyTable`], [`RelativeImportPolicy`] and [`PublicApiGuard`] hold the rules
//! - [`AutofixGenerator`] rewrites same-slice alias imports as relative ones
//! - [`FsdRuleEngine`] drives them per specifier and yields [`ViolationRecord`]s
//! - [`FsdConfig`] loads the TOML configuration with defaults
//! - [`TypeScriptExtractor`] finds import-like constructs via Tree-sitter
//!
//! Everything is lexical: no file is read and no module resolution happens.
//!
//! ## Example
//!
//! ```
//! use fsd_lint::{FsdConfig, FsdRuleEngine, ViolationKind};
//!
//! let engine = FsdRuleEngine::new(&FsdConfig::default());
//! let records = engine.evaluate(
//!     "/web/src/entities/test/ui/file1.ts",
//!     [("@entities/test2/file2", 1), ("react", 2)],
//! );
//! let kinds: Vec<_> = records.iter().map(|r| r.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [ViolationKind::PublicApiViolation, ViolationKind::InvalidImport]
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod autofix;
pub mod config;
pub mod engine;
pub mod extractor;
pub mod layer;
pub mod paths;
pub mod policy;
pub mod public_api;
pub mod relative;
pub mod report;
pub mod specifier;
pub mod typescript;
pub mod violation;

pub use autofix::AutofixGenerator;
pub use config::{ConfigError, FsdConfig, LayerRule};
pub use engine::{evaluate, FsdRuleEngine, ModuleCheck};
pub use extractor::{FileAnalysis, ImportKind, ImportSite, ImportVisitor, LanguageExtractor};
pub use layer::{ModuleLocation, PathResolver};
pub use policy::LayerPolicyTable;
pub use public_api::PublicApiGuard;
pub use relative::RelativeImportPolicy;
pub use report::{apply_fixes, Edit, Finding, LintReport};
pub use specifier::{ImportClass, ImportTarget, SpecifierResolver};
pub use typescript::TypeScriptExtractor;
pub use violation::{Fix, Reporter, ViolationKind, ViolationRecord};
