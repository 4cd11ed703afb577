//! Violation records and the per-module reporter.

use serde::{Deserialize, Serialize};

/// The rule a violation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    /// Import crosses the layer hierarchy illegally.
    InvalidImport,
    /// Relative import leaves its slice (or, for non-sliceable layers, its layer).
    RelativeImportViolation,
    /// Cross-slice import bypasses the slice's entry point.
    PublicApiViolation,
    /// Alias import used inside the importing module's own slice.
    AbsoluteWithinSlice,
    /// Alias-prefixed specifier that maps to no layer. Opt-in.
    UnknownLayer,
}

impl ViolationKind {
    /// Every kind, in rule-code order.
    pub const ALL: [Self; 5] = [
        Self::InvalidImport,
        Self::RelativeImportViolation,
        Self::PublicApiViolation,
        Self::AbsoluteWithinSlice,
        Self::UnknownLayer,
    ];

    /// Stable rule code (e.g. `"FSD001"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidImport => "FSD001",
            Self::RelativeImportViolation => "FSD002",
            Self::PublicApiViolation => "FSD003",
            Self::AbsoluteWithinSlice => "FSD004",
            Self::UnknownLayer => "FSD005",
        }
    }

    /// Message identifier as used in reports (e.g. `"invalidImport"`).
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::InvalidImport => "invalidImport",
            Self::RelativeImportViolation => "relativeImportViolation",
            Self::PublicApiViolation => "publicApiViolation",
            Self::AbsoluteWithinSlice => "absoluteWithinSlice",
            Self::UnknownLayer => "unknownLayer",
        }
    }

    /// One-line description for `list-rules`.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::InvalidImport => "Import from a layer the current layer may not depend on",
            Self::RelativeImportViolation => "Relative import leaving the current slice",
            Self::PublicApiViolation => "Cross-slice import bypassing the slice entry point",
            Self::AbsoluteWithinSlice => "Alias import inside the same slice (auto-fixable)",
            Self::UnknownLayer => "Alias import whose layer cannot be determined (opt-in)",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Message catalog.
pub mod messages {
    /// `invalidImport` text.
    #[must_use]
    pub fn invalid_import(current: &str, imported: &str, layer_message: &str) -> String {
        format!("FSD violation: {current} cannot import from {imported}. {layer_message}")
    }

    /// `unknownLayer` text.
    #[must_use]
    pub fn unknown_layer(specifier: &str) -> String {
        format!("FSD: Cannot determine layer for import \"{specifier}\"")
    }

    /// `relativeImportViolation` text.
    #[must_use]
    pub fn relative_import(specifier: &str) -> String {
        format!(
            "FSD violation: Relative import \"{specifier}\" is only allowed within the same slice."
        )
    }

    /// `publicApiViolation` text.
    #[must_use]
    pub fn public_api(entry_point: &str) -> String {
        format!("FSD Public API violation: Cross-slice import must be through {entry_point} file.")
    }

    /// `absoluteWithinSlice` text.
    #[must_use]
    pub fn absolute_within_slice() -> String {
        "FSD Absolute import inside same slice.".to_owned()
    }
}

/// Replacement for the specifier literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// New specifier text, unquoted.
    pub replacement: String,
}

impl Fix {
    /// The replacement wrapped in `quote` on both sides.
    #[must_use]
    pub fn quoted(&self, quote: char) -> String {
        format!("{quote}{}{quote}", self.replacement)
    }
}

/// One fired rule for one specifier.
///
/// `reference` is the host's opaque handle for the import; several records
/// may carry the same one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationRecord<R> {
    /// Host reference of the offending import.
    pub reference: R,
    /// Rule that fired.
    pub kind: ViolationKind,
    /// Human-readable message.
    pub message: String,
    /// Automatic fix, if the rule offers one.
    pub fix: Option<Fix>,
}

/// Collects violation records in evaluation order.
#[derive(Debug)]
pub struct Reporter<R> {
    records: Vec<ViolationRecord<R>>,
}

impl<R> Default for Reporter<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Clone> Reporter<R> {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation without a fix.
    pub fn report(&mut self, reference: &R, kind: ViolationKind, message: String) {
        self.records.push(ViolationRecord {
            reference: reference.clone(),
            kind,
            message,
            fix: None,
        });
    }

    /// Records a violation carrying a fix.
    pub fn report_with_fix(&mut self, reference: &R, kind: ViolationKind, message: String, fix: Fix) {
        self.records.push(ViolationRecord {
            reference: reference.clone(),
            kind,
            message,
            fix: Some(fix),
        });
    }

    /// Consumes the reporter, yielding records in the order they fired.
    #[must_use]
    pub fn into_records(self) -> Vec<ViolationRecord<R>> {
        self.records
    }
}
