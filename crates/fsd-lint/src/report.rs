//! File-level findings, run reports and fix application.

use serde::Serialize;
use std::path::PathBuf;

use crate::extractor::ImportSite;
use crate::violation::{ViolationKind, ViolationRecord};

/// A violation anchored to a source position.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Rule code (e.g. `"FSD003"`).
    pub code: &'static str,
    /// Rule that fired.
    pub kind: ViolationKind,
    /// The offending specifier.
    pub specifier: String,
    /// Human-readable message.
    pub message: String,
    /// Quoted replacement literal, when auto-fixable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
    /// Byte range of the specifier literal.
    #[serde(skip)]
    pub span: (usize, usize),
}

impl Finding {
    /// Anchor an engine record to its import site.
    #[must_use]
    pub fn from_record(file: PathBuf, record: &ViolationRecord<&ImportSite>) -> Self {
        let site = record.reference;
        Self {
            file,
            line: site.line,
            column: site.column + 1,
            code: record.kind.code(),
            kind: record.kind,
            specifier: site.specifier.clone(),
            message: record.message.clone(),
            fix: record.fix.as_ref().map(|f| f.quoted(site.quote)),
            span: (site.start_byte, site.end_byte),
        }
    }

    /// The edit applying this finding's fix, if any.
    #[must_use]
    pub fn edit(&self) -> Option<Edit> {
        self.fix.as_ref().map(|text| Edit {
            start: self.span.0,
            end: self.span.1,
            text: text.clone(),
        })
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.kind,
            self.file.display(),
            self.line,
            self.column,
        );
        let _ = writeln!(output, "  error: {}", self.message);
        if let Some(fix) = &self.fix {
            let _ = writeln!(output, "  = help: replace with {fix}");
        }
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: [{}] {}",
            self.file.display(),
            self.line,
            self.column,
            self.code,
            self.message
        )
    }
}

/// Result of checking a set of files.
#[derive(Debug, Default, Serialize)]
pub struct LintReport {
    /// All findings.
    pub findings: Vec<Finding>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Number of fixes written back to disk.
    #[serde(skip_serializing_if = "is_zero")]
    pub fixes_applied: usize,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl LintReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if anything was found.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Number of findings carrying an automatic fix.
    #[must_use]
    pub fn fixable(&self) -> usize {
        self.findings.iter().filter(|f| f.fix.is_some()).count()
    }

    /// Counts findings of one kind.
    #[must_use]
    pub fn count(&self, kind: ViolationKind) -> usize {
        self.findings.iter().filter(|f| f.kind == kind).count()
    }

    /// Sort by file, then line. Findings on one line keep their order.
    pub fn sort(&mut self) {
        self.findings.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then(a.line.cmp(&b.line))
                .then(a.column.cmp(&b.column))
        });
    }

    /// Adds findings from another report.
    pub fn extend(&mut self, other: Self) {
        self.findings.extend(other.findings);
        self.files_checked += other.files_checked;
        self.fixes_applied += other.fixes_applied;
    }
}

/// Replacement of a byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Text to insert.
    pub text: String,
}

/// Applies `edits` to `source`, returning the new text and the number of
/// edits applied.
///
/// Edits that overlap an earlier one or fall outside `source` are skipped.
#[must_use]
pub fn apply_fixes(source: &str, mut edits: Vec<Edit>) -> (String, usize) {
    edits.sort_by_key(|e| (e.start, e.end));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut applied = 0;
    for edit in edits {
        if edit.start < cursor || edit.end < edit.start {
            continue;
        }
        let (Some(before), Some(_)) = (source.get(cursor..edit.start), source.get(edit.start..edit.end))
        else {
            continue;
        };
        output.push_str(before);
        output.push_str(&edit.text);
        cursor = edit.end;
        applied += 1;
    }
    output.push_str(source.get(cursor..).unwrap_or(""));
    (output, applied)
}
