//! Language-agnostic extraction types and traits.
//!
//! The engine never parses source text. A host enumerates import-like
//! constructs and feeds them through [`ImportVisitor`]; `LanguageExtractor`
//! is the extension point for teaching fsd-lint a new syntax.

use std::path::PathBuf;

/// Receives every import-like construct of one module.
///
/// Static imports, re-exports and dynamic `import()` calls all arrive the
/// same way: the literal specifier plus an opaque `reference` the host uses
/// to map results back to source positions.
pub trait ImportVisitor<R> {
    /// Called once per import-like construct, in source order.
    fn on_import_like(&mut self, specifier: &str, reference: R);
}

/// Syntactic form of an import-like construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import x from '…'` or `import '…'`
    Static,
    /// `import('…')`
    Dynamic,
    /// `export … from '…'`
    ReExport,
}

/// A single import-like construct extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSite {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within line).
    pub column: usize,
    /// Byte offset of the specifier literal, opening quote included.
    pub start_byte: usize,
    /// Byte offset just past the closing quote.
    pub end_byte: usize,
    /// Specifier text without quotes.
    pub specifier: String,
    /// Quote character used in source.
    pub quote: char,
    /// Syntactic form.
    pub kind: ImportKind,
}

/// Result of analyzing a single source file.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    /// Path relative to project root.
    pub file_path: PathBuf,
    /// All import-like constructs found, in source order.
    pub imports: Vec<ImportSite>,
}

impl FileAnalysis {
    /// Replays every import site into `visitor`.
    pub fn visit<'a, V>(&'a self, visitor: &mut V)
    where
        V: ImportVisitor<&'a ImportSite>,
    {
        for site in &self.imports {
            visitor.on_import_like(&site.specifier, site);
        }
    }
}

/// Trait for language-specific extraction.
///
/// Implement this to add support for a new language. The extractor receives
/// raw source text and returns a [`FileAnalysis`].
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"typescript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".ts", ".mts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extract import-like constructs from source code.
    fn analyze(&self, source: &str) -> FileAnalysis;
}
