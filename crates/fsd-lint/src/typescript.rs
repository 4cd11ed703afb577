//! TypeScript / JavaScript extractor using Tree-sitter.

use tree_sitter::{Language, Node, Parser};

use crate::extractor::{FileAnalysis, ImportKind, ImportSite, LanguageExtractor};

/// Extracts static imports, re-exports and dynamic `import()` calls.
///
/// Two grammars are involved: plain TypeScript (where `<T>x` is a type
/// assertion) and TSX, which also parses JavaScript and JSX.
pub struct TypeScriptExtractor {
    language: Language,
    language_id: &'static str,
    extensions: &'static [&'static str],
}

impl TypeScriptExtractor {
    /// Extractor for `.ts`, `.mts` and `.cts` files.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            language_id: "typescript",
            extensions: &[".ts", ".mts", ".cts"],
        }
    }

    /// Extractor for `.tsx`, `.js`, `.jsx`, `.mjs` and `.cjs` files.
    #[must_use]
    pub fn tsx() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TSX.into(),
            language_id: "tsx",
            extensions: &[".tsx", ".js", ".jsx", ".mjs", ".cjs"],
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    /// Builds a site from a `string` literal node. Template strings and
    /// anything else are rejected.
    fn site(literal: &Node<'_>, src: &[u8], kind: ImportKind) -> Option<ImportSite> {
        if literal.kind() != "string" {
            return None;
        }
        let raw = Self::text(literal, src);
        let quote = raw.chars().next()?;
        let specifier = raw.get(1..raw.len().checked_sub(1)?)?;
        let start = literal.start_position();
        Some(ImportSite {
            line: start.row + 1,
            column: start.column,
            start_byte: literal.start_byte(),
            end_byte: literal.end_byte(),
            specifier: specifier.to_owned(),
            quote,
            kind,
        })
    }

    /// `import('…')` with a single string literal argument.
    fn dynamic_import(node: &Node<'_>, src: &[u8]) -> Option<ImportSite> {
        let function = node.child_by_field_name("function")?;
        if function.kind() != "import" {
            return None;
        }
        let arguments = node.child_by_field_name("arguments")?;
        let first = arguments.named_child(0)?;
        Self::site(&first, src, ImportKind::Dynamic)
    }

    fn collect(root: Node<'_>, src: &[u8], out: &mut Vec<ImportSite>) {
        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            let mut descend = true;
            match node.kind() {
                "import_statement" => {
                    if let Some(source) = node.child_by_field_name("source") {
                        out.extend(Self::site(&source, src, ImportKind::Static));
                    }
                    descend = false;
                }
                "export_statement" => {
                    // `export const load = () => import('…')` still needs a walk.
                    if let Some(source) = node.child_by_field_name("source") {
                        out.extend(Self::site(&source, src, ImportKind::ReExport));
                        descend = false;
                    }
                }
                "call_expression" => {
                    out.extend(Self::dynamic_import(&node, src));
                }
                _ => {}
            }

            if descend && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }
}

impl Default for TypeScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for TypeScriptExtractor {
    fn language_id(&self) -> &'static str {
        self.language_id
    }

    fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    fn analyze(&self, source: &str) -> FileAnalysis {
        let mut result = FileAnalysis::default();

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&self.language) {
            tracing::warn!("{}: grammar rejected: {e}", self.language_id);
            return result;
        }

        let src = source.as_bytes();
        let Some(tree) = parser.parse(src, None) else {
            tracing::warn!("{}: parser returned no tree", self.language_id);
            return result;
        };

        Self::collect(tree.root_node(), src, &mut result.imports);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specifiers(src: &str) -> Vec<(String, ImportKind)> {
        TypeScriptExtractor::new()
            .analyze(src)
            .imports
            .into_iter()
            .map(|s| (s.specifier, s.kind))
            .collect()
    }

    #[test]
    fn extracts_static_imports() {
        let got = specifiers(
            "import React from 'react';\nimport { user } from \"@entities/user\";\nimport './styles.css';\n",
        );
        assert_eq!(
            got,
            vec![
                ("react".to_owned(), ImportKind::Static),
                ("@entities/user".to_owned(), ImportKind::Static),
                ("./styles.css".to_owned(), ImportKind::Static),
            ]
        );
    }

    #[test]
    fn extracts_type_only_import() {
        let got = specifiers("import type { User } from '@entities/user/model';\n");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].0, "@entities/user/model");
    }

    #[test]
    fn extracts_re_exports() {
        let got = specifiers("export * from './ui';\nexport { login } from './model/login';\n");
        assert_eq!(
            got,
            vec![
                ("./ui".to_owned(), ImportKind::ReExport),
                ("./model/login".to_owned(), ImportKind::ReExport),
            ]
        );
    }

    #[test]
    fn local_export_is_not_an_import() {
        assert!(specifiers("export const x = 1;\nexport { x as y };\n").is_empty());
    }

    #[test]
    fn extracts_nested_dynamic_import() {
        let got = specifiers(
            "export const load = async () => {\n  const m = await import('@entities/test/test');\n  return m;\n};\n",
        );
        assert_eq!(
            got,
            vec![("@entities/test/test".to_owned(), ImportKind::Dynamic)]
        );
    }

    #[test]
    fn skips_computed_dynamic_import() {
        assert!(specifiers("const m = await import(`./${name}`);\nimport(path);\n").is_empty());
    }

    #[test]
    fn records_position_and_quote() {
        let a = TypeScriptExtractor::new().analyze("\n  import { a } from \"@shared/api\";\n");
        let site = &a.imports[0];
        assert_eq!(site.line, 2);
        assert_eq!(site.quote, '"');
        assert_eq!(&"\n  import { a } from \"@shared/api\";\n"[site.start_byte..site.end_byte], "\"@shared/api\"");
    }

    #[test]
    fn tsx_parses_jsx() {
        let a = TypeScriptExtractor::tsx().analyze(
            "import { Button } from '@shared/ui';\nexport const App = () => <Button />;\n",
        );
        assert_eq!(a.imports.len(), 1);
        assert_eq!(a.imports[0].specifier, "@shared/ui");
    }

    #[test]
    fn empty_source() {
        assert!(specifiers("").is_empty());
    }
}
