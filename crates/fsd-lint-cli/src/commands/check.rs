//! Check command implementation.

use anyhow::{Context, Result};
use fsd_lint::{
    apply_fixes, Finding, FsdConfig, FsdRuleEngine, LanguageExtractor, LintReport,
    TypeScriptExtractor,
};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Flags of the `check` subcommand.
pub struct CheckOptions {
    pub format: OutputFormat,
    pub fix: bool,
    pub exclude: Vec<String>,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = load_config(source)?;
    config.validate().context("Config validation failed")?;

    let engine = FsdRuleEngine::new(&config);
    let extractors: Vec<Box<dyn LanguageExtractor>> = vec![
        Box::new(TypeScriptExtractor::new()),
        Box::new(TypeScriptExtractor::tsx()),
    ];

    let root = if config.root.is_absolute() {
        config.root.clone()
    } else {
        path.join(&config.root)
    };
    // Layer detection looks for the source root inside the module path.
    let root = root
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", root.display()))?;

    let mut exclude = config.exclude.clone();
    exclude.extend(options.exclude.iter().cloned());

    let files = discover_files(&root, &exclude, &extractors)?;

    tracing::info!("Analyzing {} files", files.len());

    let mut report = LintReport::new();

    for file_path in &files {
        let Some(extractor) = extractor_for(file_path, &extractors) else {
            continue;
        };

        let text = std::fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;

        let rel = file_path
            .strip_prefix(&root)
            .unwrap_or(file_path)
            .to_path_buf();
        let module_path = file_path.to_string_lossy();

        let mut findings = check_source(&engine, extractor, &module_path, &rel, &text);

        if options.fix {
            let edits: Vec<_> = findings.iter().filter_map(Finding::edit).collect();
            if !edits.is_empty() {
                let (fixed, applied) = apply_fixes(&text, edits);
                std::fs::write(file_path, &fixed)
                    .with_context(|| format!("Failed to write {}", file_path.display()))?;
                tracing::debug!("{}: applied {applied} fix(es)", rel.display());
                report.fixes_applied += applied;
                findings = check_source(&engine, extractor, &module_path, &rel, &fixed);
            }
        }

        report.findings.extend(findings);
        report.files_checked += 1;
    }

    report.sort();

    super::output::print(&report, options.format)?;

    if report.has_findings() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<FsdConfig> {
    match source {
        ConfigSource::Default => {
            tracing::debug!("No config file found, using defaults");
            Ok(FsdConfig::default())
        }
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            FsdConfig::from_file(p).with_context(|| format!("Failed to load {}", p.display()))
        }
    }
}

fn check_source(
    engine: &FsdRuleEngine,
    extractor: &dyn LanguageExtractor,
    module_path: &str,
    rel: &Path,
    text: &str,
) -> Vec<Finding> {
    let mut analysis = extractor.analyze(text);
    analysis.file_path = rel.to_path_buf();
    engine
        .check(module_path, &analysis)
        .iter()
        .map(|record| Finding::from_record(rel.to_path_buf(), record))
        .collect()
}

fn dotted_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

fn extractor_for<'a>(
    path: &Path,
    extractors: &'a [Box<dyn LanguageExtractor>],
) -> Option<&'a dyn LanguageExtractor> {
    let ext = dotted_extension(path);
    extractors
        .iter()
        .find(|e| e.extensions().contains(&ext.as_str()))
        .map(|e| &**e)
}

fn is_excluded(rel: &str, exclude: &[String]) -> bool {
    exclude.iter().any(|pattern| {
        let clean = pattern.replace("**/", "").replace("/**", "");
        !clean.is_empty() && rel.contains(&clean)
    })
}

fn discover_files(
    root: &Path,
    exclude: &[String],
    extractors: &[Box<dyn LanguageExtractor>],
) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || extractor_for(path, extractors).is_none() {
            continue;
        }

        let rel_str = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
        if is_excluded(&rel_str, exclude) {
            tracing::debug!("{rel_str}: excluded");
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn extractors() -> Vec<Box<dyn LanguageExtractor>> {
        vec![
            Box::new(TypeScriptExtractor::new()),
            Box::new(TypeScriptExtractor::tsx()),
        ]
    }

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn exclude_patterns_strip_globs() {
        let exclude = vec!["**/node_modules/**".to_owned()];
        assert!(is_excluded("web/node_modules/react/index.js", &exclude));
        assert!(!is_excluded("web/src/app/index.ts", &exclude));
        assert!(!is_excluded("anything", &["**/".to_owned()]));
    }

    #[test]
    fn discovers_only_supported_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/app/index.ts", "");
        write(tmp.path(), "src/shared/ui/Button.tsx", "");
        write(tmp.path(), "src/shared/ui/button.css", "");
        write(tmp.path(), "src/generated/api.ts", "");

        let files = discover_files(tmp.path(), &["**/generated/**".to_owned()], &extractors())
            .unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("src/app/index.ts"),
                PathBuf::from("src/shared/ui/Button.tsx"),
            ]
        );
    }

    #[test]
    fn tsx_grammar_serves_jsx_files() {
        let ext = extractors();
        let found = extractor_for(Path::new("src/app/App.jsx"), &ext).unwrap();
        assert_eq!(found.language_id(), "tsx");
        let found = extractor_for(Path::new("src/app/index.ts"), &ext).unwrap();
        assert_eq!(found.language_id(), "typescript");
        assert!(extractor_for(Path::new("README.md"), &ext).is_none());
    }

    #[test]
    fn check_source_anchors_findings() {
        let engine = FsdRuleEngine::new(&FsdConfig::default());
        let extractor = TypeScriptExtractor::new();
        let text = "import { a } from '@entities/test/file2';\n";
        let findings = check_source(
            &engine,
            &extractor,
            "/web/src/entities/test/ui/file1.ts",
            Path::new("src/entities/test/ui/file1.ts"),
            text,
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, "FSD004");
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[0].column, 19);
        assert_eq!(findings[0].fix.as_deref(), Some("'../file2'"));

        let (fixed, applied) = apply_fixes(text, findings.iter().filter_map(Finding::edit).collect());
        assert_eq!(applied, 1);
        assert_eq!(fixed, "import { a } from '../file2';\n");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config(&ConfigSource::Explicit(PathBuf::from("/nonexistent/fsd-lint.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
