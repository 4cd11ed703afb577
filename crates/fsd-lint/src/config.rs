//! TOML configuration for Feature-Sliced Design import rules.
//!
//! The file carries an `[analyzer]` section (what to scan), an `[fsd]`
//! section (source root, alias prefix, entry point), the `[[layers]]` policy
//! table and an optional `[aliases]` map. Every section is optional; an empty
//! file yields the default seven-layer hierarchy.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Top-level fsd-lint configuration.
///
/// Built once per run and never mutated afterwards; every engine component
/// reads from it at construction time.
#[derive(Debug, Clone)]
pub struct FsdConfig {
    /// Project root directory scanned by the CLI.
    pub root: PathBuf,

    /// Path fragments to exclude from scanning.
    pub exclude: Vec<String>,

    /// Marker locating the tracked source tree inside a module path.
    pub src_root: String,

    /// Token every alias specifier starts with (e.g. `@`).
    pub alias_prefix: String,

    /// Name of the file a slice exposes to the outside (without extension).
    pub entry_point: String,

    /// Ordered layer policy table, topmost layer first.
    pub layers: Vec<LayerRule>,

    /// Layers that have no slices.
    pub non_sliceable: Vec<String>,

    /// Conventional segment names. Informational only.
    pub segments: Vec<String>,

    /// Alias token -> layer name.
    pub aliases: BTreeMap<String, String>,

    /// Source extensions stripped from generated specifiers.
    pub extensions: Vec<String>,

    /// Emit `unknownLayer` for alias-prefixed specifiers that match no alias.
    pub report_unknown_layers: bool,
}

/// One row of the layer policy table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerRule {
    /// Layer name (e.g. `"features"`).
    pub name: String,
    /// Layers this layer may import from through an alias.
    #[serde(default)]
    pub allowed: Vec<String>,
    /// Human-readable explanation attached to `invalidImport`.
    #[serde(default)]
    pub message: String,
}

impl LayerRule {
    fn new(name: &str, allowed: &[&str], message: &str) -> Self {
        Self {
            name: name.to_owned(),
            allowed: allowed.iter().map(|s| (*s).to_owned()).collect(),
            message: message.to_owned(),
        }
    }
}

/// Default seven-layer strict hierarchy.
///
/// Each layer may import from the layers strictly below it; `shared` may
/// only import from itself.
#[must_use]
pub fn default_layers() -> Vec<LayerRule> {
    vec![
        LayerRule::new(
            "app",
            &["processes", "pages", "widgets", "features", "entities", "shared"],
            "App layer can import from processes, pages, widgets, features, entities, shared",
        ),
        LayerRule::new(
            "processes",
            &["pages", "widgets", "features", "entities", "shared"],
            "Processes layer can import from pages, widgets, features, entities, shared",
        ),
        LayerRule::new(
            "pages",
            &["widgets", "features", "entities", "shared"],
            "Pages layer can import from widgets, features, entities, shared",
        ),
        LayerRule::new(
            "widgets",
            &["features", "entities", "shared"],
            "Widgets layer can import from features, entities, shared",
        ),
        LayerRule::new(
            "features",
            &["entities", "shared"],
            "Features layer can import from entities, shared",
        ),
        LayerRule::new(
            "entities",
            &["shared"],
            "Entities layer can import from shared",
        ),
        LayerRule::new(
            "shared",
            &["shared"],
            "Shared layer can only import from shared layer",
        ),
    ]
}

/// Identity alias map: `{prefix}{layer}` -> `layer` for every layer.
#[must_use]
pub fn default_aliases(prefix: &str, layers: &[LayerRule]) -> BTreeMap<String, String> {
    layers
        .iter()
        .map(|l| (format!("{prefix}{}", l.name), l.name.clone()))
        .collect()
}

/// Topmost and bottommost layer of the table.
fn default_non_sliceable(layers: &[LayerRule]) -> Vec<String> {
    let mut names: Vec<String> = layers
        .first()
        .into_iter()
        .chain(layers.last())
        .map(|l| l.name.clone())
        .collect();
    names.dedup();
    names
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_src_root() -> String {
    "/src/".to_owned()
}

fn default_alias_prefix() -> String {
    "@".to_owned()
}

fn default_entry_point() -> String {
    "index".to_owned()
}

fn default_segments() -> Vec<String> {
    ["ui", "model", "lib", "api", "config", "types"]
        .iter()
        .map(|s| (*s).to_owned())
        .collect()
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx"]
        .iter()
        .map(|s| (*s).to_owned())
        .collect()
}

impl Default for FsdConfig {
    fn default() -> Self {
        let layers = default_layers();
        let alias_prefix = default_alias_prefix();
        Self {
            root: default_root(),
            exclude: Vec::new(),
            src_root: default_src_root(),
            aliases: default_aliases(&alias_prefix, &layers),
            non_sliceable: default_non_sliceable(&layers),
            alias_prefix,
            entry_point: default_entry_point(),
            layers,
            segments: default_segments(),
            extensions: default_extensions(),
            report_unknown_layers: false,
        }
    }
}

/// Errors when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML.
    #[error("invalid config: {message}")]
    Parse {
        /// Parse error detail.
        message: String,
    },
    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    Validation(String),
}

impl FsdConfig {
    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct RawConfig {
            #[serde(default)]
            analyzer: AnalyzerSection,
            #[serde(default)]
            fsd: FsdSection,
            layers: Option<Vec<LayerRule>>,
            aliases: Option<BTreeMap<String, String>>,
        }

        #[derive(Deserialize)]
        struct AnalyzerSection {
            #[serde(default = "default_root")]
            root: PathBuf,
            #[serde(default)]
            exclude: Vec<String>,
        }

        impl Default for AnalyzerSection {
            fn default() -> Self {
                Self {
                    root: default_root(),
                    exclude: Vec::new(),
                }
            }
        }

        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct FsdSection {
            #[serde(default = "default_src_root")]
            src_root: String,
            #[serde(default = "default_alias_prefix")]
            alias_prefix: String,
            #[serde(default = "default_entry_point")]
            entry_point: String,
            non_sliceable: Option<Vec<String>>,
            #[serde(default = "default_segments")]
            segments: Vec<String>,
            #[serde(default = "default_extensions")]
            extensions: Vec<String>,
            #[serde(default)]
            report_unknown_layers: bool,
        }

        impl Default for FsdSection {
            fn default() -> Self {
                Self {
                    src_root: default_src_root(),
                    alias_prefix: default_alias_prefix(),
                    entry_point: default_entry_point(),
                    non_sliceable: None,
                    segments: default_segments(),
                    extensions: default_extensions(),
                    report_unknown_layers: false,
                }
            }
        }

        let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

        let layers = raw.layers.unwrap_or_else(default_layers);
        let fsd = raw.fsd;
        let aliases = raw
            .aliases
            .unwrap_or_else(|| default_aliases(&fsd.alias_prefix, &layers));
        let non_sliceable = fsd
            .non_sliceable
            .unwrap_or_else(|| default_non_sliceable(&layers));

        Ok(Self {
            root: raw.analyzer.root,
            exclude: raw.analyzer.exclude,
            src_root: fsd.src_root,
            alias_prefix: fsd.alias_prefix,
            entry_point: fsd.entry_point,
            layers,
            non_sliceable,
            segments: fsd.segments,
            aliases,
            extensions: fsd.extensions,
            report_unknown_layers: fsd.report_unknown_layers,
        })
    }

    /// Names of all configured layers, in table order.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.name.as_str())
    }

    /// Validate config consistency.
    ///
    /// The engine itself never calls this: a table that passes validation
    /// can still encode a hierarchy the caller did not intend.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.src_root.trim_matches(['/', '\\']).is_empty() {
            return Err(ConfigError::Validation("fsd.src_root is empty".into()));
        }
        if self.alias_prefix.is_empty() {
            return Err(ConfigError::Validation("fsd.alias_prefix is empty".into()));
        }
        if self.entry_point.is_empty() {
            return Err(ConfigError::Validation("fsd.entry_point is empty".into()));
        }

        let mut layer_names: HashSet<&str> = HashSet::new();
        for l in &self.layers {
            if l.name.is_empty() || l.name.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "layers: invalid layer name '{}'",
                    l.name
                )));
            }
            if !layer_names.insert(l.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "layers: duplicate layer '{}'",
                    l.name
                )));
            }
        }

        for l in &self.layers {
            for dep in &l.allowed {
                if !layer_names.contains(dep.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "layers.{}: unknown allowed layer '{dep}'",
                        l.name
                    )));
                }
            }
        }

        for name in &self.non_sliceable {
            if !layer_names.contains(name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "fsd.non_sliceable: unknown layer '{name}'"
                )));
            }
        }

        for (alias, layer) in &self.aliases {
            if !alias.starts_with(&self.alias_prefix) {
                return Err(ConfigError::Validation(format!(
                    "aliases.{alias}: does not start with alias prefix '{}'",
                    self.alias_prefix
                )));
            }
            if !layer_names.contains(layer.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "aliases.{alias}: unknown layer '{layer}'"
                )));
            }
        }

        Ok(())
    }
}
