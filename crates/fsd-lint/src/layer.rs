//! Layer resolution: maps module paths to (layer, slice) coordinates.

use crate::config::FsdConfig;
use crate::paths::{normalize_separators, strip_extension};

/// Where a module sits in the layer/slice hierarchy.
///
/// `slice` is `None` for non-sliceable layers, and for relative targets that
/// stop at a sliceable layer's own directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleLocation {
    /// Layer name.
    pub layer: String,
    /// Slice name, absent for non-sliceable layers.
    pub slice: Option<String>,
}

impl ModuleLocation {
    /// Location inside a sliceable layer.
    #[must_use]
    pub fn sliced(layer: impl Into<String>, slice: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            slice: Some(slice.into()),
        }
    }

    /// Location inside a non-sliceable layer.
    #[must_use]
    pub fn unsliced(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            slice: None,
        }
    }
}

/// Decomposes absolute module paths relative to the configured source root.
///
/// Resolution is purely lexical: the first occurrence of the source-root
/// marker anchors the path, the next segment names the layer and, for
/// sliceable layers, the one after that names the slice.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Normalized marker, always `/`-delimited on both ends.
    src_root: String,
    layers: Vec<String>,
    non_sliceable: Vec<String>,
    extensions: Vec<String>,
}

/// A module path split at the source root.
struct Anchored<'a> {
    /// Everything up to and including the source-root marker.
    prefix: &'a str,
    layer: &'a str,
    slice: Option<&'a str>,
}

impl PathResolver {
    /// Build a resolver from config.
    #[must_use]
    pub fn new(config: &FsdConfig) -> Self {
        Self {
            src_root: normalize_src_root(&config.src_root),
            layers: config.layer_names().map(str::to_owned).collect(),
            non_sliceable: config.non_sliceable.clone(),
            extensions: config.extensions.clone(),
        }
    }

    /// The normalized source-root marker.
    #[must_use]
    pub fn src_root(&self) -> &str {
        &self.src_root
    }

    /// Is `name` one of the configured layers?
    #[must_use]
    pub fn is_layer(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l == name)
    }

    /// Does `layer` have slices?
    #[must_use]
    pub fn is_sliceable(&self, layer: &str) -> bool {
        !self.non_sliceable.iter().any(|l| l == layer)
    }

    /// Which layer and slice does this module path belong to?
    ///
    /// Returns `None` when the path lies outside the source root, names an
    /// unknown layer, or stops before the slice of a sliceable layer.
    #[must_use]
    pub fn decompose(&self, path: &str) -> Option<ModuleLocation> {
        let normalized = normalize_separators(path);
        let anchored = self.anchor(&normalized, true)?;
        Some(ModuleLocation {
            layer: anchored.layer.to_owned(),
            slice: anchored.slice.map(str::to_owned),
        })
    }

    /// Like [`decompose`](Self::decompose), for the resolved target of a
    /// relative import.
    ///
    /// A path naming a sliceable layer's directory (`/src/entities`) still
    /// resolves to that layer, with no slice. `None` is left for paths
    /// outside the source root and unknown layers.
    #[must_use]
    pub fn decompose_target(&self, path: &str) -> Option<ModuleLocation> {
        let normalized = normalize_separators(path);
        let anchored = self.anchor(&normalized, false)?;
        Some(ModuleLocation {
            layer: anchored.layer.to_owned(),
            slice: anchored.slice.map(str::to_owned),
        })
    }

    /// Directory of the slice containing `path`, e.g. `/web/src/entities/user`.
    ///
    /// `None` for non-sliceable layers and for paths `decompose` rejects.
    #[must_use]
    pub fn slice_root(&self, path: &str) -> Option<String> {
        let normalized = normalize_separators(path);
        let anchored = self.anchor(&normalized, true)?;
        let slice = anchored.slice?;
        Some(format!("{}{}/{slice}", anchored.prefix, anchored.layer))
    }

    fn anchor<'a>(&self, normalized: &'a str, require_slice: bool) -> Option<Anchored<'a>> {
        let start = normalized.find(&self.src_root)? + self.src_root.len();
        let prefix = &normalized[..start];
        let mut parts = normalized[start..].split('/');

        let layer = parts.next().filter(|l| self.is_layer(l))?;
        if !self.is_sliceable(layer) {
            return Some(Anchored {
                prefix,
                layer,
                slice: None,
            });
        }

        let Some(slice) = parts.next().filter(|s| !s.is_empty()) else {
            return if require_slice {
                None
            } else {
                Some(Anchored {
                    prefix,
                    layer,
                    slice: None,
                })
            };
        };
        // A file placed directly in the layer directory is its own slice.
        let slice = if parts.next().is_none() {
            strip_extension(slice, &self.extensions)
        } else {
            slice
        };

        Some(Anchored {
            prefix,
            layer,
            slice: Some(slice),
        })
    }
}

/// `src`, `/src`, `src/` and `/src/` all become `/src/`.
fn normalize_src_root(raw: &str) -> String {
    let normalized = normalize_separators(raw);
    let trimmed = normalized.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{trimmed}/")
    }
}
