//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# fsd-lint configuration
# Feature-Sliced Design import rules. Every section is optional.

[analyzer]
# Root directory to analyze (default: current directory)
root = "."

# Path fragments to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
]

[fsd]
# Marker locating the layer directories inside a file path
src_root = "/src/"
# Token every alias import starts with (e.g. "@features/auth")
alias_prefix = "@"
# File a slice exposes to other slices (without extension)
entry_point = "index"
# Layers without slices (default: first and last layer)
non_sliceable = ["app", "shared"]
extensions = ["ts", "tsx", "js", "jsx"]
# Report alias-prefixed imports that match no layer
report_unknown_layers = false

# Layer policy, topmost layer first. Omit to use the default hierarchy:
# app > processes > pages > widgets > features > entities > shared

# [[layers]]
# name = "features"
# allowed = ["entities", "shared"]
# message = "Features layer can import from entities, shared"

# Alias -> layer. Omit to derive "@<layer>" for every layer.

# [aliases]
# "@features" = "features"
"#;

const CONFIG_FILE: &str = "fsd-lint.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Adjust [fsd] to match your project layout");
    println!("  2. Run: fsd-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
