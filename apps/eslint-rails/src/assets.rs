//! Asset selection: which manifest entries get linted for a target path.

use crate::error::Result;
use crate::paths::is_descendant;
use regex::RegexSet;
use std::path::{Path, PathBuf};

/// File extensions treated as JavaScript sources.
pub const JAVASCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "es6"];

/// Exclusions applied when the config does not provide its own list.
pub const DEFAULT_EXCLUDES: &[&str] = &["eslint.js", "vendor", "gems", "min.js", "editorial"];

#[derive(Debug, Clone, PartialEq, Eq)]
/// A JavaScript asset selected for linting.
pub struct Asset {
    pub path: PathBuf,
    /// Path relative to the project root, used for display and write-back.
    pub relative_path: PathBuf,
}

impl Asset {
    pub fn new(path: PathBuf, project_root: &Path) -> Self {
        let relative_path = pathdiff::diff_paths(&path, project_root).unwrap_or_else(|| path.clone());
        Asset {
            path,
            relative_path,
        }
    }

    pub fn display_name(&self) -> String {
        self.relative_path.to_string_lossy().to_string()
    }
}

pub struct AssetSelector {
    excludes: RegexSet,
}

impl AssetSelector {
    pub fn new<S: AsRef<str>>(excludes: &[S]) -> Result<Self> {
        let excludes = RegexSet::new(excludes.iter().map(AsRef::as_ref))?;
        Ok(Self { excludes })
    }

    /// Filter `manifest` to the JavaScript assets under `target`, in manifest order.
    ///
    /// Exclusions win over descendant inclusion.
    pub fn select(&self, target: &Path, manifest: &[PathBuf], project_root: &Path) -> Vec<Asset> {
        manifest
            .iter()
            .filter(|p| has_javascript_extension(p))
            .filter(|p| is_descendant(target, p))
            .filter(|p| !self.is_excluded(p))
            .map(|p| Asset::new(p.clone(), project_root))
            .collect()
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.excludes.is_match(&path.to_string_lossy())
    }
}

fn has_javascript_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| JAVASCRIPT_EXTENSIONS.contains(&e))
}
