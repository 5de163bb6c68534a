//! Asset manifest: the listing of compiled asset paths and logical-name lookup.
//!
//! The runner only depends on the `AssetManifest` trait. `LoadPathManifest`
//! is the filesystem implementation used by the binary; it mirrors the
//! asset pipeline convention of ordered load paths under the project root.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Load paths searched when no configuration overrides them.
pub const DEFAULT_LOAD_PATHS: &[&str] = &[
    "app/assets/javascripts",
    "lib/assets/javascripts",
    "vendor/assets/javascripts",
];

/// Suffixes tried, in order, when resolving a logical asset name.
const LOGICAL_SUFFIXES: &[&str] = &["", ".js", ".jsx", ".es6", "/index.js"];

pub trait AssetManifest {
    /// All compiled asset paths, absolute, in manifest order.
    fn each_file(&self) -> Result<Vec<PathBuf>>;

    /// Source text of the asset registered under `logical_name`.
    fn source(&self, logical_name: &str) -> Result<String>;
}

/// Manifest backed by a list of load paths below a project root.
pub struct LoadPathManifest {
    root: PathBuf,
    load_paths: Vec<String>,
}

impl LoadPathManifest {
    pub fn new(root: impl Into<PathBuf>, load_paths: Vec<String>) -> Self {
        Self {
            root: root.into(),
            load_paths,
        }
    }

    fn resolve(&self, logical_name: &str) -> Option<PathBuf> {
        let name = logical_name.trim_start_matches('/');
        self.load_paths.iter().find_map(|lp| {
            let base = self.root.join(lp);
            LOGICAL_SUFFIXES
                .iter()
                .map(|suffix| base.join(format!("{name}{suffix}")))
                .find(|candidate| candidate.is_file())
        })
    }
}

impl AssetManifest for LoadPathManifest {
    fn each_file(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for lp in &self.load_paths {
            let base = self.root.join(lp);
            if !base.is_dir() {
                continue;
            }
            collect_files(&base, &mut files)?;
        }
        Ok(files)
    }

    fn source(&self, logical_name: &str) -> Result<String> {
        let path = self
            .resolve(logical_name)
            .ok_or_else(|| Error::AssetNotFound {
                name: logical_name.to_string(),
            })?;
        tracing::debug!(asset = logical_name, path = %path.display(), "loading asset source");
        fs::read_to_string(&path).map_err(|e| Error::io(&path, e))
    }
}

fn collect_files(base: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let escaped = glob::Pattern::escape(&base.to_string_lossy());
    let pattern = format!("{escaped}/**/*");
    let entries = glob::glob(&pattern).map_err(|e| Error::Config {
        path: base.to_path_buf(),
        message: format!("bad load path pattern: {e}"),
    })?;
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => out.push(path),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(Error::io(path, e.into_error()));
            }
        }
    }
    Ok(())
}
