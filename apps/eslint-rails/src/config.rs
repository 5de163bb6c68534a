//! Configuration discovery and effective settings resolution.
//!
//! Two documents are involved:
//! - The tool config, `eslint-rails.toml|yaml|yml`, read from the project
//!   root (or closest ancestor) and merged with CLI flags into `Effective`.
//! - The ESLint config, a JSON document handed to the engine verbatim.
//!   It lives at `config/eslint.json` unless overridden, and falls back
//!   to a built-in default when absent.
//!
//! Defaults:
//! - `asset_root`: `app/assets/javascripts`
//! - `load_paths`: app, lib and vendor `assets/javascripts`
//! - `exclude`: `eslint.js`, `vendor`, `gems`, `min.js`, `editorial`
//! - `eslint_config`: `config/eslint.json`
//! - `engine`: `eslint`
//! - `node`: `node`
//! - `output`: `human`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::assets::DEFAULT_EXCLUDES;
use crate::error::{Error, Result};
use crate::manifest::DEFAULT_LOAD_PATHS;
use serde::Deserialize;
use serde_json::Value as Json;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: &[&str] = &["eslint-rails.toml", "eslint-rails.yaml", "eslint-rails.yml"];
pub const DEFAULT_ASSET_ROOT: &str = "app/assets/javascripts";
pub const DEFAULT_ESLINT_CONFIG_PATH: &str = "config/eslint.json";
pub const DEFAULT_ENGINE: &str = "eslint";
pub const DEFAULT_NODE: &str = "node";

/// ESLint configuration used when the project has none.
pub const DEFAULT_ESLINT_CONFIG: &str = r#"{"rules":{}}"#;

/// Accepted values for `output`.
pub const OUTPUT_MODES: &[&str] = &["human", "json"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `eslint-rails.toml|yaml`.
pub struct ToolConfig {
    pub asset_root: Option<String>,
    pub load_paths: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub eslint_config: Option<String>,
    pub engine: Option<String>,
    pub node: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub asset_root: String,
    pub load_paths: Vec<String>,
    pub exclude: Vec<String>,
    pub eslint_config: PathBuf,
    pub engine: String,
    pub node: String,
    pub output: String,
    pub config_found: bool,
}

/// Walk upward from `start` to detect the project root.
///
/// Stops at the first directory holding a tool config, a `Gemfile` or `.git`.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists())
            || cur.join("Gemfile").exists()
            || cur.join(".git").exists()
        {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Absolute start directory for root detection; `.` components are dropped.
pub fn start_dir(cli_repo_root: Option<&str>, cwd: &Path) -> PathBuf {
    match cli_repo_root {
        Some(r) => cwd.join(r).components().collect(),
        None => cwd.to_path_buf(),
    }
}

/// Load `ToolConfig` from the first config file present under `root`.
pub fn load_config(root: &Path) -> Result<Option<ToolConfig>> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<ToolConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<ToolConfig>(&s).map_err(|e| e.to_string())
        };
        return parsed.map(Some).map_err(|message| Error::Config { path, message });
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_eslint_config: Option<&str>,
) -> Result<Effective> {
    let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
    let start = start_dir(cli_repo_root, &cwd);
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let eslint_config = cli_eslint_config
        .map(str::to_string)
        .or(cfg.eslint_config)
        .unwrap_or_else(|| DEFAULT_ESLINT_CONFIG_PATH.to_string());

    let output = cli_output
        .map(str::to_string)
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if !OUTPUT_MODES.contains(&output.as_str()) {
        return Err(Error::Config {
            path: repo_root.join(CONFIG_FILES[0]),
            message: format!("unknown output mode '{output}' (expected human|json)"),
        });
    }

    Ok(Effective {
        asset_root: cfg
            .asset_root
            .unwrap_or_else(|| DEFAULT_ASSET_ROOT.to_string()),
        load_paths: cfg
            .load_paths
            .unwrap_or_else(|| DEFAULT_LOAD_PATHS.iter().map(|s| s.to_string()).collect()),
        exclude: cfg
            .exclude
            .unwrap_or_else(|| DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()),
        eslint_config: repo_root.join(eslint_config),
        engine: cfg.engine.unwrap_or_else(|| DEFAULT_ENGINE.to_string()),
        node: cfg.node.unwrap_or_else(|| DEFAULT_NODE.to_string()),
        output,
        config_found,
        repo_root,
    })
}

#[derive(Debug, Clone)]
/// The ESLint configuration document passed to the engine.
pub struct EslintConfig {
    /// Where it was read from; `None` for the built-in default.
    pub source: Option<PathBuf>,
    pub value: Json,
}

impl EslintConfig {
    /// Read the project config at `path`, or the built-in default if absent.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no ESLint config found, using default");
            return Self::default_config();
        }
        let s = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&s, Some(path.to_path_buf()))
    }

    pub fn default_config() -> Result<Self> {
        Self::parse(DEFAULT_ESLINT_CONFIG, None)
    }

    fn parse(s: &str, source: Option<PathBuf>) -> Result<Self> {
        let config_error = |message: String| Error::Config {
            path: source.clone().unwrap_or_else(|| PathBuf::from("<default>")),
            message,
        };
        let value: Json = serde_json::from_str(s).map_err(|e| config_error(e.to_string()))?;
        if !value.is_object() {
            return Err(config_error("expected a JSON object".into()));
        }
        Ok(Self { source, value })
    }

    /// Enabled plugin names; absent or `null` means none.
    pub fn plugins(&self) -> Result<Vec<String>> {
        let bad = || Error::Config {
            path: self
                .source
                .clone()
                .unwrap_or_else(|| PathBuf::from("<default>")),
            message: "`plugins` must be an array of strings".into(),
        };
        match self.value.get("plugins") {
            None | Some(Json::Null) => Ok(Vec::new()),
            Some(Json::Array(items)) => items
                .iter()
                .map(|v| v.as_str().map(str::to_string).ok_or_else(bad))
                .collect(),
            Some(_) => Err(bad()),
        }
    }
}

/// Logical asset name of an ESLint plugin bundle.
pub fn plugin_asset_name(plugin: &str) -> String {
    format!("plugins/eslint-plugin-{plugin}")
}
