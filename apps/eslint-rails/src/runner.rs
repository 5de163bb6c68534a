//! Runner: target resolution, sequential linting and the progress line.
//!
//! One `Runner` covers one run. Construction resolves the target, selects
//! assets and, unless the selection is empty, loads the ESLint engine,
//! plugins and configuration; `run`
//! then lints each asset in manifest order, printing one glyph per file as
//! soon as that file is done. The first fatal error aborts the whole run.

use crate::assets::{Asset, AssetSelector};
use crate::config::{Effective, EslintConfig};
use crate::engine::{LintEngine, NodeHost, ScriptHost};
use crate::error::{Error, Result};
use crate::manifest::{AssetManifest, LoadPathManifest};
use crate::models::severity::most_severe;
use crate::models::{Severity, Warning};
use crate::paths::normalize_target;
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct Runner {
    target: PathBuf,
    project_root: PathBuf,
    assets: Vec<Asset>,
    /// Not loaded when nothing was selected.
    engine: Option<LintEngine>,
    host: Box<dyn ScriptHost>,
    color: bool,
}

impl Runner {
    /// Runner over the project's load paths, linting through `node`.
    pub fn for_project(file: impl AsRef<Path>, eff: &Effective) -> Result<Self> {
        let manifest = LoadPathManifest::new(&eff.repo_root, eff.load_paths.clone());
        let host = NodeHost::new(eff.node.clone());
        Self::new(file, eff, &manifest, Box::new(host))
    }

    pub fn new(
        file: impl AsRef<Path>,
        eff: &Effective,
        manifest: &dyn AssetManifest,
        host: Box<dyn ScriptHost>,
    ) -> Result<Self> {
        let raw = file.as_ref().to_string_lossy();
        let target = normalize_target(&raw, &eff.repo_root, &eff.asset_root);
        let selector = AssetSelector::new(&eff.exclude)?;
        let assets = selector.select(&target, &manifest.each_file()?, &eff.repo_root);
        tracing::info!(target = %target.display(), assets = assets.len(), "selected assets");

        let engine = if assets.is_empty() {
            None
        } else {
            let config = EslintConfig::read(&eff.eslint_config)?;
            Some(LintEngine::load(manifest, &eff.engine, &config)?)
        };
        Ok(Self {
            target,
            project_root: eff.repo_root.clone(),
            assets,
            engine,
            host,
            color: use_colors(&eff.output),
        })
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Lint every selected asset, printing progress to stdout.
    pub fn run(&self, autocorrect: bool) -> Result<Vec<Warning>> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(autocorrect, &mut out)
    }

    /// Lint every selected asset, printing progress to `out`.
    ///
    /// Returns all warnings flattened in asset order, then diagnostic order.
    pub fn run_to(&self, autocorrect: bool, out: &mut dyn Write) -> Result<Vec<Warning>> {
        let header = format!("Running ESLint | [{} file(s)]", self.assets.len());
        let opening = "Progress: [";
        if self.color {
            emit(out, &format!("{}\n", header.white().on_black().italic()))?;
            emit(out, &opening.white().on_black().to_string())?;
        } else {
            emit(out, &format!("{header}\n"))?;
            emit(out, opening)?;
        }

        let mut warnings = Vec::new();
        if let Some(engine) = &self.engine {
            for asset in &self.assets {
                let name = asset.display_name();
                tracing::debug!(file = %name, autocorrect, "linting");
                let messages =
                    engine.lint_asset(self.host.as_ref(), asset, &self.project_root, autocorrect)?;
                let file_warnings: Vec<Warning> = messages
                    .iter()
                    .map(|m| Warning::from_message(&name, m))
                    .collect();
                emit(out, &self.glyph(file_severity(&file_warnings)))?;
                warnings.extend(file_warnings);
            }
        }

        let closing = if self.color {
            "]".white().on_black().to_string()
        } else {
            "]".to_string()
        };
        emit(out, &format!("{closing}\n\n"))?;
        Ok(warnings)
    }

    fn glyph(&self, severity: Option<Severity>) -> String {
        match (severity, self.color) {
            (Some(Severity::High), true) => "!".red().on_black().blink().to_string(),
            (Some(Severity::Low), true) => "?".yellow().on_black().italic().to_string(),
            (_, true) => "=".green().on_black().to_string(),
            (Some(Severity::High), false) => "!".to_string(),
            (Some(Severity::Low), false) => "?".to_string(),
            (_, false) => "=".to_string(),
        }
    }
}

/// Most severe severity among one file's warnings.
pub fn file_severity(warnings: &[Warning]) -> Option<Severity> {
    most_severe(warnings.iter().map(|w| w.severity))
}

fn emit(out: &mut dyn Write, s: &str) -> Result<()> {
    out.write_all(s.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| Error::io("<output>", e))
}
