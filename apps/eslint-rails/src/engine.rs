//! Lint invocation: hands one asset to ESLint running under a JS host.
//!
//! The host never sees interpolated source code. `LintRequest` is
//! serialized as a single JSON document and consumed by a fixed driver
//! script, which builds a fresh sandbox for every call, loads the engine
//! and plugin bundles into it, and calls `verify` or `verifyAndFix`.

use crate::assets::Asset;
use crate::config::{plugin_asset_name, EslintConfig};
use crate::error::{Error, Result};
use crate::manifest::AssetManifest;
use serde::Serialize;
use serde_json::Value as Json;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Driver executed by `NodeHost`; reads a `LintRequest` on stdin.
pub const DRIVER_SCRIPT: &str = include_str!("driver.js");

#[derive(Debug, Serialize)]
/// Everything a host needs to lint one source text.
pub struct LintRequest<'a> {
    pub engine: &'a str,
    pub plugins: &'a [String],
    pub config: &'a Json,
    pub source: &'a str,
    pub fix: bool,
}

/// A JavaScript host able to evaluate a lint request synchronously.
pub trait ScriptHost {
    fn evaluate(&self, request: &LintRequest<'_>) -> Result<Json>;
}

/// Runs the driver script under a `node` executable, one process per call.
pub struct NodeHost {
    node: String,
}

impl NodeHost {
    pub fn new(node: impl Into<String>) -> Self {
        Self { node: node.into() }
    }
}

impl ScriptHost for NodeHost {
    fn evaluate(&self, request: &LintRequest<'_>) -> Result<Json> {
        let payload = serde_json::to_vec(request)?;
        tracing::debug!(node = %self.node, bytes = payload.len(), fix = request.fix, "invoking node");

        let mut child = Command::new(&self.node)
            .arg("-e")
            .arg(DRIVER_SCRIPT)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Engine {
                message: format!("failed to start '{}': {e}", self.node),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&payload).map_err(|e| Error::Engine {
                message: format!("failed to send request to '{}': {e}", self.node),
            })?;
        }

        let output = child.wait_with_output().map_err(|e| Error::Engine {
            message: format!("failed to wait for '{}': {e}", self.node),
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Engine {
                message: format!("{} ({})", stderr.trim(), output.status),
            });
        }
        serde_json::from_slice(&output.stdout).map_err(|e| Error::Response {
            message: format!("host output is not JSON: {e}"),
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
/// Remaining diagnostics plus corrected text when fixing.
pub struct LintOutcome {
    pub messages: Vec<Json>,
    pub output: Option<String>,
}

/// ESLint engine, plugins and configuration, loaded once per run.
pub struct LintEngine {
    engine_source: String,
    plugin_sources: Vec<String>,
    config: Json,
}

impl LintEngine {
    pub fn new(engine_source: String, plugin_sources: Vec<String>, config: Json) -> Self {
        Self {
            engine_source,
            plugin_sources,
            config,
        }
    }

    /// Fetch the engine bundle and every enabled plugin from `manifest`.
    pub fn load(manifest: &dyn AssetManifest, engine: &str, config: &EslintConfig) -> Result<Self> {
        let engine_source = manifest.source(engine)?;
        let plugin_sources = config
            .plugins()?
            .iter()
            .map(|name| manifest.source(&plugin_asset_name(name)))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(plugins = plugin_sources.len(), "loaded ESLint engine");
        Ok(Self::new(engine_source, plugin_sources, config.value.clone()))
    }

    /// Lint `source`, returning the remaining diagnostics (and fixed text when `fix`).
    pub fn lint(&self, host: &dyn ScriptHost, source: &str, fix: bool) -> Result<LintOutcome> {
        let request = LintRequest {
            engine: &self.engine_source,
            plugins: &self.plugin_sources,
            config: &self.config,
            source,
            fix,
        };
        let response = host.evaluate(&request)?;
        if fix {
            parse_fix_response(response)
        } else {
            Ok(LintOutcome {
                messages: parse_messages(response)?,
                output: None,
            })
        }
    }

    /// Lint one asset on disk. With `fix`, corrected output replaces the file
    /// at `project_root/relative_path` before the remaining diagnostics return.
    pub fn lint_asset(
        &self,
        host: &dyn ScriptHost,
        asset: &Asset,
        project_root: &Path,
        fix: bool,
    ) -> Result<Vec<Json>> {
        let source = fs::read_to_string(&asset.path).map_err(|e| Error::io(&asset.path, e))?;
        let outcome = self.lint(host, &source, fix)?;
        if let Some(fixed) = outcome.output.as_ref().filter(|_| fix) {
            let dest = project_root.join(&asset.relative_path);
            fs::write(&dest, fixed).map_err(|e| Error::io(&dest, e))?;
            tracing::info!(file = %asset.display_name(), "wrote autocorrected source");
        }
        Ok(outcome.messages)
    }
}

fn parse_messages(value: Json) -> Result<Vec<Json>> {
    match value {
        Json::Array(items) => Ok(items),
        other => Err(Error::Response {
            message: format!("expected an array of messages, got {}", kind(&other)),
        }),
    }
}

fn parse_fix_response(value: Json) -> Result<LintOutcome> {
    let mut obj = match value {
        Json::Object(obj) => obj,
        other => {
            return Err(Error::Response {
                message: format!("expected a fix report object, got {}", kind(&other)),
            })
        }
    };
    let messages = parse_messages(obj.remove("messages").unwrap_or(Json::Array(Vec::new())))?;
    let output = match obj.remove("output") {
        None | Some(Json::Null) => None,
        Some(Json::String(s)) => Some(s),
        Some(other) => {
            return Err(Error::Response {
                message: format!("expected `output` to be a string, got {}", kind(&other)),
            })
        }
    };
    Ok(LintOutcome { messages, output })
}

fn kind(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use tempfile::tempdir;

    /// Host that answers by source text and records every request.
    #[derive(Default)]
    pub(crate) struct ScriptedHost {
        pub responses: HashMap<String, Json>,
        pub requests: RefCell<Vec<Json>>,
    }

    impl ScriptedHost {
        pub fn respond(mut self, source: &str, response: Json) -> Self {
            self.responses.insert(source.to_string(), response);
            self
        }
    }

    impl ScriptHost for ScriptedHost {
        fn evaluate(&self, request: &LintRequest<'_>) -> Result<Json> {
            self.requests.borrow_mut().push(serde_json::to_value(request)?);
            self.responses
                .get(request.source)
                .cloned()
                .ok_or_else(|| Error::Engine {
                    message: format!("no scripted response for {:?}", request.source),
                })
        }
    }

    struct MapManifest(HashMap<&'static str, &'static str>);

    impl AssetManifest for MapManifest {
        fn each_file(&self) -> Result<Vec<std::path::PathBuf>> {
            Ok(Vec::new())
        }

        fn source(&self, logical_name: &str) -> Result<String> {
            self.0
                .get(logical_name)
                .map(|s| s.to_string())
                .ok_or_else(|| Error::AssetNotFound {
                    name: logical_name.to_string(),
                })
        }
    }

    fn engine() -> LintEngine {
        LintEngine::new("var eslint;".into(), vec![], json!({"rules": {"semi": 2}}))
    }

    #[test]
    fn test_request_carries_source_verbatim() {
        let tricky = "var s = '</script>\\'';\n`${x}` // \"quoted\"\u{7}";
        let host = ScriptedHost::default().respond(tricky, json!([]));
        engine().lint(&host, tricky, false).unwrap();
        let requests = host.requests.borrow();
        let sent = &requests[0];
        assert_eq!(sent["source"], tricky);
        assert_eq!(sent["fix"], false);
        assert_eq!(sent["config"]["rules"]["semi"], 2);
    }

    #[test]
    fn test_verify_returns_messages() {
        let host = ScriptedHost::default().respond("x", json!([{"message": "m", "severity": 1}]));
        let out = engine().lint(&host, "x", false).unwrap();
        assert_eq!(out.messages.len(), 1);
        assert!(out.output.is_none());
    }

    #[test]
    fn test_verify_rejects_non_array() {
        let host = ScriptedHost::default().respond("x", json!({"messages": []}));
        assert!(matches!(engine().lint(&host, "x", false), Err(Error::Response { .. })));
    }

    #[test]
    fn test_fix_response_parsing() {
        let host = ScriptedHost::default()
            .respond("a", json!({"fixed": true, "output": "a;", "messages": []}))
            .respond("b", json!({"fixed": false, "output": null, "messages": [{"severity": 2}]}))
            .respond("c", json!({"output": 3, "messages": []}));
        let a = engine().lint(&host, "a", true).unwrap();
        assert_eq!(a.output.as_deref(), Some("a;"));
        let b = engine().lint(&host, "b", true).unwrap();
        assert!(b.output.is_none());
        assert_eq!(b.messages.len(), 1);
        assert!(engine().lint(&host, "c", true).is_err());
    }

    #[test]
    fn test_lint_asset_autocorrect_writes_back() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("app/assets/javascripts")).unwrap();
        let path = root.join("app/assets/javascripts/a.js");
        fs::write(&path, "var a = 1").unwrap();
        let asset = Asset::new(path.clone(), root);

        let host = ScriptedHost::default().respond(
            "var a = 1",
            json!({"fixed": true, "output": "var a = 1;", "messages": [{"ruleId": "no-unused-vars", "severity": 1}]}),
        );
        let remaining = engine().lint_asset(&host, &asset, root, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "var a = 1;");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["ruleId"], "no-unused-vars");
    }

    #[test]
    fn test_lint_asset_without_fix_leaves_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.js");
        fs::write(&path, "var a = 1").unwrap();
        let asset = Asset::new(path.clone(), dir.path());
        let host = ScriptedHost::default().respond("var a = 1", json!([]));
        engine().lint_asset(&host, &asset, dir.path(), false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "var a = 1");
    }

    #[test]
    fn test_load_fetches_engine_and_plugins() {
        let manifest = MapManifest(HashMap::from([
            ("eslint", "ENGINE"),
            ("plugins/eslint-plugin-react", "REACT"),
        ]));
        let config = EslintConfig {
            source: None,
            value: json!({"plugins": ["react"]}),
        };
        let loaded = LintEngine::load(&manifest, "eslint", &config).unwrap();
        assert_eq!(loaded.engine_source, "ENGINE");
        assert_eq!(loaded.plugin_sources, vec!["REACT"]);
    }

    #[test]
    fn test_load_missing_plugin_is_fatal() {
        let manifest = MapManifest(HashMap::from([("eslint", "ENGINE")]));
        let config = EslintConfig {
            source: None,
            value: json!({"plugins": ["jquery"]}),
        };
        let err = LintEngine::load(&manifest, "eslint", &config).err().unwrap();
        assert!(matches!(err, Error::AssetNotFound { ref name } if name == "plugins/eslint-plugin-jquery"));
    }

    /// Stub engine: reports the source and config back, plus whether the
    /// plugin ran and `window` is the sandbox global.
    const STUB_ENGINE: &str = r#"
        window.engineLoaded = true;
        var eslint = function () {};
        eslint.prototype.verify = function (source, config) {
            return [{
                ruleId: "stub",
                severity: config.rules.semi,
                message: source,
                line: 1,
                column: 1,
                nodeType: typeof pluginLoaded + "/" + typeof engineLoaded
            }];
        };
        eslint.prototype.verifyAndFix = function (source, config) {
            return { fixed: true, output: source + ";", messages: [] };
        };
    "#;

    fn node_available() -> bool {
        Command::new("node")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }

    fn stub_engine() -> LintEngine {
        LintEngine::new(
            STUB_ENGINE.into(),
            vec!["window.pluginLoaded = 1;".into()],
            json!({"rules": {"semi": 2}}),
        )
    }

    #[test]
    fn test_node_host_verify_round_trips_source() {
        if !node_available() {
            return;
        }
        let tricky = "var s = '</script>';\nvar t = \"it's\"; // ${x} \\ done";
        let out = stub_engine().lint(&NodeHost::new("node"), tricky, false).unwrap();
        assert_eq!(out.messages.len(), 1);
        assert_eq!(out.messages[0]["message"], tricky);
        assert_eq!(out.messages[0]["severity"], 2);
        assert_eq!(out.messages[0]["nodeType"], "number/boolean");
        assert!(out.output.is_none());
    }

    #[test]
    fn test_node_host_verify_and_fix() {
        if !node_available() {
            return;
        }
        let out = stub_engine().lint(&NodeHost::new("node"), "var a = 1", true).unwrap();
        assert_eq!(out.output.as_deref(), Some("var a = 1;"));
        assert!(out.messages.is_empty());
    }

    #[test]
    fn test_node_host_engine_throw_is_engine_error() {
        if !node_available() {
            return;
        }
        let broken = LintEngine::new("throw new Error('engine exploded');".into(), vec![], json!({}));
        let err = broken.lint(&NodeHost::new("node"), "x", false).unwrap_err();
        assert!(matches!(err, Error::Engine { ref message } if message.contains("engine exploded")));
    }

    #[test]
    fn test_node_host_missing_binary_is_engine_error() {
        let host = NodeHost::new("eslint-rails-no-such-node-binary");
        let err = engine().lint(&host, "x", false).unwrap_err();
        assert!(matches!(err, Error::Engine { .. }));
    }
}
