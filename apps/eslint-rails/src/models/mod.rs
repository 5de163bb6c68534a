//! Shared data models for lint results and summaries.

pub mod severity;

pub use severity::Severity;

use serde::Serialize;
use serde_json::Value as Json;

/// Rule id reported when ESLint gives none (parse errors and the like).
pub const UNKNOWN_RULE: &str = "unexpected error";

#[derive(Debug, Clone, PartialEq, Serialize)]
/// A single ESLint diagnostic attached to the asset it was raised for.
pub struct Warning {
    pub filename: String,
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub line: u64,
    pub column: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fatal: bool,
}

impl Warning {
    /// Build a warning from one raw ESLint message object.
    pub fn from_message(filename: &str, raw: &Json) -> Self {
        let str_field = |key: &str| raw.get(key).and_then(Json::as_str).map(str::to_string);
        let num_field = |key: &str| raw.get(key).and_then(Json::as_u64).unwrap_or(0);
        Warning {
            filename: filename.to_string(),
            rule_id: str_field("ruleId").unwrap_or_else(|| UNKNOWN_RULE.to_string()),
            severity: Severity::from_eslint(raw.get("severity").and_then(Json::as_u64)),
            message: str_field("message").unwrap_or_default(),
            line: num_field("line"),
            column: num_field("column"),
            node_type: str_field("nodeType"),
            fatal: raw.get("fatal").and_then(Json::as_bool).unwrap_or(false),
        }
    }

    /// `file:line:column`
    pub fn location(&self) -> String {
        format!("{}:{}:{}", self.filename, self.line, self.column)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
/// Aggregated counts used by printers and the exit status.
pub struct Summary {
    pub high: usize,
    pub low: usize,
    pub files: usize,
}

impl Summary {
    pub fn from_warnings(warnings: &[Warning], files: usize) -> Self {
        let count = |sev: Severity| warnings.iter().filter(|w| w.severity == sev).count();
        Summary {
            high: count(Severity::High),
            low: count(Severity::Low),
            files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_warning_from_message_fields() {
        let raw = json!({
            "ruleId": "no-undef",
            "severity": 2,
            "message": "'$' is not defined.",
            "line": 4,
            "column": 9,
            "nodeType": "Identifier"
        });
        let w = Warning::from_message("app/assets/javascripts/a.js", &raw);
        assert_eq!(w.rule_id, "no-undef");
        assert_eq!(w.severity, Severity::High);
        assert_eq!(w.node_type.as_deref(), Some("Identifier"));
        assert_eq!(w.location(), "app/assets/javascripts/a.js:4:9");
        assert!(!w.fatal);
    }

    #[test]
    fn test_parse_error_defaults_rule_id() {
        let raw = json!({"fatal": true, "severity": 2, "message": "Unexpected token", "line": 1, "column": 3});
        let w = Warning::from_message("a.js", &raw);
        assert_eq!(w.rule_id, UNKNOWN_RULE);
        assert!(w.fatal);
    }

    #[test]
    fn test_summary_counts() {
        let mk = |sev: u64| Warning::from_message("a.js", &json!({"severity": sev}));
        let warnings = vec![mk(2), mk(1), mk(1), mk(0)];
        let s = Summary::from_warnings(&warnings, 3);
        assert_eq!(s, Summary { high: 1, low: 2, files: 3 });
    }
}
