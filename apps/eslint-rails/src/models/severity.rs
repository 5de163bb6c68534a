//! Diagnostic severity with a fixed total order: `High < Low < None`.
//!
//! Lower sorts first and is more severe, so a file's severity is the
//! minimum across its warnings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Low,
    None,
}

impl Severity {
    /// Map ESLint's numeric severity (`2` error, `1` warning, `0` off).
    pub fn from_eslint(level: Option<u64>) -> Self {
        match level {
            Some(2) => Severity::High,
            Some(1) => Severity::Low,
            _ => Severity::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Low => "low",
            Severity::None => "none",
        }
    }
}

/// Most severe of the distinct severities present, or `None` when empty.
pub fn most_severe<I>(severities: I) -> Option<Severity>
where
    I: IntoIterator<Item = Severity>,
{
    severities.into_iter().min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_eslint_levels() {
        assert_eq!(Severity::from_eslint(Some(2)), Severity::High);
        assert_eq!(Severity::from_eslint(Some(1)), Severity::Low);
        assert_eq!(Severity::from_eslint(Some(0)), Severity::None);
        assert_eq!(Severity::from_eslint(None), Severity::None);
    }

    #[test]
    fn test_most_severe_aggregation() {
        use Severity::*;
        assert_eq!(most_severe([Low, None, Low]), Some(Low));
        assert_eq!(most_severe([High, Low]), Some(High));
        assert_eq!(most_severe([None]), Some(None));
        assert_eq!(most_severe(Vec::new()), Option::None);
    }
}
