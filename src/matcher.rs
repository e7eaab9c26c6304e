use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// Any ASCII letter. `Anchored` additionally requires it at byte 0.
static ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]").expect("static regex"));
static LEADING_ALPHA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]").expect("static regex"));

/// How a numeric field is tested for alphabetic content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Flag values whose first character is a letter ("unlimited", not "3GB").
    #[default]
    Anchored,
    /// Flag values containing a letter anywhere ("unlimited" and "3GB").
    Anywhere,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Anchored => "anchored",
            MatchMode::Anywhere => "anywhere",
        }
    }
}

impl std::str::FromStr for MatchMode {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anchored" | "start" => Ok(MatchMode::Anchored),
            "anywhere" | "search" => Ok(MatchMode::Anywhere),
            _ => Err(AuditError::Config {
                key: "match_mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Flags field values that carry alphabetic text where a number is expected.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlphaMatcher {
    mode: MatchMode,
}

impl AlphaMatcher {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn is_match(&self, value: &str) -> bool {
        match self.mode {
            MatchMode::Anchored => LEADING_ALPHA.is_match(value),
            MatchMode::Anywhere => ALPHA.is_match(value),
        }
    }
}
