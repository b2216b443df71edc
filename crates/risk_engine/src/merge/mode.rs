//! Merge mode selector.

use std::fmt;
use std::str::FromStr;

/// Which document the merge produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeMode {
    /// The earlier document, unmodified
    #[serde(alias = "bod")]
    EarlierOnly,
    /// The later document, unmodified
    #[serde(alias = "current")]
    LaterOnly,
    /// The later document with matched scenarios replaced by the
    /// scenario-wise maximum of both
    #[default]
    MergeMax,
}

impl MergeMode {
    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMode::EarlierOnly => "earlier-only",
            MergeMode::LaterOnly => "later-only",
            MergeMode::MergeMax => "merge-max",
        }
    }

    /// Whether the earlier document must be supplied.
    pub fn requires_earlier(&self) -> bool {
        matches!(self, MergeMode::EarlierOnly | MergeMode::MergeMax)
    }

    /// Whether the later document must be supplied.
    pub fn requires_later(&self) -> bool {
        matches!(self, MergeMode::LaterOnly | MergeMode::MergeMax)
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "earlier-only" | "earlier" | "bod" => Ok(MergeMode::EarlierOnly),
            "later-only" | "later" | "current" => Ok(MergeMode::LaterOnly),
            "merge-max" | "max" | "merge" => Ok(MergeMode::MergeMax),
            other => Err(format!(
                "Unknown merge mode '{}'. Valid: earlier-only, later-only, merge-max",
                other
            )),
        }
    }
}
