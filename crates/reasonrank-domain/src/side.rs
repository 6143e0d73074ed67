//! Side module - whether a node argues for or against its parent

use crate::DomainError;
use serde::{Deserialize, Serialize};

/// Position of a node relative to its parent conclusion
///
/// Supporting children add to the parent's impact, weakening children add to
/// its counter-impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Pro argument
    #[default]
    #[serde(alias = "pro", alias = "for", alias = "agree", alias = "support", alias = "yes")]
    Supporting,

    /// Con argument
    #[serde(alias = "con", alias = "against", alias = "disagree", alias = "oppose", alias = "no")]
    Weakening,
}

impl Side {
    /// Get the side name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Supporting => "supporting",
            Side::Weakening => "weakening",
        }
    }

    /// Parse a side label, accepting the usual pro/con aliases
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pro" | "for" | "agree" | "support" | "supporting" | "yes" => Some(Side::Supporting),
            "con" | "against" | "disagree" | "oppose" | "weakening" | "no" => Some(Side::Weakening),
            _ => None,
        }
    }
}

impl std::str::FromStr for Side {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::InvalidSide(s.to_string()))
    }
}
