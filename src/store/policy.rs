use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// What the store does with local state when an optimistic write fails remotely.
///
/// Creation (new cart line, new favorite) is never optimistic, so this only concerns
/// quantity changes, line removal and favorite removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// Keep the local edit. Local and remote state diverge until the next load.
    #[default]
    Observed,
    /// Undo the local edit: restore the quantity or re-insert the removed entry.
    Rollback,
}

impl FromStr for SyncPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "observed" => Ok(Self::Observed),
            "rollback" => Ok(Self::Rollback),
            other => Err(format!("unknown sync policy '{other}', expected observed or rollback")),
        }
    }
}

impl Display for SyncPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Observed => f.write_str("observed"),
            Self::Rollback => f.write_str("rollback"),
        }
    }
}
