//! Change vocabulary for dirty-set tracking
//!
//! Mirrors the `resource` / `action` pair carried by sync payloads:
//! every tracked change names which collection it touches and what happened.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of the dirty set a change belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Node,
    Guest,
}

/// Change type (e.g. "created", "updated", "deleted")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Node => write!(f, "node"),
            ChangeKind::Guest => write!(f, "guest"),
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeAction::Created => write!(f, "created"),
            ChangeAction::Updated => write!(f, "updated"),
            ChangeAction::Deleted => write!(f, "deleted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&ChangeKind::Node).unwrap(), "\"node\"");
        assert_eq!(
            serde_json::to_string(&ChangeAction::Updated).unwrap(),
            "\"updated\""
        );
        assert_eq!(ChangeAction::Deleted.to_string(), "deleted");
    }
}
