//! Admin audit log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of administrative action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminAction {
    Create,
    Update,
    Delete,
    Approve,
    Reject,
    AssignOwner,
    UnassignOwner,
    Ban,
    Unban,
    AddRole,
    RemoveRole,
}

impl AdminAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::AssignOwner => "AssignOwner",
            Self::UnassignOwner => "UnassignOwner",
            Self::Ban => "Ban",
            Self::Unban => "Unban",
            Self::AddRole => "AddRole",
            Self::RemoveRole => "RemoveRole",
        }
    }

    /// Parse a stored action name; unknown names are rejected
    pub fn parse(s: &str) -> Option<Self> {
        const ALL: [AdminAction; 11] = [
            AdminAction::Create,
            AdminAction::Update,
            AdminAction::Delete,
            AdminAction::Approve,
            AdminAction::Reject,
            AdminAction::AssignOwner,
            AdminAction::UnassignOwner,
            AdminAction::Ban,
            AdminAction::Unban,
            AdminAction::AddRole,
            AdminAction::RemoveRole,
        ];
        ALL.into_iter().find(|a| a.as_str() == s)
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded administrative action; append-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminLog {
    pub id: i64,
    pub admin_user_id: i64,
    pub action: AdminAction,
    pub entity_type: String,
    pub entity_id: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// An entry to append
#[derive(Debug, Clone)]
pub struct NewAdminLog {
    pub admin_user_id: i64,
    pub action: AdminAction,
    pub entity_type: &'static str,
    pub entity_id: String,
    pub description: String,
}

impl NewAdminLog {
    pub fn new(
        admin_user_id: i64,
        action: AdminAction,
        entity_type: &'static str,
        entity_id: impl ToString,
        description: impl Into<String>,
    ) -> Self {
        Self {
            admin_user_id,
            action,
            entity_type,
            entity_id: entity_id.to_string(),
            description: description.into(),
        }
    }
}
