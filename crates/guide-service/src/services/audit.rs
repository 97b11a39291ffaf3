//! Admin audit trail
//!
//! Every mutating admin operation records one entry. Recording is best
//! effort: a failed write is logged and the operation still succeeds.

use guide_core::entities::{AdminAction, NewAdminLog};
use tracing::{debug, warn};

use super::context::ServiceContext;

/// Writes admin log entries
pub struct AuditLogger<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditLogger<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record one admin action
    pub async fn record(
        &self,
        admin_user_id: i64,
        action: AdminAction,
        entity_type: &'static str,
        entity_id: impl ToString,
        description: impl Into<String>,
    ) {
        let entry = NewAdminLog::new(admin_user_id, action, entity_type, entity_id, description);
        match self.ctx.admin_log_repo().append(&entry).await {
            Ok(log) => debug!(log_id = log.id, action = %action, "Admin action recorded"),
            Err(e) => warn!(
                error = %e,
                admin_user_id,
                action = %action,
                entity_type,
                entity_id = %entry.entity_id,
                "Failed to record admin action"
            ),
        }
    }
}
