//! Admin log model -> entity mapper

use guide_core::entities::{AdminAction, AdminLog};
use guide_core::error::DomainError;

use crate::models::AdminLogModel;

impl TryFrom<AdminLogModel> for AdminLog {
    type Error = DomainError;

    fn try_from(model: AdminLogModel) -> Result<Self, Self::Error> {
        let action = AdminAction::parse(&model.action).ok_or_else(|| {
            DomainError::DatabaseError(format!("Unknown admin action: {}", model.action))
        })?;

        Ok(AdminLog {
            id: model.id,
            admin_user_id: model.admin_user_id,
            action,
            entity_type: model.entity_type,
            entity_id: model.entity_id,
            description: model.description,
            created_at: model.created_at,
        })
    }
}
