//! Review model -> entity mapper

use guide_core::entities::Review;
use guide_core::value_objects::Rating;

use crate::models::ReviewModel;

impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        Review {
            id: model.id,
            business_id: model.business_id,
            user_id: model.user_id,
            rating: Rating::from_stored(model.rating),
            comment: model.comment,
            is_approved: model.is_approved,
            is_active: model.is_active,
            created_at: model.created_at,
            author_name: model.author_name,
            business_name: model.business_name,
        }
    }
}
