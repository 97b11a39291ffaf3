//! Business model -> entity mapper

use guide_core::entities::Business;
use guide_core::value_objects::GeoPoint;

use crate::models::BusinessModel;

impl From<BusinessModel> for Business {
    fn from(model: BusinessModel) -> Self {
        Business {
            id: model.id,
            name: model.name,
            description: model.description,
            address: model.address,
            phone: model.phone,
            email: model.email,
            website: model.website,
            image_url: model.image_url,
            working_hours: model.working_hours,
            price_range: model.price_range,
            category_id: model.category_id,
            owner_id: model.owner_id,
            created_by: model.created_by,
            is_active: model.is_active,
            is_approved: model.is_approved,
            is_featured: model.is_featured,
            average_rating: model.average_rating,
            total_reviews: model.total_reviews,
            location: GeoPoint::from_stored(model.latitude, model.longitude),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_half_location_maps_to_none() {
        let now = Utc::now();
        let model = BusinessModel {
            id: 1,
            name: "Kale Cafe".to_string(),
            description: None,
            address: "Alanya".to_string(),
            phone: "0242".to_string(),
            email: None,
            website: None,
            image_url: None,
            working_hours: None,
            price_range: Some("$$".to_string()),
            category_id: Some(3),
            owner_id: None,
            created_by: None,
            is_active: true,
            is_approved: true,
            is_featured: false,
            average_rating: 4.5,
            total_reviews: 2,
            latitude: Some(36.54),
            longitude: None,
            created_at: now,
            updated_at: now,
        };
        let business = Business::from(model);
        assert!(business.location.is_none());
        assert!(business.is_publicly_visible());
        assert_eq!(business.rating_summary().count, 2);
    }
}
