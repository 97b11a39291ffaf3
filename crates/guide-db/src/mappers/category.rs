//! Category and favorite model -> entity mappers

use guide_core::entities::{Category, FavoriteFan};
use guide_core::traits::CategoryCount;

use crate::models::{CategoryCountModel, CategoryModel, FavoriteFanModel};

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            id: model.id,
            name: model.name,
            description: model.description,
            icon: model.icon,
            created_at: model.created_at,
        }
    }
}

impl From<CategoryCountModel> for CategoryCount {
    fn from(model: CategoryCountModel) -> Self {
        CategoryCount {
            category_id: model.category_id,
            name: model.name,
            business_count: model.business_count,
        }
    }
}

impl From<FavoriteFanModel> for FavoriteFan {
    fn from(model: FavoriteFanModel) -> Self {
        FavoriteFan {
            user_id: model.user_id,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        }
    }
}
