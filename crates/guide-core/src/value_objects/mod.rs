//! Value objects - immutable types that represent domain concepts

mod geo;
mod phone;
mod rating;
mod roles;

pub use geo::GeoPoint;
pub use phone::PhoneNumber;
pub use rating::{Rating, RatingSummary};
pub use roles::Roles;
