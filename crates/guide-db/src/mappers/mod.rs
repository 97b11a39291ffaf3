//! Model to entity mappers
//!
//! This module provides conversions from database models to domain entities (guide-core).
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `TryFrom` where a stored value may not map onto a domain enum

mod admin_log;
mod business;
mod category;
mod news;
mod review;
mod user;
