//! Route handlers
//!
//! All HTTP request handlers organized by area.

pub mod admin;
pub mod ai;
pub mod auth;
pub mod businesses;
pub mod contact;
pub mod directory;
pub mod health;
pub mod news;
pub mod owner;
pub mod reviews;
pub mod users;
