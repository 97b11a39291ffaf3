//! Integration test utilities for the Alanya Business Guide
//!
//! `memory` runs the services against in-process repositories; `helpers`
//! and `fixtures` drive a real server backed by PostgreSQL.

pub mod fixtures;
pub mod helpers;
pub mod memory;

pub use helpers::{assert_json, assert_status, check_test_env, grant_roles, TestServer};
