//! # guide-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Services borrow a [`ServiceContext`] that owns every repository, the
//! token store and the outbound gateways, so HTTP handlers and tests build
//! them the same way.

pub mod dto;
pub mod services;

pub use services::{
    AdminService, AssistantService, AuditLogger, AuthService, BusinessSubmissionService,
    ContactService, DirectoryService, FavoriteService, NewsService, OwnerService,
    PasswordResetService, ProfileService, ReviewService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, ServiceSettings,
};
