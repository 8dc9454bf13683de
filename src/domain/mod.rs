//! Domain layer for the task dashboard
//!
//! This module contains core business rules, domain models and ports.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DenialReason, DomainError, DomainResult, FieldError, TransitionDenied, ValidationErrors};
