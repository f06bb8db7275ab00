//! Service layer for business logic
//!
//! Unified business logic shared between the public form endpoints and the
//! admin API.

pub mod conversion;
mod lead_service;
pub mod validation;

pub use conversion::{CapiEventOptions, CapiForwarder, CapiUserData, ForwardOutcome};
pub use lead_service::*;
pub use validation::{validate_lead, LeadValidationError};
