//! Conversion event forwarding
//!
//! Builds hashed user-data payloads and posts them to the ad platform's
//! server-side ingestion API. Failures here are always non-fatal to the
//! submission flow that triggered them.

pub mod capi;
pub mod hash;

pub use capi::{CapiEventOptions, CapiForwarder, CapiUserData, ForwardOutcome};
pub use hash::{hash_email, hash_phone};
