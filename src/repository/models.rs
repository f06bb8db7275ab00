use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One captured form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Canonical digits-only phone, country code included
    pub phone: String,
    pub message: Option<String>,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a lead; id and created_at are assigned by the store
#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// One recorded conversion signal tied to a lead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub id: String,
    pub lead_id: String,
    pub event_name: String,
    /// Shared with the browser pixel for platform-side deduplication
    pub event_id: String,
    pub value: f64,
    pub currency: String,
    pub fbc: Option<String>,
    pub gclid: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a conversion record
#[derive(Debug, Clone)]
pub struct NewConversion {
    pub lead_id: String,
    pub event_name: String,
    pub event_id: String,
    pub value: f64,
    pub currency: String,
    pub fbc: Option<String>,
    pub gclid: Option<String>,
}

/// Which unique column a rejected insert collided on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    Phone,
}

impl std::fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Phone => write!(f, "phone"),
        }
    }
}

/// Typed result of a lead insert
///
/// Duplicates are part of the expected outcome space, not errors: the store's
/// uniqueness rejection is translated into a tagged variant instead of
/// surfacing as exception-style control flow.
#[derive(Debug, Clone)]
pub enum LeadInsertOutcome {
    Inserted(Lead),
    Duplicate(DuplicateField),
}

/// Listing filters for the admin view and export
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    /// Substring match over name, email, and phone
    pub search: Option<String>,
    pub source: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

/// One page of leads plus the unpaginated total
#[derive(Debug, Clone)]
pub struct LeadPage {
    pub leads: Vec<Lead>,
    pub total: u64,
}

/// Lead count for one traffic source
#[derive(Debug, Clone, Serialize)]
pub struct SourceCount {
    pub source: Option<String>,
    pub count: u64,
}

/// Aggregate lead statistics
#[derive(Debug, Clone, Serialize)]
pub struct LeadStats {
    pub total: u64,
    pub by_source: Vec<SourceCount>,
}
