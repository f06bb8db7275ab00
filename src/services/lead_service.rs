//! Lead submission service
//!
//! Unified business logic for the capture flow: validate the form payload,
//! normalize the phone number, resolve traffic attribution, persist the
//! lead, then run the best-effort post-commit hooks (conversion record and
//! server-side event forwarding). Hook failures are logged and never change
//! the outcome already decided by the insert.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::TrackingConfig;
use crate::errors::{LeadgateError, Result};
use crate::repository::{
    DuplicateField, Lead, LeadInsertOutcome, LeadRepository, NewConversion, NewLead,
};
use crate::services::conversion::{CapiEventOptions, CapiForwarder, CapiUserData};
use crate::services::validation::validate_lead;
use crate::utils::phone::normalize_whatsapp;

/// Sentinel source for traffic with no UTM tags and no ad click-id
pub const ORGANIC_SOURCE: &str = "organico";

/// Conversion event name for a captured lead
pub const LEAD_EVENT_NAME: &str = "Lead";

// ============ Request/Outcome DTOs ============

/// One submission from the public form, form fields plus attribution
#[derive(Debug, Clone, Default)]
pub struct SubmitLeadRequest {
    pub name: String,
    pub email: String,
    /// As typed, possibly masked; normalized before storage
    pub phone: String,
    pub message: Option<String>,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub fbclid: Option<String>,
    pub gclid: Option<String>,
    /// Facebook click cookie (_fbc), if the browser sent it
    pub fbc: Option<String>,
    /// Facebook browser cookie (_fbp), if the browser sent it
    pub fbp: Option<String>,
    pub ip_address: String,
    pub user_agent: String,
    pub source_url: Option<String>,
}

/// Result of a submission that passed validation
#[derive(Debug, Clone)]
pub enum SubmitLeadOutcome {
    Created,
    Duplicate(DuplicateField),
}

// ============ LeadService Implementation ============

pub struct LeadService {
    repository: Arc<dyn LeadRepository>,
    forwarder: Arc<CapiForwarder>,
    tracking: TrackingConfig,
}

impl LeadService {
    pub fn new(
        repository: Arc<dyn LeadRepository>,
        forwarder: Arc<CapiForwarder>,
        tracking: TrackingConfig,
    ) -> Self {
        Self {
            repository,
            forwarder,
            tracking,
        }
    }

    /// Handle one lead submission end to end
    pub async fn submit(&self, request: SubmitLeadRequest) -> Result<SubmitLeadOutcome> {
        validate_lead(
            &request.name,
            &request.email,
            &request.phone,
            request.message.as_deref(),
        )
        .map_err(|e| LeadgateError::validation(e.to_string()))?;

        let phone = normalize_whatsapp(&request.phone);
        let has_click_id = request.fbclid.is_some() || request.gclid.is_some();
        let source = resolve_source(request.source.clone(), has_click_id);

        let new_lead = NewLead {
            name: request.name.clone(),
            email: request.email.clone(),
            phone,
            message: request.message.clone(),
            source,
            medium: request.medium.clone(),
            campaign: request.campaign.clone(),
            ip_address: Some(request.ip_address.clone()),
            user_agent: Some(request.user_agent.clone()),
        };

        match self.repository.insert_lead(new_lead).await? {
            LeadInsertOutcome::Duplicate(field) => {
                info!("Lead submission rejected, duplicate {}", field);
                Ok(SubmitLeadOutcome::Duplicate(field))
            }
            LeadInsertOutcome::Inserted(lead) => {
                // Post-commit hooks: observed only for logging
                self.record_conversion(&lead, &request).await;
                Ok(SubmitLeadOutcome::Created)
            }
        }
    }

    /// Best-effort conversion record + server-side forward for a new lead
    ///
    /// One event id covers both the stored row and the forwarded payload,
    /// so the platform can deduplicate against the browser pixel.
    async fn record_conversion(&self, lead: &Lead, request: &SubmitLeadRequest) {
        let event_id = uuid::Uuid::new_v4().to_string();
        let fbc = resolve_fbc(request.fbc.as_deref(), request.fbclid.as_deref());

        let conversion = NewConversion {
            lead_id: lead.id.clone(),
            event_name: LEAD_EVENT_NAME.to_string(),
            event_id: event_id.clone(),
            value: 0.0,
            currency: self.tracking.default_currency.clone(),
            fbc: fbc.clone(),
            gclid: request.gclid.clone(),
        };

        if let Err(e) = self.repository.insert_conversion(conversion).await {
            error!("Failed to record conversion for lead {}: {}", lead.id, e);
        }

        if !self.forwarder.is_enabled() {
            return;
        }

        let user_data = CapiUserData {
            email: Some(lead.email.clone()),
            phone: Some(lead.phone.clone()),
            client_ip: Some(request.ip_address.clone()),
            user_agent: Some(request.user_agent.clone()),
            fbc,
            fbp: request.fbp.clone(),
        };
        let options = CapiEventOptions {
            event_id: Some(event_id),
            event_source_url: request.source_url.clone(),
            custom_data: None,
        };

        if let Err(e) = self
            .forwarder
            .send_event(LEAD_EVENT_NAME, &user_data, &options)
            .await
        {
            error!("Conversion forwarding failed for lead {}: {}", lead.id, e);
        }
    }
}

/// Resolve the effective traffic source
///
/// An explicit source always wins. Without one, click-id traffic stays
/// unattributed (the click id itself is kept on the conversion row); only
/// traffic with neither a source nor a click-id defaults to the organic
/// sentinel.
fn resolve_source(source: Option<String>, has_click_id: bool) -> Option<String> {
    match source.filter(|s| !s.is_empty()) {
        Some(s) => Some(s),
        None if has_click_id => None,
        None => Some(ORGANIC_SOURCE.to_string()),
    }
}

/// Build the fbc click identifier in cookie format
///
/// The `_fbc` cookie wins when present; otherwise a raw `fbclid` query
/// parameter is wrapped as `fb.1.<unix-millis>.<fbclid>`.
fn resolve_fbc(fbc_cookie: Option<&str>, fbclid: Option<&str>) -> Option<String> {
    if let Some(fbc) = fbc_cookie {
        if !fbc.is_empty() {
            return Some(fbc.to_string());
        }
    }

    fbclid.filter(|id| !id.is_empty()).map(|id| {
        format!("fb.1.{}.{}", chrono::Utc::now().timestamp_millis(), id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_source_wins() {
        assert_eq!(
            resolve_source(Some("facebook".to_string()), true),
            Some("facebook".to_string())
        );
        assert_eq!(
            resolve_source(Some("newsletter".to_string()), false),
            Some("newsletter".to_string())
        );
    }

    #[test]
    fn test_click_id_traffic_stays_unattributed() {
        assert_eq!(resolve_source(None, true), None);
        assert_eq!(resolve_source(Some(String::new()), true), None);
    }

    #[test]
    fn test_direct_traffic_defaults_to_organic() {
        assert_eq!(resolve_source(None, false), Some(ORGANIC_SOURCE.to_string()));
        assert_eq!(
            resolve_source(Some(String::new()), false),
            Some(ORGANIC_SOURCE.to_string())
        );
    }

    #[test]
    fn test_fbc_cookie_wins_over_fbclid() {
        let fbc = resolve_fbc(Some("fb.1.1700000000000.abc"), Some("xyz"));
        assert_eq!(fbc.as_deref(), Some("fb.1.1700000000000.abc"));
    }

    #[test]
    fn test_fbclid_is_wrapped_in_cookie_format() {
        let fbc = resolve_fbc(None, Some("IwAR123")).unwrap();
        assert!(fbc.starts_with("fb.1."));
        assert!(fbc.ends_with(".IwAR123"));
    }

    #[test]
    fn test_no_click_data_means_no_fbc() {
        assert_eq!(resolve_fbc(None, None), None);
        assert_eq!(resolve_fbc(Some(""), None), None);
    }
}
