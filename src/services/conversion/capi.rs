//! Server-side conversion forwarding (Meta Conversions API)
//!
//! Sends one event per call to the Graph API events endpoint. Contact
//! fields travel as SHA-256 digests; the access token rides in the payload
//! as the API requires, not in a header. The forwarder does no local
//! deduplication or retry: the caller supplies an event id and the
//! platform deduplicates against the browser pixel.

use std::sync::OnceLock;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};
use ureq::Agent;

use crate::config::TrackingConfig;
use crate::errors::{LeadgateError, Result};

use super::hash::{hash_email, hash_phone};

/// HTTP request timeout
const HTTP_TIMEOUT_SECS: u64 = 10;

/// Global HTTP agent (ureq's Agent is Send + Sync)
static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            // Non-2xx responses carry the platform's error body; read it
            // instead of treating the status as a transport error
            .http_status_as_error(false)
            .build()
            .into()
    })
}

/// Raw (unhashed) user fields supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct CapiUserData {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub fbc: Option<String>,
    pub fbp: Option<String>,
}

/// Optional event attributes
#[derive(Debug, Clone, Default)]
pub struct CapiEventOptions {
    /// Shared with the browser pixel for platform-side deduplication
    pub event_id: Option<String>,
    pub event_source_url: Option<String>,
    pub custom_data: Option<serde_json::Value>,
}

/// Hashed user-data block as the platform expects it
#[derive(Debug, Clone, Default, Serialize)]
struct UserDataPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    em: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ph: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fbc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fbp: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct EventPayload {
    event_name: String,
    event_time: i64,
    action_source: &'static str,
    user_data: UserDataPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_data: Option<serde_json::Value>,
}

/// Single-event batch; the access token rides in the payload
#[derive(Debug, Clone, Serialize)]
struct CapiPayload {
    data: Vec<EventPayload>,
    access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_event_code: Option<String>,
}

/// Outcome of a forwarding attempt that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    Sent,
    /// Credentials absent, forwarding disabled
    NotConfigured,
}

pub struct CapiForwarder {
    config: TrackingConfig,
}

impl CapiForwarder {
    pub fn new(config: TrackingConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    fn events_url(&self) -> String {
        format!(
            "https://graph.facebook.com/{}/{}/events",
            self.config.graph_api_version, self.config.pixel_id
        )
    }

    fn build_payload(
        &self,
        event_name: &str,
        user_data: &CapiUserData,
        options: &CapiEventOptions,
    ) -> CapiPayload {
        let user_data = UserDataPayload {
            em: user_data.email.as_deref().map(hash_email),
            ph: user_data.phone.as_deref().map(hash_phone),
            client_ip_address: user_data.client_ip.clone(),
            client_user_agent: user_data.user_agent.clone(),
            fbc: user_data.fbc.clone(),
            fbp: user_data.fbp.clone(),
        };

        let event = EventPayload {
            event_name: event_name.to_string(),
            event_time: chrono::Utc::now().timestamp(),
            action_source: "website",
            user_data,
            event_id: options.event_id.clone(),
            event_source_url: options.event_source_url.clone(),
            custom_data: options.custom_data.clone(),
        };

        CapiPayload {
            data: vec![event],
            access_token: self.config.access_token.clone(),
            test_event_code: self.config.test_event_code.clone(),
        }
    }

    /// Forward one event to the platform
    ///
    /// Returns `NotConfigured` without any network traffic when the
    /// credential pair is absent. Transport errors and non-2xx responses
    /// come back as `Forwarding` errors carrying the platform's message;
    /// callers treat those as non-fatal.
    pub async fn send_event(
        &self,
        event_name: &str,
        user_data: &CapiUserData,
        options: &CapiEventOptions,
    ) -> Result<ForwardOutcome> {
        if !self.is_enabled() {
            warn!("CAPI not configured, skipping server-side tracking");
            return Ok(ForwardOutcome::NotConfigured);
        }

        let url = self.events_url();
        let payload = self.build_payload(event_name, user_data, options);
        let event_name = event_name.to_string();

        // Sync HTTP on the blocking thread pool
        let result =
            tokio::task::spawn_blocking(move || Self::post_payload_sync(&url, &payload))
                .await
                .map_err(|e| {
                    LeadgateError::forwarding(format!("CAPI task join failed: {}", e))
                })?;

        match &result {
            Ok(_) => info!("CAPI event sent: {}", event_name),
            Err(e) => warn!("CAPI event failed: {}: {}", event_name, e.message()),
        }

        result.map(|_| ForwardOutcome::Sent)
    }

    fn post_payload_sync(url: &str, payload: &CapiPayload) -> Result<()> {
        let agent = get_agent();

        let response = agent
            .post(url)
            .send_json(payload)
            .map_err(|e| LeadgateError::forwarding(format!("CAPI request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // Extract the platform's error message if the body has one
        let detail = response
            .into_body()
            .read_json::<serde_json::Value>()
            .ok()
            .and_then(|json| {
                json["error"]["message"]
                    .as_str()
                    .map(|message| message.to_string())
            })
            .unwrap_or_else(|| format!("HTTP {}", status));

        Err(LeadgateError::forwarding(detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_config() -> TrackingConfig {
        TrackingConfig {
            pixel_id: "1234567890".to_string(),
            access_token: "EAAB-test".to_string(),
            ..TrackingConfig::default()
        }
    }

    #[tokio::test]
    async fn test_disabled_forwarder_skips_without_network() {
        let forwarder = CapiForwarder::new(TrackingConfig::default());
        let outcome = forwarder
            .send_event("Lead", &CapiUserData::default(), &CapiEventOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome, ForwardOutcome::NotConfigured);
    }

    #[test]
    fn test_events_url_contains_pixel_and_version() {
        let forwarder = CapiForwarder::new(enabled_config());
        assert_eq!(
            forwarder.events_url(),
            "https://graph.facebook.com/v18.0/1234567890/events"
        );
    }

    #[test]
    fn test_payload_hashes_contact_fields() {
        let forwarder = CapiForwarder::new(enabled_config());
        let user_data = CapiUserData {
            email: Some("A@B.com".to_string()),
            phone: Some("+55 (51) 99853-5411".to_string()),
            client_ip: Some("203.0.113.7".to_string()),
            ..CapiUserData::default()
        };
        let payload = forwarder.build_payload("Lead", &user_data, &CapiEventOptions::default());

        let event = &payload.data[0];
        assert_eq!(event.event_name, "Lead");
        assert_eq!(event.action_source, "website");
        // Digests, never the raw values
        assert_eq!(event.user_data.em.as_deref(), Some(hash_email("a@b.com").as_str()));
        assert_eq!(
            event.user_data.ph.as_deref(),
            Some(hash_phone("5551998535411").as_str())
        );
        // IP and user agent stay unhashed
        assert_eq!(event.user_data.client_ip_address.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_payload_serialization_skips_absent_fields() {
        let forwarder = CapiForwarder::new(enabled_config());
        let payload =
            forwarder.build_payload("Lead", &CapiUserData::default(), &CapiEventOptions::default());
        let json = serde_json::to_value(&payload).unwrap();

        assert!(json["data"][0].get("event_id").is_none());
        assert!(json["data"][0]["user_data"].get("em").is_none());
        assert_eq!(json["access_token"], "EAAB-test");
        assert!(json.get("test_event_code").is_none());
    }
}
