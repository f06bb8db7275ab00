//! Conversion-event forwarding endpoint
//!
//! POST /api/tracking/capi — receives events from client-side tracking code
//! and relays them to the ad platform server-side. Used when CAPI is
//! enabled as the ad-blocker-proof alternative to the browser pixel.

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::services::{CapiEventOptions, CapiForwarder, CapiUserData, ForwardOutcome};
use crate::utils::{client_ip, user_agent};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CapiUserDataBody {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fbc: Option<String>,
    pub fbp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCapiBody {
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub user_data: Option<CapiUserDataBody>,
    #[serde(default)]
    pub custom_data: Option<serde_json::Value>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub event_source_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct TrackingApi;

impl TrackingApi {
    pub async fn post_capi_event(
        req: HttpRequest,
        body: web::Json<PostCapiBody>,
        forwarder: web::Data<Arc<CapiForwarder>>,
    ) -> impl Responder {
        let body = body.into_inner();

        let Some(event_name) = body.event_name.filter(|name| !name.is_empty()) else {
            return HttpResponse::BadRequest().json(TrackingResponse {
                success: false,
                error: Some("eventName is required".to_string()),
            });
        };

        let user = body.user_data.unwrap_or_default();
        let user_data = CapiUserData {
            email: user.email,
            phone: user.phone,
            client_ip: Some(client_ip(&req)),
            user_agent: Some(user_agent(&req)),
            fbc: user.fbc,
            fbp: user.fbp,
        };

        let referer = req
            .headers()
            .get("Referer")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let options = CapiEventOptions {
            event_id: body.event_id,
            event_source_url: body.event_source_url.or(referer),
            custom_data: body.custom_data,
        };

        match forwarder.send_event(&event_name, &user_data, &options).await {
            Ok(ForwardOutcome::Sent) => HttpResponse::Ok().json(TrackingResponse {
                success: true,
                error: None,
            }),
            Ok(ForwardOutcome::NotConfigured) => {
                HttpResponse::InternalServerError().json(TrackingResponse {
                    success: false,
                    error: Some("CAPI not configured".to_string()),
                })
            }
            Err(e) => {
                error!("CAPI endpoint forwarding failed: {}", e);
                HttpResponse::InternalServerError().json(TrackingResponse {
                    success: false,
                    error: Some(e.message().to_string()),
                })
            }
        }
    }
}

/// Tracking routes under `/api`
pub fn tracking_routes() -> actix_web::Scope {
    web::scope("/tracking").route("/capi", web::post().to(TrackingApi::post_capi_event))
}
