//! Public lead submission endpoint
//!
//! POST /api/leads — the boundary the landing-page form talks to. Responses
//! use the `{success, message}` envelope with pt-BR user-facing messages;
//! internal failure detail never reaches the client.

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, trace};

use crate::errors::LeadgateError;
use crate::repository::DuplicateField;
use crate::services::{LeadService, SubmitLeadOutcome, SubmitLeadRequest};
use crate::utils::{client_ip, user_agent};

/// Form payload plus free-form attribution fields
#[derive(Debug, Clone, Deserialize)]
pub struct PostLeadBody {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub fbclid: Option<String>,
    pub gclid: Option<String>,
    pub fbc: Option<String>,
    pub fbp: Option<String>,
}

/// Response envelope shared by all outcomes of the form endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormResponse {
    pub success: bool,
    pub message: String,
}

pub struct LeadsApi;

impl LeadsApi {
    pub async fn post_lead(
        req: HttpRequest,
        body: web::Json<PostLeadBody>,
        lead_service: web::Data<Arc<LeadService>>,
    ) -> impl Responder {
        trace!("Received lead submission from {}", client_ip(&req));

        let body = body.into_inner();
        let request = SubmitLeadRequest {
            name: body.name,
            email: body.email,
            phone: body.phone,
            message: body.message,
            source: body.source,
            medium: body.medium,
            campaign: body.campaign,
            fbclid: body.fbclid,
            gclid: body.gclid,
            fbc: body.fbc,
            fbp: body.fbp,
            ip_address: client_ip(&req),
            user_agent: user_agent(&req),
            source_url: req
                .headers()
                .get("Referer")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string()),
        };

        match lead_service.submit(request).await {
            Ok(SubmitLeadOutcome::Created) => HttpResponse::Created().json(FormResponse {
                success: true,
                message: "Lead capturado com sucesso".to_string(),
            }),
            Ok(SubmitLeadOutcome::Duplicate(field)) => {
                let message = match field {
                    DuplicateField::Email => "Este e-mail já está cadastrado",
                    DuplicateField::Phone => "Este WhatsApp já está cadastrado",
                };
                HttpResponse::BadRequest().json(FormResponse {
                    success: false,
                    message: message.to_string(),
                })
            }
            Err(LeadgateError::Validation(message)) => {
                HttpResponse::BadRequest().json(FormResponse {
                    success: false,
                    message,
                })
            }
            Err(e) => {
                error!("Lead submission failed: {}", e);
                HttpResponse::InternalServerError().json(FormResponse {
                    success: false,
                    message: "Erro interno. Tente novamente mais tarde.".to_string(),
                })
            }
        }
    }
}

/// Public form routes under `/api`
pub fn leads_routes() -> actix_web::Scope {
    web::scope("/leads").route("", web::post().to(LeadsApi::post_lead))
}
