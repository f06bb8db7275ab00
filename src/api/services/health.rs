//! Health check endpoint
//!
//! Calls the repository directly instead of going through the service
//! layer: probes need a fast, dependency-free answer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use tracing::{error, trace};

use crate::repository::LeadRepository;

/// Application start time, recorded once in main
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        repository: web::Data<Arc<dyn LeadRepository>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let database_status =
            match tokio::time::timeout(Duration::from_secs(5), repository.ping()).await {
                Ok(Ok(())) => json!({
                    "status": "healthy",
                    "backend": repository.backend_name(),
                }),
                Ok(Err(e)) => {
                    error!("Repository health check failed: {}", e);
                    json!({
                        "status": "unhealthy",
                        "error": e.message(),
                        "backend": repository.backend_name(),
                    })
                }
                Err(_) => {
                    error!("Repository health check timeout");
                    json!({
                        "status": "unhealthy",
                        "error": "timeout",
                        "backend": repository.backend_name(),
                    })
                }
            };

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;
        let is_healthy = database_status["status"] == "healthy";

        let health_response = json!({
            "status": if is_healthy { "healthy" } else { "unhealthy" },
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": now.to_rfc3339(),
            "uptime": uptime_seconds,
            "checks": {
                "database": database_status,
            },
            "response_time_ms": start_time.elapsed().as_millis(),
        });

        let response_status = if is_healthy {
            actix_web::http::StatusCode::OK
        } else {
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        };

        HttpResponse::build(response_status).json(health_response)
    }
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health").route("", web::get().to(HealthService::health_check))
}
