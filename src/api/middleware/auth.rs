use actix_web::middleware::Next;
use actix_web::{
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    Error, HttpResponse,
};
use tracing::{debug, info};

use crate::config::get_config;

pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Admin API bearer-token authentication
    ///
    /// An empty configured token disables the admin API entirely: requests
    /// get a plain 404 so the surface is indistinguishable from absent.
    pub async fn admin_auth(
        req: ServiceRequest,
        next: Next<BoxBody>,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        if req.method() == actix_web::http::Method::OPTIONS {
            return Ok(req.into_response(
                HttpResponse::NoContent()
                    .insert_header(("Content-Type", "text/html; charset=utf-8"))
                    .finish(),
            ));
        }

        let admin_token = get_config().admin.token.clone();

        if admin_token.is_empty() {
            return Ok(req.into_response(
                HttpResponse::NotFound()
                    .insert_header(("Content-Type", "text/html; charset=utf-8"))
                    .body("Not Found"),
            ));
        }

        if let Some(auth_header) = req.headers().get("Authorization") {
            if let Some(auth_bytes) = auth_header.as_bytes().strip_prefix(b"Bearer ") {
                if auth_bytes == admin_token.as_bytes() {
                    debug!("Admin API authentication succeeded");
                    return next.call(req).await;
                }
            }
        }

        info!("Admin API authentication failed: token mismatch or missing Authorization header");
        Ok(req.into_response(
            HttpResponse::Unauthorized()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(serde_json::json!({
                    "code": 401,
                    "data": { "error": "Unauthorized: Invalid or missing token" }
                })),
        ))
    }
}
