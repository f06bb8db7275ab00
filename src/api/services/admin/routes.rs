//! Admin API route configuration

use actix_web::web;

use super::export::export_leads;
use super::lead_crud::{get_all_leads, get_lead, get_lead_conversions, get_stats};

/// Lead management routes `/leads`
///
/// - GET /leads - list leads (paginated, filterable)
/// - GET /leads/export - CSV export (must be before /{id})
/// - GET /leads/{id}/conversions - conversion records for one lead
/// - GET /leads/{id} - single lead
pub fn leads_routes() -> actix_web::Scope {
    web::scope("/leads")
        .route("", web::get().to(get_all_leads))
        // Export must be registered before /{id}
        .route("/export", web::get().to(export_leads))
        .route("/{id}/conversions", web::get().to(get_lead_conversions))
        .route("/{id}", web::get().to(get_lead))
}

/// Statistics routes `/stats`
pub fn stats_routes() -> actix_web::Scope {
    web::scope("/stats").route("", web::get().to(get_stats))
}

/// Admin API v1 routes
pub fn admin_v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(leads_routes())
        .service(stats_routes())
}
