//! Admin API lead export

use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use tracing::info;

use crate::repository::LeadRepository;
use crate::utils::{export_file_name, export_leads_csv};

use super::helpers::error_from_leadgate;
use super::lead_crud::filter_from_query;
use super::types::GetLeadsQuery;

/// Download all matching leads as a CSV attachment
///
/// Honors the same filters as the listing endpoint, without pagination.
pub async fn export_leads(
    query: web::Query<GetLeadsQuery>,
    repository: web::Data<Arc<dyn LeadRepository>>,
) -> impl Responder {
    let filter = match filter_from_query(&query) {
        Ok(filter) => filter,
        Err(response) => return response,
    };

    let leads = match repository.list_all_leads(&filter).await {
        Ok(leads) => leads,
        Err(e) => return error_from_leadgate(&e),
    };

    let bytes = match export_leads_csv(&leads) {
        Ok(bytes) => bytes,
        Err(e) => return error_from_leadgate(&e),
    };

    let file_name = export_file_name(chrono::Utc::now());
    info!("Admin API: exporting {} leads to {}", leads.len(), file_name);

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .append_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(bytes)
}
