//! Admin API lead read operations

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use tracing::{info, trace};

use crate::repository::{LeadFilter, LeadRepository};

use super::error_code::ErrorCode;
use super::helpers::{error_from_leadgate, error_response, parse_rfc3339, success_response};
use super::types::{
    ConversionResponse, GetLeadsQuery, LeadResponse, PaginatedResponse, PaginationInfo, StatsData,
};

/// Translate query parameters into a repository filter
///
/// Returns an error response for malformed date filters instead of
/// silently dropping them.
pub(super) fn filter_from_query(query: &GetLeadsQuery) -> Result<LeadFilter, HttpResponse> {
    let created_after = match &query.created_after {
        Some(value) => Some(parse_rfc3339(value).map_err(|msg| {
            error_response(StatusCode::BAD_REQUEST, ErrorCode::InvalidDateFormat, &msg)
        })?),
        None => None,
    };

    let created_before = match &query.created_before {
        Some(value) => Some(parse_rfc3339(value).map_err(|msg| {
            error_response(StatusCode::BAD_REQUEST, ErrorCode::InvalidDateFormat, &msg)
        })?),
        None => None,
    };

    Ok(LeadFilter {
        search: query.search.clone().filter(|s| !s.is_empty()),
        source: query.source.clone().filter(|s| !s.is_empty()),
        created_after,
        created_before,
    })
}

/// List leads with pagination and filters
pub async fn get_all_leads(
    query: web::Query<GetLeadsQuery>,
    repository: web::Data<Arc<dyn LeadRepository>>,
) -> impl Responder {
    trace!("Admin API: list leads with filters: {:?}", query);

    let filter = match filter_from_query(&query) {
        Ok(filter) => filter,
        Err(response) => return response,
    };

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(20).clamp(1, 100);

    let lead_page = match repository.list_leads(&filter, page, page_size).await {
        Ok(lead_page) => lead_page,
        Err(e) => return error_from_leadgate(&e),
    };

    let total = lead_page.total;
    let total_pages = total.div_ceil(page_size);
    let leads: Vec<LeadResponse> = lead_page.leads.into_iter().map(LeadResponse::from).collect();

    info!(
        "Admin API: returning {} leads (page {} of {}, total: {})",
        leads.len(),
        page,
        total_pages,
        total
    );

    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(PaginatedResponse {
            code: 0,
            data: leads,
            pagination: PaginationInfo {
                page,
                page_size,
                total,
                total_pages,
            },
        })
}

/// Get a single lead by id
pub async fn get_lead(
    path: web::Path<String>,
    repository: web::Data<Arc<dyn LeadRepository>>,
) -> impl Responder {
    let id = path.into_inner();

    match repository.get_lead(&id).await {
        Ok(Some(lead)) => success_response(LeadResponse::from(lead)),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::LeadNotFound,
            &format!("Lead not found: {}", id),
        ),
        Err(e) => error_from_leadgate(&e),
    }
}

/// Conversion records for one lead
pub async fn get_lead_conversions(
    path: web::Path<String>,
    repository: web::Data<Arc<dyn LeadRepository>>,
) -> impl Responder {
    let id = path.into_inner();

    match repository.conversions_for_lead(&id).await {
        Ok(conversions) => {
            let conversions: Vec<ConversionResponse> =
                conversions.into_iter().map(ConversionResponse::from).collect();
            success_response(conversions)
        }
        Err(e) => error_from_leadgate(&e),
    }
}

/// Aggregate lead statistics
pub async fn get_stats(repository: web::Data<Arc<dyn LeadRepository>>) -> impl Responder {
    match repository.stats().await {
        Ok(stats) => success_response(StatsData {
            total: stats.total,
            by_source: stats.by_source,
        }),
        Err(e) => error_from_leadgate(&e),
    }
}
