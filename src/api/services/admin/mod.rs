//! Admin API: lead listing, export, and statistics

mod error_code;
mod export;
mod helpers;
mod lead_crud;
mod routes;
mod types;

pub use error_code::ErrorCode;
pub use routes::admin_v1_routes;
pub use types::{
    ApiResponse, ConversionResponse, GetLeadsQuery, LeadResponse, PaginatedResponse,
    PaginationInfo, StatsData,
};
