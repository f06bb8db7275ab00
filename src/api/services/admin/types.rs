//! Admin API type definitions

use serde::{Deserialize, Serialize};

use crate::repository::models::{ConversionRecord, Lead, SourceCount};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GetLeadsQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    /// Substring match over name, email, and phone
    pub search: Option<String>,
    pub source: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LeadResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: String,
}

impl From<Lead> for LeadResponse {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id,
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            message: lead.message,
            source: lead.source,
            medium: lead.medium,
            campaign: lead.campaign,
            ip_address: lead.ip_address,
            user_agent: lead.user_agent,
            created_at: lead.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ConversionResponse {
    pub id: String,
    pub lead_id: String,
    pub event_name: String,
    pub event_id: String,
    pub value: f64,
    pub currency: String,
    pub fbc: Option<String>,
    pub gclid: Option<String>,
    pub created_at: String,
}

impl From<ConversionRecord> for ConversionResponse {
    fn from(conversion: ConversionRecord) -> Self {
        Self {
            id: conversion.id,
            lead_id: conversion.lead_id,
            event_name: conversion.event_name,
            event_id: conversion.event_id,
            value: conversion.value,
            currency: conversion.currency,
            fbc: conversion.fbc,
            gclid: conversion.gclid,
            created_at: conversion.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedResponse<T> {
    pub code: i32,
    pub data: T,
    pub pagination: PaginationInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Clone, Debug)]
pub struct StatsData {
    pub total: u64,
    pub by_source: Vec<SourceCount>,
}
