//! CSV export for captured leads
//!
//! Produces the spreadsheet handed to the marketing team: Portuguese column
//! headers, dd/MM/yyyy HH:mm timestamps, and a UTF-8 BOM so Excel opens the
//! accented characters correctly.

use csv::WriterBuilder;
use serde::Serialize;

use crate::errors::{LeadgateError, Result};
use crate::repository::models::Lead;

/// UTF-8 byte order mark, required for Excel to detect the encoding
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One exported row (serialization only)
#[derive(Debug, Clone, Serialize)]
pub struct LeadCsvRow {
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Telefone")]
    pub phone: String,
    #[serde(rename = "Fonte")]
    pub source: String,
    #[serde(rename = "Meio")]
    pub medium: String,
    #[serde(rename = "Campanha")]
    pub campaign: String,
    #[serde(rename = "IP")]
    pub ip_address: String,
    #[serde(rename = "Data de Captura")]
    pub captured_at: String,
}

impl From<&Lead> for LeadCsvRow {
    fn from(lead: &Lead) -> Self {
        Self {
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            source: lead.source.clone().unwrap_or_default(),
            medium: lead.medium.clone().unwrap_or_default(),
            campaign: lead.campaign.clone().unwrap_or_default(),
            ip_address: lead.ip_address.clone().unwrap_or_default(),
            captured_at: lead.created_at.format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

/// Serialize leads into a CSV byte buffer ready for download
pub fn export_leads_csv(leads: &[Lead]) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(UTF8_BOM.len() + leads.len() * 128);
    buffer.extend_from_slice(UTF8_BOM);

    let mut writer = WriterBuilder::new().from_writer(buffer);

    for lead in leads {
        writer.serialize(LeadCsvRow::from(lead))?;
    }

    writer
        .into_inner()
        .map_err(|e| LeadgateError::csv_export(format!("Failed to flush CSV buffer: {}", e)))
}

/// File name for the export attachment, timestamped like leads_2026-03-01_14-30.csv
pub fn export_file_name(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("leads_{}.csv", now.format("%Y-%m-%d_%H-%M"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_lead() -> Lead {
        Lead {
            id: "5e6f7a8b-0000-0000-0000-000000000000".to_string(),
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            phone: "5551998535411".to_string(),
            message: None,
            source: Some("facebook".to_string()),
            medium: Some("cpc".to_string()),
            campaign: None,
            ip_address: Some("203.0.113.7".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
            created_at: chrono::Utc.with_ymd_and_hms(2026, 3, 1, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_export_starts_with_bom_and_headers() {
        let bytes = export_leads_csv(&[sample_lead()]).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Nome,Email,Telefone,Fonte,Meio,Campanha,IP,Data de Captura"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("maria@example.com"));
        assert!(row.contains("01/03/2026 14:30"));
    }

    #[test]
    fn test_export_empty_has_only_bom() {
        // Header row is only written along with the first record
        let bytes = export_leads_csv(&[]).unwrap();
        assert_eq!(bytes, UTF8_BOM);
    }

    #[test]
    fn test_export_file_name() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 3, 1, 14, 30, 0).unwrap();
        assert_eq!(export_file_name(now), "leads_2026-03-01_14-30.csv");
    }
}
