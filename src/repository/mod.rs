use std::sync::Arc;

use tracing::error;

use crate::config::DatabaseConfig;
use crate::errors::{LeadgateError, Result};

pub mod backends;
pub mod models;

pub use models::{
    ConversionRecord, DuplicateField, Lead, LeadFilter, LeadInsertOutcome, LeadPage, LeadStats,
    NewConversion, NewLead, SourceCount,
};

#[async_trait::async_trait]
pub trait LeadRepository: Send + Sync {
    /// Insert one lead; uniqueness rejections come back as a tagged outcome
    async fn insert_lead(&self, lead: NewLead) -> Result<LeadInsertOutcome>;

    /// Record one conversion signal for an already-inserted lead
    async fn insert_conversion(&self, conversion: NewConversion) -> Result<ConversionRecord>;

    async fn get_lead(&self, id: &str) -> Result<Option<Lead>>;

    /// Newest-first page of leads matching the filter
    async fn list_leads(&self, filter: &LeadFilter, page: u64, page_size: u64)
        -> Result<LeadPage>;

    /// All leads matching the filter, newest first (export path)
    async fn list_all_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>>;

    async fn conversions_for_lead(&self, lead_id: &str) -> Result<Vec<ConversionRecord>>;

    async fn stats(&self) -> Result<LeadStats>;

    /// Connectivity check for the health endpoint
    async fn ping(&self) -> Result<()>;

    fn backend_name(&self) -> &str;
}

pub struct RepositoryFactory;

impl RepositoryFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn LeadRepository>> {
        let backend = config.backend.as_str();

        match backend {
            "sqlite" | "mysql" | "postgres" | "mariadb" => {
                let repository =
                    backends::sea_orm::SeaOrmRepository::new(&config.database_url, backend)
                        .await?;
                Ok(Arc::new(repository) as Arc<dyn LeadRepository>)
            }
            _ => {
                error!("Unknown repository backend: {}", backend);
                Err(LeadgateError::database_config(format!(
                    "Unknown repository backend: {}. Supported: sqlite, mysql, postgres, mariadb",
                    backend
                )))
            }
        }
    }
}
