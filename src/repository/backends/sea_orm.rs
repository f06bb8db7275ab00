use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectOptions, Database, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::{info, warn};

use crate::errors::{LeadgateError, Result};
use crate::repository::models::{
    ConversionRecord, DuplicateField, Lead, LeadFilter, LeadInsertOutcome, LeadPage, LeadStats,
    NewConversion, NewLead, SourceCount,
};
use crate::repository::LeadRepository;

use migration::{
    entities::{conversion, lead},
    Migrator, MigratorTrait,
};

#[derive(Clone)]
pub struct SeaOrmRepository {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmRepository {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(LeadgateError::database_config("DATABASE_URL is not set"));
        }

        let db = if backend_name == "sqlite" {
            Self::connect_sqlite(database_url).await?
        } else {
            Self::connect_generic(database_url, backend_name).await?
        };

        let repository = SeaOrmRepository {
            db,
            backend_name: backend_name.to_string(),
        };

        repository.run_migrations().await?;

        warn!(
            "{} repository initialized.",
            repository.backend_name.to_uppercase()
        );
        Ok(repository)
    }

    /// Connect to SQLite (auto-create, WAL, pragma tuning)
    async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
        use sea_orm::sqlx::SqlitePool;
        use sea_orm::SqlxSqliteConnector;
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                LeadgateError::database_config(format!("Failed to parse SQLite URL: {}", e))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
            LeadgateError::database_connection(format!("Failed to connect to SQLite: {}", e))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Connect to MySQL/PostgreSQL with pool tuning
    async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(20)
            .min_connections(2)
            .connect_timeout(std::time::Duration::from_secs(8))
            .acquire_timeout(std::time::Duration::from_secs(8))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            LeadgateError::database_connection(format!(
                "Failed to connect to {} database: {}",
                backend_name.to_uppercase(),
                e
            ))
        })
    }

    async fn run_migrations(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| LeadgateError::database_operation(format!("Migration failed: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    fn model_to_lead(model: lead::Model) -> Lead {
        Lead {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            message: model.message,
            source: model.source,
            medium: model.medium,
            campaign: model.campaign,
            ip_address: model.ip_address,
            user_agent: model.user_agent,
            created_at: model.created_at,
        }
    }

    fn model_to_conversion(model: conversion::Model) -> ConversionRecord {
        ConversionRecord {
            id: model.id,
            lead_id: model.lead_id,
            event_name: model.event_name,
            event_id: model.event_id,
            value: model.value,
            currency: model.currency,
            fbc: model.fbc,
            gclid: model.gclid,
            created_at: model.created_at,
        }
    }

    /// Unique constraint rejection, recognized by driver error code
    fn is_unique_violation(err: &sea_orm::sqlx::Error) -> bool {
        use sea_orm::sqlx::Error;

        match err {
            Error::Database(db_err) => {
                let code = db_err.code();
                // SQLite: SQLITE_CONSTRAINT_UNIQUE (code 2067)
                // MySQL: ER_DUP_ENTRY (code 1062)
                // PostgreSQL: unique_violation (code 23505)
                code.as_ref()
                    .map(|c| c == "2067" || c == "1062" || c == "23505")
                    .unwrap_or(false)
            }
            _ => false,
        }
    }

    /// Decide which unique column collided after a rejected insert
    ///
    /// Driver error messages name constraints inconsistently across backends,
    /// so look the email up instead: if a row with this email exists the
    /// email collided, otherwise it was the phone.
    async fn classify_duplicate(&self, email: &str) -> Result<DuplicateField> {
        let existing = lead::Entity::find()
            .filter(lead::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(if existing.is_some() {
            DuplicateField::Email
        } else {
            DuplicateField::Phone
        })
    }

    fn apply_filter(
        query: sea_orm::Select<lead::Entity>,
        filter: &LeadFilter,
    ) -> sea_orm::Select<lead::Entity> {
        let mut query = query;

        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(lead::Column::Name.contains(search))
                    .add(lead::Column::Email.contains(search))
                    .add(lead::Column::Phone.contains(search)),
            );
        }

        if let Some(source) = &filter.source {
            query = query.filter(lead::Column::Source.eq(source));
        }

        if let Some(after) = filter.created_after {
            query = query.filter(lead::Column::CreatedAt.gte(after));
        }

        if let Some(before) = filter.created_before {
            query = query.filter(lead::Column::CreatedAt.lte(before));
        }

        query
    }
}

#[async_trait]
impl LeadRepository for SeaOrmRepository {
    async fn insert_lead(&self, new_lead: NewLead) -> Result<LeadInsertOutcome> {
        let email = new_lead.email.clone();
        let model = lead::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(new_lead.name),
            email: Set(new_lead.email),
            phone: Set(new_lead.phone),
            message: Set(new_lead.message),
            source: Set(new_lead.source),
            medium: Set(new_lead.medium),
            campaign: Set(new_lead.campaign),
            ip_address: Set(new_lead.ip_address),
            user_agent: Set(new_lead.user_agent),
            created_at: Set(Utc::now()),
        };

        match model.insert(&self.db).await {
            Ok(inserted) => {
                info!("Lead inserted: {}", inserted.id);
                Ok(LeadInsertOutcome::Inserted(Self::model_to_lead(inserted)))
            }
            Err(sea_orm::DbErr::Exec(sea_orm::RuntimeErr::SqlxError(sqlx_err)))
                if Self::is_unique_violation(&sqlx_err) =>
            {
                let field = self.classify_duplicate(&email).await?;
                info!("Duplicate lead rejected on {}", field);
                Ok(LeadInsertOutcome::Duplicate(field))
            }
            Err(e) => Err(LeadgateError::database_operation(format!(
                "Failed to insert lead: {}",
                e
            ))),
        }
    }

    async fn insert_conversion(&self, new_conversion: NewConversion) -> Result<ConversionRecord> {
        let model = conversion::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            lead_id: Set(new_conversion.lead_id),
            event_name: Set(new_conversion.event_name),
            event_id: Set(new_conversion.event_id),
            value: Set(new_conversion.value),
            currency: Set(new_conversion.currency),
            fbc: Set(new_conversion.fbc),
            gclid: Set(new_conversion.gclid),
            created_at: Set(Utc::now()),
        };

        let inserted = model.insert(&self.db).await.map_err(|e| {
            LeadgateError::database_operation(format!("Failed to insert conversion: {}", e))
        })?;

        Ok(Self::model_to_conversion(inserted))
    }

    async fn get_lead(&self, id: &str) -> Result<Option<Lead>> {
        let model = lead::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Self::model_to_lead))
    }

    async fn list_leads(
        &self,
        filter: &LeadFilter,
        page: u64,
        page_size: u64,
    ) -> Result<LeadPage> {
        let query = Self::apply_filter(lead::Entity::find(), filter)
            .order_by_desc(lead::Column::CreatedAt);

        let paginator = query.paginate(&self.db, page_size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(LeadPage {
            leads: models.into_iter().map(Self::model_to_lead).collect(),
            total,
        })
    }

    async fn list_all_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>> {
        let models = Self::apply_filter(lead::Entity::find(), filter)
            .order_by_desc(lead::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::model_to_lead).collect())
    }

    async fn conversions_for_lead(&self, lead_id: &str) -> Result<Vec<ConversionRecord>> {
        let models = conversion::Entity::find()
            .filter(conversion::Column::LeadId.eq(lead_id))
            .order_by_desc(conversion::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::model_to_conversion).collect())
    }

    async fn stats(&self) -> Result<LeadStats> {
        let total = lead::Entity::find().count(&self.db).await?;

        let rows: Vec<(Option<String>, i64)> = lead::Entity::find()
            .select_only()
            .column(lead::Column::Source)
            .column_as(lead::Column::Id.count(), "count")
            .group_by(lead::Column::Source)
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut by_source: Vec<SourceCount> = rows
            .into_iter()
            .map(|(source, count)| SourceCount {
                source,
                count: count.max(0) as u64,
            })
            .collect();
        by_source.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(LeadStats { total, by_source })
    }

    async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| LeadgateError::database_connection(e.to_string()))
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
