//! Lead entity for captured form submissions

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Canonical digits-only phone, country code included
    #[sea_orm(unique)]
    pub phone: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    /// Traffic source (utm_source param or "organico" for direct traffic)
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub ip_address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub user_agent: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
