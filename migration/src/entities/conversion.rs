//! Conversion event entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "conversions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Weak reference to leads.id (no FK, leads may be purged externally)
    pub lead_id: String,
    pub event_name: String,
    /// Shared with the browser pixel for platform-side deduplication
    pub event_id: String,
    pub value: f64,
    pub currency: String,
    /// Facebook click id in cookie format (fb.1.<millis>.<fbclid>)
    pub fbc: Option<String>,
    pub gclid: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
