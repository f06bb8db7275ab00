//! Conversions table migration
//!
//! Creates the conversions table recording one attribution signal per
//! successful lead insert, plus the event id shared with the browser pixel
//! for platform-side deduplication.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Conversions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Conversions::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Conversions::LeadId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Conversions::EventName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Conversions::EventId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Conversions::Value)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Conversions::Currency)
                            .string_len(3)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Conversions::Fbc).string_len(512).null())
                    .col(ColumnDef::new(Conversions::Gclid).string_len(512).null())
                    .col(
                        ColumnDef::new(Conversions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // lead_id index for per-lead conversion lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_conversions_lead_id")
                    .table(Conversions::Table)
                    .col(Conversions::LeadId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_conversions_created_at")
                    .table(Conversions::Table)
                    .col(Conversions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_conversions_created_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_conversions_lead_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Conversions::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Conversions {
    Table,
    Id,
    LeadId,
    EventName,
    EventId,
    Value,
    Currency,
    Fbc,
    Gclid,
    CreatedAt,
}
