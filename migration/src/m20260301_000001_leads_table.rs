//! Leads table migration
//!
//! Creates the leads table for captured form submissions, including:
//! - Contact fields (name, email, phone)
//! - Attribution fields (source, medium, campaign)
//! - Request metadata (ip_address, user_agent)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leads::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Leads::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Leads::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Leads::Phone).string_len(15).not_null())
                    .col(ColumnDef::new(Leads::Message).text().null())
                    .col(ColumnDef::new(Leads::Source).string_len(255).null())
                    .col(ColumnDef::new(Leads::Medium).string_len(255).null())
                    .col(ColumnDef::new(Leads::Campaign).string_len(255).null())
                    .col(ColumnDef::new(Leads::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(Leads::UserAgent).text().null())
                    .col(
                        ColumnDef::new(Leads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique indexes back the duplicate-submission detection
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leads_email")
                    .table(Leads::Table)
                    .col(Leads::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leads_phone")
                    .table(Leads::Table)
                    .col(Leads::Phone)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // created_at index for newest-first listing and export
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leads_created_at")
                    .table(Leads::Table)
                    .col(Leads::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // source index for per-source stats
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leads_source")
                    .table(Leads::Table)
                    .col(Leads::Source)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_leads_source").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_leads_created_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_leads_phone").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_leads_email").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Message,
    Source,
    Medium,
    Campaign,
    IpAddress,
    UserAgent,
    CreatedAt,
}
