//! Initial schema migration - creates all tables from scratch.
//!
//! The complete schema for Quartermaster:
//!
//! - `users`: authentication and roles
//! - `bases`: locations holding stock
//! - `assets`: one balance-carrying row per (base, asset name)
//! - `transactions`: purchases, transfers, assignments, expenditures
//! - `asset_movements`: append-only ledger of balance changes

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    BaseId,
}

#[derive(Iden)]
enum Bases {
    Table,
    Id,
    Name,
    Location,
}

#[derive(Iden)]
enum Assets {
    Table,
    Id,
    Name,
    Kind,
    BaseId,
    OpeningBalance,
    ClosingBalance,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    Kind,
    AssetId,
    BaseId,
    FromBaseId,
    ToBaseId,
    Quantity,
    Reason,
    OccurredAt,
}

#[derive(Iden)]
enum AssetMovements {
    Table,
    Id,
    AssetId,
    BaseId,
    Kind,
    Quantity,
    BalanceAfter,
    CreatedBy,
    Remarks,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    // No FK: a commander's base can be deleted out from
                    // under the account.
                    .col(ColumnDef::new(Users::BaseId).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Bases
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Bases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bases::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Bases::Name).string().not_null())
                    .col(ColumnDef::new(Bases::Location).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-bases-name-unique")
                    .table(Bases::Table)
                    .col(Bases::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Assets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Assets::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Assets::Name).string().not_null())
                    .col(ColumnDef::new(Assets::Kind).string().not_null())
                    .col(ColumnDef::new(Assets::BaseId).string().not_null())
                    .col(
                        ColumnDef::new(Assets::OpeningBalance)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assets::ClosingBalance)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assets-base_id")
                            .from(Assets::Table, Assets::BaseId)
                            .to(Bases::Table, Bases::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-assets-base_id-name-unique")
                    .table(Assets::Table)
                    .col(Assets::BaseId)
                    .col(Assets::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(ColumnDef::new(Transactions::AssetId).string().not_null())
                    .col(ColumnDef::new(Transactions::BaseId).string())
                    .col(ColumnDef::new(Transactions::FromBaseId).string())
                    .col(ColumnDef::new(Transactions::ToBaseId).string())
                    .col(
                        ColumnDef::new(Transactions::Quantity)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Reason).string())
                    .col(
                        ColumnDef::new(Transactions::OccurredAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-asset_id")
                            .from(Transactions::Table, Transactions::AssetId)
                            .to(Assets::Table, Assets::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-base_id")
                            .from(Transactions::Table, Transactions::BaseId)
                            .to(Bases::Table, Bases::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-from_base_id")
                            .from(Transactions::Table, Transactions::FromBaseId)
                            .to(Bases::Table, Bases::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-to_base_id")
                            .from(Transactions::Table, Transactions::ToBaseId)
                            .to(Bases::Table, Bases::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-asset_id")
                    .table(Transactions::Table)
                    .col(Transactions::AssetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-kind")
                    .table(Transactions::Table)
                    .col(Transactions::Kind)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-occurred_at")
                    .table(Transactions::Table)
                    .col(Transactions::OccurredAt)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Asset Movements
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(AssetMovements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssetMovements::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AssetMovements::AssetId).string().not_null())
                    // No FK: movements keep the base they were posted at even
                    // after that base is deleted.
                    .col(ColumnDef::new(AssetMovements::BaseId).string().not_null())
                    .col(ColumnDef::new(AssetMovements::Kind).string().not_null())
                    .col(
                        ColumnDef::new(AssetMovements::Quantity)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssetMovements::BalanceAfter)
                            .big_integer()
                            .not_null(),
                    )
                    // No FK: the recording user may be deleted later.
                    .col(
                        ColumnDef::new(AssetMovements::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssetMovements::Remarks).string())
                    .col(
                        ColumnDef::new(AssetMovements::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-asset_movements-asset_id")
                            .from(AssetMovements::Table, AssetMovements::AssetId)
                            .to(Assets::Table, Assets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-asset_movements-asset_id-created_at")
                    .table(AssetMovements::Table)
                    .col(AssetMovements::AssetId)
                    .col(AssetMovements::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-asset_movements-base_id")
                    .table(AssetMovements::Table)
                    .col(AssetMovements::BaseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(AssetMovements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
