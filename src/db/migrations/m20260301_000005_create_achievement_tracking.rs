use sea_orm::{
    DbErr, DeriveIden, DeriveMigrationName,
    sea_query::{ColumnDef, Index, Table},
};
use sea_orm_migration::{MigrationTrait, SchemaManager, async_trait::async_trait};

#[derive(DeriveIden)]
pub enum AchievementUnlocks {
    Table,
    UserId,
    AchievementId,
    AchievedAt,
}

#[derive(DeriveIden)]
pub enum AchievementChecks {
    Table,
    UserId,
    CheckedAt,
}

#[derive(DeriveIden)]
pub enum StatCache {
    Table,
    UserId,
    StatType,
    Value,
    ComputedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AchievementUnlocks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AchievementUnlocks::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(AchievementUnlocks::AchievementId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AchievementUnlocks::AchievedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(AchievementUnlocks::UserId)
                            .col(AchievementUnlocks::AchievementId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AchievementChecks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AchievementChecks::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AchievementChecks::CheckedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StatCache::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StatCache::UserId).uuid().not_null())
                    .col(ColumnDef::new(StatCache::StatType).string_len(32).not_null())
                    .col(ColumnDef::new(StatCache::Value).big_integer().not_null())
                    .col(
                        ColumnDef::new(StatCache::ComputedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(Index::create().col(StatCache::UserId).col(StatCache::StatType))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StatCache::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AchievementChecks::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AchievementUnlocks::Table).to_owned())
            .await
    }
}
