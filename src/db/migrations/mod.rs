use sea_orm_migration::{MigrationTrait, MigratorTrait, async_trait::async_trait};

mod m20260301_000001_create_users;
mod m20260301_000002_create_prompts_submissions;
mod m20260301_000003_create_comments_reactions;
mod m20260301_000004_create_friendships_favorites;
mod m20260301_000005_create_achievement_tracking;
mod m20260301_000006_create_activity_push;

pub struct Migrator;

#[async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_prompts_submissions::Migration),
            Box::new(m20260301_000003_create_comments_reactions::Migration),
            Box::new(m20260301_000004_create_friendships_favorites::Migration),
            Box::new(m20260301_000005_create_achievement_tracking::Migration),
            Box::new(m20260301_000006_create_activity_push::Migration),
        ]
    }
}
