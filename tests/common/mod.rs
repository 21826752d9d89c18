use std::{sync::Arc, time::Duration};

use sketchday::{
    AppState,
    config::{Config, DatabaseConfig, FeedConfig, PushConfig, ServerConfig},
    db::{
        Database,
        entities::user::{self, UserRole},
        repositories::UserRepository,
    },
    services::notifications::{NoopDelivery, PushDelivery},
};

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_allowed_origins: vec![],
            max_concurrent_requests: 16,
        },
        database: DatabaseConfig {
            // A single pooled connection keeps every query on the same
            // in-memory database.
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(3600),
        },
        feed: FeedConfig {
            activity_window_days: 7,
        },
        push: PushConfig {
            enabled: true,
            vapid_private_key: None,
        },
    }
}

pub async fn test_state() -> AppState {
    test_state_with_push(Arc::new(NoopDelivery)).await
}

pub async fn test_state_with_push(push: Arc<dyn PushDelivery>) -> AppState {
    let config = test_config();

    let db = Database::connect(&config.database)
        .await
        .expect("database connect failed");
    db.run_migrations().await.expect("migrations failed");

    AppState {
        config: Arc::new(config),
        db: Arc::new(db),
        push,
    }
}

pub async fn create_user(state: &AppState, username: &str) -> user::Model {
    UserRepository::create(
        state.db.connection(),
        username,
        &format!("{username}@example.com"),
        UserRole::Member,
    )
    .await
    .expect("user create failed")
}
