#![allow(dead_code)]

use axum_test::TestServer;
use linkpaste::application::services::CodeAllocator;
use linkpaste::infrastructure::persistence::{Database, PoolSettings, Repositories};
use linkpaste::routes::router;
use linkpaste::state::AppState;

pub const BASE_URL: &str = "http://s.test";

/// Fresh, migrated in-memory SQLite database.
pub async fn create_test_db() -> Database {
    let db = Database::connect("sqlite::memory:", &PoolSettings::default())
        .await
        .unwrap();
    db.migrate().await.unwrap();
    db
}

pub async fn create_test_repositories() -> Repositories {
    create_test_db().await.repositories()
}

pub fn create_test_state(db: &Database) -> AppState {
    AppState::new(db.repositories(), CodeAllocator::default(), BASE_URL)
}

/// Full application router over a fresh database.
pub async fn create_test_server() -> TestServer {
    let db = create_test_db().await;
    let app = router(create_test_state(&db));
    TestServer::new(app).unwrap()
}
