//! Helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;
use uuid::Uuid;

use product_catalog::db::{DbPool, establish_connection_pool};
use product_catalog::domain::user::{NewUser, User};
use product_catalog::repository::{DieselRepository, UserWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Migrated SQLite file inside a temporary directory. The directory and the
/// WAL side files go away when the value is dropped.
pub struct TestDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let database_url = path.to_str().expect("Temporary path is not UTF-8.");

        let pool =
            establish_connection_pool(database_url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Insert an active user with a placeholder password hash.
pub fn create_user(repo: &DieselRepository, name: &str) -> User {
    let email = format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4());
    repo.create_user(&NewUser::new(name, email, "not-a-real-hash"))
        .expect("Failed to create user.")
}
