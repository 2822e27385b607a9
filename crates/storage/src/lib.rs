#![warn(clippy::pedantic)]

use std::{fs, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use liftlog_domain as domain;
use log::info;
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

mod exercise;
mod workout;

#[cfg(test)]
mod tests;

/// SQLite-backed implementation of the domain repositories.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        info!("database initialized at {database_url}");

        Ok(Self { pool })
    }

    /// An in-memory database for tests. A single pool connection is used so
    /// that every statement sees the same database; additional connections
    /// would each open their own empty one.
    pub async fn in_memory() -> Result<Self> {
        let connect_options =
            SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// Inserts the catalog entries that are not yet present as global
    /// exercises. Returns the number of inserted rows; calling this again
    /// inserts nothing.
    pub async fn seed_catalog(&self) -> Result<u64, domain::CreateError> {
        let mut inserted = 0;
        for exercise in domain::catalog::EXERCISES {
            inserted += sqlx::query(
                "INSERT INTO exercises (name, video_url, is_custom) VALUES (?1, ?2, 0)
                 ON CONFLICT (name) DO NOTHING",
            )
            .bind(exercise.name)
            .bind(exercise.video_url)
            .execute(&self.pool)
            .await
            .map_err(create_error)?
            .rows_affected();
        }

        info!("seeded {inserted} catalog exercises");

        Ok(inserted)
    }

    /// Inserts an exercise row. Global when `owner` is absent, custom and
    /// visible only to `owner` otherwise. Used by seeding and by tests;
    /// exercise names are unique.
    pub async fn create_exercise(
        &self,
        name: &domain::Name,
        video_url: Option<&str>,
        owner: Option<&domain::UserID>,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let id = sqlx::query(
            "INSERT INTO exercises (name, video_url, is_custom, user_id) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name.as_ref())
        .bind(video_url)
        .bind(owner.is_some())
        .bind(owner.map(AsRef::as_ref))
        .execute(&self.pool)
        .await
        .map_err(create_error)?
        .last_insert_rowid();

        Ok(domain::Exercise {
            id: id.into(),
            name: name.clone(),
            video_url: video_url.map(str::to_string),
            is_custom: owner.is_some(),
            user_id: owner.cloned(),
        })
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path == ":memory:" {
        return None;
    }

    Some(PathBuf::from(path))
}

fn storage_error(error: sqlx::Error) -> domain::StorageError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            domain::StorageError::NoConnection
        }
        error => domain::StorageError::Other(Box::new(error)),
    }
}

pub(crate) fn read_error(error: sqlx::Error) -> domain::ReadError {
    domain::ReadError::Storage(storage_error(error))
}

pub(crate) fn create_error(error: sqlx::Error) -> domain::CreateError {
    if let sqlx::Error::Database(ref db) = error {
        if db.is_unique_violation() {
            return domain::CreateError::Conflict;
        }
    }
    domain::CreateError::Storage(storage_error(error))
}

pub(crate) fn decode_error<E: std::error::Error + 'static>(error: E) -> domain::ReadError {
    domain::ReadError::Other(Box::new(error))
}
