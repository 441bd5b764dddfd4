use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{CodeId, Prescription};

/// Prescription documents keyed by `codeId`, stored as the same JSON the
/// lookup endpoint returns.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredPrescription {
    pub prescription: Prescription,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
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

    /// Inserts or replaces the document for `prescription.code_id`.
    pub async fn upsert_prescription(&self, prescription: &Prescription) -> Result<()> {
        prescription
            .validate()
            .with_context(|| format!("refusing to store prescription {}", prescription.code_id))?;
        let document = serde_json::to_string(prescription)?;

        sqlx::query(
            r#"
            INSERT INTO prescriptions (code_id, document)
            VALUES (?, ?)
            ON CONFLICT(code_id) DO UPDATE SET
                document = excluded.document,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(prescription.code_id.as_str())
        .bind(document)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to store prescription {}", prescription.code_id))?;

        tracing::debug!(code_id = %prescription.code_id, "stored prescription");
        Ok(())
    }

    pub async fn find_prescription(&self, code_id: &CodeId) -> Result<Option<Prescription>> {
        Ok(self
            .find_stored_prescription(code_id)
            .await?
            .map(|stored| stored.prescription))
    }

    pub async fn find_stored_prescription(
        &self,
        code_id: &CodeId,
    ) -> Result<Option<StoredPrescription>> {
        let row = sqlx::query(
            "SELECT document, created_at, updated_at FROM prescriptions WHERE code_id = ?",
        )
        .bind(code_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let document: String = row.try_get("document")?;
        let prescription: Prescription = serde_json::from_str(&document)
            .with_context(|| format!("stored document for {code_id} is corrupt"))?;
        Ok(Some(StoredPrescription {
            prescription,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        }))
    }

    pub async fn list_code_ids(&self) -> Result<Vec<CodeId>> {
        let rows = sqlx::query("SELECT code_id FROM prescriptions ORDER BY code_id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                let raw: String = row.try_get("code_id")?;
                CodeId::parse(&raw).with_context(|| format!("invalid stored code id '{raw}'"))
            })
            .collect()
    }

    /// Returns whether a document was removed.
    pub async fn delete_prescription(&self, code_id: &CodeId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM prescriptions WHERE code_id = ?")
            .bind(code_id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
