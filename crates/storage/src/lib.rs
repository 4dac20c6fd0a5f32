use anyhow::{anyhow, Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::{
    domain::{Model, ModelId, ModelType},
    protocol::CreateModelRequest,
};

const MODEL_COLUMNS: &str =
    "id, name, description, model_type, github_link, article_link, submitter_linkedin";

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
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

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn insert_model(&self, request: &CreateModelRequest) -> Result<ModelId> {
        let rec = sqlx::query(
            "INSERT INTO models (name, description, model_type, github_link, article_link, submitter_linkedin)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.model_type.tag())
        .bind(&request.github_link)
        .bind(request.article_link.as_deref())
        .bind(&request.submitter_linkedin)
        .fetch_one(&self.pool)
        .await
        .context("failed to insert model")?;
        Ok(ModelId(rec.get::<i64, _>(0)))
    }

    /// All entries in insertion order.
    pub async fn list_models(&self) -> Result<Vec<Model>> {
        let rows = sqlx::query(&format!("SELECT {MODEL_COLUMNS} FROM models ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .context("failed to list models")?;
        rows.iter().map(model_from_row).collect()
    }

    pub async fn list_models_by_type(&self, model_type: ModelType) -> Result<Vec<Model>> {
        let rows = sqlx::query(&format!(
            "SELECT {MODEL_COLUMNS} FROM models WHERE model_type = ? ORDER BY id ASC"
        ))
        .bind(model_type.tag())
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("failed to list models of type {model_type}"))?;
        rows.iter().map(model_from_row).collect()
    }

    pub async fn load_model(&self, model_id: ModelId) -> Result<Option<Model>> {
        let row = sqlx::query(&format!("SELECT {MODEL_COLUMNS} FROM models WHERE id = ?"))
            .bind(model_id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(model_from_row).transpose()
    }

    /// Returns `false` when no row carried the id.
    pub async fn delete_model(&self, model_id: ModelId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM models WHERE id = ?")
            .bind(model_id.0)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete model {model_id}"))?;
        Ok(result.rows_affected() > 0)
    }
}

fn model_from_row(row: &SqliteRow) -> Result<Model> {
    let raw_type: String = row.try_get("model_type")?;
    let model_type = raw_type
        .parse::<ModelType>()
        .map_err(|err| anyhow!("corrupt model row: {err}"))?;
    Ok(Model {
        id: ModelId(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        model_type,
        github_link: row.try_get("github_link")?,
        article_link: row.try_get("article_link")?,
        submitter_linkedin: row.try_get("submitter_linkedin")?,
    })
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
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
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
