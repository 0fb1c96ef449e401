//! PostgreSQL storage implementation.
//!
//! Production storage backend. Schema is created with inline
//! `CREATE TABLE IF NOT EXISTS` migrations at store construction, so the
//! server needs no external migration tooling.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{PipelineError, Result};
use crate::traits::store::{DocumentStore, InsightStore};
use crate::types::{Document, DocumentStatus, Insight, NewDocument, NewInsight};

/// PostgreSQL-based document and insight store.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store with the given connection URL.
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(PipelineError::storage)?;
        Self::from_pool(pool).await
    }

    /// Create a store from an existing connection pool.
    ///
    /// Use this when the application already has a `PgPool` (e.g., the
    /// server's); it avoids duplicate connections.
    pub async fn from_pool(pool: PgPool) -> Result<Self> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id UUID PRIMARY KEY,
                owner_id UUID NOT NULL,
                name TEXT NOT NULL,
                source_type TEXT NOT NULL,
                object_path TEXT,
                content TEXT,
                status TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_documents_owner_created
                ON documents (owner_id, created_at DESC)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS insights (
                id UUID PRIMARY KEY,
                owner_id UUID NOT NULL,
                category TEXT NOT NULL,
                title TEXT NOT NULL,
                summary TEXT NOT NULL,
                sources TEXT[] NOT NULL,
                confidence INTEGER NOT NULL,
                document_ids UUID[] NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_insights_owner_created
                ON insights (owner_id, created_at DESC)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    source_type: String,
    object_path: Option<String>,
    content: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = PipelineError;

    fn try_from(row: DocumentRow) -> Result<Self> {
        Ok(Document {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            source_type: row
                .source_type
                .parse()
                .map_err(|e: String| PipelineError::Storage(e.into()))?,
            object_path: row.object_path,
            content: row.content,
            status: row
                .status
                .parse()
                .map_err(|e: String| PipelineError::Storage(e.into()))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct InsightRow {
    id: Uuid,
    owner_id: Uuid,
    category: String,
    title: String,
    summary: String,
    sources: Vec<String>,
    confidence: i32,
    document_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<InsightRow> for Insight {
    type Error = PipelineError;

    fn try_from(row: InsightRow) -> Result<Self> {
        Ok(Insight {
            id: row.id,
            owner_id: row.owner_id,
            category: row
                .category
                .parse()
                .map_err(|e: String| PipelineError::Storage(e.into()))?,
            title: row.title,
            summary: row.summary,
            sources: row.sources,
            confidence: row.confidence,
            document_ids: row.document_ids,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn insert_document(&self, new: NewDocument) -> Result<Document> {
        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4(),
            owner_id: new.owner_id,
            name: new.name,
            source_type: new.source_type,
            object_path: new.object_path,
            content: new.content,
            status: new.status,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO documents
                (id, owner_id, name, source_type, object_path, content, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(document.id)
        .bind(document.owner_id)
        .bind(&document.name)
        .bind(document.source_type.as_str())
        .bind(&document.object_path)
        .bind(&document.content)
        .bind(document.status.as_str())
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        Ok(document)
    }

    async fn get_document(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Document>> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, name, source_type, object_path, content, status, created_at, updated_at
            FROM documents
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        row.map(Document::try_from).transpose()
    }

    async fn list_documents(&self, owner_id: Uuid) -> Result<Vec<Document>> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, name, source_type, object_path, content, status, created_at, updated_at
            FROM documents
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        rows.into_iter().map(Document::try_from).collect()
    }

    async fn update_status(&self, id: Uuid, status: DocumentStatus) -> Result<()> {
        sqlx::query("UPDATE documents SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(PipelineError::storage)?;
        Ok(())
    }

    async fn count_documents(&self, owner_id: Uuid) -> Result<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM documents WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(PipelineError::storage)?;
        Ok(count as usize)
    }
}

#[async_trait]
impl InsightStore for PostgresStore {
    async fn insert_insights(&self, batch: Vec<NewInsight>) -> Result<Vec<Insight>> {
        let mut tx = self.pool.begin().await.map_err(PipelineError::storage)?;

        let mut inserted = Vec::with_capacity(batch.len());
        for new in batch {
            let insight = Insight {
                id: Uuid::new_v4(),
                owner_id: new.owner_id,
                category: new.category,
                title: new.title,
                summary: new.summary,
                sources: new.sources,
                confidence: new.confidence,
                document_ids: new.document_ids,
                created_at: Utc::now(),
            };

            sqlx::query(
                r#"
                INSERT INTO insights
                    (id, owner_id, category, title, summary, sources, confidence, document_ids, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(insight.id)
            .bind(insight.owner_id)
            .bind(insight.category.as_str())
            .bind(&insight.title)
            .bind(&insight.summary)
            .bind(&insight.sources)
            .bind(insight.confidence)
            .bind(&insight.document_ids)
            .bind(insight.created_at)
            .execute(&mut *tx)
            .await
            .map_err(PipelineError::storage)?;

            inserted.push(insight);
        }

        tx.commit().await.map_err(PipelineError::storage)?;
        Ok(inserted)
    }

    async fn list_insights(&self, owner_id: Uuid) -> Result<Vec<Insight>> {
        let rows: Vec<InsightRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, category, title, summary, sources, confidence, document_ids, created_at
            FROM insights
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(PipelineError::storage)?;

        rows.into_iter().map(Insight::try_from).collect()
    }

    async fn count_insights(&self, owner_id: Uuid) -> Result<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM insights WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(PipelineError::storage)?;
        Ok(count as usize)
    }
}
