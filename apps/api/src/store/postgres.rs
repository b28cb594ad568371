use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::login::LoginRecord;
use crate::models::resume::{ResumeDocument, ResumeRow};
use crate::store::{DocumentStore, StoreError};

const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed store. One JSONB document per owner in `resumes`,
/// login entries in `login_history`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn load(&self, owner_id: Uuid) -> Result<Option<ResumeDocument>, StoreError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT owner_id, document
            FROM resumes
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.document.0))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(Uuid, ResumeDocument)>, StoreError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT owner_id, document
            FROM resumes
            WHERE username = $1
            "#,
        )
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| (r.owner_id, r.document.0)))
    }

    async fn save(&self, owner_id: Uuid, doc: &ResumeDocument) -> Result<(), StoreError> {
        let username = doc.username();

        if let Some(name) = username {
            let holder: Option<Uuid> = sqlx::query_scalar(
                "SELECT owner_id FROM resumes WHERE username = $1 AND owner_id <> $2",
            )
            .bind(name)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
            if holder.is_some() {
                return Err(StoreError::UsernameConflict(name.to_string()));
            }
        }

        // The unique index still catches a claim that races the check above.
        sqlx::query(
            r#"
            INSERT INTO resumes (owner_id, username, document)
            VALUES ($1, $2, $3)
            ON CONFLICT (owner_id) DO UPDATE
            SET username = EXCLUDED.username,
                document = EXCLUDED.document,
                updated_at = NOW()
            "#,
        )
        .bind(owner_id)
        .bind(username)
        .bind(Json(doc))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::UsernameConflict(username.unwrap_or_default().to_string())
            } else {
                StoreError::Database(e)
            }
        })?;

        info!("Saved resume for owner {owner_id}");
        Ok(())
    }

    async fn record_login(
        &self,
        owner_id: Uuid,
        record: LoginRecord,
        limit: usize,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO login_history (owner_id, ip_address, user_agent, os, recorded_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(owner_id)
        .bind(&record.ip_address)
        .bind(&record.user_agent)
        .bind(&record.os)
        .bind(record.timestamp)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            DELETE FROM login_history
            WHERE owner_id = $1
              AND id NOT IN (
                  SELECT id FROM login_history
                  WHERE owner_id = $1
                  ORDER BY recorded_at DESC, id DESC
                  LIMIT $2
              )
            "#,
        )
        .bind(owner_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn login_history(&self, owner_id: Uuid) -> Result<Vec<LoginRecord>, StoreError> {
        let rows = sqlx::query_as::<_, LoginRecord>(
            r#"
            SELECT recorded_at AS timestamp, ip_address, user_agent, os
            FROM login_history
            WHERE owner_id = $1
            ORDER BY recorded_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
