//! Document persistence: pluggable, trait-based storage for resume documents.
//!
//! Default: `PgDocumentStore` (Postgres via sqlx).
//! `MemoryDocumentStore` has the same semantics and backs tests and `STORE_BACKEND=memory`.
//!
//! `AppState` holds an `Arc<dyn DocumentStore>`, chosen at startup via config.

pub mod memory;
pub mod postgres;
pub mod save_guard;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::login::LoginRecord;
use crate::models::resume::ResumeDocument;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use save_guard::SaveGuard;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Username '{0}' is already taken")]
    UsernameConflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage for one resume document per owner, plus the owner's login history.
///
/// `save` replaces the whole document; it is all-or-nothing and last write wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self, owner_id: Uuid) -> Result<Option<ResumeDocument>, StoreError>;

    /// Resolves a public username to its owner and document.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(Uuid, ResumeDocument)>, StoreError>;

    /// Rejects with `UsernameConflict` when the document's username belongs to another owner.
    async fn save(&self, owner_id: Uuid, doc: &ResumeDocument) -> Result<(), StoreError>;

    /// Appends a login entry, evicting the oldest so at most `limit` remain.
    async fn record_login(
        &self,
        owner_id: Uuid,
        record: LoginRecord,
        limit: usize,
    ) -> Result<(), StoreError>;

    /// Login history, newest first.
    async fn login_history(&self, owner_id: Uuid) -> Result<Vec<LoginRecord>, StoreError>;

    fn backend(&self) -> &'static str;
}
