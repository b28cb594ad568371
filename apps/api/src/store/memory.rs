use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::login::LoginRecord;
use crate::models::resume::ResumeDocument;
use crate::store::{DocumentStore, StoreError};

#[derive(Default)]
struct Inner {
    resumes: HashMap<Uuid, ResumeDocument>,
    logins: HashMap<Uuid, VecDeque<LoginRecord>>,
}

/// In-process store with the same semantics as `PgDocumentStore`. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<Inner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn load(&self, owner_id: Uuid) -> Result<Option<ResumeDocument>, StoreError> {
        Ok(self.inner.read().await.resumes.get(&owner_id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(Uuid, ResumeDocument)>, StoreError> {
        let wanted = username.trim();
        let inner = self.inner.read().await;
        Ok(inner
            .resumes
            .iter()
            .find(|(_, doc)| doc.username() == Some(wanted))
            .map(|(id, doc)| (*id, doc.clone())))
    }

    async fn save(&self, owner_id: Uuid, doc: &ResumeDocument) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(name) = doc.username() {
            let taken = inner
                .resumes
                .iter()
                .any(|(id, other)| *id != owner_id && other.username() == Some(name));
            if taken {
                return Err(StoreError::UsernameConflict(name.to_string()));
            }
        }
        inner.resumes.insert(owner_id, doc.clone());
        Ok(())
    }

    async fn record_login(
        &self,
        owner_id: Uuid,
        record: LoginRecord,
        limit: usize,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let history = inner.logins.entry(owner_id).or_default();
        history.push_back(record);
        while history.len() > limit {
            history.pop_front();
        }
        Ok(())
    }

    async fn login_history(&self, owner_id: Uuid) -> Result<Vec<LoginRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .logins
            .get(&owner_id)
            .map(|h| h.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
