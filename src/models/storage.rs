use crate::models::content::ContentKind;
use crate::utils::text::TokenSet;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedContent {
    pub translation_id: u32,
    pub kind: ContentKind,
    pub region: String,
    pub language: String,
    pub title: String,
    pub word_count: usize,
    pub unique_tokens: usize,
    pub indexed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub records_indexed: usize,
    pub distinct_tokens: usize,
    pub last_update: Option<DateTime<Utc>>,
}

pub type Backend = Arc<dyn StorageBackend>;

#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Swaps in metadata and tokens of a translation in one step, dropping its
    /// previous tokens. Returns whether the translation was indexed before.
    async fn replace_content(
        &self,
        metadata: &IndexedContent,
        tokens: &TokenSet,
    ) -> Result<bool, StorageError>;
    async fn get_metadata(&self, translation_id: u32) -> Result<Option<IndexedContent>, StorageError>;
    async fn remove_content(&self, translation_id: u32) -> Result<bool, StorageError>;
    async fn search_token(&self, token: &str) -> Result<HashSet<u32>, StorageError>;
    async fn get_stats(&self) -> Result<IndexStats, StorageError>;
    async fn test_connection(&self) -> Result<(), StorageError>;
}

#[derive(Default)]
struct IndexState {
    metadata: HashMap<u32, IndexedContent>,
    postings: HashMap<String, HashSet<u32>>,
    // reverse map so removal does not scan every posting list
    tokens_by_content: HashMap<u32, HashSet<String>>,
    last_update: Option<DateTime<Utc>>,
}

impl IndexState {
    fn drop_content(&mut self, translation_id: u32) -> bool {
        let was_indexed = self.metadata.remove(&translation_id).is_some();
        let tokens = self
            .tokens_by_content
            .remove(&translation_id)
            .unwrap_or_default();

        for token in &tokens {
            if let Some(ids) = self.postings.get_mut(token) {
                ids.remove(&translation_id);
                if ids.is_empty() {
                    self.postings.remove(token);
                }
            }
        }

        was_indexed || !tokens.is_empty()
    }
}

#[derive(Default)]
pub struct InMemoryBackend {
    state: RwLock<IndexState>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Backend {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn replace_content(
        &self,
        metadata: &IndexedContent,
        tokens: &TokenSet,
    ) -> Result<bool, StorageError> {
        let translation_id = metadata.translation_id;
        let mut state = self.state.write().await;

        let replaced = state.drop_content(translation_id);
        for token in tokens {
            state
                .postings
                .entry(token.clone())
                .or_default()
                .insert(translation_id);
        }
        state
            .tokens_by_content
            .insert(translation_id, tokens.clone());
        state.metadata.insert(translation_id, metadata.clone());
        state.last_update = Some(metadata.indexed_at);

        debug!(
            "Stored translation {} ({} tokens, replaced: {})",
            translation_id,
            tokens.len(),
            replaced
        );
        Ok(replaced)
    }

    async fn get_metadata(&self, translation_id: u32) -> Result<Option<IndexedContent>, StorageError> {
        let state = self.state.read().await;
        Ok(state.metadata.get(&translation_id).cloned())
    }

    async fn remove_content(&self, translation_id: u32) -> Result<bool, StorageError> {
        let mut state = self.state.write().await;
        let removed = state.drop_content(translation_id);
        if removed {
            state.last_update = Some(Utc::now());
            debug!("Removed translation {}", translation_id);
        }
        Ok(removed)
    }

    async fn search_token(&self, token: &str) -> Result<HashSet<u32>, StorageError> {
        let state = self.state.read().await;
        Ok(state.postings.get(token).cloned().unwrap_or_default())
    }

    async fn get_stats(&self) -> Result<IndexStats, StorageError> {
        let state = self.state.read().await;
        Ok(IndexStats {
            records_indexed: state.metadata.len(),
            distinct_tokens: state.postings.len(),
            last_update: state.last_update,
        })
    }

    async fn test_connection(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
