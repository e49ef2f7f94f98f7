use crate::config::SearchConfig;
use crate::models::content::ContentKind;
use crate::models::responses::{SearchHit, SearchResponse};
use crate::models::storage::{Backend, IndexedContent, StorageError};
use crate::utils::text::Tokenizer;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Query has {count} distinct tokens, limit is {limit}")]
    QueryTooLong { count: usize, limit: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub region: Option<String>,
    pub language: Option<String>,
    pub kind: Option<ContentKind>,
}

impl SearchParams {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }
}

async fn get_ids_for_tokens(
    tokens: &[String],
    backend: &Backend,
) -> Result<HashSet<u32>, StorageError> {
    let mut intersection: Option<HashSet<u32>> = None;

    for token in tokens {
        let ids = backend.search_token(token).await?;
        let narrowed = match intersection {
            Some(current) => current.intersection(&ids).copied().collect(),
            None => ids,
        };
        if narrowed.is_empty() {
            return Ok(HashSet::new());
        }
        intersection = Some(narrowed);
    }

    Ok(intersection.unwrap_or_default())
}

async fn get_metadata_batch(ids: &HashSet<u32>, backend: &Backend) -> Vec<IndexedContent> {
    let mut metadata_list = Vec::with_capacity(ids.len());

    for &translation_id in ids {
        match backend.get_metadata(translation_id).await {
            Ok(Some(metadata)) => metadata_list.push(metadata),
            Ok(None) => {
                error!("No metadata found for translation {}", translation_id);
            }
            Err(e) => {
                error!("Failed to get metadata for translation {}: {}", translation_id, e);
            }
        }
    }

    metadata_list
}

fn matches_filters(content: &IndexedContent, params: &SearchParams) -> bool {
    params.region.as_ref().map_or(true, |region| &content.region == region)
        && params
            .language
            .as_ref()
            .map_or(true, |language| &content.language == language)
        && params.kind.map_or(true, |kind| content.kind == kind)
}

fn build_filters_map(params: &SearchParams) -> BTreeMap<String, String> {
    let mut filters = BTreeMap::new();

    if let Some(ref region) = params.region {
        filters.insert("region".to_string(), region.clone());
    }
    if let Some(ref language) = params.language {
        filters.insert("language".to_string(), language.clone());
    }
    if let Some(kind) = params.kind {
        filters.insert("kind".to_string(), kind.to_string());
    }

    filters
}

/// Finds indexed content containing every token of `params.q`. The query is
/// tokenized in `config.word_chars` mode, which must be the mode the content
/// was indexed with; matching is exact and case-sensitive.
pub async fn search(
    params: &SearchParams,
    backend: &Backend,
    config: &SearchConfig,
) -> Result<SearchResponse, SearchError> {
    info!("Search query: {:?}", params);

    let tokenizer = Tokenizer::from_config(config);
    let mut tokens: Vec<String> = tokenizer.tokenize_text(&params.q).into_iter().collect();
    tokens.sort_unstable();

    if tokens.len() > config.max_query_tokens {
        return Err(SearchError::QueryTooLong {
            count: tokens.len(),
            limit: config.max_query_tokens,
        });
    }

    let filters = build_filters_map(params);
    if tokens.is_empty() {
        return Ok(SearchResponse {
            query: params.q.clone(),
            tokens,
            filters,
            count: 0,
            results: Vec::new(),
        });
    }

    let ids = get_ids_for_tokens(&tokens, backend).await?;

    let mut results: Vec<SearchHit> = get_metadata_batch(&ids, backend)
        .await
        .into_iter()
        .filter(|content| matches_filters(content, params))
        .map(|content| SearchHit {
            translation_id: content.translation_id,
            kind: content.kind,
            region: content.region,
            language: content.language,
            title: content.title,
        })
        .collect();

    results.sort_by_key(|hit| hit.translation_id);

    Ok(SearchResponse {
        query: params.q.clone(),
        tokens,
        filters,
        count: results.len(),
        results,
    })
}
