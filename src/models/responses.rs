use crate::models::content::ContentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResponse {
    pub translation_id: u32,
    pub status: String,
    pub unique_tokens: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebuildResponse {
    pub records_processed: usize,
    pub records_failed: usize,
    pub elapsed_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStatusResponse {
    pub records_indexed: usize,
    pub distinct_tokens: usize,
    pub last_update: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub translation_id: u32,
    pub kind: ContentKind,
    pub region: String,
    pub language: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub tokens: Vec<String>,
    pub filters: BTreeMap<String, String>,
    pub count: usize,
    pub results: Vec<SearchHit>,
}
