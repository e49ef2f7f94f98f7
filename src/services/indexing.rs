use crate::models::content::ContentRecord;
use crate::models::responses::{IndexResponse, IndexStatusResponse, RebuildResponse};
use crate::models::storage::{Backend, IndexedContent, StorageError};
use crate::utils::text::{TokenSet, Tokenizer};
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum IndexingError {
    #[error("Invalid record {translation_id}: {reason}")]
    InvalidRecord { translation_id: u32, reason: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub fn parse_records(json: &str) -> Result<Vec<ContentRecord>, StorageError> {
    Ok(serde_json::from_str(json)?)
}

fn validate(record: &ContentRecord) -> Result<(), IndexingError> {
    let missing = if record.region.trim().is_empty() {
        Some("region")
    } else if record.language.trim().is_empty() {
        Some("language")
    } else {
        None
    };

    match missing {
        Some(field) => Err(IndexingError::InvalidRecord {
            translation_id: record.translation_id,
            reason: format!("{} is empty", field),
        }),
        None => Ok(()),
    }
}

pub async fn index_record(
    record: &ContentRecord,
    backend: &Backend,
    tokenizer: &Tokenizer,
) -> Result<IndexResponse, IndexingError> {
    validate(record)?;

    let title_tokens = tokenizer.tokenize_text(&record.title);
    let body_tokens = tokenizer.tokenize(record.body.as_deref());
    let all_tokens: TokenSet = title_tokens.union(&body_tokens).cloned().collect();

    let word_count = tokenizer.tokens(&record.title).count()
        + record
            .body
            .as_deref()
            .map_or(0, |body| tokenizer.tokens(body).count());

    let metadata = IndexedContent {
        translation_id: record.translation_id,
        kind: record.kind,
        region: record.region.clone(),
        language: record.language.clone(),
        title: record.title.clone(),
        word_count,
        unique_tokens: all_tokens.len(),
        indexed_at: Utc::now(),
    };
    let replaced = backend.replace_content(&metadata, &all_tokens).await?;
    if replaced {
        debug!("Replaced previous entry for translation {}", record.translation_id);
    }

    Ok(IndexResponse {
        translation_id: record.translation_id,
        status: if replaced { "reindexed" } else { "indexed" }.to_string(),
        unique_tokens: all_tokens.len(),
    })
}

pub async fn remove_record(translation_id: u32, backend: &Backend) -> Result<bool, IndexingError> {
    let removed = backend.remove_content(translation_id).await?;
    if removed {
        info!("Removed translation {} from index", translation_id);
    }
    Ok(removed)
}

pub async fn rebuild_index(
    records: &[ContentRecord],
    backend: &Backend,
    tokenizer: &Tokenizer,
) -> RebuildResponse {
    let start_time = std::time::Instant::now();
    info!("Starting index rebuild over {} records", records.len());

    let mut records_processed = 0;
    let mut records_failed = 0;

    for record in records {
        match index_record(record, backend, tokenizer).await {
            Ok(_) => records_processed += 1,
            Err(e) => {
                warn!("Failed to index translation {}: {}", record.translation_id, e);
                records_failed += 1;
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        "Index rebuild complete: {} records processed, {} failed in {:?}",
        records_processed, records_failed, elapsed
    );

    RebuildResponse {
        records_processed,
        records_failed,
        elapsed_time: format!("{:.2}s", elapsed.as_secs_f64()),
    }
}

pub async fn index_status(backend: &Backend) -> Result<IndexStatusResponse, IndexingError> {
    backend.test_connection().await?;
    let stats = backend.get_stats().await?;

    Ok(IndexStatusResponse {
        records_indexed: stats.records_indexed,
        distinct_tokens: stats.distinct_tokens,
        last_update: stats.last_update.map(|at| at.to_rfc3339()),
    })
}
