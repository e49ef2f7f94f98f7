pub mod config;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use config::{ConfigError, SearchConfig, WordChars};
pub use models::content::{ContentKind, ContentRecord};
pub use models::storage::{Backend, InMemoryBackend, IndexStats, StorageBackend, StorageError};
pub use utils::text::{tokenize, tokenize_text, TokenSet, Tokenizer};
