use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Page,
    Poi,
    PushNotification,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentKind::Page => "page",
            ContentKind::Poi => "poi",
            ContentKind::PushNotification => "push_notification",
        };
        f.write_str(name)
    }
}

/// One translation of a searchable content object, as exported by the content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub translation_id: u32,
    pub kind: ContentKind,
    pub region: String,
    pub language: String,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub last_updated: DateTime<Utc>,
}
