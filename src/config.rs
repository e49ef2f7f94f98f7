use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const WORD_CHARS_VAR: &str = "SEARCH_WORD_CHARS";
pub const MAX_QUERY_TOKENS_VAR: &str = "SEARCH_MAX_QUERY_TOKENS";

const DEFAULT_MAX_QUERY_TOKENS: usize = 32;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordChars {
    #[default]
    Unicode,
    Ascii,
}

impl FromStr for WordChars {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unicode" => Ok(WordChars::Unicode),
            "ascii" => Ok(WordChars::Ascii),
            _ => Err(ConfigError::InvalidValue {
                key: WORD_CHARS_VAR,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for WordChars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordChars::Unicode => write!(f, "unicode"),
            WordChars::Ascii => write!(f, "ascii"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub word_chars: WordChars,
    #[serde(default = "default_max_query_tokens")]
    pub max_query_tokens: usize,
}

fn default_max_query_tokens() -> usize {
    DEFAULT_MAX_QUERY_TOKENS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            word_chars: WordChars::default(),
            max_query_tokens: DEFAULT_MAX_QUERY_TOKENS,
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let word_chars = match lookup(WORD_CHARS_VAR) {
            Some(value) => value.parse()?,
            None => WordChars::default(),
        };

        let max_query_tokens = match lookup(MAX_QUERY_TOKENS_VAR) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: MAX_QUERY_TOKENS_VAR,
                    value,
                })?,
            None => DEFAULT_MAX_QUERY_TOKENS,
        };

        Ok(Self {
            word_chars,
            max_query_tokens,
        })
    }
}
