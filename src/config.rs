/// Report configuration.
///
/// Every field has a default, so an empty JSON object is a valid config.
use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::StatsError;
use crate::leaderboard::{
    DEFAULT_AUTHORS_LIMIT, DEFAULT_MESSAGES_LIMIT, DEFAULT_REACTIONS_LIMIT, EMPTY_TEXT_PLACEHOLDER,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsConfig {
    pub top_authors_limit: usize,
    pub top_messages_limit: usize,
    pub top_reactions_limit: usize,
    pub empty_text_placeholder: String,
    /// Zone for hour/weekday/week buckets. `None` uses the system local zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_authors_limit: DEFAULT_AUTHORS_LIMIT,
            top_messages_limit: DEFAULT_MESSAGES_LIMIT,
            top_reactions_limit: DEFAULT_REACTIONS_LIMIT,
            empty_text_placeholder: EMPTY_TEXT_PLACEHOLDER.to_string(),
            utc_offset_minutes: None,
        }
    }
}

impl StatsConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: StatsConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from: {}", path.display()))?;

        // Reject bad offsets at load time
        config.fixed_offset()?;

        Ok(config)
    }

    /// The configured fixed offset, or `None` for the system local zone.
    pub fn fixed_offset(&self) -> std::result::Result<Option<FixedOffset>, StatsError> {
        self.utc_offset_minutes
            .map(|minutes| {
                minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .ok_or(StatsError::InvalidUtcOffset(minutes))
            })
            .transpose()
    }
}
