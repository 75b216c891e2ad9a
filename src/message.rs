use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A normalized, human-authored chat message.
///
/// Produced by [`crate::normalize::parse_messages`] and read (never mutated)
/// by every report builder.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParsedMessage {
    pub id: i64,
    /// Display name as of the sender's most recent message in the dataset.
    pub from: String,
    /// Stable sender identifier, always `user`-prefixed.
    pub from_id: String,
    pub text: String,
    /// Date exactly as it appeared in the export.
    pub date: String,
    /// UTC instant of `date`, `YYYY-MM-DDTHH:MM:SS.sssZ`.
    #[serde(rename = "fullDateISO")]
    pub full_date_iso: String,
    pub reactions: IndexMap<String, u64>,
    /// Sum of `reactions` values.
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}
