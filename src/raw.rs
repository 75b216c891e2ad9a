/// Raw export records as they arrive from a chat export.
///
/// Every field is optional. Fields whose shape varies between export
/// versions are modelled as untagged enums with a catch-all `Other` arm so
/// that an unexpected shape degrades to an empty value instead of failing
/// deserialization of the whole record. Scalar fields of the wrong JSON type
/// read as absent, except that numeric strings are accepted for ids.
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawMessage {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub from_id: Option<String>,
    #[serde(default)]
    pub text: Option<TextValue>,
    #[serde(default)]
    pub reactions: Option<ReactionsValue>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub reply_to_message_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub forwarded_from: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub saved_from: Option<String>,
}

/// Message body: a plain string or a list of formatted fragments.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TextValue {
    Plain(String),
    Fragments(Vec<TextFragment>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TextFragment {
    Plain(String),
    /// Formatted span (link, bold, mention...); only its text matters here.
    Entity {
        #[serde(default, deserialize_with = "lenient_string")]
        text: Option<String>,
    },
    Other(serde_json::Value),
}

/// Reactions: either per-emoji entries or an already flat emoji → count map.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ReactionsValue {
    Entries(Vec<ReactionEntry>),
    Counts(#[serde(deserialize_with = "lenient_counts")] IndexMap<String, u64>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReactionEntry {
    /// Absent for custom (sticker-pack) reactions.
    #[serde(default, deserialize_with = "lenient_string")]
    pub emoji: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u64,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Non-negative numbers truncate to an integer; anything else counts as 0.
fn count_of(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Value::deserialize(deserializer).map(|value| count_of(&value))
}

fn lenient_counts<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<IndexMap<String, u64>, D::Error> {
    let raw: IndexMap<String, Value> = IndexMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(emoji, value)| (emoji, count_of(&value)))
        .collect())
}

impl TextValue {
    /// Flatten into a single trimmed string.
    pub fn flatten(&self) -> String {
        match self {
            TextValue::Plain(text) => text.trim().to_string(),
            TextValue::Fragments(fragments) => {
                let joined: String = fragments.iter().map(TextFragment::as_str).collect();
                joined.trim().to_string()
            }
            TextValue::Other(_) => String::new(),
        }
    }
}

impl TextFragment {
    fn as_str(&self) -> &str {
        match self {
            TextFragment::Plain(text) => text,
            TextFragment::Entity { text } => text.as_deref().unwrap_or(""),
            TextFragment::Other(_) => "",
        }
    }
}

impl ReactionsValue {
    /// Collapse into an emoji → count map, summing duplicate emoji entries.
    pub fn to_counts(&self) -> IndexMap<String, u64> {
        match self {
            ReactionsValue::Entries(entries) => {
                let mut counts = IndexMap::new();
                for entry in entries {
                    let Some(emoji) = entry.emoji.as_deref().filter(|e| !e.is_empty()) else {
                        continue;
                    };
                    *counts.entry(emoji.to_string()).or_insert(0) += entry.count;
                }
                counts
            }
            ReactionsValue::Counts(counts) => counts.clone(),
            ReactionsValue::Other(_) => IndexMap::new(),
        }
    }
}
