/// Display-name reconciliation keyed by stable sender id.
///
/// Display names change over the life of a chat; the sender id does not.
/// A registry is built fresh for every computation and tracks, per sender,
/// the name carried by the latest-dated message seen so far.
use std::collections::HashMap;

use crate::message::ParsedMessage;

#[derive(Debug, Clone)]
struct LatestName {
    name: String,
    iso: String,
}

/// Latest known display name per sender id.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    latest: HashMap<String, LatestName>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from every message, in order.
    pub fn from_messages<'a, I>(messages: I) -> Self
    where
        I: IntoIterator<Item = &'a ParsedMessage>,
    {
        let mut registry = Self::new();
        for m in messages {
            registry.observe(&m.from_id, &m.from, &m.full_date_iso);
        }
        registry
    }

    /// Records `name` for `from_id` if `iso` is strictly later than what is stored.
    ///
    /// On equal timestamps the first observation is kept.
    pub fn observe(&mut self, from_id: &str, name: &str, iso: &str) {
        match self.latest.get_mut(from_id) {
            Some(current) if iso > current.iso.as_str() => {
                current.name = name.to_string();
                current.iso = iso.to_string();
            }
            Some(_) => {}
            None => {
                self.latest.insert(
                    from_id.to_string(),
                    LatestName {
                        name: name.to_string(),
                        iso: iso.to_string(),
                    },
                );
            }
        }
    }

    /// Current display name for `from_id`, or `""` for an unknown sender.
    pub fn name_of(&self, from_id: &str) -> &str {
        self.latest
            .get(from_id)
            .map(|latest| latest.name.as_str())
            .unwrap_or("")
    }

    /// Number of distinct senders observed.
    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}
