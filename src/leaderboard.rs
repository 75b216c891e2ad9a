/// Ranked, size-limited leaderboards over canonical messages.
///
/// Sorting is stable, so equal scores keep the order in which senders (or
/// messages) were first encountered.
use indexmap::IndexMap;

use crate::identity::NameRegistry;
use crate::message::ParsedMessage;
use crate::stats::{AuthorRow, MessageRow, ReactionAuthorRow};

pub const DEFAULT_AUTHORS_LIMIT: usize = 10;
pub const DEFAULT_MESSAGES_LIMIT: usize = 10;
pub const DEFAULT_REACTIONS_LIMIT: usize = 20;

/// Shown in place of an empty message body.
pub const EMPTY_TEXT_PLACEHOLDER: &str = "(no text)";

/// Sums `score` per sender id, in discovery order, and sorts descending.
fn rank_senders<'a, F>(messages: &'a [ParsedMessage], score: F) -> Vec<(&'a str, u64)>
where
    F: Fn(&ParsedMessage) -> u64,
{
    let mut by_sender: IndexMap<&str, u64> = IndexMap::new();
    for m in messages {
        *by_sender.entry(m.from_id.as_str()).or_insert(0) += score(m);
    }

    let mut ranked: Vec<_> = by_sender.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Ranks authors by number of messages.
pub fn top_authors(messages: &[ParsedMessage], limit: usize) -> Vec<AuthorRow> {
    let names = NameRegistry::from_messages(messages);

    rank_senders(messages, |_| 1)
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, (from_id, count))| AuthorRow {
            rank: idx + 1,
            from: names.name_of(from_id).to_string(),
            count,
        })
        .collect()
}

/// Ranks individual messages by total reactions.
///
/// Works on a sorted copy; `messages` keeps its order.
pub fn top_messages(
    messages: &[ParsedMessage],
    limit: usize,
    placeholder: &str,
) -> Vec<MessageRow> {
    let mut sorted: Vec<&ParsedMessage> = messages.iter().collect();
    sorted.sort_by(|a, b| b.total.cmp(&a.total));

    sorted
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, m)| MessageRow {
            rank: idx + 1,
            from: m.from.clone(),
            text: if m.text.is_empty() {
                placeholder.to_string()
            } else {
                m.text.clone()
            },
            reactions: m.total,
        })
        .collect()
}

/// Ranks authors by the sum of reactions on their messages.
pub fn top_authors_by_reactions(
    messages: &[ParsedMessage],
    limit: usize,
) -> Vec<ReactionAuthorRow> {
    let names = NameRegistry::from_messages(messages);

    rank_senders(messages, |m| m.total)
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, (from_id, reactions))| ReactionAuthorRow {
            rank: idx + 1,
            from: names.name_of(from_id).to_string(),
            reactions,
        })
        .collect()
}
