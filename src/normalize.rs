/// Normalization of raw export records into canonical messages.
///
/// Only human-authored, original (non-forwarded) messages are admitted.
/// Admitted records get their text flattened, reactions collapsed, date
/// resolved to a UTC instant and display name reconciled per sender.
use chrono::{Local, TimeZone};
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::{Result, StatsError};
use crate::identity::NameRegistry;
use crate::message::ParsedMessage;
use crate::raw::RawMessage;
use crate::timefmt;

/// Lower-case name endings that mark an automated sender.
pub const BOT_SUFFIXES: [&str; 2] = ["bot", "бот"];

/// Sender id prefix used by exports for user accounts (as opposed to `channel`).
pub const USER_ID_PREFIX: &str = "user";

/// Reason a raw record was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Not a `type: "message"` record (joins, pins, calls...).
    Service,
    Forwarded,
    /// Sender id missing or not a user account.
    NonUser,
    /// Display name looks like a bot.
    Bot,
}

/// True if `name`, trimmed and lower-cased, ends with a bot suffix.
pub fn looks_like_bot(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    BOT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

fn is_user_id(from_id: &str) -> bool {
    !from_id.is_empty() && from_id.starts_with(USER_ID_PREFIX)
}

fn is_present(marker: &Option<String>) -> bool {
    marker.as_deref().is_some_and(|value| !value.is_empty())
}

/// Returns why `raw` would be rejected, or `None` if it is admitted.
pub fn rejection(raw: &RawMessage) -> Option<Rejection> {
    if raw.kind.as_deref() != Some("message") {
        return Some(Rejection::Service);
    }
    if is_present(&raw.forwarded_from) || is_present(&raw.saved_from) {
        return Some(Rejection::Forwarded);
    }
    if !raw.from_id.as_deref().is_some_and(is_user_id) {
        return Some(Rejection::NonUser);
    }
    if raw.from.as_deref().is_some_and(looks_like_bot) {
        return Some(Rejection::Bot);
    }
    None
}

/// Raw admission predicate.
pub fn is_admitted(raw: &RawMessage) -> bool {
    rejection(raw).is_none()
}

/// Predicate on canonical messages: user-origin id and a non-bot name.
///
/// Callers should pre-filter any canonical collection with this before
/// handing it to report builders.
pub fn is_human_author(message: &ParsedMessage) -> bool {
    is_user_id(&message.from_id) && !looks_like_bot(&message.from)
}

/// Normalizes `raw` reading naive export dates in the system's local zone.
pub fn parse_messages(raw: &[RawMessage]) -> Result<Vec<ParsedMessage>> {
    parse_messages_in(raw, &Local)
}

/// Normalizes `raw` reading naive export dates in `tz`.
///
/// The output keeps the input order of admitted records.
///
/// # Errors
///
/// Fails with [`StatsError::MalformedDate`] when an admitted record's date
/// cannot be parsed and [`StatsError::MissingId`] when it has no id.
pub fn parse_messages_in<Tz: TimeZone>(
    raw: &[RawMessage],
    tz: &Tz,
) -> Result<Vec<ParsedMessage>> {
    let mut rejected: IndexMap<Rejection, usize> = IndexMap::new();
    let mut parsed = Vec::with_capacity(raw.len());

    for (index, record) in raw.iter().enumerate() {
        if let Some(reason) = rejection(record) {
            trace!(index, id = ?record.id, ?reason, "Rejected raw message");
            *rejected.entry(reason).or_insert(0) += 1;
            continue;
        }
        parsed.push(parse_record(index, record, tz)?);
    }

    reconcile_names(&mut parsed);

    debug!(
        admitted = parsed.len(),
        rejected = raw.len() - parsed.len(),
        ?rejected,
        "Normalized raw messages"
    );

    Ok(parsed)
}

fn parse_record<Tz: TimeZone>(
    index: usize,
    raw: &RawMessage,
    tz: &Tz,
) -> Result<ParsedMessage> {
    let id = raw.id.ok_or(StatsError::MissingId { index })?;

    let date = raw.date.clone().unwrap_or_default();
    let instant =
        timefmt::parse_export_date(&date, tz).ok_or_else(|| StatsError::MalformedDate {
            id: Some(id),
            value: date.clone(),
        })?;

    let reactions = raw
        .reactions
        .as_ref()
        .map(|reactions| reactions.to_counts())
        .unwrap_or_default();
    let total = reactions.values().sum();

    Ok(ParsedMessage {
        id,
        from: raw.from.clone().unwrap_or_default(),
        from_id: raw.from_id.clone().unwrap_or_default(),
        text: raw.text.as_ref().map(|text| text.flatten()).unwrap_or_default(),
        date,
        full_date_iso: timefmt::format_iso(instant),
        reactions,
        total,
        reply_to_message_id: raw.reply_to_message_id,
        media_type: raw.media_type.clone(),
    })
}

/// Rewrites every message's `from` to its sender's latest-dated name.
///
/// An empty latest name (e.g. a since-deleted account) leaves existing
/// names untouched. Running this twice yields the same result as once.
pub fn reconcile_names(messages: &mut [ParsedMessage]) {
    let registry = NameRegistry::from_messages(messages.iter());

    for m in messages.iter_mut() {
        let latest = registry.name_of(&m.from_id);
        if !latest.is_empty() && m.from != latest {
            m.from = latest.to_string();
        }
    }
}
