/// Report assembly.
///
/// Runs every report builder once over the same canonical messages and
/// combines the results into a single `ChatReport`.
use chrono::{Local, TimeZone};
use std::collections::HashSet;

use crate::activity;
use crate::config::StatsConfig;
use crate::error::Result;
use crate::leaderboard;
use crate::message::ParsedMessage;
use crate::reply_graph;
use crate::stats::ChatReport;

/// Builds every report with the limits and zone from `config`.
///
/// `messages` should already satisfy [`crate::normalize::is_human_author`].
///
/// # Errors
///
/// Fails if the configured UTC offset is out of range or a message's
/// `fullDateISO` cannot be parsed.
pub fn build_report(messages: &[ParsedMessage], config: &StatsConfig) -> Result<ChatReport> {
    match config.fixed_offset()? {
        Some(offset) => build_report_in(messages, config, &offset),
        None => build_report_in(messages, config, &Local),
    }
}

/// Same as [`build_report`] with an explicit zone for temporal buckets.
pub fn build_report_in<Tz: TimeZone>(
    messages: &[ParsedMessage],
    config: &StatsConfig,
    tz: &Tz,
) -> Result<ChatReport> {
    let author_count = messages
        .iter()
        .map(|m| m.from_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let report = ChatReport {
        message_count: messages.len(),
        author_count,
        top_authors: leaderboard::top_authors(messages, config.top_authors_limit),
        top_messages: leaderboard::top_messages(
            messages,
            config.top_messages_limit,
            &config.empty_text_placeholder,
        ),
        top_authors_by_reactions: leaderboard::top_authors_by_reactions(
            messages,
            config.top_reactions_limit,
        ),
        heatmap: activity::hour_weekday_heatmap_in(messages, tz)?,
        daily: activity::daily_chart(messages),
        weekly: activity::weekly_trend_in(messages, tz)?,
        reply_graph: reply_graph::build_reply_graph(messages),
    };

    tracing::debug!(
        messages = report.message_count,
        authors = report.author_count,
        days = report.daily.len(),
        weeks = report.weekly.len(),
        "Built chat report"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use crate::normalize::parse_messages_in;
    use crate::raw::RawMessage;
    use crate::stats::schema::{report_schema, violations};
    use chrono::Utc;
    use serde_json::json;

    fn create_test_messages() -> Vec<ParsedMessage> {
        let raw: Vec<RawMessage> = serde_json::from_value(json!([
            { "id": 1, "type": "message", "date": "2024-01-01T09:00:00", "from": "Alice", "from_id": "user1", "text": "hi all" },
            { "id": 2, "type": "message", "date": "2024-01-01T09:05:00", "from": "Bob", "from_id": "user2", "text": "",
              "reply_to_message_id": 1, "reactions": [ { "emoji": "👍", "count": 4 } ] },
            { "id": 3, "type": "service", "date": "2024-01-01T09:06:00", "actor": "Alice", "action": "pin_message" },
            { "id": 4, "type": "message", "date": "2024-01-02T10:00:00", "from": "Alicia", "from_id": "user1", "text": "renamed",
              "reply_to_message_id": 2 },
            { "id": 5, "type": "message", "date": "2024-01-02T10:01:00", "from": "NewsBot", "from_id": "user9", "text": "beep" }
        ]))
        .unwrap();
        parse_messages_in(&raw, &Utc).unwrap()
    }

    #[test]
    fn test_build_report_sections() {
        let messages = create_test_messages();
        let report = build_report_in(&messages, &StatsConfig::default(), &Utc).unwrap();

        assert_eq!(report.message_count, 3);
        assert_eq!(report.author_count, 2);

        assert_eq!(report.top_authors[0].from, "Alicia");
        assert_eq!(report.top_authors[0].count, 2);

        assert_eq!(report.top_messages[0].from, "Bob");
        assert_eq!(report.top_messages[0].text, "(no text)");
        assert_eq!(report.top_messages[0].reactions, 4);

        assert_eq!(report.top_authors_by_reactions[0].from, "Bob");
        assert_eq!(report.top_authors_by_reactions[0].reactions, 4);

        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.weekly.len(), 1);
        assert_eq!(report.weekly[0].week, "2024-W01");
        assert_eq!(report.heatmap.len(), 2);

        assert_eq!(report.reply_graph.nodes.len(), 2);
        assert_eq!(report.reply_graph.links.len(), 2);
    }

    #[test]
    fn test_build_report_respects_limits() {
        let messages = create_test_messages();
        let config = StatsConfig {
            top_authors_limit: 1,
            top_messages_limit: 0,
            top_reactions_limit: 1,
            empty_text_placeholder: "-".to_string(),
            utc_offset_minutes: Some(0),
        };

        let report = build_report(&messages, &config).unwrap();
        assert_eq!(report.top_authors.len(), 1);
        assert!(report.top_messages.is_empty());
        assert_eq!(report.top_authors_by_reactions.len(), 1);
    }

    #[test]
    fn test_build_report_invalid_offset() {
        let config = StatsConfig {
            utc_offset_minutes: Some(-2000),
            ..StatsConfig::default()
        };
        let err = build_report(&[], &config).unwrap_err();
        assert_eq!(err, StatsError::InvalidUtcOffset(-2000));
    }

    #[test]
    fn test_build_report_empty() {
        let report = build_report_in(&[], &StatsConfig::default(), &Utc).unwrap();
        assert_eq!(report.message_count, 0);
        assert!(report.top_authors.is_empty());
        assert!(report.heatmap.is_empty());
        assert!(report.reply_graph.nodes.is_empty());
    }

    #[test]
    fn test_built_report_matches_schema() {
        let schema = report_schema().expect("schema should compile");

        let report =
            build_report_in(&create_test_messages(), &StatsConfig::default(), &Utc).unwrap();
        let report_json = serde_json::to_value(&report).unwrap();

        let found = violations(&schema, &report_json);
        assert!(found.is_empty(), "Built report failed validation: {found:?}");
    }

    #[test]
    fn test_build_report_without_offset_uses_local_zone() {
        let messages = create_test_messages();
        let config = StatsConfig {
            utc_offset_minutes: None,
            ..StatsConfig::default()
        };
        assert_eq!(
            build_report(&messages, &config).unwrap(),
            build_report_in(&messages, &config, &Local).unwrap()
        );
    }
}
