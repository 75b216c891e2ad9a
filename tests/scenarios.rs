use chat_stats::activity::{hour_weekday_heatmap_in, weekly_trend_in};
use chat_stats::normalize::parse_messages_in;
use chat_stats::stats::{AuthorRow, GraphLink};
use chat_stats::{
    build_reply_graph, daily_chart, is_human_author, top_authors, top_authors_by_reactions,
    top_messages, ParsedMessage, RawMessage,
};
use chrono::Utc;
use serde_json::{json, Value};

fn parse(value: Value) -> Vec<ParsedMessage> {
    let raw: Vec<RawMessage> = serde_json::from_value(value).expect("fixture should deserialize");
    parse_messages_in(&raw, &Utc).expect("fixture should normalize")
}

fn export_fixture() -> Value {
    json!([
        { "id": 100, "type": "service", "date": "2024-04-01T08:00:00", "actor": "Alice", "actor_id": "user1", "action": "create_group" },
        { "id": 101, "type": "message", "date": "2024-04-01T09:00:00", "from": "Alice", "from_id": "user1",
          "text": "Good morning", "reactions": [ { "type": "emoji", "emoji": "☀", "count": 2 } ] },
        { "id": 102, "type": "message", "date": "2024-04-01T09:02:00", "from": "Bob", "from_id": "user2",
          "text": ["morning ", { "type": "mention", "text": "@alice" }], "reply_to_message_id": 101 },
        { "id": 103, "type": "message", "date": "2024-04-01T09:03:00", "from": "WeatherBot", "from_id": "user7",
          "text": "12°C" },
        { "id": 104, "type": "message", "date": "2024-04-01T09:04:00", "from": "Bob", "from_id": "user2",
          "text": "replying to the bot", "reply_to_message_id": 103 },
        { "id": 105, "type": "message", "date": "2024-04-02T18:30:00", "from": "City News", "from_id": "channel5",
          "text": "headline" },
        { "id": 106, "type": "message", "date": "2024-04-02T18:31:00", "from": "Alice", "from_id": "user1",
          "text": "look", "forwarded_from": "City News" },
        { "id": 107, "type": "message", "date": "2024-04-03T21:15:00", "from": "Alice W.", "from_id": "user1",
          "text": "", "media_type": "sticker", "reply_to_message_id": 102,
          "reactions": { "😂": 5, "👍": 1 } },
        { "id": 108, "type": "message", "date": "2024-04-03T21:16:00", "from": "Bob", "from_id": "user2",
          "text": "haha", "reply_to_message_id": 107, "reactions": [ { "emoji": "👍", "count": 2 }, { "emoji": "👍", "count": 1 } ] }
    ])
}

#[test]
fn test_only_human_original_messages_survive() {
    let messages = parse(export_fixture());

    let ids: Vec<i64> = messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![101, 102, 104, 107, 108]);
    assert!(messages.iter().all(is_human_author));
}

#[test]
fn test_names_and_totals_after_normalization() {
    let messages = parse(export_fixture());

    for m in &messages {
        assert_eq!(m.total, m.reactions.values().sum::<u64>());
        if m.from_id == "user1" {
            assert_eq!(m.from, "Alice W.");
        }
    }
    let last = messages.last().unwrap();
    assert_eq!(last.reactions.get("👍"), Some(&3));
    assert_eq!(last.total, 3);
}

#[test]
fn test_leaderboards() {
    let messages = parse(export_fixture());

    let authors = top_authors(&messages, 10);
    assert_eq!(
        authors,
        vec![
            AuthorRow {
                rank: 1,
                from: "Bob".to_string(),
                count: 3
            },
            AuthorRow {
                rank: 2,
                from: "Alice W.".to_string(),
                count: 2
            },
        ]
    );

    let top = top_messages(&messages, 2, "(no text)");
    assert_eq!(top[0].text, "(no text)");
    assert_eq!(top[0].reactions, 6);
    assert_eq!(top[1].text, "haha");

    let by_reactions = top_authors_by_reactions(&messages, 20);
    assert_eq!(by_reactions[0].from, "Alice W.");
    assert_eq!(by_reactions[0].reactions, 8);
    assert_eq!(by_reactions[1].reactions, 3);
}

#[test]
fn test_temporal_reports() {
    let messages = parse(export_fixture());

    let daily = daily_chart(&messages);
    let dates: Vec<&str> = daily.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-04-01", "2024-04-03"]);
    assert_eq!(daily[0].count, 3);

    // 2024-04-01 is a Monday, 2024-04-03 a Wednesday
    let heatmap = hour_weekday_heatmap_in(&messages, &Utc).unwrap();
    assert_eq!(heatmap.len(), 2);
    assert_eq!((heatmap[0].weekday, heatmap[0].hour, heatmap[0].count), (0, 9, 3));
    assert_eq!((heatmap[1].weekday, heatmap[1].hour, heatmap[1].count), (2, 21, 2));

    let weekly = weekly_trend_in(&messages, &Utc).unwrap();
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0].week, "2024-W14");
    assert_eq!(weekly[0].count, 5);
}

#[test]
fn test_reply_graph_drops_filtered_targets() {
    let messages = parse(export_fixture());

    let graph = build_reply_graph(&messages);
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.nodes[0].name, "Alice W.");
    assert_eq!(
        graph.links,
        vec![
            GraphLink {
                source: "user2".to_string(),
                target: "user1".to_string(),
                value: 2
            },
            GraphLink {
                source: "user1".to_string(),
                target: "user2".to_string(),
                value: 1
            },
        ]
    );
}

#[test]
fn test_rename_scenario() {
    let messages = parse(json!([
        { "id": 1, "type": "message", "date": "2024-01-01T10:00:00", "from": "Alice", "from_id": "user1", "text": "a" },
        { "id": 2, "type": "message", "date": "2024-01-05T10:00:00", "from": "Alicia", "from_id": "user1", "text": "b" }
    ]));

    assert_eq!(
        top_authors(&messages, 10),
        vec![AuthorRow {
            rank: 1,
            from: "Alicia".to_string(),
            count: 2
        }]
    );
}

#[test]
fn test_service_message_scenario() {
    let messages = parse(json!([
        { "id": 1, "type": "service", "date": "2024-01-01T10:00:00", "from": "Alice", "from_id": "user1", "text": "joined" }
    ]));

    assert!(messages.is_empty());
    assert!(top_authors(&messages, 10).is_empty());
    assert!(daily_chart(&messages).is_empty());
    assert!(build_reply_graph(&messages).nodes.is_empty());
}

#[test]
fn test_dangling_reply_scenario() {
    let messages = parse(json!([
        { "id": 1, "type": "message", "date": "2024-01-01T10:00:00", "from": "Alice", "from_id": "user1",
          "text": "re: something", "reply_to_message_id": 4242 }
    ]));

    let graph = build_reply_graph(&messages);
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.links.is_empty());
}
