use serde::{Deserialize, Serialize};

/// All reports for one chat, as consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatReport {
    pub message_count: usize,
    pub author_count: usize,
    pub top_authors: Vec<AuthorRow>,
    pub top_messages: Vec<MessageRow>,
    pub top_authors_by_reactions: Vec<ReactionAuthorRow>,
    pub heatmap: Vec<HeatCell>,
    pub daily: Vec<DailyPoint>,
    pub weekly: Vec<WeeklyPoint>,
    pub reply_graph: ReplyGraph,
}

/// Author ranked by number of messages sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorRow {
    pub rank: usize,
    pub from: String,
    pub count: u64,
}

/// Message ranked by total reactions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageRow {
    pub rank: usize,
    pub from: String,
    pub text: String,
    pub reactions: u64,
}

/// Author ranked by reactions received across all their messages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReactionAuthorRow {
    pub rank: usize,
    pub from: String,
    pub reactions: u64,
}

/// Message count for one (weekday, hour) slot. Monday is weekday 0.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeatCell {
    pub weekday: u32,
    pub hour: u32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DailyPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WeeklyPoint {
    /// `YYYY-Wnn`
    pub week: String,
    pub count: u64,
}

/// Who replies to whom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReplyGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphNode {
    /// Sender id.
    pub id: String,
    pub name: String,
}

/// Directed edge: `source` replied to `target` `value` times.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub value: u64,
}
