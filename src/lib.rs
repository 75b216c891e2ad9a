//! Descriptive statistics over exported chat messages.
//!
//! Raw export records go through [`normalize::parse_messages`] to become
//! canonical [`ParsedMessage`]s; each report builder then runs independently
//! over that slice.

pub mod activity;
pub mod config;
pub mod error;
pub mod identity;
pub mod leaderboard;
pub mod logging;
pub mod message;
pub mod normalize;
pub mod raw;
pub mod reply_graph;
pub mod stats;
pub mod stats_builder;
pub mod timefmt;

pub use activity::{daily_chart, hour_weekday_heatmap, weekly_trend};
pub use config::StatsConfig;
pub use error::{Result, StatsError};
pub use leaderboard::{top_authors, top_authors_by_reactions, top_messages};
pub use message::ParsedMessage;
pub use normalize::{is_human_author, parse_messages};
pub use raw::RawMessage;
pub use reply_graph::build_reply_graph;
pub use stats::ChatReport;
pub use stats_builder::build_report;
