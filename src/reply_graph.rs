use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

use crate::identity::NameRegistry;
use crate::message::ParsedMessage;
use crate::stats::{GraphLink, GraphNode, ReplyGraph};

/// Builds the directed, weighted reply graph between senders.
///
/// Nodes follow the order senders first appear. A reply adds weight 1 to
/// `(replier, replied-to)`; replies to unknown ids and to oneself are dropped.
pub fn build_reply_graph(messages: &[ParsedMessage]) -> ReplyGraph {
    let names = NameRegistry::from_messages(messages);
    let by_id: HashMap<i64, &ParsedMessage> = messages.iter().map(|m| (m.id, m)).collect();

    let mut senders: IndexSet<&str> = IndexSet::new();
    let mut weights: IndexMap<(&str, &str), u64> = IndexMap::new();
    let mut dangling = 0usize;

    for m in messages {
        let source = m.from_id.as_str();
        senders.insert(source);

        let Some(reply_to) = m.reply_to_message_id else {
            continue;
        };
        let Some(target) = by_id.get(&reply_to) else {
            dangling += 1;
            continue;
        };
        let target = target.from_id.as_str();
        if source == target {
            continue;
        }

        *weights.entry((source, target)).or_insert(0) += 1;
    }

    tracing::debug!(
        nodes = senders.len(),
        links = weights.len(),
        dangling,
        "Built reply graph"
    );

    ReplyGraph {
        nodes: senders
            .into_iter()
            .map(|id| GraphNode {
                id: id.to_string(),
                name: names.name_of(id).to_string(),
            })
            .collect(),
        links: weights
            .into_iter()
            .map(|((source, target), value)| GraphLink {
                source: source.to_string(),
                target: target.to_string(),
                value,
            })
            .collect(),
    }
}
