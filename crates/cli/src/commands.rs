//! Subcommands and their results.

use std::collections::BTreeMap;

use clap::Subcommand;
use hashring_core::{HashRing, NodeId, Partitioner, RingSnapshot};
use serde::Serialize;
use tracing::debug;

/// Keys resolved by the demonstration when none are given.
pub const DEFAULT_KEYS: [&str; 5] = ["Key1", "Key2", "Key3", "Key4", "Key5"];

/// Node removed by the demonstration when none is given.
pub const DEFAULT_REMOVED: &str = "Server2";

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Resolve keys, remove one node, then resolve the same keys again.
    Demo {
        /// Node to take off the ring between the two rounds.
        #[arg(long, default_value = DEFAULT_REMOVED)]
        remove: String,

        /// Keys to resolve.
        #[arg(default_values_t = DEFAULT_KEYS.map(String::from))]
        keys: Vec<String>,
    },

    /// Print the node responsible for each key.
    Resolve {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Print virtual node placement and the share of the ring each node owns.
    Inspect,
}

impl Default for Command {
    fn default() -> Self {
        Command::Demo {
            remove: DEFAULT_REMOVED.to_string(),
            keys: DEFAULT_KEYS.map(String::from).to_vec(),
        }
    }
}

/// Owner of one key; `node` is `None` when the ring was empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub key: String,
    pub node: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Demo {
        before: Vec<Assignment>,
        removed: String,
        after: Vec<Assignment>,
    },
    Resolve {
        assignments: Vec<Assignment>,
    },
    Inspect {
        snapshot: RingSnapshot,
        ownership: BTreeMap<NodeId, f64>,
    },
}

impl Command {
    /// Run the command against `ring`.
    ///
    /// The demo mutates the ring (it removes a node); the other commands only
    /// read it.
    pub fn execute<P: Partitioner>(&self, ring: &HashRing<P>) -> CommandResult {
        match self {
            Command::Demo { remove, keys } => {
                let before = assign(ring, keys);
                let removed = ring.remove_node(remove.as_str());
                debug!(node = %remove, removed, "demo removed node");
                let after = assign(ring, keys);
                CommandResult::Demo {
                    before,
                    removed: remove.clone(),
                    after,
                }
            }
            Command::Resolve { keys } => CommandResult::Resolve {
                assignments: assign(ring, keys),
            },
            Command::Inspect => CommandResult::Inspect {
                snapshot: ring.snapshot(),
                ownership: ring.ownership(),
            },
        }
    }
}

fn assign<P: Partitioner>(ring: &HashRing<P>, keys: &[String]) -> Vec<Assignment> {
    keys.iter()
        .zip(ring.resolve_many(keys))
        .map(|(key, node)| Assignment {
            key: key.clone(),
            node,
        })
        .collect()
}

fn assignment_lines<'a>(
    assignments: &'a [Assignment],
    verb: &'a str,
) -> impl Iterator<Item = String> + 'a {
    assignments.iter().map(move |Assignment { key, node }| match node {
        Some(node) => format!("Key '{key}' {verb} handled by node '{node}'"),
        None => format!("Key '{key}' has no node: the ring is empty"),
    })
}

impl CommandResult {
    /// Human-readable rendering, one line per item.
    pub fn render_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        match self {
            CommandResult::Demo {
                before,
                removed,
                after,
            } => {
                lines.extend(assignment_lines(before, "is"));
                lines.push(String::new());
                lines.push(format!("Removing {removed}..."));
                lines.extend(assignment_lines(after, "is now"));
            }
            CommandResult::Resolve { assignments } => {
                lines.extend(assignment_lines(assignments, "is"));
            }
            CommandResult::Inspect {
                snapshot,
                ownership,
            } => {
                lines.push(format!(
                    "{} virtual nodes ({} per node, {})",
                    snapshot.vnodes.len(),
                    snapshot.replicas,
                    snapshot.partitioner
                ));
                lines.extend(
                    snapshot
                        .vnodes
                        .iter()
                        .map(|vnode| format!("  {}  {}", vnode.token, vnode.node_id)),
                );
                lines.push("ownership:".to_string());
                lines.extend(
                    ownership
                        .iter()
                        .map(|(node, share)| format!("  {node}  {:.2}%", share * 100.0)),
                );
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
