//! Command-line configuration.
//!
//! Every ring setting can also come from a `HASHRING_*` environment variable;
//! flags win over the environment. Without any configuration the tool runs
//! the three-server demonstration.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hashring_core::partitioner::PartitionerKind;
use hashring_core::ring::DEFAULT_REPLICAS;
use hashring_core::{HashRing, RingBuilder};
use tracing::info;

use crate::commands::Command;

/// Nodes placed on the ring when none are configured.
pub const DEFAULT_NODES: [&str; 3] = ["Server1", "Server2", "Server3"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON document.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "hashring",
    version,
    about = "Consistent hash ring demonstration and inspection tool"
)]
pub struct CliConfig {
    /// Virtual nodes per physical node.
    #[arg(short, long, env = "HASHRING_REPLICAS", default_value_t = DEFAULT_REPLICAS)]
    pub replicas: usize,

    /// Physical node to add (repeatable, or comma separated).
    #[arg(
        short = 'n',
        long = "node",
        env = "HASHRING_NODES",
        value_delimiter = ',',
        default_values_t = DEFAULT_NODES.map(String::from)
    )]
    pub nodes: Vec<String>,

    /// Hash function placing keys and virtual nodes: crc32, xxh3 or sip.
    #[arg(short, long, env = "HASHRING_PARTITIONER", default_value_t = PartitionerKind::Crc32)]
    pub partitioner: PartitionerKind,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level filter, used when RUST_LOG is not set.
    #[arg(long, env = "HASHRING_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl CliConfig {
    /// Build the ring described by the configuration.
    pub fn build_ring(&self) -> Result<HashRing<PartitionerKind>> {
        let ring = RingBuilder::new()
            .with_replicas(self.replicas)
            .with_partitioner(self.partitioner)
            .add_nodes(&self.nodes)
            .build()
            .context("invalid ring configuration")?;

        info!(
            replicas = self.replicas,
            nodes = self.nodes.len(),
            partitioner = %self.partitioner,
            "ring ready"
        );
        Ok(ring)
    }

    /// Run the configured command, writing its output to stdout.
    pub fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        self.run_to(&mut stdout.lock())
    }

    pub fn run_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let ring = self.build_ring()?;
        let command = self.command.clone().unwrap_or_default();
        let result = command.execute(&ring);

        match self.format {
            OutputFormat::Text => out.write_all(result.render_text().as_bytes())?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &result)
                    .context("failed to encode result")?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}
