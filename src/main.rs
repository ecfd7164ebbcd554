//! Command-line interface for dict-sources
//!
//! # Usage Examples
//!
//! ```bash
//! # Layout catalog, optionally with compatibility for one source kind
//! dict-sources layouts --source executable-on-demand
//!
//! # Configuration fragment for a Redis hash_map source
//! dict-sources config --source redis-hash-map --table t \
//!   --docker-host redis1 --docker-port 6379
//!
//! # Provision an HTTPS source in a compose cluster and load rows
//! dict-sources provision --source https --table users \
//!   --structure users.yaml --rows users.jsonl \
//!   --docker-host clickhouse1 --compose-project dict \
//!   --http-server target/x86_64-unknown-linux-musl/release/tsv-http-server
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use dict_source_core::{ExternalSource, StaticCluster, Structure};
use dict_sources::args::{DockerArgs, EndpointArgs, HttpArgs};
use dict_sources::rows::read_rows;
use dict_sources::{build_source, layout_matrix, SourceKind};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "dict-sources")]
#[command(about = "Provision external dictionary sources for integration tests")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the layout catalog
    Layouts {
        /// Also show whether this source kind can serve each layout
        #[arg(long, value_enum)]
        source: Option<SourceKind>,
    },

    /// Print the configuration fragment for a source
    Config {
        #[arg(long, value_enum)]
        source: SourceKind,

        #[arg(long)]
        table: String,

        #[command(flatten)]
        endpoint: EndpointArgs,

        #[command(flatten)]
        http: HttpArgs,
    },

    /// Create the table for a source and load rows into it
    Provision {
        #[arg(long, value_enum)]
        source: SourceKind,

        #[arg(long)]
        table: String,

        /// Structure definition (YAML)
        #[arg(long, value_name = "PATH")]
        structure: PathBuf,

        /// Rows to load (JSON Lines)
        #[arg(long, value_name = "PATH")]
        rows: Option<PathBuf>,

        #[command(flatten)]
        endpoint: EndpointArgs,

        #[command(flatten)]
        http: HttpArgs,

        #[command(flatten)]
        docker: DockerArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layouts { source } => print_layouts(source),
        Commands::Config {
            source,
            table,
            endpoint,
            http,
        } => {
            let mut adapter = build_source(
                source,
                endpoint.to_endpoint(),
                Arc::new(http.ports()),
                http.assets(),
            );
            print!("{}", adapter.get_source_str(&table)?);
        }
        Commands::Provision {
            source,
            table,
            structure,
            rows,
            endpoint,
            http,
            docker,
        } => {
            let structure = Structure::from_file(&structure)
                .with_context(|| format!("Failed to load structure from {structure:?}"))?;
            let rows = match rows {
                Some(path) => read_rows(&path)
                    .with_context(|| format!("Failed to load rows from {path:?}"))?,
                None => Vec::new(),
            };

            let endpoint = endpoint.to_endpoint();
            let mut adapter = build_source(
                source,
                endpoint.clone(),
                Arc::new(http.ports()),
                http.assets(),
            );

            // HTTP sources pick their port while rendering the fragment.
            let fragment = adapter.get_source_str(&table)?;

            if source.is_node_backed() {
                let cluster = docker.cluster(&endpoint.docker_hostname);
                adapter.prepare(&structure, &table, &cluster).await?;
            } else {
                adapter
                    .prepare(&structure, &table, &StaticCluster::new())
                    .await?;
            }
            adapter
                .load_data(&rows, &table)
                .await
                .with_context(|| format!("Failed to load rows into {}", adapter.kind_name()))?;

            info!(
                "Provisioned {} table {} with {} rows",
                source,
                table,
                rows.len()
            );
            print!("{fragment}");
        }
    }

    Ok(())
}

fn print_layouts(source: Option<SourceKind>) {
    let matrix = layout_matrix(source.unwrap_or(SourceKind::Mysql));
    for (layout, compatible) in matrix {
        let flags = format!(
            "{}{}{}",
            if layout.is_simple() { "simple " } else { "" },
            if layout.is_complex() { "complex " } else { "" },
            if layout.is_ranged() { "ranged " } else { "" },
        );
        match source {
            Some(_) => println!(
                "{:<28} {:<8} {}",
                layout.name,
                flags.trim_end(),
                if compatible { "yes" } else { "no" }
            ),
            None => println!("{:<28} {}", layout.name, flags.trim_end()),
        }
    }
}
