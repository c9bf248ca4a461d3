use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use engine_config::load_config;
use engine_core::{ProviderRegistry, QueryExecutor};
use model::records::resource_type::ResourceType;
use planner::Predicate;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "resq", version = "0.1.0", about = "Filtered resource queries with predicate push-down")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Explain {
            config,
            resource,
            filter,
            text,
        } => {
            let executor = build_executor(&config).await?;
            let resource_type: ResourceType = resource.parse()?;
            let predicate = load_filter(&filter).await?;
            let plans = executor.explain(resource_type, &predicate)?;

            if text {
                println!("Filter: {predicate}");
                for plan in &plans {
                    print!("{plan}");
                    if plan.is_fetch_all() {
                        println!();
                    }
                }
            } else {
                output::emit_json(&plans, None).await?;
            }
        }
        Commands::Query {
            config,
            resource,
            filter,
            output,
        } => {
            let executor = build_executor(&config).await?;
            let resource_type: ResourceType = resource.parse()?;
            let predicate = match filter {
                Some(path) => Some(load_filter(&path).await?),
                None => None,
            };

            info!("Querying {resource_type} resources");
            let resources = executor.execute(resource_type, predicate.as_ref()).await?;
            output::emit_json(&resources, output).await?;
        }
        Commands::CheckConfig { config } => {
            let config = load_config(&config).await?;
            print!("{}", output::config_summary(&config));
        }
    }

    Ok(())
}

async fn build_executor(path: &str) -> Result<QueryExecutor, CliError> {
    let config = load_config(path).await?;
    let registry = ProviderRegistry::from_config(&config)?;
    Ok(QueryExecutor::new(Arc::new(registry), config.settings))
}

async fn load_filter(path: &str) -> Result<Predicate, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    Ok(Predicate::from_json(&source)?)
}
