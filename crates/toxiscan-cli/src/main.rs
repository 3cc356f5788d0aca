//! Toxiscan CLI
//!
//! Thin front-end over the classifier facade. Presentation lives here; the
//! classification core knows nothing about terminals.

use anyhow::Result;
use clap::Parser;
use std::io::BufRead;
use toxiscan_classifiers::{load_config, ClassifierFacade, PatternCatalog, ToxiscanConfig};
use tracing::info;

mod cli;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            text,
            config,
            hybrid,
            endpoint,
            json,
            verbose,
        } => {
            init_tracing(verbose);

            let mut config = match config {
                Some(path) => load_config(&path)?,
                None => ToxiscanConfig::default(),
            };
            if let Some(endpoint) = endpoint {
                config.secondary.endpoint = endpoint;
                config.secondary.enabled = true;
            }
            if hybrid {
                config.secondary.enabled = true;
            }

            let facade = ClassifierFacade::from_config(&config)?;

            let messages = if text.is_empty() {
                read_stdin_lines()?
            } else {
                vec![text.join(" ")]
            };
            info!("Classifying {} message(s)", messages.len());

            for message in &messages {
                let result = facade.classify(message).await;
                if json {
                    println!("{}", output::render_json(message, &result)?);
                } else {
                    println!("{}", output::render_human(&result));
                }
            }
        }

        Commands::Catalog { rules, verbose } => {
            init_tracing(verbose);

            let catalog = PatternCatalog::builtin()?;
            print!("{}", output::render_catalog(&catalog, rules));
        }
    }

    Ok(())
}

/// Non-empty lines from stdin
fn read_stdin_lines() -> Result<Vec<String>> {
    let stdin = std::io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("toxiscan=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("toxiscan=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
