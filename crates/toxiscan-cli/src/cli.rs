use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "toxiscan")]
#[command(author, version, about = "Toxicity classification for short messages")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a message, or each line of stdin when no message is given
    Classify {
        /// Message to classify
        text: Vec<String>,

        /// Configuration file path
        #[arg(short, long, env = "TOXISCAN_CONFIG")]
        config: Option<String>,

        /// Reconcile with the generative backend
        #[arg(long)]
        hybrid: bool,

        /// Generative backend base URL (implies --hybrid)
        #[arg(long, env = "TOXISCAN_ENDPOINT")]
        endpoint: Option<String>,

        /// Emit one JSON object per message
        #[arg(long)]
        json: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the built-in pattern catalog
    Catalog {
        /// List every rule pattern under its category
        #[arg(long)]
        rules: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
