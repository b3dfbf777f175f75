use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// famplan - family meal planning and shopping lists
#[derive(Parser)]
#[command(name = "famplan")]
#[command(
    about = "Turn planned family meals into one consolidated shopping list",
    long_about = None
)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Load families, recipes, meals and pantry items from a JSON file
    Import {
        file: PathBuf,
    },
    /// Print the consolidated shopping list for some planned meals
    Generate {
        #[arg(long)]
        family: String,

        /// Planned meal id, repeat for several meals
        #[arg(long = "meal", required = true)]
        meals: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = famplan::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    famplan::observability::init_observability(
        "famplan",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Serve { host, port } => famplan::cli::serve(config, host, port).await,
        Commands::Migrate => famplan::cli::migrate(&config).await,
        Commands::Reset => famplan::cli::reset(&config).await,
        Commands::Import { file } => famplan::cli::import(&config, &file).await,
        Commands::Generate { family, meals } => {
            famplan::cli::generate(&config, family, meals).await
        }
    }
}
