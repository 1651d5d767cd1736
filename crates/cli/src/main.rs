use anyhow::Result;
use clap::{Parser, Subcommand};
use common::{init_structured_logging, LoggingConfig};
use infrastructure::config::ConfigLoader;
use std::path::PathBuf;

mod commands;
mod output;
mod progress;

use commands::{
    ActivitiesCommand, CompaniesCommand, ConfigCommand, ContactsCommand, CrmApp, DealsCommand,
};

#[derive(Parser)]
#[command(name = "crm")]
#[command(about = "Deals, contacts, companies and activities from the record store")]
#[command(version)]
struct Cli {
    /// Configuration file checked before the default locations
    #[arg(long, global = true, env = "CRM_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deals, pipeline and revenue analytics
    #[command(subcommand)]
    Deals(DealsCommand),
    /// Contacts and their activity timelines
    #[command(subcommand)]
    Contacts(ContactsCommand),
    /// Companies
    #[command(subcommand)]
    Companies(CompaniesCommand),
    /// Calls, meetings, notes and tasks
    #[command(subcommand)]
    Activities(ActivitiesCommand),
    /// Inspect or create the configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_path(path.clone()),
        None => ConfigLoader::new(),
    };
    let (config, source) = loader.load_with_source().await?;

    init_structured_logging(LoggingConfig::from_settings(
        &config.logging.level,
        config.logging.json,
    ))?;

    let outcome = match cli.command {
        Commands::Config(cmd) => cmd.execute(&config, &source, cli.json).await,
        Commands::Deals(cmd) => cmd.execute(&CrmApp::connect(&config, cli.json)?).await,
        Commands::Contacts(cmd) => cmd.execute(&CrmApp::connect(&config, cli.json)?).await,
        Commands::Companies(cmd) => cmd.execute(&CrmApp::connect(&config, cli.json)?).await,
        Commands::Activities(cmd) => cmd.execute(&CrmApp::connect(&config, cli.json)?).await,
    };
    outcome
}
