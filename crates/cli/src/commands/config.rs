use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use domain::config::CrmConfig;
use infrastructure::config::{ConfigLoader, ConfigSource, ConfigValidator};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show the resolved configuration (files and environment)
    Show,

    /// Validate the resolved configuration
    #[command(alias = "check")]
    Validate,

    /// Write an example configuration file
    Init {
        #[arg(short, long, default_value = ".crmrc.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Copy of `config` safe to print
fn redacted(config: &CrmConfig) -> CrmConfig {
    let mut shown = config.clone();
    if !shown.store.public_key.is_empty() {
        shown.store.public_key = "********".to_string();
    }
    shown
}

impl ConfigCommand {
    pub async fn execute(&self, config: &CrmConfig, source: &ConfigSource, json: bool) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Show => {
                let shown = redacted(config);
                if json {
                    println!("{}", serde_json::to_string_pretty(&shown)?);
                } else {
                    match source {
                        ConfigSource::File(path) => {
                            println!("{}", style(format!("# loaded from {}", path.display())).dim())
                        }
                        ConfigSource::Default => println!("{}", style("# built-in defaults").dim()),
                    }
                    print!("{}", toml::to_string_pretty(&shown)?);
                }
                Ok(())
            }
            ConfigSubcommand::Validate => {
                ConfigValidator::new().validate(config)?;
                info!("Configuration validation successful");
                if json {
                    println!("{}", serde_json::json!({ "valid": true }));
                } else {
                    println!("{} Configuration is valid", style("✓").green());
                }
                Ok(())
            }
            ConfigSubcommand::Init { output, force } => {
                if output.exists() && !force {
                    bail!(
                        "{} already exists; pass --force to overwrite it",
                        output.display()
                    );
                }
                tokio::fs::write(output, ConfigLoader::generate_example_config()).await?;
                info!("Configuration file generated at: {}", output.display());
                println!("{} Wrote {}", style("✓").green(), output.display());
                println!("Set store.project_id and store.public_key, or CRM_PROJECT_ID / CRM_PUBLIC_KEY");
                Ok(())
            }
        }
    }
}
