use super::{parse_id, CrmApp};
use crate::output;
use crate::progress::ProgressType;
use anyhow::Result;
use clap::Subcommand;
use console::style;
use domain::entities::fields::parse_timestamp;
use domain::entities::NewDeal;
use domain::value_objects::{DealStage, RecordKind};
use domain::Amount;
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum DealsCommand {
    /// List every deal
    List,
    /// Show one deal
    Get { id: String },
    /// Deals in exactly this stage
    Stage { stage: String },
    /// Total value, win rate and value per stage
    Summary,
    /// Deal count per pipeline stage
    Pipeline,
    /// Deals created or moved within the last N days
    Recent {
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Contacts ranked by total deal value
    TopContacts {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Companies ranked by number of deals
    TopCompanies {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Create a deal
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        value: f64,
        /// Contact person
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        company: Option<String>,
        /// Initial stage (default: lead)
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Expected close date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        close_date: Option<String>,
    },
    /// Move a deal to another stage
    Move { id: String, stage: String },
    /// Delete a deal
    Delete { id: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StageValue {
    stage: String,
    value: Amount,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DealSummary {
    total_value: Amount,
    win_rate: u8,
    value_by_stage: Vec<StageValue>,
}

impl DealsCommand {
    pub async fn execute(self, app: &CrmApp) -> Result<()> {
        let deals = &app.services.deals;

        match self {
            DealsCommand::List => {
                let spinner = app.spinner(ProgressType::Read, "Loading deals...");
                let all = deals.get_all().await?;
                spinner.finish_and_clear();
                if app.json {
                    output::print_json(&all)?;
                } else {
                    output::deals(&all);
                }
            }
            DealsCommand::Get { id } => {
                let id = parse_id(RecordKind::Deal, &id)?;
                let deal = deals.get_by_id(id).await?;
                if app.json {
                    output::print_json(&deal)?;
                } else {
                    output::deal(&deal);
                }
            }
            DealsCommand::Stage { stage } => {
                let found = deals.by_stage(&DealStage::from(stage.as_str())).await;
                if app.json {
                    output::print_json(&found)?;
                } else {
                    output::deals(&found);
                }
            }
            DealsCommand::Summary => {
                let spinner = app.spinner(ProgressType::Read, "Crunching numbers...");
                let mut value_by_stage = Vec::with_capacity(DealStage::PIPELINE.len());
                for stage in DealStage::PIPELINE.iter() {
                    value_by_stage.push(StageValue {
                        stage: stage.as_str().to_string(),
                        value: deals.value_by_stage(stage).await,
                    });
                }
                let summary = DealSummary {
                    total_value: deals.total_value().await,
                    win_rate: deals.win_rate().await,
                    value_by_stage,
                };
                spinner.finish_and_clear();

                if app.json {
                    output::print_json(&summary)?;
                } else {
                    println!("{} {}", style("Total value:").bold(), output::money(summary.total_value));
                    println!("{} {}%", style("Win rate:   ").bold(), summary.win_rate);
                    for row in &summary.value_by_stage {
                        println!("  {:<12} {}", row.stage, output::money(row.value));
                    }
                }
            }
            DealsCommand::Pipeline => {
                let counts = deals.pipeline_data().await;
                if app.json {
                    output::print_json(&counts)?;
                } else {
                    output::pipeline(&counts);
                }
            }
            DealsCommand::Recent { days } => {
                let days = days.unwrap_or(app.reporting.recent_days);
                let recent = deals.recent_deals(days).await;
                if app.json {
                    output::print_json(&recent)?;
                } else {
                    println!("{}", style(format!("Deals from the last {days} days")).bold());
                    output::deals(&recent);
                }
            }
            DealsCommand::TopContacts { limit } => {
                let rows = deals
                    .top_contacts_by_value(limit.unwrap_or(app.reporting.top_limit))
                    .await;
                if app.json {
                    output::print_json(&rows)?;
                } else {
                    output::top_contacts(&rows);
                }
            }
            DealsCommand::TopCompanies { limit } => {
                let rows = deals
                    .top_companies_by_opportunities(limit.unwrap_or(app.reporting.top_limit))
                    .await;
                if app.json {
                    output::print_json(&rows)?;
                } else {
                    output::top_companies(&rows);
                }
            }
            DealsCommand::Create {
                name,
                value,
                contact,
                company,
                stage,
                description,
                close_date,
            } => {
                let close_date = close_date
                    .map(|raw| parse_timestamp("closeDate", &raw))
                    .transpose()?;
                let new_deal = NewDeal {
                    name: Some(name),
                    value,
                    contact_name: contact,
                    company_name: company,
                    stage: stage.map(|s| DealStage::from(s.as_str())),
                    description,
                    close_date,
                    ..NewDeal::default()
                };

                let spinner = app.spinner(ProgressType::Write, "Creating deal...");
                let created = deals.create(&new_deal).await?;
                spinner.finish_success(&format!("Created deal {}", created.id));
                if app.json {
                    output::print_json(&created)?;
                } else {
                    output::deal(&created);
                }
            }
            DealsCommand::Move { id, stage } => {
                let id = parse_id(RecordKind::Deal, &id)?;
                let spinner = app.spinner(ProgressType::Write, "Moving deal...");
                let moved = deals.update_stage(id, DealStage::from(stage.as_str())).await?;
                spinner.finish_success(&format!("Deal {} is now {}", moved.id, stage));
                if app.json {
                    output::print_json(&moved)?;
                }
            }
            DealsCommand::Delete { id } => {
                let id = parse_id(RecordKind::Deal, &id)?;
                deals.delete(id).await?;
                if app.json {
                    output::print_json(&serde_json::json!({ "deleted": id }))?;
                } else {
                    println!("{} Deleted deal {}", style("✓").green(), id);
                }
            }
        }

        Ok(())
    }
}
