use super::{parse_id, CrmApp};
use crate::output;
use anyhow::Result;
use clap::Subcommand;
use console::style;
use domain::value_objects::RecordKind;

#[derive(Debug, Subcommand)]
pub enum CompaniesCommand {
    /// List every company
    List,
    /// Show one company
    Get { id: String },
    /// Industries a company can be filed under
    Industries,
    /// Delete a company
    Delete { id: String },
}

impl CompaniesCommand {
    pub async fn execute(self, app: &CrmApp) -> Result<()> {
        let companies = &app.services.companies;

        match self {
            CompaniesCommand::List => {
                let all = companies.get_all().await?;
                if app.json {
                    output::print_json(&all)?;
                } else {
                    output::companies(&all);
                }
            }
            CompaniesCommand::Get { id } => {
                let id = parse_id(RecordKind::Company, &id)?;
                let company = companies.get_by_id(id).await?;
                if app.json {
                    output::print_json(&company)?;
                } else {
                    output::company(&company);
                }
            }
            CompaniesCommand::Industries => {
                let options = companies.industry_options();
                if app.json {
                    output::print_json(options)?;
                } else {
                    for industry in options {
                        println!("{industry}");
                    }
                }
            }
            CompaniesCommand::Delete { id } => {
                let id = parse_id(RecordKind::Company, &id)?;
                companies.delete(id).await?;
                if app.json {
                    output::print_json(&serde_json::json!({ "deleted": id }))?;
                } else {
                    println!("{} Deleted company {}", style("✓").green(), id);
                }
            }
        }

        Ok(())
    }
}
