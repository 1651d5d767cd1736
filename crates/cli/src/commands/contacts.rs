use super::{parse_id, CrmApp};
use crate::output;
use crate::progress::ProgressType;
use anyhow::Result;
use clap::Subcommand;
use console::style;
use domain::value_objects::RecordKind;

#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    /// List every contact
    List,
    /// Show one contact
    Get { id: String },
    /// Match name, email, company or phone
    Search { query: String },
    /// Number of contacts
    Count,
    /// Activity timeline of a contact
    Activities { id: String },
    /// Delete a contact
    Delete { id: String },
}

impl ContactsCommand {
    pub async fn execute(self, app: &CrmApp) -> Result<()> {
        let contacts = &app.services.contacts;

        match self {
            ContactsCommand::List => {
                let spinner = app.spinner(ProgressType::Read, "Loading contacts...");
                let all = contacts.get_all().await?;
                spinner.finish_and_clear();
                if app.json {
                    output::print_json(&all)?;
                } else {
                    output::contacts(&all);
                }
            }
            ContactsCommand::Get { id } => {
                let id = parse_id(RecordKind::Contact, &id)?;
                let contact = contacts.get_by_id(id).await?;
                if app.json {
                    output::print_json(&contact)?;
                } else {
                    output::contact(&contact);
                }
            }
            ContactsCommand::Search { query } => {
                let found = contacts.search(&query).await?;
                if app.json {
                    output::print_json(&found)?;
                } else {
                    output::contacts(&found);
                }
            }
            ContactsCommand::Count => {
                let count = contacts.get_total_count().await;
                if app.json {
                    output::print_json(&serde_json::json!({ "count": count }))?;
                } else {
                    println!("{} {}", style("Contacts:").bold(), count);
                }
            }
            ContactsCommand::Activities { id } => {
                let id = parse_id(RecordKind::Contact, &id)?;
                let activities = contacts.get_activities(id).await;
                if app.json {
                    output::print_json(&activities)?;
                } else {
                    output::activities(&activities);
                }
            }
            ContactsCommand::Delete { id } => {
                let id = parse_id(RecordKind::Contact, &id)?;
                contacts.delete(id).await?;
                if app.json {
                    output::print_json(&serde_json::json!({ "deleted": id }))?;
                } else {
                    println!("{} Deleted contact {}", style("✓").green(), id);
                }
            }
        }

        Ok(())
    }
}
