use super::{parse_id, CrmApp};
use crate::output;
use crate::progress::ProgressType;
use anyhow::{anyhow, Result};
use clap::Subcommand;
use domain::value_objects::{EntityType, RecordKind};

#[derive(Debug, Subcommand)]
pub enum ActivitiesCommand {
    /// Newest activities across all records
    Recent {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Activities attached to a contact, company or deal
    For {
        /// contact, company or deal
        entity_type: String,
        id: String,
    },
    /// Mark a task as done
    Complete {
        id: String,
        /// Reopen the task instead
        #[arg(long)]
        undo: bool,
    },
}

impl ActivitiesCommand {
    pub async fn execute(self, app: &CrmApp) -> Result<()> {
        let activities = &app.services.activities;

        match self {
            ActivitiesCommand::Recent { limit } => {
                let limit = limit.unwrap_or(app.reporting.recent_activity_limit);
                let recent = activities.get_recent(limit).await?;
                if app.json {
                    output::print_json(&recent)?;
                } else {
                    output::activities(&recent);
                }
            }
            ActivitiesCommand::For { entity_type, id } => {
                let entity: EntityType = entity_type.parse().map_err(|e: String| anyhow!(e))?;
                let owner = match entity {
                    EntityType::Contact => RecordKind::Contact,
                    EntityType::Company => RecordKind::Company,
                    EntityType::Deal => RecordKind::Deal,
                };
                let id = parse_id(owner, &id)?;
                let found = activities.get_by_entity(entity, id).await?;
                if app.json {
                    output::print_json(&found)?;
                } else {
                    output::activities(&found);
                }
            }
            ActivitiesCommand::Complete { id, undo } => {
                let id = parse_id(RecordKind::Activity, &id)?;
                let spinner = app.spinner(ProgressType::Write, "Updating task...");
                let task = activities.mark_task_complete(id, !undo).await?;
                let state = if task.completed { "completed" } else { "reopened" };
                spinner.finish_success(&format!("Task {} {}", task.id, state));
                if app.json {
                    output::print_json(&task)?;
                }
            }
        }

        Ok(())
    }
}
