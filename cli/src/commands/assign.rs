use chrono::NaiveDate;
use taskboard_core::action::{self, ActionSubmit};
use taskboard_core::error::CliError;
use taskboard_core::{TaskStatus, TasksClient};

use super::cli::AssignArgs;

pub async fn run(client: &TasksClient, args: &AssignArgs) -> Result<i32, CliError> {
    let form = build_submit(args)?;
    let outcome = action::submit(client, &form).await;

    if let Some(err) = outcome.first_error() {
        eprintln!("update failed: {err}");
        return Err(CliError::Update(err));
    }

    println!("updated {}", form.task_id);
    Ok(0)
}

fn build_submit(args: &AssignArgs) -> Result<ActionSubmit, CliError> {
    let status = TaskStatus::parse(&args.status)
        .ok_or_else(|| CliError::Command(format!("unknown status: {}", args.status)))?;
    let ends_on = args
        .ends_on
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| CliError::Command(format!("invalid --ends-on {raw}: {e}")))
        })
        .transpose()?;

    Ok(ActionSubmit {
        task_id: args.task_id.clone(),
        assignee: args.assignee.clone(),
        status,
        ends_on,
    })
}
