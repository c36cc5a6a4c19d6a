//! Submit path of the assign/update action form: two independent partial
//! updates against the same task, issued concurrently.

use chrono::NaiveDate;

use crate::client::TasksClient;
use crate::task::{TaskStatus, TaskUpdate};

/// The filled-in action form, bound to one task id.
#[derive(Debug, Clone)]
pub struct ActionSubmit {
    pub task_id: String,
    pub assignee: String,
    pub status: TaskStatus,
    pub ends_on: Option<NaiveDate>,
}

/// Per-call results of a submit. The two updates never block each other,
/// so one can fail while the other lands.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub assignee: anyhow::Result<()>,
    pub status: anyhow::Result<()>,
}

impl SubmitOutcome {
    pub fn is_ok(&self) -> bool {
        self.assignee.is_ok() && self.status.is_ok()
    }

    pub fn first_error(&self) -> Option<String> {
        self.assignee
            .as_ref()
            .err()
            .or(self.status.as_ref().err())
            .map(|e| e.to_string())
    }
}

/// Issue the form's two mutation calls: one carrying the assignee, one
/// carrying status and due date. Always exactly two requests.
pub async fn submit(client: &TasksClient, form: &ActionSubmit) -> SubmitOutcome {
    let assignee_update = TaskUpdate {
        assignee: Some(form.assignee.clone()),
        ..TaskUpdate::default()
    };
    let status_update = TaskUpdate {
        status: Some(form.status),
        ends_on: form.ends_on,
        ..TaskUpdate::default()
    };

    let (assignee, status) = tokio::join!(
        client.update_task(&form.task_id, &assignee_update),
        client.update_task(&form.task_id, &status_update),
    );

    if let Err(err) = &assignee {
        tracing::warn!(target: "taskboard.action", task_id = %form.task_id, "assignee update failed: {err}");
    }
    if let Err(err) = &status {
        tracing::warn!(target: "taskboard.action", task_id = %form.task_id, "status update failed: {err}");
    }

    SubmitOutcome { assignee, status }
}
