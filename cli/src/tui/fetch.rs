use taskboard_core::action::{self, ActionSubmit};
use taskboard_core::{Tab, TasksClient};
use tokio::sync::mpsc;

use super::app::AppEvent;

/// Fire one page fetch in the background. The response comes back as an
/// `AppEvent::Page` tagged with `generation`; the view decides whether it
/// is still current.
pub fn spawn_fetch(
    client: TasksClient,
    tab: Tab,
    cursor: String,
    size: u32,
    generation: u64,
    tx: mpsc::UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        let result = client
            .fetch_tasks(tab, &cursor, size)
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(AppEvent::Page {
            tab,
            generation,
            result,
        });
    });
}

/// Fire the action form's two updates in the background and report the
/// combined outcome.
pub fn spawn_submit(
    client: TasksClient,
    submit: ActionSubmit,
    tx: mpsc::UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        let outcome = action::submit(&client, &submit).await;
        let _ = tx.send(AppEvent::SubmitDone {
            task_id: submit.task_id,
            error: outcome.first_error(),
        });
    });
}
