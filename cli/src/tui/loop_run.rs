use std::time::Duration;

use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use taskboard_core::error::CliError;
use taskboard_core::TasksClient;
use tokio::sync::mpsc;

use super::app::{BoardApp, Effect};
use super::events::InputReader;
use super::fetch::{spawn_fetch, spawn_submit};
use super::ui;

pub async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut BoardApp,
    client: TasksClient,
    page_size: u32,
) -> Result<(), CliError> {
    tracing::debug!(target: "taskboard.tui", "event loop starting");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (input_reader, mut input_rx) = InputReader::start();
    let mut tick =
        tokio::time::interval(Duration::from_millis(app.config.update_interval_ms.max(16)));

    // Initial page for the opening tab.
    let (tab, cursor, generation) = app.begin_fetch();
    spawn_fetch(client.clone(), tab, cursor, page_size, generation, tx.clone());

    terminal
        .draw(|f| ui::draw(f, app))
        .map_err(|e| CliError::Command(e.to_string()))?;

    let mut exit_requested = false;
    loop {
        let mut effect = Effect::None;
        tokio::select! {
            Some(event) = rx.recv() => {
                app.handle_event(event);
            }
            Some(key) = input_rx.recv() => {
                effect = app.handle_key(key);
            }
            _ = tick.tick() => {}
        }

        match effect {
            Effect::Quit => exit_requested = true,
            Effect::Fetch => {
                let (tab, cursor, generation) = app.begin_fetch();
                spawn_fetch(
                    client.clone(),
                    tab,
                    cursor,
                    page_size,
                    generation,
                    tx.clone(),
                );
            }
            Effect::Submit(submit) => {
                spawn_submit(client.clone(), submit, tx.clone());
            }
            Effect::None => {}
        }

        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| CliError::Command(e.to_string()))?;

        if exit_requested {
            break;
        }
    }

    input_reader.stop();
    Ok(())
}
