use taskboard_core::config::AppConfig;
use taskboard_core::error::CliError;
use taskboard_core::query::parse_active_tab;
use taskboard_core::TasksClient;

use crate::tui;

/// Run the interactive board: terminal setup, the event loop, restore.
pub async fn run_browse(cfg: &AppConfig, query: Option<&str>) -> Result<i32, CliError> {
    tui::check_tui_support().map_err(CliError::Command)?;

    let client = build_client(cfg)?;

    let initial_tab = parse_active_tab(query);
    let mut app = tui::BoardApp::new(cfg.tui.clone(), initial_tab);

    let mut terminal = tui::setup_terminal().map_err(CliError::Command)?;
    let result = tui::run_loop(&mut terminal, &mut app, client, cfg.api.page_size).await;
    tui::restore_terminal(&mut terminal);
    result?;
    Ok(0)
}

pub fn build_client(cfg: &AppConfig) -> Result<TasksClient, CliError> {
    TasksClient::new(&cfg.api.base_url, cfg.api.api_key.clone(), cfg.api.timeout_ms)
        .map_err(|e| CliError::Config(e.to_string()))
}
