use taskboard_core::error::CliError;
use taskboard_core::query::parse_active_tab;
use taskboard_core::{Board, Tab, Task, TasksClient};

use super::cli::ListArgs;

pub async fn run(client: &TasksClient, args: &ListArgs, page_size: u32) -> Result<i32, CliError> {
    let tab = parse_active_tab(args.query.as_deref());
    let size = args.size.unwrap_or(page_size);

    let board = fetch(client, tab, size, args.all).await?;

    let tasks = board.tasks(tab);
    if tasks.is_empty() {
        println!("No tasks found");
        return Ok(0);
    }

    for task in tasks {
        println!("{}", render_line(task));
    }
    if !args.all && board.can_load_more(tab) {
        println!("... more available (--all to fetch everything)");
    }
    Ok(0)
}

async fn fetch(client: &TasksClient, tab: Tab, size: u32, all: bool) -> Result<Board, CliError> {
    let mut board = Board::new();
    loop {
        let page = client
            .fetch_tasks(tab, board.cursor(tab), size)
            .await
            .map_err(|e| CliError::Fetch(e.to_string()))?;
        board.merge_page(tab, page);
        if !all || !board.can_load_more(tab) {
            break;
        }
    }
    Ok(board)
}

fn render_line(task: &Task) -> String {
    let assignee = task.assignee.as_deref().unwrap_or("-");
    let ends_on = task
        .ends_on
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<20} {:<16} {:<16} {:<10} {}",
        task.id,
        task.status.as_str(),
        assignee,
        ends_on,
        task.title
    )
}
