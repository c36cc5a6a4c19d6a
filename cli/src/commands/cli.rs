use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "taskboard", about = "Terminal client for a task-tracking service")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend root URL, overriding the config file.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token, overriding the config file.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Explicit config file path (skips the usual lookup).
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    /// Status filter in the web UI's notation, e.g. `is:in-progress`.
    /// Unknown values fall back to `is:available`.
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,

    /// Follow the pagination cursor until the tab is exhausted.
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Page size per request (defaults to the configured size).
    #[arg(long)]
    pub size: Option<u32>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AssignArgs {
    /// Id of the task to update.
    pub task_id: String,

    /// New assignee; an empty value clears the field server-side.
    #[arg(long, default_value = "")]
    pub assignee: String,

    /// New workflow status, wire form (e.g. IN_PROGRESS).
    #[arg(long, default_value = "ASSIGNED")]
    pub status: String,

    /// Due date, YYYY-MM-DD.
    #[arg(long)]
    pub ends_on: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BrowseArgs {
    /// Tab to open, same notation as `list -q`.
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive task board (default).
    Browse(BrowseArgs),
    /// Print one tab's tasks, one per line.
    List(ListArgs),
    /// Assign/update a single task.
    Assign(AssignArgs),
}
