pub mod action;
pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod task;

pub use board::Board;
pub use client::TasksClient;
pub use error::CliError;
pub use task::{Tab, Task, TaskStatus, TaskUpdate, TasksPage};
