mod app;
mod events;
mod fetch;
mod loop_run;
mod terminal;
mod ui;

pub use app::{AppEvent, BoardApp, Effect, FormField, FormState, Mode};
pub use events::InputReader;
pub use fetch::{spawn_fetch, spawn_submit};
pub use loop_run::run_loop;
pub use terminal::{check_tui_support, restore_terminal, setup_terminal};
