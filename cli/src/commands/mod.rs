pub mod assign;
pub mod cli;
pub mod list;
