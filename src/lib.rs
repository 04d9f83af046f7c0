pub mod cli;
pub mod config;
pub mod form;
pub mod tui;
