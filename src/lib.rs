pub mod answers;
pub mod cli;
pub mod commit_type;
pub mod compose;
pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod questions;
pub mod session;
pub mod ui;
pub mod wrap;
