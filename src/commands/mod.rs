//! CLI commands

pub mod hosts;
pub mod projects;
pub mod utils;
