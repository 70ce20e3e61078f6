//! SSH host aliases from ~/.ssh/config

pub mod catalog;
pub mod parser;

pub use catalog::HostConfigCatalog;
pub use parser::{parse_config, HostEntry};
