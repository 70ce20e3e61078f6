//! Platform-specific configuration and paths

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the editor workspace storage directory
/// - macOS: ~/Library/Application Support/Code/User/workspaceStorage/
/// - Linux: ~/.config/Code/User/workspaceStorage/
/// - Windows: %APPDATA%/Code/User/workspaceStorage/
pub fn workspace_storage_dir() -> Result<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join("Library")
            .join("Application Support")
            .join("Code")
            .join("User")
            .join("workspaceStorage"))
    }

    #[cfg(not(target_os = "macos"))]
    {
        let config = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config.join("Code").join("User").join("workspaceStorage"))
    }
}

/// Get the per-user SSH config file (~/.ssh/config)
pub fn ssh_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".ssh").join("config"))
}
