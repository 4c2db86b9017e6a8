//! Command module structure for the freightdesk CLI

use anyhow::Result;
use std::path::PathBuf;

pub mod classify;
pub mod config;
pub mod init;
pub mod lint;
pub mod order;
pub mod ui;
pub mod util;
pub mod visibility;
pub mod watch;

/// Ensure freightdesk is initialized and return the project directory path.
///
/// This checks for the existence of `.freightdesk/config.md` and returns an
/// error if the project has not been initialized.
pub fn ensure_initialized() -> Result<PathBuf> {
    let config_file = PathBuf::from(freightdesk::paths::CONFIG_FILE);
    if !config_file.exists() {
        anyhow::bail!("Freightdesk not initialized. Run `freightdesk init` first.");
    }
    Ok(PathBuf::from(".freightdesk"))
}
