//! Utility commands: version info, man page, shell completions.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use crate::Cli;

/// Print version, commit, and build date.
pub fn cmd_version() -> Result<()> {
    const GIT_SHA: &str = env!("GIT_SHA");
    const BUILD_DATE: &str = env!("BUILD_DATE");
    println!("freightdesk {}", env!("CARGO_PKG_VERSION"));
    println!("commit: {}", GIT_SHA);
    println!("built: {}", BUILD_DATE);
    Ok(())
}

/// Generate man page
pub fn cmd_man(out_dir: Option<&PathBuf>) -> Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;

    let output_dir = out_dir
        .map(|p| p.to_owned())
        .unwrap_or_else(|| PathBuf::from("."));

    std::fs::create_dir_all(&output_dir)?;
    let man_path = output_dir.join("freightdesk.1");
    std::fs::write(&man_path, buffer)?;

    println!("Man page written to: {}", man_path.display());
    Ok(())
}

/// Generate shell completions on stdout
pub fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "freightdesk", &mut io::stdout());
    Ok(())
}
