//! Visibility command handlers: single lookups and the role matrix.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::str::FromStr;

use freightdesk::formatters::format_visibility_matrix;
use freightdesk::role::Role;
use freightdesk::visibility::{ViewerContext, VisibilityTable};

/// Answer one visibility lookup through the fail-closed viewer context.
pub fn cmd_visibility(
    module: &str,
    role: Option<&str>,
    field: Option<&str>,
    anonymous: bool,
) -> Result<()> {
    let table = VisibilityTable::load(Path::new(freightdesk::paths::VISIBILITY_FILE))?;

    let ctx = if anonymous {
        ViewerContext::anonymous()
    } else {
        let role = role
            .ok_or_else(|| anyhow::anyhow!("Provide a role, or --anonymous for no role"))?;
        ViewerContext::new(Role::from_str(role)?)
    };

    let viewer = match ctx.role() {
        Some(role) => format!("{} ({} dashboard)", role, dashboard_label(role)),
        None => "anonymous".to_string(),
    };

    let (target, visible) = match field {
        Some(field) => (
            format!("{}.{}", module, field),
            ctx.field_visible(&table, module, field),
        ),
        None => (module.to_string(), ctx.module_visible(&table, module)),
    };

    let verdict = if visible {
        "visible".green().to_string()
    } else {
        "hidden".red().to_string()
    };

    println!("{:<12} {}", "Viewer:", viewer);
    println!("{:<12} {}", "Target:", target.cyan());
    println!("{:<12} {}", "Verdict:", verdict);

    Ok(())
}

/// Render the visibility matrix for a module.
pub fn cmd_fields(module: &str, role: Option<&str>) -> Result<()> {
    let table = VisibilityTable::load(Path::new(freightdesk::paths::VISIBILITY_FILE))?;

    let roles: Vec<Role> = match role {
        Some(role) => vec![Role::from_str(role)?],
        None => Role::all().to_vec(),
    };

    println!("{}", format_visibility_matrix(&table, module, &roles));

    if table.known_fields(module).is_empty() && !table.known_modules().contains(&module.to_string())
    {
        println!();
        println!(
            "{}",
            "No rules mention this module; everything is visible to authenticated roles.".dimmed()
        );
    }

    Ok(())
}

fn dashboard_label(role: Role) -> &'static str {
    use freightdesk::role::Dashboard;

    match role.dashboard() {
        Dashboard::Executive => "executive",
        Dashboard::Finance => "finance",
        Dashboard::Operations => "operations",
        Dashboard::Personnel => "personnel",
        Dashboard::Marketing => "marketing",
        Dashboard::ReadOnly => "read-only",
    }
}
