//! Output formatters for classification and visibility data
//!
//! Provides formatters that transform library results into terminal text.

use colored::Colorize;

use crate::classify::{MarketClassification, MarketType};
use crate::market::PricingAction;
use crate::order::JobOrder;
use crate::role::Role;
use crate::visibility::{ViewerContext, VisibilityTable};

/// Format a classification result as a multi-section report.
pub fn format_classification_report(
    order_id: &str,
    title: Option<&str>,
    result: &MarketClassification,
    threshold: u32,
    action: Option<PricingAction>,
) -> String {
    let mut output = vec![
        format!("{}  {}", order_id.cyan(), title.unwrap_or("(untitled)")),
        String::new(),
        format!(
            "  {:<12} {} (threshold {})",
            "Score:", result.complexity_score, threshold
        ),
        format!("  {:<12} {}", "Market:", format_market_type(result.market_type)),
    ];

    output.push(String::new());
    if result.complexity_factors.is_empty() {
        output.push("  (no criteria triggered)".dimmed().to_string());
    } else {
        output.push("Triggered criteria".bold().to_string());
        output.push("──────────────────".to_string());
        for factor in &result.complexity_factors {
            output.push(format!(
                "  {:<20} {:<28} {:>6}  ({})",
                factor.code.cyan(),
                factor.name,
                format!("+{}", factor.weight),
                factor.triggered_value
            ));
        }
    }

    if let Some(PricingAction::SuggestPremium) = action {
        output.push(String::new());
        output.push(
            "  Suggested pricing approach: premium (order entered the complex tier)"
                .yellow()
                .to_string(),
        );
    }

    output.join("\n")
}

fn format_market_type(market_type: MarketType) -> String {
    match market_type {
        MarketType::Simple => "simple".green().to_string(),
        MarketType::Complex => "complex".red().bold().to_string(),
    }
}

/// Format one order as a list line.
pub fn format_order_line(order: &JobOrder) -> String {
    let title = order.title.as_deref().unwrap_or("(untitled)");
    let truncated_title = truncate_title(title, 48);

    let tier = match &order.frontmatter.classification {
        Some(record) => format!(
            "{} ({})",
            format_market_type(record.market_type),
            record.complexity_score
        ),
        None => "unclassified".dimmed().to_string(),
    };

    format!("  {} {:<50} {}", order.id.cyan(), truncated_title, tier)
}

/// Format the visibility matrix for one module: every role against every
/// field named by a rule, through the fail-closed viewer context.
pub fn format_visibility_matrix(table: &VisibilityTable, module: &str, roles: &[Role]) -> String {
    let fields = table.known_fields(module);

    let mut output = vec![
        format!("Module: {}", module.bold()),
        "─────────────────".to_string(),
    ];

    for role in roles {
        let ctx = ViewerContext::new(*role);
        let module_marker = if ctx.module_visible(table, module) {
            "visible".green().to_string()
        } else {
            "hidden".red().to_string()
        };

        let mut line = format!("  {:<16} {}", role.to_string(), module_marker);

        let hidden_fields: Vec<&str> = fields
            .iter()
            .filter(|field| !ctx.field_visible(table, module, field))
            .map(|s| s.as_str())
            .collect();

        if !hidden_fields.is_empty() && ctx.module_visible(table, module) {
            line.push_str(&format!(
                "  (hidden fields: {})",
                hidden_fields.join(", ").dimmed()
            ));
        }

        output.push(line);
    }

    output.join("\n")
}

/// Truncate a title to fit terminal width
fn truncate_title(title: &str, max_len: usize) -> String {
    if title.len() <= max_len {
        title.to_string()
    } else {
        format!("{}...", &title[..max_len.saturating_sub(3)])
    }
}
