//! Classification command: score orders against the current criteria
//! snapshot and persist the result.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use freightdesk::classify::classify;
use freightdesk::config::Config;
use freightdesk::criteria::Criterion;
use freightdesk::formatters::format_classification_report;
use freightdesk::id::resolve_order_id;
use freightdesk::market::{evaluate_transition, MarketState, PricingAction};
use freightdesk::order::{inputs_digest, load_all_orders, order_path, JobOrder};

use super::ui::output::{Output, OutputMode};

/// Classify one order or every order in the project.
pub fn cmd_classify(id: Option<&str>, all: bool, json: bool, quiet: bool) -> Result<()> {
    let mode = if json {
        OutputMode::Json
    } else if quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Human
    };
    let output = Output::new(mode);

    let config = Config::load()?;
    let threshold = config.classification.require_threshold()?;
    let orders_dir = config.orders_dir();

    // One snapshot per invocation so every order in this run sees the same
    // criteria
    let criteria = match config.criteria_source().fetch() {
        Ok(criteria) => criteria,
        Err(e) => {
            output.error(&format!("classification unavailable: {:#}", e));
            anyhow::bail!("classification unavailable");
        }
    };

    if criteria.is_empty() {
        output.warn("Criteria list is empty; every order will score 0");
    }

    let mut orders: Vec<JobOrder> = if all {
        load_all_orders(&orders_dir)?
    } else {
        let partial = id.context("Provide an order ID or use --all")?;
        let full_id = resolve_order_id(&orders_dir, partial)?;
        vec![JobOrder::load(&order_path(&orders_dir, &full_id))?]
    };

    if orders.is_empty() {
        output.warn("No orders to classify");
        return Ok(());
    }

    let progress = if all && mode == OutputMode::Human && orders.len() > 1 {
        let bar = ProgressBar::new(orders.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    for order in &mut orders {
        if let Some(bar) = &progress {
            bar.set_message(order.id.clone());
        }

        classify_order(order, &criteria, threshold, &orders_dir, &output)?;

        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
        output.success(&format!("Classified {} orders", orders.len()));
    }

    Ok(())
}

fn classify_order(
    order: &mut JobOrder,
    criteria: &[Criterion],
    threshold: u32,
    orders_dir: &std::path::Path,
    output: &Output,
) -> Result<()> {
    let digest = inputs_digest(order.attributes(), criteria, threshold);
    let previous = order
        .frontmatter
        .classification
        .as_ref()
        .map(|record| MarketState::from(record.market_type));

    let result = classify(order.attributes(), criteria, threshold);

    let outcome = evaluate_transition(
        previous,
        MarketState::from(result.market_type),
        order.has_pricing_approach(),
    );

    order.apply_classification(&result, digest);
    order.save(&order_path(orders_dir, &order.id))?;

    match output.mode() {
        OutputMode::Json => {
            output.json(&json!({
                "order": order.id.clone(),
                "complexity_score": result.complexity_score,
                "market_type": result.market_type,
                "complexity_factors": result.complexity_factors,
                "suggested_pricing": matches!(outcome.action, Some(PricingAction::SuggestPremium))
                    .then_some("premium"),
            }));
        }
        OutputMode::Human => {
            let report = format_classification_report(
                &order.id,
                order.title.as_deref(),
                &result,
                threshold,
                outcome.action,
            );
            output.info(&report);
            output.info("");
        }
        OutputMode::Quiet => {}
    }

    Ok(())
}
