//! Order command handlers: add, list, show.

use anyhow::{Context, Result};
use colored::Colorize;
use std::str::FromStr;

use freightdesk::attributes::AttributeValue;
use freightdesk::classify::MarketType;
use freightdesk::config::Config;
use freightdesk::formatters::format_order_line;
use freightdesk::id::{generate_id, resolve_order_id};
use freightdesk::order::{load_all_orders, order_path, JobOrder, OrderFrontmatter};

/// Create a new job order file from the CLI arguments.
pub fn cmd_add(
    description: &str,
    customer: Option<&str>,
    origin: Option<&str>,
    destination: Option<&str>,
    attrs: &[String],
) -> Result<()> {
    let config = Config::load()?;
    let orders_dir = config.orders_dir();
    std::fs::create_dir_all(&orders_dir)
        .with_context(|| format!("Failed to create {}", orders_dir.display()))?;

    let mut frontmatter = OrderFrontmatter {
        customer: customer.map(String::from),
        origin: origin.map(String::from),
        destination: destination.map(String::from),
        ..Default::default()
    };

    for pair in attrs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Invalid --attr '{}', expected key=value", pair))?;
        frontmatter
            .attributes
            .insert(key.trim(), AttributeValue::parse(value));
    }

    let id = generate_id(&orders_dir)?;
    let order = JobOrder {
        id: id.clone(),
        frontmatter,
        title: Some(description.to_string()),
        body: format!("# {}\n", description),
    };

    let path = order_path(&orders_dir, &id);
    order.save(&path)?;

    println!("{} Created order {}", "✓".green(), id.cyan());
    println!("  {}", path.display());

    Ok(())
}

/// List orders, optionally filtered by market tier or missing classification.
pub fn cmd_list(market: Option<&str>, unclassified: bool, count: bool) -> Result<()> {
    let config = Config::load()?;
    let orders = load_all_orders(&config.orders_dir())?;

    let market_filter = market.map(MarketType::from_str).transpose()?;

    let filtered: Vec<&JobOrder> = orders
        .iter()
        .filter(|order| {
            let record = order.frontmatter.classification.as_ref();
            if unclassified {
                return record.is_none();
            }
            match market_filter {
                Some(tier) => record.map(|r| r.market_type) == Some(tier),
                None => true,
            }
        })
        .collect();

    if count {
        println!("{}", filtered.len());
        return Ok(());
    }

    if filtered.is_empty() {
        println!("{}", "(no matching orders)".dimmed());
        return Ok(());
    }

    for order in filtered {
        println!("{}", format_order_line(order));
    }

    Ok(())
}

/// Show one order's frontmatter summary, optionally with its body.
pub fn cmd_show(id: &str, body: bool) -> Result<()> {
    let config = Config::load()?;
    let orders_dir = config.orders_dir();
    let full_id = resolve_order_id(&orders_dir, id)?;
    let order = JobOrder::load(&order_path(&orders_dir, &full_id))?;

    let title = order.title.as_deref().unwrap_or("(untitled)");
    println!("{}  {}", order.id.cyan(), title.bold());
    println!();

    if let Some(customer) = &order.frontmatter.customer {
        println!("  {:<16} {}", "Customer:", customer);
    }
    match (&order.frontmatter.origin, &order.frontmatter.destination) {
        (Some(origin), Some(destination)) => {
            println!("  {:<16} {} → {}", "Route:", origin, destination)
        }
        (Some(origin), None) => println!("  {:<16} {}", "Origin:", origin),
        (None, Some(destination)) => println!("  {:<16} {}", "Destination:", destination),
        (None, None) => {}
    }
    if let Some(pricing) = order.frontmatter.pricing_approach {
        println!("  {:<16} {}", "Pricing:", pricing);
    }

    match &order.frontmatter.classification {
        Some(record) => {
            println!(
                "  {:<16} {} (score {}, {})",
                "Market:", record.market_type, record.complexity_score, record.classified_at
            );
        }
        None => println!("  {:<16} {}", "Market:", "unclassified".dimmed()),
    }

    if !order.attributes().is_empty() {
        println!();
        println!("{}", "Attributes".bold());
        println!("──────────");
        for (name, value) in order.attributes().iter() {
            println!("  {:<24} {}", name, value);
        }
    }

    if body {
        println!();
        println!("{}", order.body.trim_end());
    }

    Ok(())
}
