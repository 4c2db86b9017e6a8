//! Watch command: poll the project for edits and re-classify orders.
//!
//! Order and criteria file changes are coalesced through a trailing-edge
//! debounce so a burst of edits produces one classification run over the
//! latest state. A criteria change re-classifies every order.

use anyhow::{Context, Result};
use chrono::Local;
use std::collections::{BTreeSet, HashMap};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use freightdesk::classify::classify;
use freightdesk::config::Config;
use freightdesk::criteria::Criterion;
use freightdesk::debounce::Debouncer;
use freightdesk::market::{evaluate_transition, MarketState, PricingAction};
use freightdesk::order::{inputs_digest, order_path, JobOrder};

/// Logger for watch command with structured output and file persistence
pub struct WatchLogger {
    log_file: Option<std::fs::File>,
    log_path: PathBuf,
    stdout_only: bool,
}

impl WatchLogger {
    /// Initialize the watch logger with log file at `.freightdesk/logs/watch.log`
    pub fn init() -> Result<Self> {
        let log_dir = PathBuf::from(freightdesk::paths::LOGS_DIR);
        let log_path = log_dir.join("watch.log");

        // Create log directory if it doesn't exist
        if !log_dir.exists() {
            fs::create_dir_all(&log_dir).with_context(|| {
                format!("Failed to create log directory: {}", log_dir.display())
            })?;
        }

        // Try to open log file in append mode
        let (log_file, stdout_only) =
            match OpenOptions::new().create(true).append(true).open(&log_path) {
                Ok(file) => (Some(file), false),
                Err(e) => {
                    // Log file unwritable - fall back to stdout-only mode
                    eprintln!(
                        "Warning: Could not open log file at {}: {}",
                        log_path.display(),
                        e
                    );
                    eprintln!("Continuing with stdout-only logging");
                    (None, true)
                }
            };

        Ok(WatchLogger {
            log_file,
            log_path,
            stdout_only,
        })
    }

    /// Log an event with timestamp to both stdout and file
    pub fn log_event(&mut self, message: &str) -> Result<()> {
        let timestamp = Local::now().format("[%H:%M:%S]");
        let formatted = format!("{} {}", timestamp, message);

        // Write to stdout
        println!("{}", formatted);

        // Write to file if available
        if let Some(ref mut file) = self.log_file {
            writeln!(file, "{}", formatted).with_context(|| {
                format!("Failed to write to log file: {}", self.log_path.display())
            })?;

            // Flush to ensure visibility during long runs
            file.flush().with_context(|| {
                format!("Failed to flush log file: {}", self.log_path.display())
            })?;
        }

        Ok(())
    }

    /// Check if logger is in stdout-only mode (file logging failed)
    pub fn is_stdout_only(&self) -> bool {
        self.stdout_only
    }
}

/// What changed in one poll iteration.
enum Change {
    Order(String),
    Criteria,
}

pub fn run_watch(once: bool, poll_interval: Option<u64>) -> Result<()> {
    super::ensure_initialized()?;

    let config = Config::load()?;
    // Fail fast on a missing threshold rather than on the first edit
    config.classification.require_threshold()?;
    let orders_dir = config.orders_dir();
    let criteria_path =
        PathBuf::from(shellexpand::tilde(&config.criteria.path).into_owned());

    let poll = Duration::from_millis(poll_interval.unwrap_or(config.watch.poll_interval_ms));
    let window = Duration::from_millis(config.watch.debounce_ms);

    let mut logger = WatchLogger::init()?;
    logger.log_event(&format!(
        "Watching {} (poll {}ms, debounce {}ms)",
        orders_dir.display(),
        poll.as_millis(),
        window.as_millis()
    ))?;

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = running.clone();
    ctrlc::set_handler(move || {
        handler_flag.store(false, Ordering::SeqCst);
    })
    .context("Failed to install interrupt handler")?;

    let mut mtimes: HashMap<PathBuf, SystemTime> = HashMap::new();
    let mut debouncer: Debouncer<()> = Debouncer::new(window);
    let mut pending: BTreeSet<String> = BTreeSet::new();

    loop {
        let changes = scan_changes(&orders_dir, &criteria_path, &mut mtimes)?;

        if !changes.is_empty() {
            for change in &changes {
                match change {
                    Change::Criteria => {
                        logger.log_event("Criteria changed; re-classifying all orders")?;
                        for order in freightdesk::order::load_all_orders(&orders_dir)? {
                            pending.insert(order.id);
                        }
                    }
                    Change::Order(id) => {
                        logger.log_event(&format!("Order {} changed", id))?;
                        pending.insert(id.clone());
                    }
                }
            }
            debouncer.submit((), Instant::now());
        }

        let due = if once {
            // Single pass: drain without waiting out the window
            debouncer.cancel();
            !pending.is_empty()
        } else {
            debouncer.take_due(Instant::now()).is_some()
        };

        if due && !pending.is_empty() {
            match load_snapshot() {
                Ok((threshold, criteria)) => {
                    let ids: Vec<String> = pending.iter().cloned().collect();
                    pending.clear();
                    for id in ids {
                        if let Err(e) =
                            reclassify(&orders_dir, &id, &criteria, threshold, &mut logger)
                        {
                            logger.log_event(&format!("Order {} failed: {:#}", id, e))?;
                        }
                    }
                }
                Err(e) => {
                    // Keep the pending set so the next poll retries
                    logger.log_event(&format!("classification unavailable: {:#}", e))?;
                }
            }
        }

        if once {
            break;
        }
        if !running.load(Ordering::SeqCst) {
            logger.log_event("Interrupted; stopping watch")?;
            break;
        }
        std::thread::sleep(poll);
    }

    Ok(())
}

/// Threshold and criteria are re-read per run so operators can retune both
/// without restarting the watch.
fn load_snapshot() -> Result<(u32, Vec<Criterion>)> {
    let config = Config::load()?;
    let threshold = config.classification.require_threshold()?;
    let criteria = config.criteria_source().fetch()?;
    Ok((threshold, criteria))
}

/// Compare file mtimes against the previous scan. The first scan reports
/// every order file as changed so a fresh watch classifies the backlog.
fn scan_changes(
    orders_dir: &Path,
    criteria_path: &Path,
    mtimes: &mut HashMap<PathBuf, SystemTime>,
) -> Result<Vec<Change>> {
    let mut changes = Vec::new();

    if criteria_path.exists() {
        let modified = fs::metadata(criteria_path)?.modified()?;
        let changed = mtimes
            .insert(criteria_path.to_path_buf(), modified)
            .map(|previous| previous != modified)
            .unwrap_or(false);
        if changed {
            changes.push(Change::Criteria);
        }
    }

    if orders_dir.exists() {
        for entry in fs::read_dir(orders_dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(id) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix(".md"))
            else {
                continue;
            };

            let modified = entry.metadata()?.modified()?;
            let changed = mtimes
                .insert(path.clone(), modified)
                .map(|previous| previous != modified)
                .unwrap_or(true);
            if changed {
                changes.push(Change::Order(id.to_string()));
            }
        }
    }

    Ok(changes)
}

fn reclassify(
    orders_dir: &Path,
    id: &str,
    criteria: &[Criterion],
    threshold: u32,
    logger: &mut WatchLogger,
) -> Result<()> {
    let path = order_path(orders_dir, id);
    if !path.exists() {
        logger.log_event(&format!("Order {} removed; skipping", id))?;
        return Ok(());
    }

    let mut order = JobOrder::load(&path)?;
    let digest = inputs_digest(order.attributes(), criteria, threshold);

    if order.fresh_classification(&digest).is_some() {
        return Ok(());
    }

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
    order.save(&path)?;

    logger.log_event(&format!(
        "Order {} classified {} (score {})",
        id, result.market_type, result.complexity_score
    ))?;

    if let Some(PricingAction::SuggestPremium) = outcome.action {
        logger.log_event(&format!(
            "Order {} entered the complex tier; suggest premium pricing",
            id
        ))?;
    }

    Ok(())
}
