//! Order ID generation with date-based sequencing.
//!
//! IDs look like `2026-08-08-001-q7e`: the creation date, a base36 daily
//! sequence, and a random base36 suffix so concurrent desks don't collide.

use anyhow::{anyhow, Result};
use chrono::Local;
use rand::Rng;
use std::path::Path;

const BASE36_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a new order ID in the format: YYYY-MM-DD-SSS-XXX
/// where SSS is a base36 sequence and XXX is a random base36 suffix.
pub fn generate_id(orders_dir: &Path) -> Result<String> {
    let date = Local::now().format("%Y-%m-%d").to_string();
    let seq = next_sequence_for_date(orders_dir, &date)?;
    let rand = random_base36(3);

    Ok(format!("{}-{}-{}", date, format_base36(seq, 3), rand))
}

/// Get the next sequence number for a given date.
fn next_sequence_for_date(orders_dir: &Path, date: &str) -> Result<u32> {
    let mut max_seq = 0u32;

    if orders_dir.exists() {
        for entry in std::fs::read_dir(orders_dir)? {
            let entry = entry?;
            let filename = entry.file_name();
            let name = filename.to_string_lossy();

            // Match pattern: YYYY-MM-DD-SSS-XXX.md
            if name.starts_with(date) && name.ends_with(".md") {
                let parts: Vec<&str> = name.trim_end_matches(".md").split('-').collect();
                if parts.len() >= 5 {
                    // parts: [YYYY, MM, DD, SSS, XXX]
                    if let Some(seq) = parse_base36(parts[3]) {
                        max_seq = max_seq.max(seq);
                    }
                }
            }
        }
    }

    Ok(max_seq + 1)
}

/// Format a number as base36 with zero-padding.
pub fn format_base36(n: u32, width: usize) -> String {
    if n == 0 {
        return "0".repeat(width);
    }

    let mut result = Vec::new();
    let mut num = n;

    while num > 0 {
        let digit = (num % 36) as usize;
        result.push(BASE36_CHARS[digit] as char);
        num /= 36;
    }

    result.reverse();
    let s: String = result.into_iter().collect();

    if s.len() < width {
        format!("{:0>width$}", s, width = width)
    } else {
        s
    }
}

/// Parse a base36 string to a number.
fn parse_base36(s: &str) -> Option<u32> {
    let mut result = 0u32;

    for c in s.chars() {
        result *= 36;
        if let Some(pos) = BASE36_CHARS.iter().position(|&b| b as char == c) {
            result += pos as u32;
        } else {
            return None;
        }
    }

    Some(result)
}

/// Generate a random base36 string of the given length.
fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36_CHARS[rng.gen_range(0..36)] as char)
        .collect()
}

/// Resolve a possibly-partial order ID against the orders directory.
///
/// An exact filename match wins; otherwise a unique prefix or substring
/// match is accepted. Ambiguous and unknown IDs are errors listing the
/// candidates.
pub fn resolve_order_id(orders_dir: &Path, partial: &str) -> Result<String> {
    if partial.is_empty() {
        return Err(anyhow!("Order ID cannot be empty"));
    }

    let exact = orders_dir.join(format!("{}.md", partial));
    if exact.exists() {
        return Ok(partial.to_string());
    }

    let mut candidates = Vec::new();
    if orders_dir.exists() {
        for entry in std::fs::read_dir(orders_dir)? {
            let entry = entry?;
            let filename = entry.file_name();
            let name = filename.to_string_lossy();
            if let Some(id) = name.strip_suffix(".md") {
                if id.starts_with(partial) || id.contains(partial) {
                    candidates.push(id.to_string());
                }
            }
        }
    }

    match candidates.len() {
        0 => Err(anyhow!("No order matching '{}'", partial)),
        1 => Ok(candidates.remove(0)),
        _ => {
            candidates.sort();
            Err(anyhow!(
                "Ambiguous order ID '{}', matches: {}",
                partial,
                candidates.join(", ")
            ))
        }
    }
}
