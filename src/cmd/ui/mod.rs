//! Terminal UI helpers for the freightdesk CLI.

pub mod output;
