//! Organizational roles and their dashboard dispatch.
//!
//! Every role-keyed decision point in freightdesk is an exhaustive match
//! over [`Role`], so adding a role fails to compile until each decision
//! point handles it.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Organizational actor type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Director,
    Manager,
    Finance,
    Operations,
    Hr,
    Administration,
    Marketing,
    Viewer,
}

/// Home view assigned to a role when it signs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dashboard {
    /// Company-wide revenue and approvals overview
    Executive,
    /// Invoices, disbursements, and settlement queues
    Finance,
    /// Job orders, manifests, and shipping instructions
    Operations,
    /// Personnel, training, and safety records
    Personnel,
    /// Customer pipeline and proforma job orders
    Marketing,
    /// Read-only summaries
    ReadOnly,
}

impl Role {
    /// All roles, in display order. Used for matrix rendering and lint.
    pub fn all() -> &'static [Role] {
        &[
            Role::Owner,
            Role::Director,
            Role::Manager,
            Role::Finance,
            Role::Operations,
            Role::Hr,
            Role::Administration,
            Role::Marketing,
            Role::Viewer,
        ]
    }

    /// The home dashboard for this role.
    pub fn dashboard(&self) -> Dashboard {
        match self {
            Role::Owner => Dashboard::Executive,
            Role::Director => Dashboard::Executive,
            Role::Manager => Dashboard::Operations,
            Role::Finance => Dashboard::Finance,
            Role::Operations => Dashboard::Operations,
            Role::Hr => Dashboard::Personnel,
            Role::Administration => Dashboard::Personnel,
            Role::Marketing => Dashboard::Marketing,
            Role::Viewer => Dashboard::ReadOnly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Director => "director",
            Role::Manager => "manager",
            Role::Finance => "finance",
            Role::Operations => "operations",
            Role::Hr => "hr",
            Role::Administration => "administration",
            Role::Marketing => "marketing",
            Role::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "director" => Ok(Role::Director),
            "manager" => Ok(Role::Manager),
            "finance" => Ok(Role::Finance),
            "operations" | "ops" => Ok(Role::Operations),
            "hr" => Ok(Role::Hr),
            "administration" | "admin" => Ok(Role::Administration),
            "marketing" => Ok(Role::Marketing),
            "viewer" => Ok(Role::Viewer),
            other => Err(anyhow!(
                "Unknown role '{}'. Valid roles: owner, director, manager, finance, operations, hr, administration, marketing, viewer",
                other
            )),
        }
    }
}
