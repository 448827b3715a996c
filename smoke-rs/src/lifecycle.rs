//! Contract lifecycle state machine
//!
//! The approval lifecycle verified against the server is a strict linear
//! chain: `created → approved → sent → signed → locked`. Each status has at
//! most one legal successor, `locked` is terminal, and any transition that
//! skips a stage is invalid. The server is also expected to reject every
//! mutation of a `locked` contract.
//!
//! The harness never drives these transitions itself beyond issuing the
//! requests; this module is the single source of truth for what the server
//! must accept and refuse.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Created,
    Approved,
    Sent,
    Signed,
    Locked,
}

/// Reporting category a status belongs to, as used by the `category` list
/// filter and the `byCategory` stats buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Pending,
    Active,
    Signed,
}

impl ContractStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [ContractStatus; 5] = [
        ContractStatus::Created,
        ContractStatus::Approved,
        ContractStatus::Sent,
        ContractStatus::Signed,
        ContractStatus::Locked,
    ];

    /// Wire form of the status (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Created => "created",
            ContractStatus::Approved => "approved",
            ContractStatus::Sent => "sent",
            ContractStatus::Signed => "signed",
            ContractStatus::Locked => "locked",
        }
    }

    /// Parse a wire-form status.
    pub fn parse(s: &str) -> Option<ContractStatus> {
        match s {
            "created" => Some(ContractStatus::Created),
            "approved" => Some(ContractStatus::Approved),
            "sent" => Some(ContractStatus::Sent),
            "signed" => Some(ContractStatus::Signed),
            "locked" => Some(ContractStatus::Locked),
            _ => None,
        }
    }

    /// The sole legal successor of this status, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use ah_smoke::ContractStatus;
    ///
    /// assert_eq!(ContractStatus::Created.next(), Some(ContractStatus::Approved));
    /// assert_eq!(ContractStatus::Locked.next(), None);
    /// ```
    pub fn next(&self) -> Option<ContractStatus> {
        match self {
            ContractStatus::Created => Some(ContractStatus::Approved),
            ContractStatus::Approved => Some(ContractStatus::Sent),
            ContractStatus::Sent => Some(ContractStatus::Signed),
            ContractStatus::Signed => Some(ContractStatus::Locked),
            ContractStatus::Locked => None,
        }
    }

    /// Whether `target` is a legal transition from this status.
    pub fn allows(&self, target: ContractStatus) -> bool {
        self.next() == Some(target)
    }

    /// Terminal statuses accept no transitions and no edits.
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// Reporting category of this status.
    pub fn category(&self) -> StatusCategory {
        match self {
            ContractStatus::Created | ContractStatus::Approved => StatusCategory::Pending,
            ContractStatus::Sent => StatusCategory::Active,
            ContractStatus::Signed | ContractStatus::Locked => StatusCategory::Signed,
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StatusCategory {
    /// Wire form of the category (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Pending => "pending",
            StatusCategory::Active => "active",
            StatusCategory::Signed => "signed",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four legal consecutive transitions, each with the note the harness
/// attaches to the transition request.
pub fn approval_chain() -> [(ContractStatus, ContractStatus, &'static str); 4] {
    [
        (
            ContractStatus::Created,
            ContractStatus::Approved,
            "Contract approved for sending",
        ),
        (
            ContractStatus::Approved,
            ContractStatus::Sent,
            "Contract sent to client",
        ),
        (
            ContractStatus::Sent,
            ContractStatus::Signed,
            "Contract signed by client",
        ),
        (
            ContractStatus::Signed,
            ContractStatus::Locked,
            "Contract locked and finalized",
        ),
    ]
}

/// Illegal direct targets from `created`: every later stage but the
/// immediate successor.
pub fn skip_targets() -> [ContractStatus; 3] {
    [
        ContractStatus::Sent,
        ContractStatus::Signed,
        ContractStatus::Locked,
    ]
}
