// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll aggregate model and state tracking.
//!
//! State transitions are driven entirely by the backend; the client
//! only ever requests `Generated -> Approved` and otherwise reads the
//! state to decide whether a merge is still permitted.

use crate::error::DomainError;
use crate::period::PeriodKey;
use crate::worker::WorkerRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use time::Date;

/// Opaque identifier of a persisted payroll aggregate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AggregateId {
    /// The identifier value assigned by the backend.
    value: String,
}

impl AggregateId {
    /// Creates a new `AggregateId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for AggregateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Lifecycle states of a payroll aggregate as observed by this workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollState {
    /// Freshly generated; members may still be added.
    Generated,
    /// Awaiting review; members may still be added.
    Pending,
    /// Approved for payment. No further member changes.
    Approved,
    /// Payment executed. Terminal.
    Paid,
    /// Rejected by a reviewer. Terminal.
    Rejected,
}

impl PayrollState {
    /// Returns the string representation of the state.
    ///
    /// This is used for wire serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a state from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPayrollState` if the string is not a
    /// valid state.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "generated" => Ok(Self::Generated),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "paid" => Ok(Self::Paid),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidPayrollState(s.to_string())),
        }
    }

    /// Returns true if members may still be added in this state.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Generated | Self::Pending)
    }

    /// Returns true if this state is terminal (cannot transition further).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Rejected)
    }

    /// Validates if a transition from this state to another is permitted.
    ///
    /// Transitions are monotonic: `Generated`/`Pending` may be approved,
    /// `Approved` may be paid, and any non-terminal state may be rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_state: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStateTransition {
                from: self.as_str().to_string(),
                to: new_state.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid: bool = match self {
            Self::Generated | Self::Pending => {
                matches!(new_state, Self::Approved | Self::Rejected)
            }
            Self::Approved => matches!(new_state, Self::Paid | Self::Rejected),
            Self::Paid | Self::Rejected => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStateTransition {
                from: self.as_str().to_string(),
                to: new_state.as_str().to_string(),
                reason: "transition not permitted by payroll lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for PayrollState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for PayrollState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The persisted payroll record for one period covering a set of workers.
///
/// At most one aggregate exists per `PeriodKey`; the backend enforces
/// this and the workflow treats a collision as a recoverable condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollAggregate {
    /// The identifier assigned by the backend.
    pub id: AggregateId,
    /// The period this aggregate is scoped to.
    pub period: PeriodKey,
    /// The covered workers. Unique; order irrelevant.
    pub members: BTreeSet<WorkerRef>,
    /// The current lifecycle state.
    pub state: PayrollState,
    /// The date payment is scheduled for.
    pub scheduled_payment_date: Date,
    /// The net total computed server-side. Opaque to this workflow.
    pub total_net: Option<f64>,
}

impl PayrollAggregate {
    /// Checks whether a worker is already a member of this aggregate.
    #[must_use]
    pub fn contains_member(&self, worker: &WorkerRef) -> bool {
        self.members.contains(worker)
    }

    /// Returns the requested workers that are not yet members, in the
    /// requested order with duplicates removed.
    ///
    /// This is the member-delta submitted on the merge path; a worker
    /// that is already a member is never re-submitted.
    #[must_use]
    pub fn missing_members(&self, requested: &[WorkerRef]) -> Vec<WorkerRef> {
        let mut seen: BTreeSet<&WorkerRef> = BTreeSet::new();
        requested
            .iter()
            .filter(|worker| !self.contains_member(*worker) && seen.insert(*worker))
            .cloned()
            .collect()
    }
}
