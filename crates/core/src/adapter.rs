// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cache and notification adapter boundaries.
//!
//! The workflow reports terminal outcomes through these traits instead
//! of broadcasting on an ambient event bus; the embedding application
//! passes its query-cache and toast implementations in explicitly.

use planilla_domain::{AggregateId, PeriodKey};

/// Cached query scopes the workflow invalidates after a successful
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheScope {
    /// The payroll list view.
    PayrollList,
    /// The detail view of one aggregate.
    PayrollDetail(AggregateId),
    /// The workers-without-payroll listing for a period.
    WorkersWithoutPayroll(PeriodKey),
}

/// Invalidation hook into the embedding application's query cache.
///
/// Invoked only after successful mutations; failures invalidate
/// nothing.
pub trait QueryCache: Send + Sync {
    /// Invalidates one cached scope, triggering a refetch downstream.
    fn invalidate(&self, scope: CacheScope);
}

/// Terminal outcome of a workflow run.
///
/// Exactly one outcome is reported per run. Creation and merge are
/// deliberately distinct so the operator can tell "created" from
/// "workers added to existing payroll"; both are successes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// A new aggregate was created for the period.
    Created {
        /// The period the aggregate covers.
        period: PeriodKey,
        /// The number of covered workers.
        member_count: usize,
    },
    /// Workers were merged into the existing aggregate for the period.
    Merged {
        /// The period the aggregate covers.
        period: PeriodKey,
        /// The number of workers actually added. Zero when every
        /// requested worker was already a member.
        added_count: usize,
    },
    /// A batch of aggregates was approved.
    Approved {
        /// The number of aggregates approved.
        approved_count: usize,
    },
    /// The run failed.
    Failed {
        /// A human-readable description of the failure.
        message: String,
    },
}

impl std::fmt::Display for WorkflowOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created {
                period,
                member_count,
            } => {
                write!(
                    f,
                    "Payroll for {period} created covering {member_count} workers"
                )
            }
            Self::Merged {
                period,
                added_count,
            } => {
                write!(
                    f,
                    "Workers added to the existing payroll for {period} ({added_count} added)"
                )
            }
            Self::Approved { approved_count } => {
                write!(f, "{approved_count} payrolls approved")
            }
            Self::Failed { message } => write!(f, "{message}"),
        }
    }
}

/// Notification hook surfacing terminal outcomes to the operator.
///
/// Implementations render the outcome however the application chooses;
/// the workflow guarantees it fires exactly once per terminal outcome.
pub trait WorkflowNotifier: Send + Sync {
    /// Reports one terminal outcome.
    fn notify(&self, outcome: &WorkflowOutcome);
}
