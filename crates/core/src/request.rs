// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Workflow requests as data.
//!
//! A request captures operator intent at submission time and is never
//! persisted client-side beyond the in-flight call.

use crate::error::{PayrollError, translate_domain_error};
use crate::session::SessionContext;
use planilla_domain::{
    AggregateId, PeriodKey, ResolvedPeriod, WorkerRef, WorkerSelection, resolve_period,
};
use time::Date;

/// A single payroll generation submission.
///
/// Constructed fresh per submission. Validation (initiator present,
/// workers non-empty) happens in the orchestrator before any network
/// call.
#[derive(Debug, Clone)]
pub struct PayrollGenerationRequest {
    /// The period the payroll is scoped to.
    pub period: PeriodKey,
    /// The date payment is scheduled for.
    pub scheduled_payment_date: Date,
    /// The workers to cover. Must be non-empty to pass validation.
    pub workers: Vec<WorkerRef>,
    /// The acting operator, if a session could be resolved.
    pub initiator: Option<SessionContext>,
}

impl PayrollGenerationRequest {
    /// Builds a request from a resolved period and the operator's
    /// current selection.
    #[must_use]
    pub fn from_selection(
        period: &ResolvedPeriod,
        selection: &WorkerSelection,
        initiator: Option<SessionContext>,
    ) -> Self {
        Self {
            period: period.key(),
            scheduled_payment_date: period.scheduled_payment_date(),
            workers: selection.workers(),
            initiator,
        }
    }

    /// Builds a request from raw month/year input, resolving the period
    /// and its scheduled payment date on the way in.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::Validation` if the month or year is out of
    /// range.
    pub fn from_raw_period(
        month: u8,
        year: u16,
        selection: &WorkerSelection,
        initiator: Option<SessionContext>,
    ) -> Result<Self, PayrollError> {
        let period: ResolvedPeriod =
            resolve_period(month, year).map_err(translate_domain_error)?;
        Ok(Self::from_selection(&period, selection, initiator))
    }
}

/// A batch of aggregate ids submitted for approval in one mutation.
///
/// The backend applies the batch all-or-nothing; there is no partial
/// success.
#[derive(Debug, Clone)]
pub struct ApprovalBatch {
    /// The aggregates to approve. Must be non-empty to pass validation.
    pub aggregate_ids: Vec<AggregateId>,
    /// The approving operator, if a session could be resolved.
    pub approver: Option<SessionContext>,
    /// Optional free-form notes attached to the approval.
    pub notes: Option<String>,
}

/// Summary returned by a successful bulk approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedSummary {
    /// The number of aggregates transitioned to approved.
    pub approved_count: usize,
}
