// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The remote payroll service boundary.
//!
//! These are semantic contracts; the wire encoding lives behind the
//! trait. The workflow depends only on this trait, so tests substitute
//! an in-memory implementation and the HTTP binding lives in its own
//! crate.

use crate::error::ServiceError;
use crate::request::ApprovedSummary;
use crate::session::SessionContext;
use async_trait::async_trait;
use planilla_domain::{AggregateId, PayrollAggregate, PeriodKey, WorkerRef};
use time::Date;

/// Operations consumed from the remote payroll resource.
///
/// Every method is a suspend point; nothing else in the workflow
/// suspends. None of the operations is retried by the workflow.
#[async_trait]
pub trait PayrollService: Send + Sync {
    /// Creates the aggregate for a period.
    ///
    /// Not idempotent: the backend rejects a second creation for the
    /// same period with a conflict signal.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Conflict` if an aggregate already exists
    /// for the period, `ServiceError::Validation` if the server rejects
    /// the request, or `ServiceError::Transient` on network failure.
    async fn create_aggregate(
        &self,
        period: &PeriodKey,
        scheduled_payment_date: Date,
        workers: &[WorkerRef],
        initiator: &SessionContext,
    ) -> Result<PayrollAggregate, ServiceError>;

    /// Looks up the canonical aggregate for a period.
    ///
    /// Returns `Ok(None)` when no aggregate exists; the caller decides
    /// whether absence is expected.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Transient` on network failure.
    async fn aggregate_by_period(
        &self,
        period: &PeriodKey,
    ) -> Result<Option<PayrollAggregate>, ServiceError>;

    /// Adds workers to an existing aggregate.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the aggregate does not
    /// exist, `ServiceError::StateConflict` if it is no longer
    /// editable, or `ServiceError::Transient` on network failure.
    async fn add_members(
        &self,
        id: &AggregateId,
        workers: &[WorkerRef],
        initiator: &SessionContext,
    ) -> Result<PayrollAggregate, ServiceError>;

    /// Transitions a batch of aggregates to approved in one mutation.
    ///
    /// All-or-nothing: the backend either accepts the whole batch or
    /// the call fails and no aggregate changes state.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if the server rejects the
    /// batch or `ServiceError::Transient` on network failure.
    async fn bulk_approve(
        &self,
        aggregate_ids: &[AggregateId],
        approver: &SessionContext,
        notes: Option<&str>,
    ) -> Result<ApprovedSummary, ServiceError>;

    /// Lists the workers not yet covered by an aggregate for a period.
    ///
    /// Read-only; feeds the operator's selection set.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Transient` on network failure.
    async fn workers_without_aggregate(
        &self,
        period: &PeriodKey,
    ) -> Result<Vec<WorkerRef>, ServiceError>;
}
