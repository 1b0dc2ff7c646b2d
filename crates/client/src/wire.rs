// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire representations exchanged with the payroll backend.
//!
//! Request bodies carry plain strings; responses are parsed back into
//! domain types so malformed payloads fail here rather than deeper in
//! the workflow.

use planilla::{ApprovedSummary, ServiceError};
use planilla_domain::{AggregateId, PayrollAggregate, PayrollState, PeriodKey, WorkerRef};
use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(wire_date, Date, "[year]-[month]-[day]");

/// The error code the backend uses when a period already has a payroll.
const PERIOD_CONFLICT_CODE: &str = "payroll_period_exists";

/// Body of the create-payroll mutation.
#[derive(Debug, Serialize)]
pub(crate) struct CreatePayrollBody {
    pub month: u8,
    pub year: u16,
    #[serde(with = "wire_date")]
    pub scheduled_payment_date: Date,
    pub workers: Vec<String>,
    pub requested_by: String,
}

impl CreatePayrollBody {
    pub(crate) fn new(
        period: &PeriodKey,
        scheduled_payment_date: Date,
        workers: &[WorkerRef],
        requested_by: &str,
    ) -> Self {
        Self {
            month: period.month(),
            year: period.year(),
            scheduled_payment_date,
            workers: workers.iter().map(|w| w.value().to_string()).collect(),
            requested_by: requested_by.to_string(),
        }
    }
}

/// Body of the add-members mutation.
#[derive(Debug, Serialize)]
pub(crate) struct AddMembersBody {
    pub workers: Vec<String>,
    pub requested_by: String,
}

impl AddMembersBody {
    pub(crate) fn new(workers: &[WorkerRef], requested_by: &str) -> Self {
        Self {
            workers: workers.iter().map(|w| w.value().to_string()).collect(),
            requested_by: requested_by.to_string(),
        }
    }
}

/// Body of the bulk-approval mutation.
#[derive(Debug, Serialize)]
pub(crate) struct BulkApproveBody {
    pub payroll_ids: Vec<String>,
    pub approved_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BulkApproveBody {
    pub(crate) fn new(ids: &[AggregateId], approved_by: &str, notes: Option<&str>) -> Self {
        Self {
            payroll_ids: ids.iter().map(|id| id.value().to_string()).collect(),
            approved_by: approved_by.to_string(),
            notes: notes.map(ToString::to_string),
        }
    }
}

/// A payroll aggregate as the backend serializes it.
#[derive(Debug, Deserialize)]
pub(crate) struct PayrollDto {
    pub id: String,
    pub month: u8,
    pub year: u16,
    pub state: PayrollState,
    pub members: Vec<String>,
    #[serde(with = "wire_date")]
    pub scheduled_payment_date: Date,
    #[serde(default)]
    pub total_net: Option<f64>,
}

impl PayrollDto {
    /// Converts the wire record into the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Transient` if the payload violates domain
    /// invariants (bad period, empty member id); that indicates a
    /// backend fault, not operator error.
    pub(crate) fn into_aggregate(self) -> Result<PayrollAggregate, ServiceError> {
        let malformed = |detail: String| ServiceError::Transient {
            message: format!("malformed payroll payload: {detail}"),
        };

        let period: PeriodKey =
            PeriodKey::new(self.month, self.year).map_err(|err| malformed(err.to_string()))?;
        let members = self
            .members
            .iter()
            .map(|m| WorkerRef::new(m))
            .collect::<Result<_, _>>()
            .map_err(|err| malformed(err.to_string()))?;

        Ok(PayrollAggregate {
            id: AggregateId::new(&self.id),
            period,
            members,
            state: self.state,
            scheduled_payment_date: self.scheduled_payment_date,
            total_net: self.total_net,
        })
    }
}

/// Summary returned by the bulk-approval mutation.
#[derive(Debug, Deserialize)]
pub(crate) struct ApprovalSummaryDto {
    pub approved_count: usize,
}

impl ApprovalSummaryDto {
    pub(crate) const fn into_summary(self) -> ApprovedSummary {
        ApprovedSummary {
            approved_count: self.approved_count,
        }
    }
}

/// One worker row from the without-payroll listing.
#[derive(Debug, Deserialize)]
pub(crate) struct WorkerDto {
    pub id: String,
}

/// The backend's error envelope.
///
/// Both fields are optional: proxies and gateways return bodies of their
/// own and classification must not depend on parsing succeeding.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Checks for the period-conflict code, regardless of HTTP status.
    ///
    /// Some backend routes report the collision with a generic status
    /// and only the body distinguishes it.
    pub(crate) fn is_period_conflict(&self) -> bool {
        self.code.as_deref() == Some(PERIOD_CONFLICT_CODE)
    }

    /// Returns the server message, or a placeholder when absent.
    pub(crate) fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}
