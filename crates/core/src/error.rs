// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the payroll workflow.
//!
//! Two layers with distinct audiences: [`ServiceError`] is what the
//! remote service boundary reports, including the conflict signal the
//! orchestrator consumes internally; [`PayrollError`] is what the
//! workflow surfaces to the operator and deliberately has no conflict
//! variant, so a conflict can never leak out as a failure.

use planilla_domain::{AggregateId, DomainError, PayrollState, PeriodKey};
use thiserror::Error;

/// Errors reported by the remote payroll service boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// An aggregate already exists for the requested period.
    ///
    /// This is a control-flow signal, not a user-facing failure; the
    /// orchestrator recovers from it by switching to the merge path.
    #[error("A payroll already exists for period {period}")]
    Conflict {
        /// The period the creation request collided on.
        period: PeriodKey,
    },

    /// The server rejected the request as invalid.
    #[error("Request rejected: {message}")]
    Validation {
        /// The server-provided rejection message.
        message: String,
    },

    /// The requested resource does not exist on the server.
    #[error("{resource} not found: {message}")]
    NotFound {
        /// The type of resource that was not found.
        resource: String,
        /// The server-provided message.
        message: String,
    },

    /// The server refused a mutation because of the aggregate's state.
    #[error("Payroll state forbids this mutation: {message}")]
    StateConflict {
        /// The server-provided message.
        message: String,
    },

    /// Network failure, timeout, or server-side fault.
    #[error("Payroll service unavailable: {message}")]
    Transient {
        /// A description of the failure.
        message: String,
    },
}

/// Errors surfaced by the payroll workflow.
///
/// These represent terminal outcomes for the operator; none of them is
/// retried automatically.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PayrollError {
    /// A local precondition was violated. No network call was made.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },

    /// A merge was attempted against a payroll that is no longer editable.
    #[error("Payroll {id} is already {state}")]
    StateConflict {
        /// The aggregate the merge targeted.
        id: AggregateId,
        /// The last known state of the aggregate.
        state: PayrollState,
    },

    /// A conflict was signaled for the period but the expected existing
    /// aggregate could not be located. Indicates backend inconsistency;
    /// not operator-recoverable.
    #[error("A payroll was reported to exist for period {period} but could not be found")]
    ResolutionFailed {
        /// The period the conflict was signaled for.
        period: PeriodKey,
    },

    /// A resource was missing on the server.
    #[error("Not found: {message}")]
    NotFound {
        /// A human-readable description of what was not found.
        message: String,
    },

    /// Network/5xx/timeout. Surfaced with the server-provided message
    /// when available.
    #[error("Payroll service failure: {message}")]
    Transient {
        /// A description of the failure.
        message: String,
    },

    /// A generation request is already outstanding. Rejected
    /// synchronously; the outstanding request is unaffected.
    #[error("A payroll generation is already in progress")]
    GenerationInFlight,
}

/// Translates a domain error into a workflow error.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> PayrollError {
    match err {
        DomainError::InvalidMonth { month } => PayrollError::Validation {
            field: String::from("month"),
            message: format!("Invalid month: {month}. Must be between 1 and 12"),
        },
        DomainError::InvalidYear { year } => PayrollError::Validation {
            field: String::from("year"),
            message: format!("Invalid year: {year}. Must be a four-digit year"),
        },
        DomainError::InvalidWorkerId(value) => PayrollError::Validation {
            field: String::from("workers"),
            message: format!("Invalid worker identifier: '{value}'"),
        },
        DomainError::InvalidPayrollState(state) => PayrollError::Validation {
            field: String::from("state"),
            message: format!("Invalid payroll state: '{state}'"),
        },
        DomainError::InvalidStateTransition { from, to, reason } => PayrollError::Validation {
            field: String::from("state"),
            message: format!("Cannot transition payroll from {from} to {to}: {reason}"),
        },
        DomainError::DateArithmeticOverflow { operation } => PayrollError::Validation {
            field: String::from("period"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a service error into a workflow error for call sites that
/// have already consumed the variants they handle specially.
///
/// The conflict signal never reaches the operator through this path; a
/// conflict arriving where none is expected is classified as transient.
#[must_use]
pub(crate) fn translate_service_error(err: ServiceError) -> PayrollError {
    match err {
        ServiceError::Conflict { period } => PayrollError::Transient {
            message: format!("unexpected conflict signal for period {period}"),
        },
        ServiceError::Validation { message } => PayrollError::Validation {
            field: String::from("request"),
            message,
        },
        ServiceError::NotFound { resource, message } => PayrollError::NotFound {
            message: format!("{resource}: {message}"),
        },
        ServiceError::StateConflict { message } => PayrollError::Validation {
            field: String::from("state"),
            message,
        },
        ServiceError::Transient { message } => PayrollError::Transient { message },
    }
}
