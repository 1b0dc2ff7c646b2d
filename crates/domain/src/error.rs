// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Month is outside the 1-12 range.
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },
    /// Year is not a four-digit year.
    InvalidYear {
        /// The invalid year value.
        year: u16,
    },
    /// Worker identifier is empty or invalid.
    InvalidWorkerId(String),
    /// Payroll state string is not a valid state.
    InvalidPayrollState(String),
    /// Payroll state transition is not permitted.
    InvalidStateTransition {
        /// The current state.
        from: String,
        /// The requested state.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth { month } => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
            Self::InvalidYear { year } => {
                write!(f, "Invalid year: {year}. Must be a four-digit year")
            }
            Self::InvalidWorkerId(value) => {
                write!(f, "Invalid worker identifier: '{value}'")
            }
            Self::InvalidPayrollState(state) => {
                write!(f, "Invalid payroll state: '{state}'")
            }
            Self::InvalidStateTransition { from, to, reason } => {
                write!(f, "Cannot transition payroll from {from} to {to}: {reason}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
