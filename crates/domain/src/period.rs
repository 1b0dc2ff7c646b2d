// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Period identity and scheduled payment date resolution.
//!
//! A payroll aggregate is scoped to exactly one `(month, year)` pair.
//! The scheduled payment date is always the last calendar day of that
//! month; nothing in this module performs I/O.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// The `(month, year)` identity that uniquely scopes a payroll aggregate.
///
/// Equality and hashing are by `(month, year)` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    /// The month value (1-12).
    month: u8,
    /// The four-digit year value.
    year: u16,
}

impl PeriodKey {
    /// Creates a new `PeriodKey`.
    ///
    /// # Arguments
    ///
    /// * `month` - The month value, 1 through 12
    /// * `year` - The four-digit year value
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMonth` if the month is outside 1-12,
    /// or `DomainError::InvalidYear` if the year is not four digits.
    pub fn new(month: u8, year: u16) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidMonth { month });
        }
        if !(1000..=9999).contains(&year) {
            return Err(DomainError::InvalidYear { year });
        }
        Ok(Self { month, year })
    }

    /// Returns the month value (1-12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the year value.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// A period identity together with its scheduled payment date.
///
/// Produced by [`resolve_period`]; the only way operator-selected raw
/// month/year input enters the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPeriod {
    key: PeriodKey,
    scheduled_payment_date: Date,
}

impl ResolvedPeriod {
    /// Returns the period identity.
    #[must_use]
    pub const fn key(&self) -> PeriodKey {
        self.key
    }

    /// Returns the scheduled payment date (last calendar day of the month).
    #[must_use]
    pub const fn scheduled_payment_date(&self) -> Date {
        self.scheduled_payment_date
    }
}

/// Resolves raw operator input into a canonical period identity and a
/// scheduled payment date.
///
/// The scheduled payment date is the last calendar day of the selected
/// month, computed as the first day of the following month minus one day.
///
/// # Arguments
///
/// * `month` - The month value, 1 through 12
/// * `year` - The four-digit year value
///
/// # Errors
///
/// Returns an error if the month or year is invalid, or if the date
/// computation falls outside the supported calendar range.
pub fn resolve_period(month: u8, year: u16) -> Result<ResolvedPeriod, DomainError> {
    let key: PeriodKey = PeriodKey::new(month, year)?;
    let scheduled_payment_date: Date = last_day_of_month(key)?;
    Ok(ResolvedPeriod {
        key,
        scheduled_payment_date,
    })
}

/// Computes the last calendar day of the period's month.
fn last_day_of_month(key: PeriodKey) -> Result<Date, DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("computing the last day of period {key}"),
    };

    let (next_year, next_month) = if key.month() == 12 {
        (i32::from(key.year()) + 1, Month::January)
    } else {
        let month: Month = Month::try_from(key.month() + 1).map_err(|_| overflow())?;
        (i32::from(key.year()), month)
    };

    let first_of_next: Date =
        Date::from_calendar_date(next_year, next_month, 1).map_err(|_| overflow())?;
    first_of_next.previous_day().ok_or_else(overflow)
}
