// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::period::{PeriodKey, resolve_period};
use time::{Date, Month};

#[test]
fn test_period_key_accepts_valid_input() {
    let key: PeriodKey = PeriodKey::new(3, 2025).expect("valid period");
    assert_eq!(key.month(), 3);
    assert_eq!(key.year(), 2025);
}

#[test]
fn test_period_key_rejects_month_zero() {
    assert_eq!(
        PeriodKey::new(0, 2025),
        Err(DomainError::InvalidMonth { month: 0 })
    );
}

#[test]
fn test_period_key_rejects_month_thirteen() {
    assert_eq!(
        PeriodKey::new(13, 2025),
        Err(DomainError::InvalidMonth { month: 13 })
    );
}

#[test]
fn test_period_key_rejects_short_year() {
    assert_eq!(
        PeriodKey::new(6, 999),
        Err(DomainError::InvalidYear { year: 999 })
    );
}

#[test]
fn test_period_key_equality_is_by_month_and_year() {
    let a: PeriodKey = PeriodKey::new(3, 2025).expect("valid period");
    let b: PeriodKey = PeriodKey::new(3, 2025).expect("valid period");
    let c: PeriodKey = PeriodKey::new(4, 2025).expect("valid period");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_period_key_display() {
    let key: PeriodKey = PeriodKey::new(3, 2025).expect("valid period");
    assert_eq!(key.to_string(), "03/2025");
}

#[test]
fn test_resolve_period_march_ends_on_the_31st() {
    let resolved = resolve_period(3, 2025).expect("valid period");
    assert_eq!(
        resolved.scheduled_payment_date(),
        Date::from_calendar_date(2025, Month::March, 31).unwrap()
    );
}

#[test]
fn test_resolve_period_handles_leap_february() {
    let resolved = resolve_period(2, 2024).expect("valid period");
    assert_eq!(
        resolved.scheduled_payment_date(),
        Date::from_calendar_date(2024, Month::February, 29).unwrap()
    );
}

#[test]
fn test_resolve_period_handles_common_february() {
    let resolved = resolve_period(2, 2025).expect("valid period");
    assert_eq!(
        resolved.scheduled_payment_date(),
        Date::from_calendar_date(2025, Month::February, 28).unwrap()
    );
}

#[test]
fn test_resolve_period_december_rolls_into_next_year() {
    let resolved = resolve_period(12, 2025).expect("valid period");
    assert_eq!(
        resolved.scheduled_payment_date(),
        Date::from_calendar_date(2025, Month::December, 31).unwrap()
    );
}

#[test]
fn test_resolve_period_rejects_invalid_month() {
    assert!(resolve_period(0, 2025).is_err());
    assert!(resolve_period(13, 2025).is_err());
}

#[test]
fn test_resolve_period_is_deterministic() {
    let first = resolve_period(7, 2026).expect("valid period");
    let second = resolve_period(7, 2026).expect("valid period");
    assert_eq!(first, second);
}
