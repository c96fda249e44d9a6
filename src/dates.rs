//! Date-arithmetic sampling primitives.
//!
//! Everything here operates on calendar dates; the one exception is
//! [`completion_time`], which produces a full timestamp because cycle times
//! are fractional days.

use rand::Rng;
use rand_distr::{Distribution, LogNormal};
use time::{Date, Duration, OffsetDateTime};

/// Log-normal cycle-time parameters in log space (mean ~5 days, std ~3 days).
const CYCLE_TIME_MU: f64 = 1.6;
const CYCLE_TIME_SIGMA: f64 = 0.6;

/// Probability that a sampled due date gets snapped off a weekend.
const BUSINESS_DAY_PROBABILITY: f64 = 0.9;

/// Converts a date to its midnight UTC timestamp.
pub fn at_midnight(date: Date) -> OffsetDateTime {
    date.midnight().assume_utc()
}

/// Uniformly picks a date in `[start, end]` by integer day offset.
///
/// Panics if `end < start`; callers guard the interval.
pub fn uniform_between(start: Date, end: Date, rng: &mut impl Rng) -> Date {
    let span = (end - start).whole_days();
    assert!(span >= 0, "uniform_between requires start <= end");
    start + Duration::days(rng.gen_range(0..=span))
}

/// With the given probability, moves a weekend date back to the preceding
/// Friday. Weekday dates pass through untouched.
pub fn snap_to_business_day(date: Date, probability: f64, rng: &mut impl Rng) -> Date {
    let from_monday = date.weekday().number_days_from_monday();
    if from_monday >= 5 && rng.r#gen::<f64>() < probability {
        date - Duration::days(i64::from(from_monday - 4))
    } else {
        date
    }
}

/// Samples a due date relative to task creation:
/// 25% none, 20% within a week, 35% within a month, 15% one to three
/// months out, 5% already overdue. The result avoids weekends 90% of the
/// time.
pub fn due_date(created: Date, rng: &mut impl Rng) -> Option<Date> {
    let roll: f64 = rng.r#gen();
    let days = if roll < 0.25 {
        return None;
    } else if roll < 0.45 {
        rng.gen_range(1..=7)
    } else if roll < 0.80 {
        rng.gen_range(8..=30)
    } else if roll < 0.95 {
        rng.gen_range(31..=90)
    } else {
        rng.gen_range(-14..=-1)
    };

    let due = created + Duration::days(days);
    Some(snap_to_business_day(due, BUSINESS_DAY_PROBABILITY, rng))
}

/// Samples a completion timestamp from a log-normal cycle-time distribution,
/// clamped between roughly two hours and thirty days after creation.
pub fn completion_time(created: Date, rng: &mut impl Rng) -> OffsetDateTime {
    let log_normal = LogNormal::new(CYCLE_TIME_MU, CYCLE_TIME_SIGMA).unwrap();
    let days = log_normal.sample(rng).clamp(0.1, 30.0);
    at_midnight(created) + Duration::seconds_f64(days * 86_400.0)
}

/// Adds `days` to `date`, clamping the result to `cap`.
pub fn increment_capped(date: Date, days: i64, cap: Date) -> Date {
    (date + Duration::days(days)).min(cap)
}
