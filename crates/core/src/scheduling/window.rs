//! Availability window localization
//!
//! Rules are wall-clock times in the owner's timezone. Each calendar date is
//! converted separately, so a window on a daylight-saving transition day maps
//! to a shorter or longer UTC interval instead of a cached fixed offset.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;
use schedulr_domain::{AvailabilityRule, DayOfWeek};

/// Upper bound on how far a nonexistent local time is pushed forward.
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// One enabled availability window on a concrete owner-local date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bias {
    Earliest,
    Latest,
}

/// UTC windows for every date in `from..=to` that has an enabled rule.
///
/// Dates are in the owner's timezone. Disabled rules, dates without a rule,
/// and windows that collapse to nothing after localization are skipped.
pub fn day_windows(
    rules: &[AvailabilityRule],
    tz: Tz,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<DayWindow> {
    from.iter_days()
        .take_while(|date| *date <= to)
        .filter_map(|date| {
            let day = DayOfWeek::from(date.weekday());
            rules
                .iter()
                .find(|rule| rule.enabled && rule.day_of_week == day)
                .and_then(|rule| localize(tz, date, rule.start_time, rule.end_time))
        })
        .collect()
}

/// Convert a local `[start, end)` wall-clock window on `date` into UTC.
///
/// Ambiguous (fall-back) bounds resolve outward: the start to the earlier
/// instant, the end to the later one. Bounds inside a spring-forward gap
/// resolve to the first valid instant after the gap.
pub fn localize(tz: Tz, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Option<DayWindow> {
    if start >= end {
        return None;
    }

    let start_utc = resolve_local(tz, date.and_time(start), Bias::Earliest)?;
    let end_utc = resolve_local(tz, date.and_time(end), Bias::Latest)?;

    (start_utc < end_utc).then_some(DayWindow { date, start: start_utc, end: end_utc })
}

fn resolve_local(tz: Tz, local: NaiveDateTime, bias: Bias) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(first, second) => {
            let (earlier, later) = if first <= second { (first, second) } else { (second, first) };
            Some(match bias {
                Bias::Earliest => earlier.with_timezone(&Utc),
                Bias::Latest => later.with_timezone(&Utc),
            })
        }
        LocalResult::None => (1..=MAX_GAP_MINUTES).find_map(|offset| {
            tz.from_local_datetime(&(local + Duration::minutes(offset)))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }),
    }
}
