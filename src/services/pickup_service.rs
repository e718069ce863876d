//! Pickup slot generator - core scheduling logic.
//!
//! Computes the future pickup slots a customer may choose from, given a
//! business's declared weekly hours. Pure and deterministic: identical
//! inputs (including `now`) always yield the identical sequence, with no
//! side effects.
//!
//! # Slot Policy
//!
//! - Boundaries are aligned to each day's opening time and spaced at the
//!   configured granularity.
//! - A slot is only offered if it fits entirely before closing time.
//! - The first offerable slot is the first boundary at or after
//!   `now + lead_time`; earlier boundaries on the current day are dropped.
//! - Days with no declared hours contribute no slots. An empty result
//!   means "no availability", never an error.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::business::{BusinessHours, DayHours};
use crate::models::slots::{SlotConfig, TimeSlot};

/// Generate the ordered sequence of offerable pickup slots.
///
/// Returns a lazy, finite iterator ordered by (date, time) with no
/// duplicates. The iterator is `Clone`, so the sequence can be restarted
/// without recomputing inputs.
///
/// # Arguments
///
/// * `hours` - The business's declared weekly hours
/// * `now` - The current moment on the business's local clock
/// * `config` - Granularity, lead time and horizon
pub fn generate_slots(
    hours: &BusinessHours,
    now: NaiveDateTime,
    config: &SlotConfig,
) -> impl Iterator<Item = TimeSlot> + Clone + use<> {
    let hours = hours.clone();
    let granularity = Duration::minutes(config.granularity_minutes.max(0));
    let earliest = now + Duration::minutes(config.lead_time_minutes.max(0));
    let today = now.date();

    (0..=config.horizon_days).flat_map(move |offset| {
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            return Vec::new();
        };

        let Some(day) = hours.for_weekday(date.weekday()) else {
            return Vec::new();
        };

        day_boundaries(*day, granularity)
            .into_iter()
            .filter(|time| date.and_time(*time) >= earliest)
            .map(|time| TimeSlot {
                date,
                time,
                label: slot_label(date, time),
            })
            .collect()
    })
}

/// Enumerate slot start times for one day.
///
/// Starts at opening time and steps by `granularity`; stops once a slot
/// would run past closing time or wrap past midnight. Inverted or
/// zero-length hours yield nothing.
fn day_boundaries(day: DayHours, granularity: Duration) -> Vec<NaiveTime> {
    let mut boundaries = Vec::new();

    if granularity <= Duration::zero() {
        return boundaries;
    }

    let mut time = day.open;
    loop {
        let (end, wrapped) = time.overflowing_add_signed(granularity);
        if wrapped != 0 || end > day.close {
            break;
        }

        boundaries.push(time);

        if end == day.close {
            break;
        }
        time = end;
    }

    boundaries
}

/// Human-readable label shown in the slot picker, e.g. "Mon, Aug 3 at 12:30 PM".
fn slot_label(date: NaiveDate, time: NaiveTime) -> String {
    format!(
        "{} at {}",
        date.format("%a, %b %-d"),
        time.format("%-I:%M %p")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    /// Monday, August 3rd 2026.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()
    }

    fn monday_hours(open: NaiveTime, close: NaiveTime) -> BusinessHours {
        BusinessHours {
            monday: Some(DayHours { open, close }),
            ..Default::default()
        }
    }

    fn config(granularity: i64, lead: i64, horizon: u64) -> SlotConfig {
        SlotConfig {
            granularity_minutes: granularity,
            lead_time_minutes: lead,
            horizon_days: horizon,
            local_utc_offset_minutes: 0,
        }
    }

    #[test]
    fn scenario_first_slot_rounds_past_lead_time() {
        // Mon 09:00-17:00, 30 min slots, 15 min lead, now Mon 11:50.
        // now + lead = 12:05, so 12:00 is not offerable; first slot 12:30.
        let hours = monday_hours(t(9, 0), t(17, 0));
        let now = monday().and_time(t(11, 50));

        let slots: Vec<_> = generate_slots(&hours, now, &config(30, 15, 0)).collect();

        assert_eq!(slots.first().map(|s| s.time), Some(t(12, 30)));
        assert_eq!(slots.last().map(|s| s.time), Some(t(16, 30)));
        assert_eq!(slots.len(), 9);
    }

    #[test]
    fn boundary_exactly_at_lead_time_is_offered() {
        // now + lead = 12:00, which is itself a boundary.
        let hours = monday_hours(t(9, 0), t(17, 0));
        let now = monday().and_time(t(11, 45));

        let slots: Vec<_> = generate_slots(&hours, now, &config(30, 15, 0)).collect();

        assert_eq!(slots.first().map(|s| s.time), Some(t(12, 0)));
    }

    #[test]
    fn first_slot_is_never_before_lead_time() {
        let hours = monday_hours(t(9, 0), t(17, 0));

        for minute in [0, 1, 10, 29, 30, 44, 59] {
            let now = monday().and_time(t(11, minute));
            let earliest = now + Duration::minutes(15);

            let first = generate_slots(&hours, now, &config(30, 15, 0))
                .next()
                .unwrap();
            assert!(first.date.and_time(first.time) >= earliest);
        }
    }

    #[test]
    fn all_closed_week_yields_nothing() {
        let hours = BusinessHours::default();
        let now = monday().and_time(t(9, 0));

        assert_eq!(generate_slots(&hours, now, &config(30, 15, 7)).count(), 0);
    }

    #[test]
    fn past_closing_yields_nothing() {
        let hours = monday_hours(t(9, 0), t(17, 0));
        let now = monday().and_time(t(17, 30));

        assert_eq!(generate_slots(&hours, now, &config(30, 15, 0)).count(), 0);
    }

    #[test]
    fn closed_days_are_skipped_across_the_horizon() {
        // Only Mondays are open; a 7-day horizon starting Monday covers
        // this Monday and the next.
        let hours = monday_hours(t(9, 0), t(10, 0));
        let now = monday().and_time(t(8, 0));

        let slots: Vec<_> = generate_slots(&hours, now, &config(30, 15, 7)).collect();

        let dates: Vec<_> = slots.iter().map(|s| s.date).collect();
        assert!(dates.contains(&monday()));
        assert!(dates.contains(&(monday() + Days::new(7))));
        assert!(dates.iter().all(|d| d.weekday() == chrono::Weekday::Mon));
        assert_eq!(slots.len(), 4);
    }

    #[test]
    fn sequence_is_strictly_ordered_without_duplicates() {
        let hours = BusinessHours {
            monday: Some(DayHours {
                open: t(9, 0),
                close: t(17, 0),
            }),
            tuesday: Some(DayHours {
                open: t(10, 0),
                close: t(14, 0),
            }),
            saturday: Some(DayHours {
                open: t(8, 0),
                close: t(12, 0),
            }),
            ..Default::default()
        };
        let now = monday().and_time(t(7, 0));

        let slots: Vec<_> = generate_slots(&hours, now, &config(30, 15, 7)).collect();

        assert!(!slots.is_empty());
        for pair in slots.windows(2) {
            let earlier = pair[0].date.and_time(pair[0].time);
            let later = pair[1].date.and_time(pair[1].time);
            assert!(earlier < later);
        }
    }

    #[test]
    fn slots_fit_entirely_before_closing() {
        // Closing at 16:45 leaves no room for a 16:30 slot.
        let hours = monday_hours(t(9, 0), t(16, 45));
        let now = monday().and_time(t(15, 0));

        let slots: Vec<_> = generate_slots(&hours, now, &config(30, 15, 0)).collect();

        assert_eq!(slots.last().map(|s| s.time), Some(t(16, 0)));
    }

    #[test]
    fn inverted_hours_yield_nothing() {
        let hours = monday_hours(t(17, 0), t(9, 0));
        let now = monday().and_time(t(8, 0));

        assert_eq!(generate_slots(&hours, now, &config(30, 15, 0)).count(), 0);
    }

    #[test]
    fn zero_granularity_yields_nothing() {
        let hours = monday_hours(t(9, 0), t(17, 0));
        let now = monday().and_time(t(8, 0));

        assert_eq!(generate_slots(&hours, now, &config(0, 15, 0)).count(), 0);
    }

    #[test]
    fn iterator_is_restartable() {
        let hours = monday_hours(t(9, 0), t(17, 0));
        let now = monday().and_time(t(11, 50));

        let iter = generate_slots(&hours, now, &config(30, 15, 0));
        let first_pass: Vec<_> = iter.clone().collect();
        let second_pass: Vec<_> = iter.collect();

        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn labels_are_human_readable() {
        let hours = monday_hours(t(9, 0), t(17, 0));
        let now = monday().and_time(t(11, 50));

        let first = generate_slots(&hours, now, &config(30, 15, 0))
            .next()
            .unwrap();

        assert_eq!(first.label, "Mon, Aug 3 at 12:30 PM");
    }
}
