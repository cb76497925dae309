//! Expansion of an event's recurrence rule into occurrence start times.
//!
//! The walk starts at the event start and steps forward by the rule's
//! frequency. It stops once the cursor passes `min(until, window_end)`, so
//! every expansion is finite whatever the interval or pattern.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc, Weekday};

use super::{Frequency, MonthlyPattern, RecurrenceRule};
use crate::model::Event;

/// ## Summary
/// Expands `event` into ascending occurrence starts within `[window_start, window_end]`.
///
/// The event start is always the first candidate. A non-recurring event yields
/// its start if it lies in the window. The rule is expected to be validated.
#[must_use]
pub fn generate(
    event: &Event,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    let Some(frequency) = event.recurrence_frequency() else {
        return if (window_start..=window_end).contains(&event.start) {
            vec![event.start]
        } else {
            Vec::new()
        };
    };

    let rule = &event.rule;
    let bound = rule.until.map_or(window_end, |until| until.min(window_end));

    tracing::trace!(
        event_id = %event.id,
        %frequency,
        interval = rule.interval.get(),
        %bound,
        "Expanding recurrence"
    );

    let mut occurrences = Vec::new();
    let mut current = event.start;

    while current <= bound {
        if current >= window_start {
            occurrences.push(current);
        }
        let Some(next) = step(rule, frequency, current, bound) else {
            tracing::trace!(event_id = %event.id, %current, "Recurrence walk ended early");
            break;
        };
        current = next;
    }

    occurrences
}

/// Next candidate after `current`, or `None` when arithmetic overflows or no
/// further candidate exists before `bound`.
fn step(
    rule: &RecurrenceRule,
    frequency: Frequency,
    current: DateTime<Utc>,
    bound: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let interval = rule.interval.get();

    match frequency {
        Frequency::Daily => current.checked_add_days(Days::new(u64::from(interval))),
        Frequency::Weekly => next_weekly(rule, current),
        Frequency::Monthly => match rule.monthly_pattern()? {
            MonthlyPattern::DayOfMonth(day) => {
                month_on_day(current, interval, MonthlyPattern::effective_day(day))
            }
            MonthlyPattern::NthWeekday { week, weekday } => {
                next_nth_weekday(current, interval, week, weekday, bound)
            }
        },
        Frequency::Yearly => current.checked_add_months(Months::new(interval.checked_mul(12)?)),
    }
}

/// With selected weekdays the nearest one after `current` wins and the
/// interval is not applied; an empty set steps `interval` whole weeks.
fn next_weekly(rule: &RecurrenceRule, current: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if rule.weekdays.is_empty() {
        let days = u64::from(rule.interval.get()).checked_mul(7)?;
        return current.checked_add_days(Days::new(days));
    }

    let search_from = current.checked_add_days(Days::new(1))?;
    rule.weekdays
        .iter()
        .filter_map(|day| {
            search_from.checked_add_days(Days::new(u64::from(days_until(
                search_from.weekday(),
                day,
            ))))
        })
        .min()
}

/// Days from `from` forward to the next `to`, 0 when they match.
fn days_until(from: Weekday, to: Weekday) -> u32 {
    (to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7
}

/// `day` of the month `months` after `current`'s month, keeping the time of day.
fn month_on_day(current: DateTime<Utc>, months: u32, day: u8) -> Option<DateTime<Utc>> {
    let target = current
        .date_naive()
        .with_day(1)?
        .checked_add_months(Months::new(months))?
        .with_day(u32::from(day))?;
    Some(target.and_time(current.time()).and_utc())
}

/// Advances month by month until the nth weekday exists, giving up past `bound`.
fn next_nth_weekday(
    current: DateTime<Utc>,
    months: u32,
    week: i8,
    weekday: Weekday,
    bound: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let mut month_start = current.date_naive().with_day(1)?;

    loop {
        month_start = month_start.checked_add_months(Months::new(months))?;
        if month_start.and_time(NaiveTime::MIN).and_utc() > bound {
            return None;
        }
        if let Some(date) = nth_weekday_of_month(month_start, week, weekday) {
            return Some(date.and_time(current.time()).and_utc());
        }
        tracing::trace!(
            month = %month_start,
            week,
            %weekday,
            "No such weekday in month, skipping"
        );
    }
}

/// The `week`th `weekday` of the month starting at `month_start`; negative
/// weeks count back from the last one. A positive week past the month's last
/// such weekday is `None` rather than spilling into the next month.
fn nth_weekday_of_month(month_start: NaiveDate, week: i8, weekday: Weekday) -> Option<NaiveDate> {
    if week > 0 {
        let n = u8::try_from(week).ok()?;
        return NaiveDate::from_weekday_of_month_opt(
            month_start.year(),
            month_start.month(),
            weekday,
            n,
        );
    }

    let last_day = month_start
        .checked_add_months(Months::new(1))?
        .pred_opt()?;
    let last_match = last_day.checked_sub_days(Days::new(u64::from(days_until(
        weekday,
        last_day.weekday(),
    ))))?;
    let weeks_back = u64::from(week.unsigned_abs().checked_sub(1)?);
    let date = last_match.checked_sub_days(Days::new(weeks_back * 7))?;

    (date.month() == month_start.month()).then_some(date)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use chrono::{TimeZone, Timelike};

    use super::*;
    use crate::model::EventId;
    use crate::recurrence::WeekdaySet;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn event_at(start: DateTime<Utc>, rule: RecurrenceRule) -> Event {
        Event::new(EventId(1), "Test", start, start + chrono::TimeDelta::hours(1)).with_rule(rule)
    }

    fn interval(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn days_of(dates: &[DateTime<Utc>]) -> Vec<(u32, u32)> {
        dates.iter().map(|d| (d.month(), d.day())).collect()
    }

    #[test_log::test]
    fn non_recurring_inside_and_outside_window() {
        let start = utc(2024, 3, 10, 9, 0);
        let event = Event::new(EventId(1), "Once", start, start + chrono::TimeDelta::hours(1));

        assert_eq!(
            generate(&event, utc(2024, 3, 1, 0, 0), utc(2024, 3, 31, 0, 0)),
            vec![start]
        );
        assert!(generate(&event, utc(2024, 4, 1, 0, 0), utc(2024, 4, 30, 0, 0)).is_empty());
        assert_eq!(generate(&event, start, start), vec![start]);
    }

    #[test_log::test]
    fn daily_five_days() {
        let event = event_at(utc(2024, 1, 1, 9, 0), RecurrenceRule::daily());
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 1, 5, 23, 59));
        assert_eq!(
            days_of(&dates),
            vec![(1, 1), (1, 2), (1, 3), (1, 4), (1, 5)]
        );
    }

    #[test_log::test]
    fn daily_interval_skips_days() {
        let event = event_at(
            utc(2024, 1, 1, 9, 0),
            RecurrenceRule::daily().with_interval(interval(3)),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 1, 10, 23, 59));
        assert_eq!(days_of(&dates), vec![(1, 1), (1, 4), (1, 7), (1, 10)]);
    }

    #[test_log::test]
    fn weekly_monday_wednesday_two_weeks() {
        let days: WeekdaySet = [Weekday::Mon, Weekday::Wed].into_iter().collect();
        let event = event_at(utc(2024, 1, 1, 9, 0), RecurrenceRule::weekly(days));

        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 1, 14, 23, 59));

        assert_eq!(days_of(&dates), vec![(1, 1), (1, 3), (1, 8), (1, 10)]);
        assert!(
            dates
                .iter()
                .all(|d| matches!(d.weekday(), Weekday::Mon | Weekday::Wed))
        );
    }

    #[test_log::test]
    fn weekly_selected_day_one_week_out() {
        let event = event_at(
            utc(2024, 1, 1, 9, 0),
            RecurrenceRule::weekly(WeekdaySet::single(Weekday::Mon)),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 1, 22, 23, 59));
        assert_eq!(days_of(&dates), vec![(1, 1), (1, 8), (1, 15), (1, 22)]);
    }

    #[test_log::test]
    fn weekly_interval_ignored_with_weekdays() {
        let days: WeekdaySet = [Weekday::Mon, Weekday::Wed].into_iter().collect();
        let event = event_at(
            utc(2024, 1, 1, 9, 0),
            RecurrenceRule::weekly(days).with_interval(interval(2)),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 1, 14, 23, 59));
        assert_eq!(days_of(&dates), vec![(1, 1), (1, 3), (1, 8), (1, 10)]);
    }

    #[test_log::test]
    fn weekly_interval_applies_to_empty_weekdays() {
        let event = event_at(
            utc(2024, 1, 1, 9, 0),
            RecurrenceRule::weekly(WeekdaySet::EMPTY).with_interval(interval(2)),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 1, 31, 23, 59));
        assert_eq!(days_of(&dates), vec![(1, 1), (1, 15), (1, 29)]);
    }

    #[test_log::test]
    fn weekly_until_on_candidate_is_emitted() {
        let days: WeekdaySet = [Weekday::Mon, Weekday::Wed, Weekday::Fri].into_iter().collect();
        let until = utc(2024, 1, 10, 9, 0);
        let event = event_at(
            utc(2024, 1, 1, 9, 0),
            RecurrenceRule::weekly(days).with_until(until),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 12, 31, 0, 0));
        assert_eq!(
            days_of(&dates),
            vec![(1, 1), (1, 3), (1, 5), (1, 8), (1, 10)]
        );
        assert_eq!(dates.last(), Some(&until));
    }

    #[test_log::test]
    fn weekly_until_before_next_candidate_stops() {
        let days: WeekdaySet = [Weekday::Mon, Weekday::Wed, Weekday::Fri].into_iter().collect();
        // Next candidate after Wed 10th is Fri 12th at 09:00.
        let event = event_at(
            utc(2024, 1, 1, 9, 0),
            RecurrenceRule::weekly(days).with_until(utc(2024, 1, 11, 9, 0)),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 12, 31, 0, 0));
        assert_eq!(
            days_of(&dates),
            vec![(1, 1), (1, 3), (1, 5), (1, 8), (1, 10)]
        );
    }

    #[test_log::test]
    fn weekly_start_off_pattern_is_still_first() {
        let event = event_at(
            utc(2024, 1, 2, 9, 0),
            RecurrenceRule::weekly(WeekdaySet::single(Weekday::Fri)),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 1, 12, 23, 59));
        assert_eq!(days_of(&dates), vec![(1, 2), (1, 5), (1, 12)]);
    }

    #[test_log::test]
    fn monthly_day_31_clamps_to_28() {
        let event = event_at(utc(2024, 1, 31, 9, 30), RecurrenceRule::monthly_on_day(31));
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 4, 30, 23, 59));

        assert_eq!(days_of(&dates), vec![(1, 31), (2, 28), (3, 28), (4, 28)]);
        assert!(dates.iter().all(|d| d.time() == NaiveTime::from_hms_opt(9, 30, 0).unwrap()));
    }

    #[test_log::test]
    fn monthly_interval_wraps_year() {
        let event = event_at(
            utc(2024, 11, 15, 9, 0),
            RecurrenceRule::monthly_on_day(15).with_interval(interval(3)),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2025, 12, 31, 0, 0));
        let ym: Vec<(i32, u32)> = dates.iter().map(|d| (d.year(), d.month())).collect();
        assert_eq!(ym, vec![(2024, 11), (2025, 2), (2025, 5), (2025, 8), (2025, 11)]);
    }

    #[test_log::test]
    fn monthly_second_friday() {
        // March 2024 has five Fridays: 1, 8, 15, 22, 29.
        let event = event_at(
            utc(2024, 2, 9, 18, 0),
            RecurrenceRule::monthly_on_nth(2, Weekday::Fri),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 4, 30, 23, 59));
        assert_eq!(days_of(&dates), vec![(2, 9), (3, 8), (4, 12)]);
        assert!(dates.iter().all(|d| d.hour() == 18));
    }

    #[test_log::test]
    fn monthly_last_friday() {
        let event = event_at(
            utc(2024, 1, 26, 18, 0),
            RecurrenceRule::monthly_on_nth(-1, Weekday::Fri),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 4, 30, 23, 59));
        assert_eq!(days_of(&dates), vec![(1, 26), (2, 23), (3, 29), (4, 26)]);
    }

    #[test_log::test]
    fn monthly_fifth_friday_skips_short_months() {
        // 2024: fifth Fridays in March (29), May (31), August (30), November (29).
        let event = event_at(
            utc(2024, 3, 29, 12, 0),
            RecurrenceRule::monthly_on_nth(5, Weekday::Fri),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 12, 31, 23, 59));
        assert_eq!(days_of(&dates), vec![(3, 29), (5, 31), (8, 30), (11, 29)]);
    }

    #[test_log::test]
    fn unresolvable_pattern_terminates() {
        // February only has a fifth Monday in a leap year starting on Monday (next: 2044).
        let start = utc(2027, 2, 1, 9, 0);
        let event = event_at(
            start,
            RecurrenceRule::monthly_on_nth(5, Weekday::Mon).with_interval(interval(12)),
        );
        let dates = generate(&event, utc(2027, 1, 1, 0, 0), utc(2035, 1, 1, 0, 0));
        assert_eq!(dates, vec![start]);
    }

    #[test_log::test]
    fn yearly_leap_day_drifts_to_28() {
        let event = event_at(utc(2024, 2, 29, 9, 0), RecurrenceRule::yearly());
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2029, 1, 1, 0, 0));
        let ymd: Vec<(i32, u32, u32)> = dates
            .iter()
            .map(|d| (d.year(), d.month(), d.day()))
            .collect();
        assert_eq!(
            ymd,
            vec![(2024, 2, 29), (2025, 2, 28), (2026, 2, 28), (2027, 2, 28), (2028, 2, 28)]
        );
    }

    #[test_log::test]
    fn until_is_inclusive_and_enforced() {
        let until = utc(2024, 1, 3, 9, 0);
        let event = event_at(
            utc(2024, 1, 1, 9, 0),
            RecurrenceRule::daily().with_until(until),
        );
        let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2024, 12, 31, 0, 0));
        assert_eq!(days_of(&dates), vec![(1, 1), (1, 2), (1, 3)]);
        assert_eq!(dates.last(), Some(&until));
    }

    #[test_log::test]
    fn window_start_filters_but_walk_starts_at_event() {
        let event = event_at(
            utc(2024, 1, 1, 9, 0),
            RecurrenceRule::daily().with_interval(interval(2)),
        );
        let dates = generate(&event, utc(2024, 1, 4, 0, 0), utc(2024, 1, 8, 0, 0));
        assert_eq!(days_of(&dates), vec![(1, 5), (1, 7)]);
    }

    #[test_log::test]
    fn empty_when_window_inverted() {
        let event = event_at(utc(2024, 1, 1, 9, 0), RecurrenceRule::daily());
        assert!(generate(&event, utc(2024, 2, 1, 0, 0), utc(2024, 1, 1, 0, 0)).is_empty());
    }

    #[test_log::test]
    fn huge_interval_ends_on_overflow() {
        let event = event_at(
            utc(2024, 1, 1, 9, 0),
            RecurrenceRule::yearly().with_interval(NonZeroU32::MAX),
        );
        let far = DateTime::<Utc>::MAX_UTC;
        assert_eq!(generate(&event, utc(2024, 1, 1, 0, 0), far).len(), 1);
    }

    #[test_log::test]
    fn output_is_strictly_ascending() {
        let days: WeekdaySet = [Weekday::Tue, Weekday::Thu, Weekday::Sat]
            .into_iter()
            .collect();
        let rules = [
            RecurrenceRule::daily(),
            RecurrenceRule::weekly(days).with_interval(interval(3)),
            RecurrenceRule::monthly_on_day(30),
            RecurrenceRule::monthly_on_nth(-2, Weekday::Sun),
            RecurrenceRule::yearly(),
        ];
        for rule in rules {
            let event = event_at(utc(2024, 1, 30, 7, 0), rule);
            let dates = generate(&event, utc(2024, 1, 1, 0, 0), utc(2027, 1, 1, 0, 0));
            assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
