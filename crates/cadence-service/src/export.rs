//! iCalendar export of single events and materialized calendars.

use std::collections::HashMap;

use cadence_core::config::CalendarConfig;
use cadence_rfc::rfc::ical::build::serialize;
use cadence_rfc::rfc::ical::core::{
    Component, DateTime as IcalDateTime, ICalendar, Property, RRule, WeekdayNum,
};
use chrono::{DateTime, Utc};

use crate::boundary::format_timestamp;
use crate::error::ServiceResult;
use crate::model::{Event, EventId, Occurrence};
use crate::recurrence::{Frequency, MonthlyPattern, RecurrenceRule};

/// Calendar identity and stamp applied to an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub prodid: String,
    pub uid_domain: String,
    /// Written as `DTSTAMP` on every VEVENT.
    pub dtstamp: DateTime<Utc>,
}

impl ExportSettings {
    #[must_use]
    pub fn from_config(config: &CalendarConfig, dtstamp: DateTime<Utc>) -> Self {
        Self {
            prodid: config.prodid.clone(),
            uid_domain: config.uid_domain.clone(),
            dtstamp,
        }
    }
}

/// ## Summary
/// Builds the `RRULE` value for a recurrence rule.
///
/// Day-of-month patterns are written with the clamped day the generator uses.
///
/// ## Errors
/// Returns an error if the rule has no frequency or `UNTIL` cannot be represented.
pub fn rule_to_rrule(rule: &RecurrenceRule) -> ServiceResult<RRule> {
    let mut rrule = RRule::new().with_interval(rule.interval.get());
    rrule.freq = rule.frequency;

    match rule.frequency {
        Some(Frequency::Weekly) => {
            rrule = rrule.with_by_day(
                rule.weekdays
                    .iter()
                    .map(WeekdayNum::every)
                    .collect(),
            );
        }
        Some(Frequency::Monthly) => match rule.monthly_pattern() {
            Some(MonthlyPattern::DayOfMonth(day)) => {
                let day = i8::try_from(MonthlyPattern::effective_day(day)).unwrap_or(28);
                rrule = rrule.with_by_monthday(vec![day]);
            }
            Some(MonthlyPattern::NthWeekday { week, weekday }) => {
                rrule = rrule.with_by_day(WeekdayNum::nth(week, weekday).into_iter().collect());
            }
            None => {}
        },
        _ => {}
    }

    if let Some(until) = rule.until {
        rrule = rrule.with_until(IcalDateTime::from_chrono(&until)?);
    }

    Ok(rrule)
}

fn vevent(
    uid: String,
    event: &Event,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    dtstamp: DateTime<Utc>,
) -> ServiceResult<Component> {
    let mut component = Component::event();
    component.add_property(Property::text("UID", uid));
    component.add_property(Property::datetime("DTSTAMP", IcalDateTime::from_chrono(&dtstamp)?));
    component.add_property(Property::datetime("DTSTART", IcalDateTime::from_chrono(&start)?));
    component.add_property(Property::datetime("DTEND", IcalDateTime::from_chrono(&end)?));
    component.add_property(Property::text("SUMMARY", &event.title));
    component.add_property(Property::text("DESCRIPTION", &event.description));
    Ok(component)
}

/// ## Summary
/// Exports one event with its recurrence rule. Overrides are not reflected.
///
/// ## Errors
/// Returns an error if a timestamp or the rule cannot be represented in iCalendar.
#[tracing::instrument(skip_all, fields(event_id = %event.id))]
pub fn export_event(event: &Event, settings: &ExportSettings) -> ServiceResult<String> {
    let uid = format!("event-{}@{}", event.id, settings.uid_domain);
    let mut component = vevent(uid, event, event.start, event.end, settings.dtstamp)?;

    if event.is_recurring() {
        component.add_property(Property::recur(rule_to_rrule(&event.rule)?)?);
    }

    let mut calendar = ICalendar::new(settings.prodid.clone());
    calendar.add_event(component);
    Ok(serialize(&calendar))
}

/// ## Summary
/// Exports materialized occurrences, one VEVENT each, in the given order.
///
/// ## Errors
/// Returns an error if a timestamp cannot be represented in iCalendar.
#[tracing::instrument(skip_all, fields(occurrences = occurrences.len()))]
pub fn export_calendar(
    events: &[Event],
    occurrences: &[Occurrence],
    settings: &ExportSettings,
) -> ServiceResult<String> {
    let by_id: HashMap<EventId, &Event> = events.iter().map(|e| (e.id, e)).collect();
    let mut calendar = ICalendar::new(settings.prodid.clone());

    for occ in occurrences {
        let Some(event) = by_id.get(&occ.event_id) else {
            tracing::warn!(event_id = %occ.event_id, "Occurrence without event, skipping");
            continue;
        };
        let uid = format!(
            "event-{}-{}@{}",
            event.id,
            format_timestamp(occ.original_start),
            settings.uid_domain
        );
        calendar.add_event(vevent(
            uid,
            event,
            occ.displayed_start,
            occ.displayed_end,
            settings.dtstamp,
        )?);
    }

    tracing::debug!(events = calendar.events().count(), "Calendar exported");
    Ok(serialize(&calendar))
}
