//! Document-level serialization tests.

use chrono::{NaiveDate, TimeZone, Utc, Weekday};

use super::build::serialize;
use super::core::{Component, DateTime, ICalendar, Parameter, Property, RRule, WeekdayNum};

fn utc(m: u32, d: u32, h: u32) -> DateTime {
    DateTime::from_chrono(&Utc.with_ymd_and_hms(2024, m, d, h, 0, 0).unwrap()).unwrap()
}

fn unfold(s: &str) -> String {
    s.replace("\r\n ", "")
}

fn recurring_event() -> Component {
    let mut event = Component::event();
    event.add_property(Property::text("SUMMARY", "Team sync"));
    event.add_property(Property::text("UID", "event-7@example.com"));
    event.add_property(Property::datetime("DTSTAMP", utc(1, 1, 0)));
    event.add_property(Property::datetime("DTSTART", utc(1, 1, 9)));
    event.add_property(Property::datetime("DTEND", utc(1, 1, 10)));
    let rrule = RRule::weekly()
        .with_interval(2)
        .with_by_day(vec![
            WeekdayNum::every(Weekday::Mon),
            WeekdayNum::every(Weekday::Wed),
        ])
        .with_until(utc(3, 31, 0));
    if let Ok(prop) = Property::recur(rrule) {
        event.add_property(prop);
    }
    event
}

#[test]
fn calendar_with_recurring_event() {
    let mut ical = ICalendar::new("-//Test//Calendar//EN");
    ical.add_event(recurring_event());

    let output = unfold(&serialize(&ical));
    let lines: Vec<&str> = output.split("\r\n").filter(|l| !l.is_empty()).collect();

    assert_eq!(
        lines,
        vec![
            "BEGIN:VCALENDAR",
            "VERSION:2.0",
            "PRODID:-//Test//Calendar//EN",
            "BEGIN:VEVENT",
            "UID:event-7@example.com",
            "DTSTAMP:20240101T000000Z",
            "DTSTART:20240101T090000Z",
            "DTEND:20240101T100000Z",
            "RRULE:FREQ=WEEKLY;INTERVAL=2;UNTIL=20240331T000000Z;BYDAY=MO,WE",
            "SUMMARY:Team sync",
            "END:VEVENT",
            "END:VCALENDAR",
        ]
    );
}

#[test]
fn every_line_is_crlf_terminated_and_short() {
    let mut ical = ICalendar::default();
    let mut event = recurring_event();
    event.add_property(Property::text("DESCRIPTION", "Notes ".repeat(40)));
    ical.add_event(event);

    let output = serialize(&ical);

    assert!(output.ends_with("\r\n"));
    for line in output.split("\r\n") {
        assert!(line.len() <= 75, "line too long: {line:?}");
    }
}

#[test]
fn zoned_times_carry_quoted_params_when_needed() {
    let local = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap();
    let mut prop = Property::datetime("DTSTART", DateTime::floating(local).unwrap());
    prop.add_param(Parameter::new("X-NOTE", "a,b"));
    prop.add_param(Parameter::tzid("America/New_York"));

    let mut event = Component::event();
    event.add_property(prop);
    let mut ical = ICalendar::default();
    ical.add_event(event);

    let output = unfold(&serialize(&ical));

    assert!(output.contains("DTSTART;TZID=America/New_York;X-NOTE=\"a,b\":20240501T080000\r\n"));
}
