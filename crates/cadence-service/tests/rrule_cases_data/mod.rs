use cadence_service::boundary::{EventRecord, parse_timestamp};
use cadence_service::model::Event;
use cadence_service::recurrence::generate;
use rrule::{RRuleSet, Tz};

/// An event record and the `rrule` set that should expand identically.
///
/// Weekly records with selected weekdays step to the nearest weekday whatever
/// their interval, so their reference rules carry no `INTERVAL`.
pub struct CrossCheckCase {
    pub name: &'static str,
    pub record: &'static str,
    pub rruleset: &'static str,
    pub window_start: &'static str,
    pub window_end: &'static str,
    pub expected_len: Option<usize>,
}

#[expect(clippy::too_many_lines)]
pub fn cross_check_cases() -> Vec<CrossCheckCase> {
    vec![
        CrossCheckCase {
            name: "daily_basic",
            record: r#"{"id":1,"title":"t","start":"2024-01-01T09:00:00Z","end":"2024-01-01T10:00:00Z",
                "is_recurring":true,"frequency":"DAILY"}"#,
            rruleset: "DTSTART:20240101T090000Z\nRRULE:FREQ=DAILY",
            window_start: "2024-01-01T00:00:00Z",
            window_end: "2024-01-31T23:00:00Z",
            expected_len: Some(31),
        },
        CrossCheckCase {
            name: "daily_interval_until",
            record: r#"{"id":1,"title":"t","start":"2024-01-01T09:00:00Z","end":"2024-01-01T10:00:00Z",
                "is_recurring":true,"frequency":"DAILY","interval":3,"until":"2024-02-15T09:00:00Z"}"#,
            rruleset: "DTSTART:20240101T090000Z\nRRULE:FREQ=DAILY;INTERVAL=3;UNTIL=20240215T090000Z",
            window_start: "2023-12-01T00:00:00Z",
            window_end: "2024-12-31T00:00:00Z",
            expected_len: Some(16),
        },
        CrossCheckCase {
            name: "weekly_single_day",
            record: r#"{"id":1,"title":"t","start":"2024-01-01T09:00:00Z","end":"2024-01-01T10:00:00Z",
                "is_recurring":true,"frequency":"WEEKLY","weekdays":"MO"}"#,
            rruleset: "DTSTART:20240101T090000Z\nRRULE:FREQ=WEEKLY;BYDAY=MO",
            window_start: "2024-01-01T00:00:00Z",
            window_end: "2024-03-31T00:00:00Z",
            expected_len: Some(13),
        },
        CrossCheckCase {
            name: "weekly_mo_we_fr",
            record: r#"{"id":1,"title":"t","start":"2024-01-01T09:00:00Z","end":"2024-01-01T10:00:00Z",
                "is_recurring":true,"frequency":"WEEKLY","weekdays":"MO,WE,FR"}"#,
            rruleset: "DTSTART:20240101T090000Z\nRRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR",
            window_start: "2024-01-01T00:00:00Z",
            window_end: "2024-01-31T00:00:00Z",
            expected_len: Some(13),
        },
        CrossCheckCase {
            name: "weekly_interval_two_with_weekdays",
            record: r#"{"id":1,"title":"t","start":"2024-01-02T18:30:00Z","end":"2024-01-02T19:00:00Z",
                "is_recurring":true,"frequency":"WEEKLY","interval":2,"weekdays":"TU,TH,SU"}"#,
            rruleset: "DTSTART:20240102T183000Z\nRRULE:FREQ=WEEKLY;BYDAY=TU,TH,SU",
            window_start: "2024-01-01T00:00:00Z",
            window_end: "2024-06-30T00:00:00Z",
            expected_len: None,
        },
        CrossCheckCase {
            name: "weekly_window_mid_series",
            record: r#"{"id":1,"title":"t","start":"2024-01-03T07:00:00Z","end":"2024-01-03T08:00:00Z",
                "is_recurring":true,"frequency":"WEEKLY","interval":3,"weekdays":"WE,SA"}"#,
            rruleset: "DTSTART:20240103T070000Z\nRRULE:FREQ=WEEKLY;BYDAY=WE,SA",
            window_start: "2024-04-01T00:00:00Z",
            window_end: "2024-09-30T00:00:00Z",
            expected_len: None,
        },
        CrossCheckCase {
            name: "monthly_by_month_day",
            record: r#"{"id":1,"title":"t","start":"2024-01-15T12:00:00Z","end":"2024-01-15T13:00:00Z",
                "is_recurring":true,"frequency":"MONTHLY","month_day":15}"#,
            rruleset: "DTSTART:20240115T120000Z\nRRULE:FREQ=MONTHLY;BYMONTHDAY=15",
            window_start: "2024-01-01T00:00:00Z",
            window_end: "2025-12-31T00:00:00Z",
            expected_len: Some(24),
        },
        CrossCheckCase {
            name: "monthly_second_friday",
            record: r#"{"id":1,"title":"t","start":"2024-01-12T17:00:00Z","end":"2024-01-12T18:00:00Z",
                "is_recurring":true,"frequency":"MONTHLY","month_week":2,"month_weekday":4}"#,
            rruleset: "DTSTART:20240112T170000Z\nRRULE:FREQ=MONTHLY;BYDAY=2FR",
            window_start: "2024-01-01T00:00:00Z",
            window_end: "2024-12-31T00:00:00Z",
            expected_len: Some(12),
        },
        CrossCheckCase {
            name: "monthly_last_friday",
            record: r#"{"id":1,"title":"t","start":"2024-01-26T17:00:00Z","end":"2024-01-26T18:00:00Z",
                "is_recurring":true,"frequency":"MONTHLY","month_week":-1,"month_weekday":4}"#,
            rruleset: "DTSTART:20240126T170000Z\nRRULE:FREQ=MONTHLY;BYDAY=-1FR",
            window_start: "2024-01-01T00:00:00Z",
            window_end: "2024-12-31T00:00:00Z",
            expected_len: Some(12),
        },
        CrossCheckCase {
            name: "monthly_fifth_friday",
            record: r#"{"id":1,"title":"t","start":"2024-03-29T17:00:00Z","end":"2024-03-29T18:00:00Z",
                "is_recurring":true,"frequency":"MONTHLY","month_week":5,"month_weekday":4}"#,
            rruleset: "DTSTART:20240329T170000Z\nRRULE:FREQ=MONTHLY;BYDAY=5FR",
            window_start: "2024-01-01T00:00:00Z",
            window_end: "2024-12-31T00:00:00Z",
            expected_len: Some(4),
        },
        CrossCheckCase {
            name: "yearly_basic",
            record: r#"{"id":1,"title":"t","start":"2024-03-10T08:00:00Z","end":"2024-03-10T09:00:00Z",
                "is_recurring":true,"frequency":"YEARLY"}"#,
            rruleset: "DTSTART:20240310T080000Z\nRRULE:FREQ=YEARLY",
            window_start: "2024-01-01T00:00:00Z",
            window_end: "2034-01-01T00:00:00Z",
            expected_len: Some(10),
        },
        CrossCheckCase {
            name: "yearly_interval_until",
            record: r#"{"id":1,"title":"t","start":"2024-06-01T08:00:00Z","end":"2024-06-01T09:00:00Z",
                "is_recurring":true,"frequency":"YEARLY","interval":2,"until":"2032-06-01T08:00:00Z"}"#,
            rruleset: "DTSTART:20240601T080000Z\nRRULE:FREQ=YEARLY;INTERVAL=2;UNTIL=20320601T080000Z",
            window_start: "2024-01-01T00:00:00Z",
            window_end: "2040-01-01T00:00:00Z",
            expected_len: Some(5),
        },
    ]
}

pub fn assert_case(case: &CrossCheckCase) {
    let record: EventRecord = serde_json::from_str(case.record)
        .unwrap_or_else(|err| panic!("Failed to parse record for {}: {}", case.name, err));
    let event = Event::try_from(record)
        .unwrap_or_else(|err| panic!("Invalid event for {}: {}", case.name, err));

    let window_start = parse_timestamp(case.window_start).unwrap();
    let window_end = parse_timestamp(case.window_end).unwrap();

    let actual: Vec<i64> = generate(&event, window_start, window_end)
        .iter()
        .map(chrono::DateTime::timestamp)
        .collect();

    let rrule_set: RRuleSet = case
        .rruleset
        .parse()
        .unwrap_or_else(|err| panic!("Failed to parse {}: {}", case.name, err));
    let reference = rrule_set
        .after(window_start.with_timezone(&Tz::UTC))
        .before(window_end.with_timezone(&Tz::UTC))
        .all(1000);
    let expected: Vec<i64> = reference.dates.iter().map(chrono::DateTime::timestamp).collect();

    assert_eq!(actual, expected, "Case {} did not match rrule", case.name);

    if let Some(expected_len) = case.expected_len {
        assert_eq!(
            actual.len(),
            expected_len,
            "Case {} expected {} occurrences",
            case.name,
            expected_len
        );
    }
}
