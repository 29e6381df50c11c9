use chrono::{NaiveDate, NaiveDateTime};
use timeinfo::datatype::{Lead, Moment};
use timeinfo::delta::{Delta, Unit, parse_delta, seconds_from_string};
use timeinfo::TimeInfoError;

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
}

#[test]
fn tokens_with_unit_letters() {
    assert_eq!(parse_delta("3H", Unit::Second), Some(Delta::of(Unit::Hour, 3)));
    assert_eq!(parse_delta("-30M", Unit::Second), Some(Delta::of(Unit::Minute, -30)));
    assert_eq!(parse_delta("2d", Unit::Second), Some(Delta::of(Unit::Day, 2)));
    assert_eq!(parse_delta("1m", Unit::Second), Some(Delta::of(Unit::Month, 1)));
    assert_eq!(parse_delta("1Y", Unit::Second), Some(Delta::of(Unit::Year, 1)));
    assert_eq!(parse_delta("45S", Unit::Hour), Some(Delta::of(Unit::Second, 45)));
}

#[test]
fn tokens_without_unit_letter_use_default() {
    assert_eq!(parse_delta("3600", Unit::Second), Some(Delta::of(Unit::Second, 3600)));
    assert_eq!(parse_delta("12", Unit::Hour), Some(Delta::of(Unit::Hour, 12)));
    assert_eq!(parse_delta("-6", Unit::Hour), Some(Delta::of(Unit::Hour, -6)));
    // a single token sets exactly one component, no carrying into days
    assert_eq!(parse_delta("36H", Unit::Second), Some(Delta::of(Unit::Hour, 36)));
}

#[test]
fn malformed_tokens() {
    for token in ["", "H3", "3X", "3h", "3HH", "3.5H", "--3H", "three"] {
        assert_eq!(parse_delta(token, Unit::Hour), None, "token '{token}' should not parse");
    }
    let err = "3X".parse::<Delta>().unwrap_err();
    assert!(matches!(err, TimeInfoError::Parse { .. }));
    assert_eq!("90".parse::<Delta>().unwrap(), Delta::of(Unit::Second, 90));
}

#[test]
fn fixed_deltas_reduce_without_anchor() {
    assert_eq!(Delta::of(Unit::Day, 1).total_seconds(None), Some(86400));
    assert_eq!(Delta::new(0, 0, 1, 2, 3, 4).total_seconds(None), Some(86400 + 7200 + 180 + 4));
    assert_eq!(seconds_from_string("90M", Unit::Second, None), Some(5400));
    assert_eq!(seconds_from_string("bogus", Unit::Second, None), None);
}

#[test]
fn calendar_deltas_need_an_anchor() {
    assert_eq!(Delta::of(Unit::Month, 1).total_seconds(None), None);
    assert_eq!(Delta::of(Unit::Year, 1).total_hours(None), None);
    // the month before 1 March is February
    assert_eq!(Delta::of(Unit::Month, 1).total_seconds(Some(at(2024, 3, 1, 0))), Some(29 * 86400));
    assert_eq!(Delta::of(Unit::Month, 1).total_seconds(Some(at(2023, 3, 1, 0))), Some(28 * 86400));
    assert_eq!(Delta::of(Unit::Year, 1).total_seconds(Some(at(2025, 1, 1, 0))), Some(366 * 86400));
    // an anchor does not change fixed deltas
    assert_eq!(Delta::of(Unit::Hour, 6).total_seconds(Some(at(2024, 3, 1, 0))), Some(21600));
}

#[test]
fn negative_hours_truncate_toward_zero() {
    assert_eq!(Delta::of(Unit::Second, -5400).total_hours(None), Some(-1));
    assert_eq!(Delta::of(Unit::Second, 5400).total_hours(None), Some(1));
    assert_eq!(Delta::of(Unit::Hour, -6).total_hours(None), Some(-6));
}

#[test]
fn integer_constructors_normalize() {
    assert_eq!(Delta::from_seconds(21600), Some(Delta::of(Unit::Hour, 6)));
    assert_eq!(Delta::from_hours(48), Some(Delta::of(Unit::Day, 2)));
    assert_eq!(Delta::from_hours(30), Some(Delta::new(0, 0, 1, 6, 0, 0)));
    assert_eq!(Delta::from_seconds(90061), Some(Delta::new(0, 0, 1, 1, 1, 1)));
    assert_eq!(Delta::from_minutes(-90), Some(Delta::new(0, 0, 0, -1, -30, 0)));
    assert_eq!(Delta::of(Unit::Month, 14).normalized(), Some(Delta::new(1, 2, 0, 0, 0, 0)));
}

#[test]
fn normalizing_extremes() {
    let min = Delta::from_seconds(i64::MIN).expect("carries without overflow");
    assert!(min.is_negative());
    assert_eq!(min.total_seconds(None), Some(i64::MIN));
    // the carry would push minutes past i64::MAX
    assert_eq!(Delta::new(0, 0, 0, 0, i64::MAX, 60).normalized(), None);
    assert_eq!(Delta::new(0, 0, 0, 0, 0, i64::MIN).checked_neg(), None);
    assert_eq!(Delta::of(Unit::Hour, i64::MIN).sub_from(NaiveDateTime::MIN), None);
}

#[test]
fn month_arithmetic_clamps_to_month_end() {
    let one_month = Delta::of(Unit::Month, 1);
    assert_eq!(one_month.add_to(at(2024, 1, 31, 0)), Some(at(2024, 2, 29, 0)));
    assert_eq!(one_month.sub_from(at(2024, 3, 31, 12)), Some(at(2024, 2, 29, 12)));
    assert_eq!(Delta::new(0, 1, 1, 0, 0, 0).add_to(at(2024, 1, 31, 0)), Some(at(2024, 3, 1, 0)));
}

#[test]
fn lead_reduction() {
    assert_eq!(Lead::Seconds(7200).total_hours(&Moment::Any), Some(2));
    assert_eq!(Lead::Any.total_seconds(&Moment::At(at(2024, 3, 1, 0))), None);
    let month = Lead::Span(Delta::of(Unit::Month, 1));
    assert_eq!(month.total_seconds(&Moment::Any), None);
    assert_eq!(month.total_seconds(&Moment::At(at(2024, 3, 1, 0))), Some(29 * 86400));
    assert_eq!(month.total_hours(&Moment::At(at(2024, 3, 1, 0))), Some(29 * 24));
}
