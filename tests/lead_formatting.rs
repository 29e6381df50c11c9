use timeinfo::delta::{Delta, Unit};
use timeinfo::format::{format_compact, format_phrase, time_string_to_met_time};

#[test]
fn compact_hours_only() {
    assert_eq!(format_compact(6 * 3600, false), "06");
    assert_eq!(format_compact(0, false), "00");
    assert_eq!(format_compact(99 * 3600, false), "99");
    assert_eq!(format_compact(-3600, false), "-1");
}

#[test]
fn compact_minutes_and_seconds_force_full_form() {
    assert_eq!(format_compact(5400, false), "013000");
    assert_eq!(format_compact(30, false), "000030");
    assert_eq!(format_compact(0, true), "000000");
    assert_eq!(format_compact(6 * 3600, true), "060000");
}

#[test]
fn compact_wide_hours_force_full_form() {
    assert_eq!(format_compact(100 * 3600, false), "1000000");
    assert_eq!(format_compact(240 * 3600 + 90, false), "2400130");
}

#[test]
fn phrases_spelled_out() {
    assert_eq!(format_phrase(&Delta::of(Unit::Hour, 6), true, false), "6 hours");
    assert_eq!(format_phrase(&Delta::of(Unit::Hour, 1), true, false), "1 hour");
    assert_eq!(format_phrase(&Delta::of(Unit::Hour, 6), false, false), "6 hour");
    assert_eq!(format_phrase(&Delta::of(Unit::Month, 2), true, false), "2 months");
    assert_eq!(format_phrase(&Delta::of(Unit::Hour, -6), true, false), "-6 hours");
    assert_eq!(format_phrase(&Delta::new(0, 0, 1, 6, 0, 0), true, false), "1 day 6 hours");
}

#[test]
fn phrases_letter_only() {
    assert_eq!(format_phrase(&Delta::of(Unit::Day, 3), true, true), "3d");
    assert_eq!(format_phrase(&Delta::new(0, 0, 1, 6, 0, 0), true, true), "1d6H");
    assert_eq!(format_phrase(&Delta::of(Unit::Minute, -30), true, true), "-30M");
    assert_eq!(Delta::of(Unit::Year, 1).to_string(), "1Y");
}

#[test]
fn zero_phrases() {
    let zero = Delta::zero();
    assert_eq!(format_phrase(&zero, true, false), "0 hours");
    assert_eq!(format_phrase(&zero, false, false), "0 hour");
    assert_eq!(format_phrase(&zero, true, true), "0H");
}

#[test]
fn tokens_to_met_time() {
    assert_eq!(time_string_to_met_time("3H", Unit::Second, false).as_deref(), Some("03"));
    assert_eq!(time_string_to_met_time("3H", Unit::Second, true).as_deref(), Some("030000"));
    assert_eq!(time_string_to_met_time("90", Unit::Minute, false).as_deref(), Some("013000"));
    assert_eq!(time_string_to_met_time("1m", Unit::Hour, false), None);
    assert_eq!(time_string_to_met_time("3Q", Unit::Hour, false), None);
}
