use chrono::NaiveDate;
use workforce_plan::{CalendarError, MonthKey, MonthSequence, WinterBreak};

fn m(y: i32, mo: u32) -> MonthKey {
    MonthKey::new(y, mo).unwrap()
}

#[test]
fn single_month_sequence() {
    let seq = MonthSequence::span(m(2025, 7), m(2025, 7)).unwrap();
    assert_eq!(seq.as_slice(), &[m(2025, 7)]);
    assert_eq!(seq, MonthSequence::single(m(2025, 7)));
    assert_eq!(seq.progress(0), 1.0);
}

#[test]
fn sequence_length_matches_month_arithmetic() {
    let cases = [
        ((2025, 1), (2025, 3)),
        ((2024, 11), (2026, 2)),
        ((2023, 12), (2024, 1)),
        ((2020, 6), (2029, 5)),
    ];
    for ((sy, sm), (ey, em)) in cases {
        let seq = MonthSequence::span(m(sy, sm), m(ey, em)).unwrap();
        let expected = (ey * 12 + em as i32) - (sy * 12 + sm as i32) + 1;
        assert_eq!(seq.len() as i32, expected, "{sy}-{sm} .. {ey}-{em}");
    }
}

#[test]
fn adjacent_months_differ_by_one_and_december_rolls_over() {
    let seq = MonthSequence::span(m(2024, 10), m(2025, 3)).unwrap();
    for pair in seq.as_slice().windows(2) {
        assert_eq!(pair[0].months_between(&pair[1]), 1);
        assert_eq!(pair[0].succ(), pair[1]);
    }
    assert_eq!(m(2024, 12).succ(), m(2025, 1));
    assert!(seq.contains(&m(2025, 1)));
    assert_eq!(seq.start(), m(2024, 10));
    assert_eq!(seq.end(), m(2025, 3));
}

#[test]
fn reversed_range_is_rejected() {
    let err = MonthSequence::span(m(2025, 5), m(2025, 1)).unwrap_err();
    assert_eq!(
        err,
        CalendarError::InvalidRange {
            start: m(2025, 5),
            end: m(2025, 1)
        }
    );
}

#[test]
fn progress_runs_from_zero_to_one() {
    let seq = MonthSequence::span(m(2025, 1), m(2025, 3)).unwrap();
    assert_eq!(seq.progress(0), 0.0);
    assert_eq!(seq.progress(1), 0.5);
    assert_eq!(seq.progress(2), 1.0);
}

#[test]
fn month_key_from_date_drops_the_day() {
    let date = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
    assert_eq!(MonthKey::from_date(date), m(2025, 2));
}

#[test]
fn winter_break_wraps_new_year() {
    let window = WinterBreak::default();
    let idle: Vec<u32> = (1..=12)
        .filter(|mo| window.contains(&m(2025, *mo)))
        .collect();
    assert_eq!(idle, vec![1, 2, 3, 4, 11, 12]);

    let summer = WinterBreak::new(6, 8).unwrap();
    assert!(summer.contains(&m(2025, 7)));
    assert!(!summer.contains(&m(2025, 9)));
}
