use classfit::error::ScheduleError;
use classfit::models::{TimeOfDay, TimeWindow, Weekday};
use classfit::schedule::{overlaps, overlaps_str};

fn t(s: &str) -> TimeOfDay {
    s.parse().expect("valid time")
}

#[test]
fn test_touching_ranges_do_not_overlap() {
    assert!(!overlaps_str("09:00", "10:00", "10:00", "11:00").unwrap());
    assert!(!overlaps_str("10:00", "11:00", "09:00", "10:00").unwrap());
}

#[test]
fn test_contained_range_overlaps() {
    assert!(overlaps_str("09:00", "17:00", "12:00", "13:00").unwrap());
    assert!(overlaps_str("12:00", "13:00", "09:00", "17:00").unwrap());
}

#[test]
fn test_overlap_is_symmetric() {
    let times = ["08:00", "09:00", "09:30", "10:00", "12:15", "13:00"];
    for a in 0..times.len() {
        for b in a + 1..times.len() {
            for c in 0..times.len() {
                for d in c + 1..times.len() {
                    let (sa, ea) = (t(times[a]), t(times[b]));
                    let (sc, ec) = (t(times[c]), t(times[d]));
                    let ab_cd = overlaps(sa, ea, sc, ec).unwrap();
                    let cd_ab = overlaps(sc, ec, sa, ea).unwrap();
                    assert_eq!(ab_cd, cd_ab, "{}-{} vs {}-{}", sa, ea, sc, ec);
                }
            }
        }
    }
}

#[test]
fn test_partial_overlap() {
    assert!(overlaps_str("09:00", "10:30", "10:00", "11:00").unwrap());
    assert!(!overlaps_str("08:00", "08:50", "09:00", "09:50").unwrap());
}

#[test]
fn test_inverted_or_empty_window_is_an_error() {
    let inverted = overlaps_str("10:00", "09:00", "08:00", "12:00");
    assert!(matches!(inverted, Err(ScheduleError::MalformedWindow(_))));

    let empty = overlaps_str("08:00", "12:00", "10:00", "10:00");
    assert!(matches!(empty, Err(ScheduleError::MalformedWindow(_))));
}

#[test]
fn test_unparseable_time_is_an_error() {
    let result = overlaps_str("9am", "10:00", "08:00", "12:00");
    assert!(matches!(result, Err(ScheduleError::MalformedWindow(_))));
    assert!("24:00".parse::<TimeOfDay>().is_err());
    assert!("12:60".parse::<TimeOfDay>().is_err());
}

#[test]
fn test_time_of_day_round_trips_display() {
    let time = t(" 09:05 ");
    assert_eq!(time.hour(), 9);
    assert_eq!(time.minute(), 5);
    assert_eq!(time.to_string(), "09:05");
    assert_eq!(TimeOfDay::new(23, 59).unwrap().to_string(), "23:59");
    assert!(TimeOfDay::new(24, 0).is_none());
}

#[test]
fn test_parse_days() {
    assert_eq!(
        Weekday::parse_days("M W F").unwrap(),
        vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
    );
    assert_eq!(Weekday::parse_days("TR").unwrap(), vec![Weekday::Tue, Weekday::Thu]);
    assert_eq!(Weekday::parse_days("MM").unwrap(), vec![Weekday::Mon]);
    assert!(matches!(Weekday::parse_days("MS"), Err(ScheduleError::UnknownDay(_))));
    assert!(Weekday::parse_days("   ").is_err());
}

#[test]
fn test_time_window_display() {
    let window = TimeWindow::parse("09:00", "09:50").unwrap();
    assert_eq!(window.to_string(), "09:00-09:50");
    assert!(TimeWindow::parse("09:50", "09:00").is_err());
}

#[test]
fn test_split_days_keeps_weekdays() {
    let (days, unknown) = Weekday::split_days("M    S ");
    assert_eq!(days, vec![Weekday::Mon]);
    assert_eq!(unknown, "S");

    let (days, unknown) = Weekday::split_days("SU");
    assert!(days.is_empty());
    assert_eq!(unknown, "SU");
}
