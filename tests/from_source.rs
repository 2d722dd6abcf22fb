use std::fs;

use growing_days::{Column, GrowingDays, Layout, SourceError};
use tempfile::tempdir;

const SEASON: &str = "\
Date,Min,Max,Avg
2024-04-01,38,52,45
2024-04-02,40,60,50
2024-04-03,44,70,57
2024-04-04,30,44,37
2024-04-05,50,74,62
2024-04-06,55,79,67
";

#[test]
fn accumulates_a_season() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("season.csv");
    fs::write(&path, SEASON).unwrap();

    let days = GrowingDays::from_source(&path, 50.0, &Layout::default()).unwrap();
    assert_eq!(days.degree_days(), &[-5.0, 0.0, 7.0, -13.0, 12.0, 17.0]);
    assert_eq!(days.cumulative(), &[0.0, 0.0, 7.0, 0.0, 12.0, 29.0]);

    assert_eq!(days.first_day_at_or_above(7.0), Some(2));
    assert_eq!(days.first_day_at_or_above(10.0), Some(4));
    assert_eq!(days.first_day_at_or_above(29.0), Some(5));
    assert_eq!(days.first_day_at_or_above(30.0), None);
    assert_eq!(days.first_day_at_or_above_in(3..6, 7.0), Some(4));
}

#[test]
fn named_column_matches_default_index() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("season.csv");
    fs::write(&path, SEASON).unwrap();

    let layout = Layout {
        column: Column::Name(String::from("Avg")),
        header: true,
    };
    let by_name = GrowingDays::from_source(&path, 50.0, &layout).unwrap();
    let by_index = GrowingDays::from_source(&path, 50.0, &Layout::default()).unwrap();
    assert_eq!(by_name, by_index);
}

#[test]
fn header_only_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "Date,Min,Max,Avg\n").unwrap();

    let days = GrowingDays::from_source(&path, 10.0, &Layout::default()).unwrap();
    assert!(days.is_empty());
    assert_eq!(days.first_day_at_or_above(0.0), None);
}

#[test]
fn unreadable_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.csv");

    let err = GrowingDays::from_source(&path, 10.0, &Layout::default()).unwrap_err();
    match err {
        SourceError::Read { path: failed, .. } => assert_eq!(failed, path),
        e => panic!("unexpected error: {e}"),
    }
}

#[test]
fn bad_row_fails_the_whole_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "Date,Min,Max,Avg\n2024-04-01,38,52,45\n2024-04-02,40,60,n/a\n").unwrap();

    let err = GrowingDays::from_source(&path, 10.0, &Layout::default()).unwrap_err();
    assert!(matches!(err, SourceError::BadValue { line: 3, .. }));
}
