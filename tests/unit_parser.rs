// Unit tests for the scan file parser.
//
// Covers the two-pass behavior (column discovery, row filling), the
// sparse NaN representation, and every way a file can be rejected.

use wifiloc::scan::{parse_scan_file, parse_scan_str};

const TWO_ROOMS: &str = "\
~^~Kitchen~^~
aa:00~~HomeNet~~-48
bb:00~~Guest~~-71

~^~Bedroom~^~
bb:00~~Guest~~-60
cc:00~~Neighbor~~-85
";

// ============================================================
// Dimension discovery and layout
// ============================================================

#[test]
fn dimensions_follow_headers_and_distinct_macs() {
    let m = parse_scan_str(TWO_ROOMS).unwrap();
    assert_eq!(m.n_locations(), 2);
    assert_eq!(m.n_access_points(), 3);
    assert_eq!(m.rows.len(), m.labels.len());
    assert!(m.rows.iter().all(|r| r.len() == 3));
}

#[test]
fn columns_in_first_appearance_order() {
    let m = parse_scan_str(TWO_ROOMS).unwrap();
    assert_eq!(m.access_points, vec!["aa:00", "bb:00", "cc:00"]);
}

#[test]
fn labels_strip_markers_and_keep_file_order() {
    let m = parse_scan_str(TWO_ROOMS).unwrap();
    assert_eq!(m.labels, vec!["Kitchen", "Bedroom"]);
}

#[test]
fn readings_land_in_their_columns() {
    let m = parse_scan_str(TWO_ROOMS).unwrap();
    assert_eq!(m.value(0, 0), Some(-48.0));
    assert_eq!(m.value(0, 1), Some(-71.0));
    assert_eq!(m.value(1, 1), Some(-60.0));
    assert_eq!(m.value(1, 2), Some(-85.0));
}

#[test]
fn unseen_access_points_are_nan() {
    let m = parse_scan_str(TWO_ROOMS).unwrap();
    assert!(m.rows[0][2].is_nan());
    assert!(m.rows[1][0].is_nan());
    assert_eq!(m.missing_count(), 2);
}

#[test]
fn mac_seen_only_later_still_gets_column_in_earlier_rows() {
    // cc:00 first appears in the second scan; the first row must already be
    // full width because pass 1 saw the whole file.
    let m = parse_scan_str(TWO_ROOMS).unwrap();
    assert_eq!(m.rows[0].len(), 3);
}

// ============================================================
// Line-level details
// ============================================================

#[test]
fn duplicate_reading_in_one_scan_last_wins() {
    let text = "~^~Hall~^~\naa~~x~~-50\naa~~x~~-42\n";
    let m = parse_scan_str(text).unwrap();
    assert_eq!(m.n_access_points(), 1);
    assert_eq!(m.value(0, 0), Some(-42.0));
}

#[test]
fn duplicate_labels_make_separate_rows() {
    let text = "~^~Hall~^~\naa~~-50\n~^~Hall~^~\naa~~-55\n";
    let m = parse_scan_str(text).unwrap();
    assert_eq!(m.labels, vec!["Hall", "Hall"]);
    assert_eq!(m.unique_labels(), vec!["Hall_0", "Hall_1"]);
    assert_eq!(m.value(1, 0), Some(-55.0));
}

#[test]
fn header_without_readings_gives_all_nan_row() {
    let text = "~^~Empty~^~\n~^~Lab~^~\naa~~-30\n";
    let m = parse_scan_str(text).unwrap();
    assert_eq!(m.n_locations(), 2);
    assert_eq!(m.coverage(0), 0);
    assert!(m.rows[0][0].is_nan());
}

#[test]
fn crlf_and_blank_lines_are_tolerated() {
    let text = "\r\n~^~Office~^~\r\n\r\naa~~Net~~-44\r\n   \r\nbb~~Net~~-66\r\n";
    let m = parse_scan_str(text).unwrap();
    assert_eq!(m.labels, vec!["Office"]);
    assert_eq!(m.value(0, 1), Some(-66.0));
}

#[test]
fn middle_fields_are_ignored() {
    let text = "~^~Lab~^~\naa~~Some~~SSID with spaces~~2437~~-39.5\n";
    let m = parse_scan_str(text).unwrap();
    assert_eq!(m.value(0, 0), Some(-39.5));
}

#[test]
fn two_field_reading_is_enough() {
    let m = parse_scan_str("~^~Lab~^~\naa~~-61\n").unwrap();
    assert_eq!(m.value(0, 0), Some(-61.0));
}

// ============================================================
// Rejected input
// ============================================================

#[test]
fn empty_file_is_an_error() {
    let err = parse_scan_str("").unwrap_err().to_string();
    assert!(err.contains("no location scans"), "got: {err}");
}

#[test]
fn readings_without_any_header_is_an_error() {
    let err = parse_scan_str("aa~~-50\n").unwrap_err().to_string();
    assert!(err.contains("no location scans"), "got: {err}");
}

#[test]
fn reading_before_first_header_is_an_error() {
    let err = parse_scan_str("aa~~-50\n~^~Lab~^~\n").unwrap_err().to_string();
    assert!(err.contains("line 1"), "got: {err}");
    assert!(err.contains("before any location header"), "got: {err}");
}

#[test]
fn bad_strength_names_the_line() {
    let err = parse_scan_str("~^~Lab~^~\naa~~Net~~strong\n")
        .unwrap_err()
        .to_string();
    assert!(err.contains("line 2"), "got: {err}");
    assert!(err.contains("strong"), "got: {err}");
}

#[test]
fn non_finite_strength_is_an_error() {
    for bad in ["nan", "NaN", "inf", "-inf", "infinity"] {
        let text = format!("~^~Lab~^~\nbb~~-50\naa~~Net~~{bad}\n");
        let err = parse_scan_str(&text).unwrap_err().to_string();
        assert!(err.contains("line 3"), "{bad}: got {err}");
        assert!(err.contains(bad), "{bad}: got {err}");
    }
}

#[test]
fn reading_without_separator_is_an_error() {
    let err = parse_scan_str("~^~Lab~^~\nnot a reading\n")
        .unwrap_err()
        .to_string();
    assert!(err.contains("line 2"), "got: {err}");
    assert!(err.contains("malformed"), "got: {err}");
}

// ============================================================
// File access
// ============================================================

#[test]
fn parse_file_from_disk() {
    let path = std::env::temp_dir().join("wifiloc_test_parse_file.txt");
    std::fs::write(&path, TWO_ROOMS).unwrap();

    let m = parse_scan_file(&path).unwrap();
    assert_eq!(m.n_locations(), 2);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_error_mentions_path() {
    let path = std::env::temp_dir().join("wifiloc_test_does_not_exist.txt");
    let err = parse_scan_file(&path).unwrap_err().to_string();
    assert!(err.contains("wifiloc_test_does_not_exist"), "got: {err}");
}
