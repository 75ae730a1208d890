use crate::*;

#[test]
fn parses_degree_file_in_order() {
    let text = "\
# RA1 DEC1 RA2 DEC2
ORI 80.0 0.0 90.0 0.0
AND 0.0 20.0 10.0 20.0
ORI 90.0 0.0 90.0 10.0  // trailing comment
";
    let parsed = parse_iau_boundaries(text).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].code, "ORI");
    assert_eq!(parsed[0].edges.len(), 2);
    assert_eq!(parsed[1].code, "AND");
    let e = parsed[0].edges[1];
    assert_eq!(e.start.ra_deg, 90.0);
    assert_eq!(e.end.dec_deg, 10.0);
}

#[test]
fn hour_files_are_scaled() {
    let text = "UMa 8.0 60.0 12.0 60.0\numa 12.0 60.0 12.0 70.0\n";
    let parsed = parse_iau_boundaries(text).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].code, "UMA");
    assert_eq!(parsed[0].edges[0].start.ra_deg, 120.0);
    assert_eq!(parsed[0].edges[0].end.ra_deg, 180.0);
    // Dec is untouched.
    assert_eq!(parsed[0].edges[1].end.dec_deg, 70.0);
}

#[test]
fn separators_are_whitespace() {
    let text = "CYG,300.5;30.0,310.0;30.0\n";
    let parsed = parse_iau_boundaries(text).unwrap();
    let e = parsed[0].edges[0];
    assert_eq!((e.start.ra_deg, e.start.dec_deg), (300.5, 30.0));
    assert_eq!((e.end.ra_deg, e.end.dec_deg), (310.0, 30.0));
}

#[test]
fn lines_without_code_are_ignored() {
    let text = "\n   \n123 1 2 3 4\n# ORI 1 2 3 4\nOR 1 2 3 4\n";
    assert!(parse_iau_boundaries(text).unwrap().is_empty());
}

#[test]
fn numbered_codes_do_not_leak_digits() {
    let text = "SER1 230.0 -5.0 240.0 -5.0\n";
    let parsed = parse_iau_boundaries(text).unwrap();
    assert_eq!(parsed[0].code, "SER");
    assert_eq!(parsed[0].edges[0].start.ra_deg, 230.0);
}

#[test]
fn short_line_reports_line_number() {
    let text = "ORI 80 0 90 0\nORI 90 0 90\n";
    match parse_iau_boundaries(text).unwrap_err() {
        IngestError::Boundary { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn reader_variant_matches() {
    let text = "LEO 150 10 160 10\n";
    let a = parse_iau_boundaries(text).unwrap();
    let b = parse_iau_boundaries_reader(text.as_bytes()).unwrap();
    assert_eq!(a, b);
}
