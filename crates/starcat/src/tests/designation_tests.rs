use crate::*;

#[test]
fn build_joins_parts_and_suffix() {
    assert_eq!(
        build_designation(Some("Alpha"), Some("53"), Some("Aql")).as_deref(),
        Some("Alpha 53 Aql")
    );
    assert_eq!(
        build_designation(Some(" Alp "), None, Some("CMa")).as_deref(),
        Some("Alp CMa")
    );
    assert_eq!(
        build_designation(None, Some("9"), None).as_deref(),
        Some("9")
    );
}

#[test]
fn build_without_parts_is_none() {
    assert_eq!(build_designation(None, None, Some("Ori")), None);
    assert_eq!(build_designation(Some("  "), Some(""), Some("Ori")), None);
}

#[test]
fn split_bayer_and_flamsteed() {
    let (bayer, flamsteed) = split_designation(Some("Alpha 53 AQL"), Some("AQL"));
    assert_eq!(bayer.as_deref(), Some("Alpha"));
    assert_eq!(flamsteed.as_deref(), Some("53 AQL"));
}

#[test]
fn split_suffix_is_case_insensitive() {
    let (bayer, flamsteed) = split_designation(Some("Alp 9 CMa"), Some("CMA"));
    assert_eq!(bayer.as_deref(), Some("Alp"));
    assert_eq!(flamsteed.as_deref(), Some("9 CMA"));
}

#[test]
fn split_without_constellation_keeps_tokens() {
    let (bayer, flamsteed) = split_designation(Some("Bet 27 Gem"), None);
    assert_eq!(bayer.as_deref(), Some("Bet Gem"));
    assert_eq!(flamsteed.as_deref(), Some("27"));
}

#[test]
fn split_bayer_only() {
    let (bayer, flamsteed) = split_designation(Some("Gamma ORI"), Some("ORI"));
    assert_eq!(bayer.as_deref(), Some("Gamma"));
    assert_eq!(flamsteed, None);
}

#[test]
fn split_bare_code_returns_raw() {
    let (bayer, flamsteed) = split_designation(Some(" ORI "), Some("ORI"));
    assert_eq!(bayer.as_deref(), Some("ORI"));
    assert_eq!(flamsteed, None);
}

#[test]
fn split_absent_is_empty() {
    assert_eq!(split_designation(None, Some("ORI")), (None, None));
    assert_eq!(split_designation(Some("   "), None), (None, None));
}
