use std::cmp::Ordering;

use releaser::version::compare::{compare_by, compare_versions, sort_versions, version_lt};
use rstest::rstest;

/// Versions seen on real registries, in expected ascending order
const ORDERED_SAMPLE: &[&str] = &[
    "0.1",
    "0.9.9",
    "1.0.0-alpha",
    "1.0.0-alpha2",
    "1.0.0-beta",
    "1.0.0-pre",
    "1.0.0-rc1",
    "1.0.0-rc2",
    "1.0",
    "1.0.0",
    "1.0.1",
    "1.2.3",
    "1.9.0",
    "1.10.0",
    "2.0.0",
    "20210101",
];

#[test]
fn end_to_end_sort_scenario() {
    let mut versions = vec!["1.0.0-alpha", "1.0.0-rc1", "1.0.0", "1.0", "0.9.9"];
    sort_versions(&mut versions);
    // "1.0" is padded with zeros, so it lands above the 1.0.0 pre-releases
    assert_eq!(
        versions,
        vec!["0.9.9", "1.0.0-alpha", "1.0.0-rc1", "1.0", "1.0.0"]
    );
}

#[test]
fn shorter_release_sorts_above_longer_prerelease() {
    assert!(version_lt("1.0.0-rc1", "1.0"));
    assert!(version_lt("1.0.0-alpha", "1.0"));
}

#[test]
fn sorting_reversed_sample_restores_expected_order() {
    let mut versions: Vec<&str> = ORDERED_SAMPLE.iter().rev().copied().collect();
    sort_versions(&mut versions);
    assert_eq!(versions, ORDERED_SAMPLE);
}

#[test]
fn ordering_is_transitive_over_sample() {
    for (i, a) in ORDERED_SAMPLE.iter().enumerate() {
        for b in &ORDERED_SAMPLE[i + 1..] {
            assert!(version_lt(a, b), "{a} < {b}");
        }
    }
}

#[rstest]
#[case("2.0.0-alpha", "2.0.0-beta")]
#[case("2.0.0-beta", "2.0.0-pre")]
#[case("2.0.0-pre", "2.0.0-rc")]
fn qualifier_maturity_order(#[case] lower: &str, #[case] higher: &str) {
    assert!(version_lt(lower, higher));
}

#[test]
fn prerelease_precedes_release() {
    assert!(version_lt("1.0.0-rc1", "1.0.0"));
}

#[test]
fn shorter_string_loses_length_tie_break() {
    assert!(version_lt("1.0", "1.0.0"));
    assert!(!version_lt("1.0.0", "1.0"));
}

#[test]
fn numeric_components_compare_as_numbers() {
    assert!(version_lt("1.2.3", "1.2.4"));
    assert!(version_lt("1.9.0", "1.10.0"));
}

#[test]
fn leading_zero_component_sorts_after_clean_integer() {
    assert!(version_lt("1.1", "1.01"));
    assert!(version_lt("1.4", "1.01"));
}

#[test]
fn exactly_one_relation_holds_for_every_pair() {
    let strings = [
        "", " ", "+", "!!", "ümlaut", "日本語", "\0", "\u{1}", "rc", "1.0", "1.0.0", "v1",
        "1-0", "abc", "ABC", "00", "999999999999999999999999999999",
    ];
    for a in strings {
        for b in strings {
            let less = compare_by(a, b, |x, y| x < y);
            let equal = compare_by(a, b, |x, y| x == y);
            let greater = compare_by(b, a, |x, y| x < y);
            let held = [less, equal, greater].iter().filter(|r| **r).count();
            assert_eq!(held, 1, "{a:?} vs {b:?}");
            assert_eq!(compare_versions(a, b), compare_versions(b, a).reverse());
        }
    }
}

#[test]
fn identical_strings_compare_equal() {
    assert_eq!(compare_versions("3.1.4-beta1", "3.1.4-beta1"), Ordering::Equal);
}
