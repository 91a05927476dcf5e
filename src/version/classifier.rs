//! Maps version fragments to totally ordered component keys

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::tokenizer::{Fragment, Qualifier};

/// Any Unicode decimal digit (`\d` is Unicode-aware)
static LEADING_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d").expect("leading digit pattern is valid"));

/// Key assigned to numeric-looking fragments that are not canonical integers
/// (leading zeros, trailing symbols). Equals the number of named qualifiers
/// plus the catch-all letter run.
pub const MALFORMED_NUMBER_KEY: u64 = Qualifier::ALL.len() as u64 + 1;

/// Sort key of a single version component
///
/// Negative keys (qualifiers and free text) always sort before natural
/// numbers. Among negative keys the numeric value decides, so the free-text
/// key for U+0001 (`-1.0`) ties with `rc`.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKey {
    /// A strictly negative value, never NaN
    Negative(f64),
    /// A non-negative integer of arbitrary size
    Natural(Natural),
}

impl ComponentKey {
    /// Placeholder used to pad the shorter of two versions
    pub fn zero() -> Self {
        ComponentKey::Natural(Natural::from(0))
    }
}

impl Eq for ComponentKey {}

impl Ord for ComponentKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ComponentKey::Negative(a), ComponentKey::Negative(b)) => a.total_cmp(b),
            (ComponentKey::Negative(_), ComponentKey::Natural(_)) => Ordering::Less,
            (ComponentKey::Natural(_), ComponentKey::Negative(_)) => Ordering::Greater,
            (ComponentKey::Natural(a), ComponentKey::Natural(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for ComponentKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Non-negative integer stored as canonical decimal digits
///
/// Version components such as build timestamps can exceed `u64`, so the
/// value is compared by digit count first and then lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Natural(String);

impl Natural {
    /// Accepts only canonical renderings: ASCII digits without leading zeros
    pub fn parse_canonical(text: &str) -> Option<Self> {
        let canonical = !text.is_empty()
            && text.bytes().all(|b| b.is_ascii_digit())
            && (text == "0" || !text.starts_with('0'));
        canonical.then(|| Natural(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Natural {
    fn from(value: u64) -> Self {
        Natural(value.to_string())
    }
}

impl Ord for Natural {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Natural {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Classify a fragment
///
/// Rules, in order:
/// 1. named qualifier -> `-(index + 1)`, so alpha < beta < pre < rc
/// 2. canonical ASCII integer -> its value
/// 3. leading decimal digit but not canonical ("01", "0+", "٣") ->
///    [`MALFORMED_NUMBER_KEY`]
/// 4. anything else -> `-1 / ordinal(first char)`
pub fn classify(fragment: &Fragment<'_>) -> ComponentKey {
    match fragment {
        Fragment::Qualifier(qualifier) => qualifier_key(*qualifier),
        Fragment::Word(text) | Fragment::Segment(text) => classify_text(text),
    }
}

fn qualifier_key(qualifier: Qualifier) -> ComponentKey {
    ComponentKey::Negative(-((qualifier.index() + 1) as f64))
}

fn classify_text(text: &str) -> ComponentKey {
    if LEADING_DIGIT.is_match(text) {
        return match Natural::parse_canonical(text) {
            Some(value) => ComponentKey::Natural(value),
            None => ComponentKey::Natural(Natural::from(MALFORMED_NUMBER_KEY)),
        };
    }

    // U+0000 gives -inf, which still orders below every other key
    let ordinal = text.chars().next().map_or(0, u32::from);
    ComponentKey::Negative(-1.0 / f64::from(ordinal))
}
