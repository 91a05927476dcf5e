//! Splits raw version strings into fragments
//!
//! A single regex pass splits on `.` and `-` (discarded) and on letter runs
//! (kept). The named pre-release qualifiers are tried before the generic
//! letter run, so `rc1` yields `rc` followed by `1`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Pre-release qualifiers, ordered from most to least mature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    Rc,
    Pre,
    Beta,
    Alpha,
}

impl Qualifier {
    /// Lookup table in maturity order; the index defines the sort rank
    pub const ALL: [Qualifier; 4] = [
        Qualifier::Rc,
        Qualifier::Pre,
        Qualifier::Beta,
        Qualifier::Alpha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Qualifier::Rc => "rc",
            Qualifier::Pre => "pre",
            Qualifier::Beta => "beta",
            Qualifier::Alpha => "alpha",
        }
    }

    /// Position in [`Qualifier::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Qualifier::Rc => 0,
            Qualifier::Pre => 1,
            Qualifier::Beta => 2,
            Qualifier::Alpha => 3,
        }
    }
}

impl FromStr for Qualifier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Qualifier::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of a tokenized version string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// One of the named pre-release qualifiers
    Qualifier(Qualifier),
    /// Any other run of ASCII letters
    Word(&'a str),
    /// Text between delimiters that is not a letter run (usually digits)
    Segment(&'a str),
}

impl Fragment<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Fragment::Qualifier(q) => q.as_str(),
            Fragment::Word(s) | Fragment::Segment(s) => s,
        }
    }
}

/// Combined split pattern. Group 1 captures kept letter runs; the dot and
/// dash alternatives have no group and are dropped.
static SPLITTER: LazyLock<Regex> = LazyLock::new(|| {
    let qualifiers: Vec<&str> = Qualifier::ALL.iter().map(Qualifier::as_str).collect();
    let pattern = format!(r"\.|-|({}|[a-zA-Z]+)", qualifiers.join("|"));
    Regex::new(&pattern).expect("version split pattern is valid")
});

/// Split a version string into fragments, discarding empty pieces
///
/// Examples:
/// - "1.2.3" -> [Segment("1"), Segment("2"), Segment("3")]
/// - "2.0.0-rc1" -> [.., Qualifier(Rc), Segment("1")]
/// - "v3-beta" -> [Word("v"), Segment("3"), Qualifier(Beta)]
pub fn tokenize(version: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();
    let mut last_end = 0;

    for captures in SPLITTER.captures_iter(version) {
        let Some(whole) = captures.get(0) else {
            continue;
        };

        push_segment(&mut fragments, &version[last_end..whole.start()]);

        if let Some(word) = captures.get(1) {
            let text = word.as_str();
            match text.parse::<Qualifier>() {
                Ok(qualifier) => fragments.push(Fragment::Qualifier(qualifier)),
                Err(()) => fragments.push(Fragment::Word(text)),
            }
        }

        last_end = whole.end();
    }

    push_segment(&mut fragments, &version[last_end..]);
    fragments
}

fn push_segment<'a>(fragments: &mut Vec<Fragment<'a>>, text: &'a str) {
    if !text.is_empty() {
        fragments.push(Fragment::Segment(text));
    }
}
