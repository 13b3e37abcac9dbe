//! Indentation detection for text documents.
//!
//! Finds the indentation *unit* of a document by looking at how the leading
//! whitespace changes from one indented line to the next and picking the
//! most common step.

use regex::Regex;
use std::sync::OnceLock;

/// Used when a document carries no usable indentation.
pub const DEFAULT_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentKind {
    Space,
    Tab,
}

/// A detected indentation unit, e.g. two spaces or one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indent {
    pub kind: IndentKind,
    pub amount: usize,
    unit: String,
}

impl Indent {
    pub fn new(kind: IndentKind, amount: usize) -> Self {
        let ch = match kind {
            IndentKind::Space => ' ',
            IndentKind::Tab => '\t',
        };
        Indent {
            kind,
            amount,
            unit: std::iter::repeat(ch).take(amount).collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.unit
    }
}

fn indent_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:( )+|\t+)").expect("indent pattern is valid"))
}

#[derive(Debug)]
struct Tally {
    key: (IndentKind, usize),
    used: usize,
    weight: usize,
}

fn tally_indents(text: &str, ignore_single_spaces: bool) -> Vec<Tally> {
    let mut tallies: Vec<Tally> = Vec::new();
    let mut previous_size = 0usize;
    let mut previous_kind: Option<IndentKind> = None;
    let mut key: Option<(IndentKind, usize)> = None;

    for line in text.split('\n') {
        if line.is_empty() {
            continue;
        }

        let Some(captures) = indent_regex().captures(line) else {
            previous_size = 0;
            previous_kind = None;
            continue;
        };

        let size = captures.get(0).map_or(0, |m| m.len());
        let kind = if captures.get(1).is_some() {
            IndentKind::Space
        } else {
            IndentKind::Tab
        };

        if ignore_single_spaces && kind == IndentKind::Space && size == 1 {
            continue;
        }

        if previous_kind != Some(kind) {
            previous_size = 0;
        }
        previous_kind = Some(kind);

        let difference = size.abs_diff(previous_size);
        previous_size = size;

        // Same width as the previous line: strengthen the current step
        // instead of recording a new one.
        let (used, weight) = if difference == 0 {
            (0, 1)
        } else {
            key = Some((kind, difference));
            (1, 0)
        };

        let Some(current) = key else { continue };
        match tallies.iter_mut().find(|t| t.key == current) {
            Some(tally) => {
                tally.used += used;
                tally.weight += weight;
            }
            None => tallies.push(Tally {
                key: current,
                used: 1,
                weight: 0,
            }),
        }
    }

    tallies
}

fn most_used(tallies: &[Tally]) -> Option<(IndentKind, usize)> {
    let mut best: Option<&Tally> = None;
    for tally in tallies {
        let better = match best {
            None => true,
            Some(b) => tally.used > b.used || (tally.used == b.used && tally.weight > b.weight),
        };
        if better {
            best = Some(tally);
        }
    }
    best.map(|t| t.key)
}

/// Detects the indentation unit of `text`.
///
/// Returns `None` when no line is indented.
///
/// # Example
/// ```
/// use auto_commit_and_version::indent::detect_indent;
///
/// let json = "{\n    \"a\": {\n        \"b\": 1\n    }\n}";
/// assert_eq!(detect_indent(json).unwrap().as_str(), "    ");
/// assert!(detect_indent("{\"a\":1}").is_none());
/// ```
pub fn detect_indent(text: &str) -> Option<Indent> {
    let mut tallies = tally_indents(text, true);
    if tallies.is_empty() {
        tallies = tally_indents(text, false);
    }

    most_used(&tallies).map(|(kind, amount)| Indent::new(kind, amount))
}
