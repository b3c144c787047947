//! Error extractor for Maven/javac compiler output.
//!
//! Recognises `[ERROR] <path>.java:[<line>,<col>] <message>` diagnostics and
//! coalesces their detail lines (`symbol:`, `location:`, inference bounds)
//! into one message. Colour codes are stripped first, with or without the
//! escape byte (logs pasted from a terminal lose it).
//!
//! Every `[ERROR]` tag on a line is honoured, wherever it sits: CI timestamps
//! and `mvn -T` thread names before the tag are ignored, and two diagnostics
//! printed on one line become two records.
//!
//! Parsing is best-effort: error-tagged text that cannot be attributed to a
//! diagnostic is returned as [`ParseMismatch`] entries, never as errors.

use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

use crate::record::ErrorRecord;

/// `[ERROR]` tag, anywhere on a line
static ERROR_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[ERROR\][ \t]?").unwrap());

/// Any other Maven level tag; ends the open diagnostic
static OTHER_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(?:INFO|WARNING|WARN|DEBUG)\]").unwrap());

/// Diagnostic start after the tag: `<path>.java:[line,col] message`
static DIAGNOSTIC_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<path>\S.*?\.java):\[(?P<line>\d+),(?P<col>\d+)\][ \t]*(?P<msg>.*)$").unwrap()
});

/// Colour codes: full ANSI sequences, plus SGR fragments whose escape byte
/// was lost (`[1;31m`, `[m`). `[main]`-style thread tags are left alone.
static COLOUR_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]|\[[0-9;]+m|\[m\b").unwrap()
});

/// Maven's pointer to its help pages, printed after the last diagnostic
const HELP_POINTER: &str = "-> [Help";

/// Why a line was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchReason {
    /// Error-tagged text with no diagnostic open to continue
    Unattributed,
    /// Diagnostic start whose line or column is 0 or out of range
    InvalidLocation,
}

/// An error-tagged line that did not fit the diagnostic format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseMismatch {
    /// 1-based line number in the input text
    pub line_number: usize,
    pub text: String,
    pub reason: MismatchReason,
}

/// Result of one pass over a compiler log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Diagnostics in input order
    pub records: Vec<ErrorRecord>,
    /// Lines that were skipped
    pub skipped: Vec<ParseMismatch>,
}

impl Extraction {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

enum LineKind<'a> {
    Start {
        path: &'a str,
        line: &'a str,
        column: &'a str,
        message: &'a str,
    },
    /// Error-tagged detail text
    Tagged(&'a str),
    /// Blank `[ERROR]`, help pointer, other level tag or empty line
    Boundary,
    /// Raw javac output without a level tag
    Untagged(&'a str),
}

/// Remove colour codes from one line.
fn strip_colour(line: &str) -> Cow<'_, str> {
    COLOUR_CODE.replace_all(line, "")
}

/// Text following each `[ERROR]` tag, up to the next tag or end of line.
/// Anything before the first tag is dropped.
fn tagged_segments(line: &str) -> Vec<&str> {
    let tags: Vec<_> = ERROR_MARKER.find_iter(line).collect();
    tags.iter()
        .enumerate()
        .map(|(i, tag)| {
            let end = tags.get(i + 1).map_or(line.len(), |next| next.start());
            &line[tag.end()..end]
        })
        .collect()
}

fn classify_tagged(rest: &str) -> LineKind<'_> {
    if let Some(start) = DIAGNOSTIC_START.captures(rest) {
        return LineKind::Start {
            path: start.name("path").map_or("", |m| m.as_str()),
            line: start.name("line").map_or("", |m| m.as_str()),
            column: start.name("col").map_or("", |m| m.as_str()),
            message: start.name("msg").map_or("", |m| m.as_str()),
        };
    }
    let rest = rest.trim();
    if rest.is_empty() || rest.starts_with(HELP_POINTER) {
        LineKind::Boundary
    } else {
        LineKind::Tagged(rest)
    }
}

fn classify_untagged(line: &str) -> LineKind<'_> {
    if OTHER_LEVEL.is_match(line) || line.trim().is_empty() {
        LineKind::Boundary
    } else {
        LineKind::Untagged(line.trim())
    }
}

/// A diagnostic still collecting detail lines
struct Pending {
    path: String,
    line: u32,
    column: u32,
    parts: Vec<String>,
}

impl Pending {
    fn finish(self) -> Option<ErrorRecord> {
        let message = self
            .parts
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        ErrorRecord::new(self.path.trim(), self.line, self.column, &message)
    }
}

/// Extract every diagnostic from `text`, in order of appearance.
pub fn extract(text: &str) -> Extraction {
    let mut out = Extraction::default();
    let mut open: Option<Pending> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_number = idx + 1;
        let cleaned = strip_colour(raw);
        let segments = tagged_segments(&cleaned);

        if segments.is_empty() {
            apply(classify_untagged(&cleaned), line_number, &cleaned, &mut open, &mut out);
            continue;
        }
        for rest in segments {
            apply(classify_tagged(rest), line_number, &cleaned, &mut open, &mut out);
        }
    }
    close(&mut open, &mut out);

    debug!(
        records = out.records.len(),
        skipped = out.skipped.len(),
        "extracted diagnostics"
    );
    out
}

fn apply(
    kind: LineKind<'_>,
    line_number: usize,
    line: &str,
    open: &mut Option<Pending>,
    out: &mut Extraction,
) {
    match kind {
        LineKind::Start {
            path,
            line: line_no,
            column,
            message,
        } => {
            close(open, out);
            match (parse_position(line_no), parse_position(column)) {
                (Some(line_no), Some(column)) => {
                    *open = Some(Pending {
                        path: path.to_string(),
                        line: line_no,
                        column,
                        parts: vec![message.to_string()],
                    });
                }
                _ => skip(out, line_number, line, MismatchReason::InvalidLocation),
            }
        }
        LineKind::Tagged(detail) => match open.as_mut() {
            Some(pending) => pending.parts.push(detail.to_string()),
            None => skip(out, line_number, line, MismatchReason::Unattributed),
        },
        LineKind::Untagged(detail) => {
            if let Some(pending) = open.as_mut() {
                pending.parts.push(detail.to_string());
            }
        }
        LineKind::Boundary => close(open, out),
    }
}

fn close(open: &mut Option<Pending>, out: &mut Extraction) {
    if let Some(record) = open.take().and_then(Pending::finish) {
        out.records.push(record);
    }
}

fn skip(out: &mut Extraction, line_number: usize, line: &str, reason: MismatchReason) {
    debug!(line_number, ?reason, "skipping unrecognised error line");
    out.skipped.push(ParseMismatch {
        line_number,
        text: line.to_string(),
        reason,
    });
}

fn parse_position(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|n| *n >= 1)
}
