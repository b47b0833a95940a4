//! Label parsing
//!
//! Table-of-contents typography is inconsistent: open ranges end in a dash, single
//! pages pick up trailing commas, and footnote references list several pages in one
//! link. [`parse_label`] maps a label onto one [`ParsedIntent`], trying these rules
//! in order (first match wins):
//!
//! 1. `229-235` (digits, dash, digits; spaces allowed around the dash) → `ExplicitRange`
//! 2. `229` (digits only) → `SinglePage`
//! 3. `229-` (digits, trailing dash) → `RangeStart`
//! 4. `304,` (digits, trailing comma) → `SinglePage`
//! 5. `1, 2, 3` (comma separated, every piece digits, trailing commas ignored) → `CommaList`
//! 6. `12a`, `7 (note)` (leading digits) → `SinglePage`
//!
//! Anything else is `Unparseable`. Only ASCII digits count as digits, and numbers
//! too large for a page number are treated as unparseable.

use crate::mapping::anchor::LogicalPage;
use once_cell::sync::Lazy;
use regex::Regex;

static EXPLICIT_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\s*-\s*([0-9]+)$").unwrap());

static LEADING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)").unwrap());

/// What a table-of-contents label says about logical pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedIntent {
    SinglePage(LogicalPage),
    /// Opening page of a span whose close comes from another anchor.
    RangeStart(LogicalPage),
    /// Both ends named in one label.
    ExplicitRange {
        start: LogicalPage,
        end: LogicalPage,
    },
    /// Several logical pages sharing one destination.
    CommaList(Vec<LogicalPage>),
    Unparseable,
}

impl ParsedIntent {
    /// A comma list naming more than one page cannot be resolved to a single entry.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ParsedIntent::CommaList(pages) if pages.len() > 1)
    }
}

/// Parses a page number made only of ASCII digits.
fn digits(text: &str) -> Option<LogicalPage> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn explicit_range(label: &str) -> Option<ParsedIntent> {
    let captures = EXPLICIT_RANGE.captures(label)?;
    let start = captures.get(1)?.as_str().parse().ok()?;
    let end = captures.get(2)?.as_str().parse().ok()?;
    Some(ParsedIntent::ExplicitRange { start, end })
}

fn comma_list(label: &str) -> Option<ParsedIntent> {
    let label = label.trim_end_matches(|c: char| c == ',' || c.is_whitespace());
    if !label.contains(',') {
        return None;
    }
    let pages = label
        .split(',')
        .map(|piece| digits(piece.trim()))
        .collect::<Option<Vec<_>>>()?;
    Some(ParsedIntent::CommaList(pages))
}

fn leading_digits(label: &str) -> Option<ParsedIntent> {
    let captures = LEADING_DIGITS.captures(label)?;
    let page = captures.get(1)?.as_str().parse().ok()?;
    Some(ParsedIntent::SinglePage(page))
}

/// Classifies a label. Pure and deterministic.
pub fn parse_label(label: &str) -> ParsedIntent {
    let label = label.trim();

    if let Some(range) = explicit_range(label) {
        return range;
    }
    if let Some(page) = digits(label) {
        return ParsedIntent::SinglePage(page);
    }
    if let Some(page) = label.strip_suffix('-').and_then(|p| digits(p.trim())) {
        return ParsedIntent::RangeStart(page);
    }
    if let Some(page) = label.strip_suffix(',').and_then(|p| digits(p.trim())) {
        return ParsedIntent::SinglePage(page);
    }
    if let Some(list) = comma_list(label) {
        return list;
    }
    leading_digits(label).unwrap_or(ParsedIntent::Unparseable)
}
