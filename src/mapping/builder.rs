//! Mapping builder
//!
//! Accumulates parsed labels into a sparse logical→physical mapping. Construction
//! runs in two passes:
//!
//! 1. Accumulation: every anchor is parsed and its start page recorded; explicit
//!    ranges are queued on a separate pending list
//! 2. Resolution: each pending range looks up its closing page in the now complete
//!    mapping and is interpolated only if its logical and physical spans agree
//!
//! The closing anchor of a range may appear anywhere in scan order, which is why
//! resolution waits for accumulation to finish.

use crate::mapping::anchor::{Anchor, LogicalPage, PhysicalPage};
use crate::mapping::diagnostics::MappingWarning;
use crate::mapping::label::{parse_label, ParsedIntent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logical → physical page mapping, ordered by logical page.
///
/// Serializes as a JSON object keyed by decimal logical page numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageMapping {
    entries: BTreeMap<LogicalPage, PhysicalPage>,
}

/// Entries observed directly from anchors and resolved ranges.
pub type SparseMapping = PageMapping;

/// A sparse mapping closed over its linear gaps.
pub type CompleteMapping = PageMapping;

impl PageMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, logical: LogicalPage) -> Option<PhysicalPage> {
        self.entries.get(&logical).copied()
    }

    pub fn contains(&self, logical: LogicalPage) -> bool {
        self.entries.contains_key(&logical)
    }

    /// Inserts unconditionally, returning the previous value.
    pub fn insert(&mut self, logical: LogicalPage, physical: PhysicalPage) -> Option<PhysicalPage> {
        self.entries.insert(logical, physical)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending logical order.
    pub fn iter(&self) -> impl Iterator<Item = (LogicalPage, PhysicalPage)> + '_ {
        self.entries.iter().map(|(&l, &p)| (l, p))
    }

    pub fn logical_pages(&self) -> impl Iterator<Item = LogicalPage> + '_ {
        self.entries.keys().copied()
    }

    pub fn first(&self) -> Option<(LogicalPage, PhysicalPage)> {
        self.entries.first_key_value().map(|(&l, &p)| (l, p))
    }

    pub fn last(&self) -> Option<(LogicalPage, PhysicalPage)> {
        self.entries.last_key_value().map(|(&l, &p)| (l, p))
    }

    pub fn into_inner(self) -> BTreeMap<LogicalPage, PhysicalPage> {
        self.entries
    }
}

impl FromIterator<(LogicalPage, PhysicalPage)> for PageMapping {
    fn from_iter<I: IntoIterator<Item = (LogicalPage, PhysicalPage)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<LogicalPage, PhysicalPage>> for PageMapping {
    fn from(entries: BTreeMap<LogicalPage, PhysicalPage>) -> Self {
        Self { entries }
    }
}

/// What to do when a logical page is written twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertPolicy {
    /// The first anchor for a logical page wins.
    KeepFirst,
    /// The last anchor for a logical page wins, silently.
    #[default]
    KeepLast,
    /// The first anchor wins and disagreeing later anchors are reported.
    ReportConflict,
}

/// An open range (`229-`) whose close is expected from another anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenRange {
    pub start: LogicalPage,
    pub physical: PhysicalPage,
}

#[derive(Debug, Clone, Copy)]
struct PendingRange {
    start: LogicalPage,
    end: LogicalPage,
    start_physical: PhysicalPage,
}

/// Result of a construction pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuilderOutput {
    pub mapping: SparseMapping,
    pub open_ranges: Vec<OpenRange>,
    pub warnings: Vec<MappingWarning>,
}

/// Builds a sparse mapping from anchors. Owns the in-progress mapping exclusively.
#[derive(Debug, Default)]
pub struct MappingBuilder {
    policy: InsertPolicy,
    mapping: SparseMapping,
    pending_ranges: Vec<PendingRange>,
    open_ranges: Vec<OpenRange>,
    warnings: Vec<MappingWarning>,
}

impl MappingBuilder {
    pub fn new(policy: InsertPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Parses the anchor's label and accumulates it.
    pub fn push(&mut self, anchor: &Anchor) {
        let intent = parse_label(&anchor.label);
        self.push_intent(&anchor.label, intent, anchor.destination);
    }

    pub fn push_intent(&mut self, label: &str, intent: ParsedIntent, destination: PhysicalPage) {
        match intent {
            ParsedIntent::SinglePage(logical) => self.insert(logical, destination),
            ParsedIntent::RangeStart(start) => {
                self.insert(start, destination);
                self.open_ranges.push(OpenRange {
                    start,
                    physical: destination,
                });
            }
            ParsedIntent::ExplicitRange { start, end } => {
                self.insert(start, destination);
                self.pending_ranges.push(PendingRange {
                    start,
                    end,
                    start_physical: destination,
                });
            }
            ParsedIntent::CommaList(logicals) => {
                if let [logical] = logicals[..] {
                    self.insert(logical, destination);
                } else {
                    self.warn(MappingWarning::AmbiguousLabel {
                        label: label.to_string(),
                        destination,
                        logicals,
                    });
                }
            }
            ParsedIntent::Unparseable => {}
        }
    }

    /// Runs the resolution pass and returns the sparse mapping.
    pub fn finish(mut self) -> BuilderOutput {
        let pending = std::mem::take(&mut self.pending_ranges);
        for range in pending {
            self.resolve_range(range);
        }
        BuilderOutput {
            mapping: self.mapping,
            open_ranges: self.open_ranges,
            warnings: self.warnings,
        }
    }

    fn resolve_range(&mut self, range: PendingRange) {
        if range.end < range.start {
            self.warn(MappingWarning::ReversedRange {
                start: range.start,
                end: range.end,
                destination: range.start_physical,
            });
            return;
        }
        let Some(end_physical) = self.mapping.get(range.end) else {
            log::debug!(
                "range {}-{} has no closing anchor, left to interpolation",
                range.start,
                range.end
            );
            return;
        };

        let logical_span = i64::from(range.end - range.start) + 1;
        let physical_span = i64::from(end_physical) - i64::from(range.start_physical) + 1;
        if logical_span != physical_span {
            self.warn(MappingWarning::RangeSizeMismatch {
                start: range.start,
                end: range.end,
                start_physical: range.start_physical,
                end_physical,
            });
            return;
        }

        for step in 0..=(range.end - range.start) {
            self.insert(range.start + step, range.start_physical + step);
        }
        log::debug!(
            "interpolated range {}-{} -> {}-{}",
            range.start,
            range.end,
            range.start_physical,
            end_physical
        );
    }

    fn insert(&mut self, logical: LogicalPage, physical: PhysicalPage) {
        let Some(existing) = self.mapping.get(logical) else {
            self.mapping.insert(logical, physical);
            return;
        };
        if existing == physical {
            return;
        }
        match self.policy {
            InsertPolicy::KeepLast => {
                log::debug!(
                    "logical page {} remapped from {} to {}",
                    logical,
                    existing,
                    physical
                );
                self.mapping.insert(logical, physical);
            }
            InsertPolicy::KeepFirst => {}
            InsertPolicy::ReportConflict => self.warn(MappingWarning::DuplicateLogical {
                logical,
                kept: existing,
                rejected: physical,
            }),
        }
    }

    fn warn(&mut self, warning: MappingWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}
