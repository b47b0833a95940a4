//! Warnings collected while building a mapping
//!
//! None of these stop construction. Each is absorbed by the component that detects
//! it and returned next to the mapping so callers can surface it for review.

use crate::mapping::anchor::{LogicalPage, PhysicalPage};
use std::fmt;

/// A recoverable condition found while building a mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingWarning {
    /// One link names several logical pages; a single-page list is mapped, longer lists are not.
    AmbiguousLabel {
        label: String,
        destination: PhysicalPage,
        logicals: Vec<LogicalPage>,
    },
    /// An explicit range spans a different number of physical pages than logical ones.
    RangeSizeMismatch {
        start: LogicalPage,
        end: LogicalPage,
        start_physical: PhysicalPage,
        end_physical: PhysicalPage,
    },
    /// An explicit range whose end precedes its start.
    ReversedRange {
        start: LogicalPage,
        end: LogicalPage,
        destination: PhysicalPage,
    },
    /// A later anchor disagreed with an existing entry and was rejected.
    DuplicateLogical {
        logical: LogicalPage,
        kept: PhysicalPage,
        rejected: PhysicalPage,
    },
    /// No anchor labelled `1` was found; the default offset was used.
    OffsetUndetected { default_offset: u32 },
}

impl fmt::Display for MappingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingWarning::AmbiguousLabel {
                label, destination, ..
            } => write!(
                f,
                "Multiple pages in one link: {} -> {}",
                label, destination
            ),
            MappingWarning::RangeSizeMismatch {
                start,
                end,
                start_physical,
                end_physical,
            } => {
                let logical_size = i64::from(*end) - i64::from(*start) + 1;
                let physical_size = i64::from(*end_physical) - i64::from(*start_physical) + 1;
                write!(
                    f,
                    "Range size mismatch: {}-{} ({} pages) -> {}-{} ({} pages)",
                    start, end, logical_size, start_physical, end_physical, physical_size
                )
            }
            MappingWarning::ReversedRange {
                start,
                end,
                destination,
            } => write!(
                f,
                "Reversed range: {}-{} -> {} (end precedes start)",
                start, end, destination
            ),
            MappingWarning::DuplicateLogical {
                logical,
                kept,
                rejected,
            } => write!(
                f,
                "Conflicting anchors for logical page {}: kept {}, rejected {}",
                logical, kept, rejected
            ),
            MappingWarning::OffsetUndetected { default_offset } => write!(
                f,
                "Could not detect offset from hyperlinks, using default {}",
                default_offset
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_mismatch_message_counts_pages() {
        let warning = MappingWarning::RangeSizeMismatch {
            start: 229,
            end: 235,
            start_physical: 150,
            end_physical: 160,
        };
        assert_eq!(
            warning.to_string(),
            "Range size mismatch: 229-235 (7 pages) -> 150-160 (11 pages)"
        );
    }

    #[test]
    fn test_ambiguous_label_message() {
        let warning = MappingWarning::AmbiguousLabel {
            label: "1, 2, 3".into(),
            destination: 10,
            logicals: vec![1, 2, 3],
        };
        assert_eq!(warning.to_string(), "Multiple pages in one link: 1, 2, 3 -> 10");
    }
}
