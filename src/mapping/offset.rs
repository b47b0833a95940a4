//! Constant-offset strategy
//!
//! For documents known to differ from their printed numbering by a single shift.
//! The first anchor labelled exactly `1` within the scan window gives
//! `offset = destination - 1`, and every logical page up to a ceiling is mapped to
//! `logical + offset`. This cannot see non-linear numbering, but it needs no range
//! markers in the table of contents.

use crate::mapping::anchor::{Anchor, LogicalPage};
use crate::mapping::builder::PageMapping;
use crate::mapping::diagnostics::MappingWarning;
use crate::mapping::document::PageDocument;
use crate::mapping::extraction::{AnchorScanner, ScanBound};

/// Knobs for [`build_offset_mapping`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetOptions {
    /// Pages searched for the `1` anchor.
    pub scan: ScanBound,
    /// Highest logical page generated (inclusive).
    pub max_logical_page: LogicalPage,
    /// Offset used when no `1` anchor is found.
    pub default_offset: u32,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self {
            scan: ScanBound::FirstPages(50),
            max_logical_page: 500,
            default_offset: 142,
        }
    }
}

/// Result of the offset strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetMapping {
    /// `physical = logical + offset`
    pub offset: u32,
    /// The anchor the offset was derived from; `None` when the default was used.
    pub anchor: Option<Anchor>,
    pub mapping: PageMapping,
    pub warnings: Vec<MappingWarning>,
}

impl OffsetMapping {
    pub fn detected(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Finds the first anchor labelled `1`. Stops reading pages as soon as it is found.
pub fn find_first_page_anchor<D: PageDocument + ?Sized>(
    document: &D,
    scan: ScanBound,
) -> Option<Anchor> {
    AnchorScanner::new(document, scan).find(|anchor| anchor.label == "1")
}

/// Offset implied by the first anchor labelled `1`, if any.
pub fn detect_offset<D: PageDocument + ?Sized>(document: &D, scan: ScanBound) -> Option<u32> {
    find_first_page_anchor(document, scan).map(|anchor| anchor.destination - 1)
}

/// Maps `1..=max_logical_page` to `logical + offset`.
pub fn linear_mapping(offset: u32, max_logical_page: LogicalPage) -> PageMapping {
    (1..=max_logical_page)
        .map_while(|logical| logical.checked_add(offset).map(|physical| (logical, physical)))
        .collect()
}

/// Runs the offset strategy, falling back to the default offset with a warning.
pub fn build_offset_mapping<D: PageDocument + ?Sized>(
    document: &D,
    options: &OffsetOptions,
) -> OffsetMapping {
    let anchor = find_first_page_anchor(document, options.scan);
    let mut warnings = Vec::new();

    let offset = match &anchor {
        Some(anchor) => {
            log::debug!(
                "logical page 1 is physical page {} (link on page {})",
                anchor.destination,
                anchor.source_page
            );
            anchor.destination - 1
        }
        None => {
            let warning = MappingWarning::OffsetUndetected {
                default_offset: options.default_offset,
            };
            log::warn!("{}", warning);
            warnings.push(warning);
            options.default_offset
        }
    };

    OffsetMapping {
        offset,
        anchor,
        mapping: linear_mapping(offset, options.max_logical_page),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::document::{DumpPage, LinkDump};

    #[test]
    fn test_offset_from_first_page_anchor() {
        // Raw page 142 is physical page 143
        let dump = LinkDump::from_pages(vec![
            DumpPage::new(),
            DumpPage::new().goto("Introduction", 140).goto("1", 142).goto("2", 143),
        ]);
        let result = build_offset_mapping(&dump, &OffsetOptions::default());

        assert_eq!(result.offset, 142);
        assert!(result.detected());
        assert_eq!(result.mapping.get(1), Some(143));
        assert_eq!(result.mapping.get(219), Some(361));
        assert_eq!(result.mapping.len(), 500);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_label_must_be_exactly_one() {
        let dump = LinkDump::from_pages(vec![DumpPage::new().goto("10", 151).goto("1,", 142)]);
        assert_eq!(detect_offset(&dump, ScanBound::Full), None);
    }

    #[test]
    fn test_fallback_to_default_offset() {
        let dump = LinkDump::from_pages(vec![DumpPage::new().goto("5", 20)]);
        let options = OffsetOptions {
            default_offset: 7,
            max_logical_page: 3,
            ..OffsetOptions::default()
        };
        let result = build_offset_mapping(&dump, &options);

        assert_eq!(result.offset, 7);
        assert!(!result.detected());
        assert_eq!(
            result.mapping.iter().collect::<Vec<_>>(),
            vec![(1, 8), (2, 9), (3, 10)]
        );
        assert_eq!(
            result.warnings,
            vec![MappingWarning::OffsetUndetected { default_offset: 7 }]
        );
    }

    #[test]
    fn test_anchor_outside_window_is_not_found() {
        let mut pages = vec![DumpPage::new(); 3];
        pages.push(DumpPage::new().goto("1", 10));
        let dump = LinkDump::from_pages(pages);

        assert_eq!(detect_offset(&dump, ScanBound::FirstPages(3)), None);
        assert_eq!(detect_offset(&dump, ScanBound::FirstPages(4)), Some(10));
    }

    #[test]
    fn test_named_destination_with_text_page() {
        let dump = LinkDump::from_pages(vec![DumpPage::new().named("1", "17")]);
        assert_eq!(detect_offset(&dump, ScanBound::Full), Some(17));
    }

    #[test]
    fn test_linear_mapping_stops_at_u32_max() {
        let mapping = linear_mapping(u32::MAX - 2, 5);
        assert_eq!(mapping.len(), 2);
    }
}
