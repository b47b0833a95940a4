//! Anchor strategy, end to end
//!
//! Scan → parse → build → interpolate. Nothing here fails: every absorbed condition
//! comes back as a [`MappingWarning`] next to the best mapping the anchors allow.

use crate::mapping::anchor::Anchor;
use crate::mapping::builder::{
    CompleteMapping, InsertPolicy, MappingBuilder, OpenRange, SparseMapping,
};
use crate::mapping::diagnostics::MappingWarning;
use crate::mapping::document::PageDocument;
use crate::mapping::extraction::{extract_anchors, ScanBound};
use crate::mapping::interpolation::interpolate;

/// Construction configuration for the anchor strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorOptions {
    pub scan: ScanBound,
    pub policy: InsertPolicy,
}

/// Everything the anchor strategy produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorMapping {
    /// Every anchor found, including unlabelled ones.
    pub anchors: Vec<Anchor>,
    pub sparse: SparseMapping,
    pub mapping: CompleteMapping,
    pub open_ranges: Vec<OpenRange>,
    pub warnings: Vec<MappingWarning>,
}

impl AnchorMapping {
    /// Entries added by continuity interpolation.
    pub fn synthesized(&self) -> usize {
        self.mapping.len() - self.sparse.len()
    }
}

/// Builds the complete mapping for an already extracted list of anchors.
pub fn map_anchors(anchors: Vec<Anchor>, policy: InsertPolicy) -> AnchorMapping {
    let mut builder = MappingBuilder::new(policy);
    for anchor in anchors.iter().filter(|anchor| anchor.has_label()) {
        builder.push(anchor);
    }
    let built = builder.finish();
    let mapping = interpolate(&built.mapping);
    log::debug!(
        "{} anchors, {} known logical pages, {} after interpolation",
        anchors.len(),
        built.mapping.len(),
        mapping.len()
    );

    AnchorMapping {
        anchors,
        sparse: built.mapping,
        mapping,
        open_ranges: built.open_ranges,
        warnings: built.warnings,
    }
}

/// Scans `document` and builds its complete mapping.
pub fn build_anchor_mapping<D: PageDocument + ?Sized>(
    document: &D,
    options: &AnchorOptions,
) -> AnchorMapping {
    let anchors = extract_anchors(document, options.scan);
    map_anchors(anchors, options.policy)
}
