//! Logical-to-physical page mapping construction
//!
//! Components, leaf first:
//!
//! 1. `extraction` walks pages and yields [`Anchor`]s
//! 2. `label` turns a label into a [`ParsedIntent`]
//! 3. `builder` accumulates intents into a sparse [`PageMapping`] and resolves explicit ranges
//! 4. `interpolation` closes gaps that are provably linear
//!
//! `offset` is the alternate constant-offset strategy, `pipeline` wires the anchor
//! strategy together and `persist` reads and writes mappings as JSON.

pub mod anchor;
pub mod builder;
pub mod diagnostics;
pub mod document;
pub mod extraction;
pub mod interpolation;
pub mod label;
pub mod offset;
pub mod persist;
pub mod pipeline;

pub use anchor::{Anchor, LinkKind, LogicalPage, PageRef, PhysicalPage, RawLink, Region};
pub use builder::{
    BuilderOutput, CompleteMapping, InsertPolicy, MappingBuilder, OpenRange, PageMapping,
    SparseMapping,
};
pub use diagnostics::MappingWarning;
pub use document::{open_document, DocumentError, DumpPage, LinkDump, PageDocument, Word};
pub use extraction::{extract_anchors, AnchorScanner, ScanBound};
pub use interpolation::interpolate;
pub use label::{parse_label, ParsedIntent};
pub use offset::{
    build_offset_mapping, detect_offset, find_first_page_anchor, linear_mapping, OffsetMapping,
    OffsetOptions,
};
pub use persist::{
    load_mapping, mapping_from_json, mapping_to_json, save_mapping, MappingStore, PersistError,
};
pub use pipeline::{build_anchor_mapping, map_anchors, AnchorMapping, AnchorOptions};
