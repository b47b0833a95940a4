//! # pagemap
//!
//! Rebuilds the mapping between a document's logical page numbers (the numbers
//! printed on pages and cited by its index) and physical page positions in the
//! file.
//!
//! Two strategies are provided:
//!
//! - Anchor strategy: harvest `(label, destination)` pairs from clickable
//!   table-of-contents entries, parse the labels, build a sparse mapping and close
//!   linear gaps. See [`mapping::pipeline::build_anchor_mapping`].
//! - Offset strategy: find the anchor labelled `1`, derive a constant offset and
//!   extrapolate. See [`mapping::offset::build_offset_mapping`].
//!
//! Documents are consumed through the [`mapping::document::PageDocument`] trait;
//! [`mapping::document::LinkDump`] is the JSON-backed implementation used by the
//! command line and the tests.

pub mod mapping;
