//! Anchor extraction
//!
//! [`AnchorScanner`] walks pages in order and yields anchors in page-then-link
//! order. It is lazy: pages are only read as anchors are pulled, so a consumer that
//! stops early (the offset detector) never touches the rest of the document.
//!
//! How far the scan goes is a [`ScanBound`]:
//!
//! - `Full` reads every page, tolerating tables of contents with blank interior pages
//! - `UntilGap` stops at the first page without anchors once at least one anchor
//!   has been seen; link-free front matter never stops the scan
//! - `FirstPages(n)` reads at most the first `n` pages

use crate::mapping::anchor::Anchor;
use crate::mapping::document::{DocumentError, PageDocument};
use std::collections::VecDeque;

/// How many pages an anchor scan may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanBound {
    #[default]
    Full,
    UntilGap,
    FirstPages(usize),
}

/// Lazy iterator over the anchors of a document.
pub struct AnchorScanner<'d, D: PageDocument + ?Sized> {
    document: &'d D,
    bound: ScanBound,
    next_page: usize,
    end_page: usize,
    pending: VecDeque<Anchor>,
    seen_anchor: bool,
    stopped: bool,
}

impl<'d, D: PageDocument + ?Sized> AnchorScanner<'d, D> {
    pub fn new(document: &'d D, bound: ScanBound) -> Self {
        let page_count = document.page_count();
        let end_page = match bound {
            ScanBound::FirstPages(limit) => limit.min(page_count),
            ScanBound::Full | ScanBound::UntilGap => page_count,
        };
        Self {
            document,
            bound,
            next_page: 0,
            end_page,
            pending: VecDeque::new(),
            seen_anchor: false,
            stopped: false,
        }
    }

    /// Number of pages read so far.
    pub fn pages_scanned(&self) -> usize {
        self.next_page
    }

    fn scan_page(&self, page_index: usize) -> Result<Vec<Anchor>, DocumentError> {
        let mut anchors = Vec::new();
        for link in self.document.links(page_index)? {
            if !link.kind.is_anchor() {
                continue;
            }
            let Some(destination) = link.destination() else {
                continue;
            };
            let text = self.document.text(page_index, &link.region)?;
            anchors.push(Anchor::new(text.trim(), destination).found_on(page_index + 1));
        }
        Ok(anchors)
    }
}

impl<D: PageDocument + ?Sized> Iterator for AnchorScanner<'_, D> {
    type Item = Anchor;

    fn next(&mut self) -> Option<Anchor> {
        loop {
            if let Some(anchor) = self.pending.pop_front() {
                return Some(anchor);
            }
            if self.stopped || self.next_page >= self.end_page {
                return None;
            }

            let page_index = self.next_page;
            self.next_page += 1;

            let anchors = match self.scan_page(page_index) {
                Ok(anchors) => anchors,
                Err(err) => {
                    // An unreadable page is skipped, never treated as a gap
                    log::warn!("skipping page {}: {}", page_index + 1, err);
                    continue;
                }
            };

            if anchors.is_empty() {
                if self.bound == ScanBound::UntilGap && self.seen_anchor {
                    log::debug!("page {} has no anchors, stopping scan", page_index + 1);
                    self.stopped = true;
                }
                continue;
            }

            log::debug!("page {}: found {} anchors", page_index + 1, anchors.len());
            self.seen_anchor = true;
            self.pending.extend(anchors);
        }
    }
}

/// Collects every anchor within `bound`.
pub fn extract_anchors<D: PageDocument + ?Sized>(document: &D, bound: ScanBound) -> Vec<Anchor> {
    AnchorScanner::new(document, bound).collect()
}
