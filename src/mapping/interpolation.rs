//! Continuity interpolation
//!
//! Fills the gap between two adjacent known logical pages when the physical
//! distance equals the logical distance. Other gaps stay unmapped: an inserted
//! plate or unnumbered page makes the numbering non-linear there, and guessing
//! would be unsafe.
//!
//! Only directly adjacent known pairs are ever bridged, so the result contains no
//! key that isn't in the input or between two such neighbours. Running the
//! interpolation on its own output changes nothing.

use crate::mapping::anchor::{LogicalPage, PhysicalPage};
use crate::mapping::builder::{CompleteMapping, PageMapping, SparseMapping};

/// Closes every linear gap of `sparse`. Every input entry is kept unchanged.
pub fn interpolate(sparse: &SparseMapping) -> CompleteMapping {
    let known: Vec<(LogicalPage, PhysicalPage)> = sparse.iter().collect();
    let mut complete = PageMapping::new();

    for pair in known.windows(2) {
        let &[(start, start_physical), (end, end_physical)] = pair else {
            continue;
        };
        complete.insert(start, start_physical);

        let logical_gap = end - start;
        let physical_gap = i64::from(end_physical) - i64::from(start_physical);
        if logical_gap <= 1 {
            continue;
        }
        if physical_gap != i64::from(logical_gap) {
            log::debug!(
                "gap {}..{} is not linear ({} logical vs {} physical), left unmapped",
                start,
                end,
                logical_gap,
                physical_gap
            );
            continue;
        }
        for step in 1..logical_gap {
            complete.insert(start + step, start_physical + step);
        }
    }

    if let Some(&(last, last_physical)) = known.last() {
        complete.insert(last, last_physical);
    }
    complete
}
