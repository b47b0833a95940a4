//! Text rendering for command output

use pagemap::mapping::{Anchor, AnchorMapping, LogicalPage, PageMapping, PhysicalPage};
use pagemap_config::ReportConfig;
use std::fmt::Write;

pub const HEAVY_RULE_WIDTH: usize = 80;

pub fn heavy_rule() -> String {
    "=".repeat(HEAVY_RULE_WIDTH)
}

pub fn light_rule() -> String {
    "-".repeat(HEAVY_RULE_WIDTH)
}

/// Title framed by heavy rules, followed by a blank line.
pub fn banner(title: &str) -> String {
    format!("{rule}\n{title}\n{rule}\n\n", rule = heavy_rule())
}

/// Up to `count` entries spread evenly from the start of the mapping.
pub fn sample_entries(mapping: &PageMapping, count: usize) -> Vec<(LogicalPage, PhysicalPage)> {
    let entries: Vec<_> = mapping.iter().collect();
    let count = count.min(entries.len());
    if count == 0 {
        return Vec::new();
    }
    let step = (entries.len() / count).max(1);
    entries.into_iter().step_by(step).take(count).collect()
}

/// Short summary printed after a mapping is written out.
pub fn creation_summary(mapping: &PageMapping, sample_page: LogicalPage) -> String {
    let mut out = format!("  Created mapping for {} logical pages\n", mapping.len());
    if let Some(physical) = mapping.get(sample_page) {
        let _ = writeln!(out, "  Sample: Logical {} -> Physical {}", sample_page, physical);
    }
    out
}

fn link_line(anchor: &Anchor) -> String {
    format!(
        "  Link '{}' -> Physical page {}",
        anchor.label, anchor.destination
    )
}

/// Full report of an extraction: the anchors found, then the mapping built from them.
pub fn extraction_report(result: &AnchorMapping, settings: &ReportConfig) -> String {
    let mut out = banner("HYPERLINK EXTRACTION REPORT");
    let _ = writeln!(out, "Total hyperlinks found: {}", result.anchors.len());
    out.push('\n');

    let _ = writeln!(out, "Sample links (first {}):", settings.sample_links);
    for anchor in result.anchors.iter().take(settings.sample_links) {
        out.push_str(&link_line(anchor));
        out.push('\n');
    }
    if result.anchors.len() > settings.sample_links {
        let _ = writeln!(
            out,
            "  ... and {} more",
            result.anchors.len() - settings.sample_links
        );
    }

    out.push('\n');
    let _ = writeln!(out, "{}", light_rule());
    out.push_str("BUILDING PAGE MAPPING\n");
    let _ = writeln!(out, "{}", light_rule());
    out.push('\n');
    let _ = writeln!(out, "Built mapping for {} logical pages", result.mapping.len());
    if !result.open_ranges.is_empty() || result.synthesized() > 0 {
        let _ = writeln!(
            out,
            "  ({} from anchors, {} interpolated, {} open ranges)",
            result.sparse.len(),
            result.synthesized(),
            result.open_ranges.len()
        );
    }
    out.push('\n');

    let samples = sample_entries(&result.mapping, settings.sample_mappings);
    if !samples.is_empty() {
        out.push_str("Sample mappings:\n");
        for (logical, physical) in samples {
            let _ = writeln!(out, "  Logical {} -> Physical {}", logical, physical);
        }
    }

    out.push('\n');
    out.push_str(&heavy_rule());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagemap::mapping::{map_anchors, InsertPolicy};

    fn settings(sample_links: usize, sample_mappings: usize) -> ReportConfig {
        ReportConfig {
            sample_links,
            sample_mappings,
        }
    }

    fn linear(len: u32) -> PageMapping {
        (1..=len).map(|logical| (logical, logical + 10)).collect()
    }

    #[test]
    fn test_samples_are_evenly_spaced() {
        let logicals: Vec<_> = sample_entries(&linear(100), 10)
            .into_iter()
            .map(|(logical, _)| logical)
            .collect();
        assert_eq!(logicals, vec![1, 11, 21, 31, 41, 51, 61, 71, 81, 91]);
    }

    #[test]
    fn test_samples_of_short_mapping() {
        assert_eq!(sample_entries(&linear(3), 10), vec![(1, 11), (2, 12), (3, 13)]);
        assert!(sample_entries(&PageMapping::new(), 10).is_empty());
        assert!(sample_entries(&linear(3), 0).is_empty());
    }

    #[test]
    fn test_creation_summary() {
        assert_eq!(
            creation_summary(&linear(5), 1),
            "  Created mapping for 5 logical pages\n  Sample: Logical 1 -> Physical 11\n"
        );
        assert_eq!(
            creation_summary(&linear(5), 219),
            "  Created mapping for 5 logical pages\n"
        );
    }

    #[test]
    fn test_report_lists_links_and_samples() {
        let anchors = vec![
            Anchor::new("1", 143),
            Anchor::new("2", 144),
            Anchor::new("5", 147),
        ];
        let result = map_anchors(anchors, InsertPolicy::KeepLast);
        let report = extraction_report(&result, &settings(2, 10));

        assert!(report.starts_with(&banner("HYPERLINK EXTRACTION REPORT")));
        assert!(report.contains("Total hyperlinks found: 3\n"));
        assert!(report.contains("  Link '1' -> Physical page 143\n"));
        assert!(report.contains("  Link '2' -> Physical page 144\n"));
        assert!(!report.contains("Link '5'"));
        assert!(report.contains("  ... and 1 more\n"));
        assert!(report.contains("Built mapping for 5 logical pages\n"));
        assert!(report.contains("  (3 from anchors, 2 interpolated, 0 open ranges)\n"));
        assert!(report.contains("  Logical 4 -> Physical 146\n"));
        assert!(report.ends_with(&format!("{}\n", heavy_rule())));
    }

    #[test]
    fn test_report_without_anchors() {
        let result = map_anchors(Vec::new(), InsertPolicy::KeepLast);
        let report = extraction_report(&result, &settings(20, 10));

        assert!(report.contains("Total hyperlinks found: 0\n"));
        assert!(report.contains("Built mapping for 0 logical pages\n"));
        assert!(!report.contains("Sample mappings:"));
        assert!(!report.contains("more"));
    }
}
