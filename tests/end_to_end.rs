//! End-to-end behaviour of both mapping strategies

use pagemap::mapping::{
    build_anchor_mapping, build_offset_mapping, map_anchors, Anchor, AnchorOptions, DumpPage,
    InsertPolicy, LinkDump, MappingWarning, OffsetOptions, PageMapping, ScanBound,
};

fn anchors(pairs: &[(&str, u32)]) -> Vec<Anchor> {
    pairs
        .iter()
        .map(|(label, destination)| Anchor::new(*label, *destination))
        .collect()
}

fn mapping(pairs: &[(u32, u32)]) -> PageMapping {
    pairs.iter().copied().collect()
}

#[test]
fn linear_gap_between_anchors_is_filled() {
    let result = map_anchors(
        anchors(&[("1", 143), ("2", 144), ("5", 147)]),
        InsertPolicy::KeepLast,
    );
    assert_eq!(
        result.mapping,
        mapping(&[(1, 143), (2, 144), (3, 145), (4, 146), (5, 147)])
    );
}

#[test]
fn non_linear_gap_between_anchors_is_left_sparse() {
    let result = map_anchors(
        anchors(&[("1", 143), ("2", 144), ("9", 160)]),
        InsertPolicy::KeepLast,
    );
    assert_eq!(result.mapping, mapping(&[(1, 143), (2, 144), (9, 160)]));
}

#[test]
fn open_range_closed_by_later_anchor() {
    let result = map_anchors(anchors(&[("229-", 150), ("235", 156)]), InsertPolicy::KeepLast);
    assert_eq!(result.sparse.get(229), Some(150));
    let expected: Vec<(u32, u32)> = (229..=235).zip(150..=156).collect();
    assert_eq!(result.mapping.iter().collect::<Vec<_>>(), expected);
}

#[test]
fn comma_list_is_surfaced_not_guessed() {
    let result = map_anchors(anchors(&[("1, 2, 3", 10)]), InsertPolicy::KeepLast);
    assert!(result.mapping.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(
        result.warnings[0].to_string(),
        "Multiple pages in one link: 1, 2, 3 -> 10"
    );
}

#[test]
fn explicit_range_mismatch_keeps_only_endpoints() {
    let result = map_anchors(
        anchors(&[("229-235", 150), ("235", 170)]),
        InsertPolicy::KeepLast,
    );
    assert_eq!(result.mapping, mapping(&[(229, 150), (235, 170)]));
    assert!(matches!(
        result.warnings.as_slice(),
        [MappingWarning::RangeSizeMismatch { .. }]
    ));
}

#[test]
fn sparse_entries_survive_interpolation_unchanged() {
    let result = map_anchors(
        anchors(&[("3", 20), ("1", 10), ("8", 25), ("12,", 40), ("x", 1)]),
        InsertPolicy::KeepLast,
    );
    for (logical, physical) in result.sparse.iter() {
        assert_eq!(result.mapping.get(logical), Some(physical));
    }
}

fn contents_document() -> LinkDump {
    LinkDump::from_pages(vec![
        // Cover and front matter carry no links
        DumpPage::new(),
        DumpPage::new(),
        DumpPage::new()
            .goto("1", 142)
            .goto("2", 143)
            .goto("10-12", 152)
            .named("12", "154"),
        DumpPage::new().goto("20-", 161).goto("25", 166),
        DumpPage::new(),
        DumpPage::new().goto("40", 190),
    ])
}

#[test]
fn anchor_strategy_over_a_document() {
    let result = build_anchor_mapping(&contents_document(), &AnchorOptions::default());

    assert_eq!(result.anchors.len(), 7);
    assert_eq!(result.mapping.get(1), Some(143));
    assert_eq!(result.mapping.get(11), Some(154));
    assert_eq!(result.mapping.get(22), Some(164));
    assert_eq!(result.mapping.get(40), Some(191));
    // 2 -> 10 is 8 logical vs 9 physical pages
    assert!(!result.mapping.contains(5));
    assert!(result.warnings.is_empty());
}

#[test]
fn until_gap_scan_stops_at_blank_contents_page() {
    let options = AnchorOptions {
        scan: ScanBound::UntilGap,
        policy: InsertPolicy::KeepLast,
    };
    let result = build_anchor_mapping(&contents_document(), &options);

    assert_eq!(result.anchors.len(), 6);
    assert!(!result.mapping.contains(40));
}

#[test]
fn offset_strategy_over_a_document() {
    let result = build_offset_mapping(&contents_document(), &OffsetOptions::default());

    assert_eq!(result.offset, 142);
    assert_eq!(result.mapping.get(219), Some(361));
    assert_eq!(result.anchor.map(|a| a.source_page), Some(3));
}
