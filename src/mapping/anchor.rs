//! Links, regions and the anchors harvested from them
//!
//! A [`RawLink`] is what the document collaborator reports for a clickable region.
//! Only direct (`goto`) and named links become anchors; their destination is
//! converted from the collaborator's 0-based page value to a 1-based physical page.

use serde::{Deserialize, Serialize};

/// Page number as printed in the document and cited by its index.
pub type LogicalPage = u32;

/// 1-based position of a page in the file.
pub type PhysicalPage = u32;

/// Kind of a clickable region, as reported by the document collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LinkKind {
    /// Direct reference to a page in the same document.
    Goto,
    /// Named destination; its page value may be text or a number.
    Named,
    Uri,
    Launch,
    GotoRemote,
    Unknown,
}

impl LinkKind {
    /// Only direct and named links can carry table-of-contents anchors.
    pub fn is_anchor(self) -> bool {
        matches!(self, LinkKind::Goto | LinkKind::Named)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkKind::Goto => "goto",
            LinkKind::Named => "named",
            LinkKind::Uri => "uri",
            LinkKind::Launch => "launch",
            LinkKind::GotoRemote => "goto-remote",
            LinkKind::Unknown => "unknown",
        }
    }
}

impl From<String> for LinkKind {
    fn from(kind: String) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "goto" => LinkKind::Goto,
            "named" => LinkKind::Named,
            "uri" => LinkKind::Uri,
            "launch" => LinkKind::Launch,
            "goto-remote" | "gotor" => LinkKind::GotoRemote,
            _ => LinkKind::Unknown,
        }
    }
}

impl From<LinkKind> for String {
    fn from(kind: LinkKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Raw 0-based destination page value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
    Index(i64),
    Text(String),
}

/// Axis-aligned rectangle in page space, serialized as `[x0, y0, x1, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Region {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Region {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Inclusive on all edges.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x0.min(self.x1)
            && x <= self.x0.max(self.x1)
            && y >= self.y0.min(self.y1)
            && y <= self.y0.max(self.y1)
    }
}

impl From<[f32; 4]> for Region {
    fn from([x0, y0, x1, y1]: [f32; 4]) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

impl From<Region> for [f32; 4] {
    fn from(region: Region) -> Self {
        [region.x0, region.y0, region.x1, region.y1]
    }
}

/// A clickable region on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLink {
    pub kind: LinkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageRef>,
    #[serde(rename = "rect")]
    pub region: Region,
}

impl RawLink {
    pub fn new(kind: LinkKind, page: Option<PageRef>, region: Region) -> Self {
        Self { kind, page, region }
    }

    /// Resolves the 1-based physical destination of this link.
    ///
    /// Direct links need a numeric page. Named links accept a number or text that
    /// parses as an integer. Anything else, and any result below page 1, yields `None`.
    pub fn destination(&self) -> Option<PhysicalPage> {
        let zero_based = match (self.kind, self.page.as_ref()?) {
            (LinkKind::Goto | LinkKind::Named, PageRef::Index(page)) => *page,
            (LinkKind::Named, PageRef::Text(text)) => text.trim().parse::<i64>().ok()?,
            _ => return None,
        };
        zero_based
            .checked_add(1)
            .and_then(|page| PhysicalPage::try_from(page).ok())
            .filter(|page| *page > 0)
    }
}

/// An observed `(label, destination)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Text under the link's clickable region, trimmed.
    pub label: String,
    pub destination: PhysicalPage,
    /// 1-based page the link was found on.
    pub source_page: usize,
}

impl Anchor {
    pub fn new(label: impl Into<String>, destination: PhysicalPage) -> Self {
        Self {
            label: label.into(),
            destination,
            source_page: 0,
        }
    }

    pub fn found_on(mut self, source_page: usize) -> Self {
        self.source_page = source_page;
        self
    }

    /// Anchors with an empty label are kept for reporting but never mapped.
    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(kind: LinkKind, page: Option<PageRef>) -> RawLink {
        RawLink::new(kind, page, Region::new(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn test_goto_destination_is_one_based() {
        let link = link(LinkKind::Goto, Some(PageRef::Index(142)));
        assert_eq!(link.destination(), Some(143));
    }

    #[test]
    fn test_named_destination_accepts_text_and_numbers() {
        assert_eq!(
            link(LinkKind::Named, Some(PageRef::Text("9".into()))).destination(),
            Some(10)
        );
        assert_eq!(
            link(LinkKind::Named, Some(PageRef::Index(9))).destination(),
            Some(10)
        );
        assert_eq!(
            link(LinkKind::Named, Some(PageRef::Text("chapter-2".into()))).destination(),
            None
        );
    }

    #[test]
    fn test_unresolvable_destinations_are_dropped() {
        assert_eq!(link(LinkKind::Goto, None).destination(), None);
        assert_eq!(link(LinkKind::Goto, Some(PageRef::Index(-1))).destination(), None);
        assert_eq!(
            link(LinkKind::Goto, Some(PageRef::Text("4".into()))).destination(),
            None
        );
        assert_eq!(link(LinkKind::Uri, Some(PageRef::Index(4))).destination(), None);
    }

    #[test]
    fn test_link_kind_round_trips_through_strings() {
        assert_eq!(LinkKind::from("GoTo".to_string()), LinkKind::Goto);
        assert_eq!(LinkKind::from("gotor".to_string()), LinkKind::GotoRemote);
        assert_eq!(LinkKind::from("popup".to_string()), LinkKind::Unknown);
        assert_eq!(String::from(LinkKind::Named), "named");
        assert!(!LinkKind::Launch.is_anchor());
    }

    #[test]
    fn test_region_contains_point_on_edges() {
        let region = Region::new(10.0, 20.0, 30.0, 40.0);
        assert!(region.contains_point(10.0, 40.0));
        assert!(region.contains_point(20.0, 30.0));
        assert!(!region.contains_point(31.0, 30.0));
        assert_eq!(region.center(), (20.0, 30.0));
    }
}
