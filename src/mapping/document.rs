//! Document collaborator
//!
//! The core never reads PDF bytes itself. It asks a [`PageDocument`] for the links
//! on a page and for the text printed under a region. [`LinkDump`] implements the
//! trait over the JSON an external link/text extractor emits:
//!
//! ```json
//! {
//!   "pages": [
//!     {
//!       "links": [{ "kind": "goto", "page": 142, "rect": [72, 90, 96, 102] }],
//!       "words": [{ "bbox": [74, 91, 80, 101], "text": "1" }]
//!     }
//!   ]
//! }
//! ```
//!
//! Handles are released when dropped, so every exit path of a scan closes them.

use crate::mapping::anchor::{LinkKind, PageRef, RawLink, Region};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Errors raised by the document collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The document could not be read
    Io(String),
    /// The document was read but is not a valid link dump
    Malformed(String),
    PageOutOfRange { page_index: usize, page_count: usize },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Io(msg) => write!(f, "IO error: {}", msg),
            DocumentError::Malformed(msg) => write!(f, "Malformed document: {}", msg),
            DocumentError::PageOutOfRange {
                page_index,
                page_count,
            } => write!(
                f,
                "Page index {} out of range (document has {} pages)",
                page_index, page_count
            ),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<std::io::Error> for DocumentError {
    fn from(err: std::io::Error) -> Self {
        DocumentError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::Malformed(err.to_string())
    }
}

/// Page-level access to links and printed text.
///
/// Page indices are 0-based.
pub trait PageDocument {
    fn page_count(&self) -> usize;

    /// Every clickable region on the page, of any kind.
    fn links(&self, page_index: usize) -> Result<Vec<RawLink>, DocumentError>;

    /// Text printed inside `region`, untrimmed.
    fn text(&self, page_index: usize, region: &Region) -> Result<String, DocumentError>;
}

impl<D: PageDocument + ?Sized> PageDocument for &D {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn links(&self, page_index: usize) -> Result<Vec<RawLink>, DocumentError> {
        (**self).links(page_index)
    }

    fn text(&self, page_index: usize, region: &Region) -> Result<String, DocumentError> {
        (**self).text(page_index, region)
    }
}

/// A word and its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    #[serde(rename = "bbox")]
    pub region: Region,
    pub text: String,
}

/// One page of a link dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DumpPage {
    #[serde(default)]
    pub links: Vec<RawLink>,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl DumpPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a link on its own text row, with `label` printed inside it.
    ///
    /// An empty label adds the link without any text under it.
    pub fn link(mut self, kind: LinkKind, page: Option<PageRef>, label: &str) -> Self {
        let top = 72.0 + self.links.len() as f32 * 14.0;
        let region = Region::new(72.0, top, 144.0, top + 12.0);
        if !label.is_empty() {
            self.words.push(Word {
                region: Region::new(74.0, top + 1.0, 140.0, top + 11.0),
                text: label.to_string(),
            });
        }
        self.links.push(RawLink::new(kind, page, region));
        self
    }

    /// Direct link to a 0-based page.
    pub fn goto(self, label: &str, zero_based_page: i64) -> Self {
        self.link(LinkKind::Goto, Some(PageRef::Index(zero_based_page)), label)
    }

    /// Named link whose page value is text.
    pub fn named(self, label: &str, page: &str) -> Self {
        self.link(LinkKind::Named, Some(PageRef::Text(page.to_string())), label)
    }

    /// Free-standing text that no link covers.
    pub fn word(mut self, region: Region, text: &str) -> Self {
        self.words.push(Word {
            region,
            text: text.to_string(),
        });
        self
    }
}

/// In-memory document backed by a link dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkDump {
    #[serde(default)]
    pub pages: Vec<DumpPage>,
}

impl LinkDump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: Vec<DumpPage>) -> Self {
        Self { pages }
    }

    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let source = fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn push_page(&mut self, page: DumpPage) {
        self.pages.push(page);
    }

    fn page(&self, page_index: usize) -> Result<&DumpPage, DocumentError> {
        self.pages
            .get(page_index)
            .ok_or(DocumentError::PageOutOfRange {
                page_index,
                page_count: self.pages.len(),
            })
    }
}

impl PageDocument for LinkDump {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn links(&self, page_index: usize) -> Result<Vec<RawLink>, DocumentError> {
        Ok(self.page(page_index)?.links.clone())
    }

    /// Joins, in stored order, the words whose centre lies inside `region`.
    fn text(&self, page_index: usize, region: &Region) -> Result<String, DocumentError> {
        let words: Vec<&str> = self
            .page(page_index)?
            .words
            .iter()
            .filter(|word| {
                let (x, y) = word.region.center();
                region.contains_point(x, y)
            })
            .map(|word| word.text.as_str())
            .collect();
        Ok(words.join(" "))
    }
}

/// Opens a document by path.
pub fn open_document<P: AsRef<Path>>(path: P) -> Result<LinkDump, DocumentError> {
    let path = path.as_ref();
    let document = LinkDump::from_path(path)?;
    log::debug!(
        "opened {} ({} pages)",
        path.display(),
        document.page_count()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_collects_words_inside_region() {
        let page = DumpPage::new()
            .goto("12", 20)
            .goto("13", 21)
            .word(Region::new(300.0, 72.0, 320.0, 84.0), "margin");
        let dump = LinkDump::from_pages(vec![page]);

        let links = dump.links(0).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(dump.text(0, &links[0].region).unwrap(), "12");
        assert_eq!(dump.text(0, &links[1].region).unwrap(), "13");
    }

    #[test]
    fn test_text_joins_multiple_words() {
        let region = Region::new(0.0, 0.0, 100.0, 20.0);
        let page = DumpPage::new()
            .word(Region::new(2.0, 2.0, 20.0, 18.0), "229")
            .word(Region::new(22.0, 2.0, 30.0, 18.0), "-");
        let dump = LinkDump::from_pages(vec![page]);
        assert_eq!(dump.text(0, &region).unwrap(), "229 -");
    }

    #[test]
    fn test_from_json_reads_links_and_words() {
        let source = r#"{
            "pages": [
                {
                    "links": [
                        { "kind": "goto", "page": 142, "rect": [72, 90, 96, 102] },
                        { "kind": "named", "page": "7", "rect": [72, 110, 96, 122] },
                        { "kind": "uri", "rect": [72, 130, 96, 142] }
                    ],
                    "words": [{ "bbox": [74, 91, 80, 101], "text": "1" }]
                },
                {}
            ]
        }"#;
        let dump = LinkDump::from_json(source).unwrap();
        assert_eq!(dump.page_count(), 2);

        let links = dump.links(0).unwrap();
        assert_eq!(links[0].destination(), Some(143));
        assert_eq!(links[1].destination(), Some(8));
        assert_eq!(links[2].kind, LinkKind::Uri);
        assert_eq!(links[2].page, None);
        assert_eq!(dump.text(0, &links[0].region).unwrap(), "1");
        assert!(dump.links(1).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = LinkDump::from_json("{ \"pages\": 3 }").unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));
    }

    #[test]
    fn test_out_of_range_page() {
        let dump = LinkDump::new();
        assert_eq!(
            dump.links(4).unwrap_err(),
            DocumentError::PageOutOfRange {
                page_index: 4,
                page_count: 0
            }
        );
    }

    #[test]
    fn test_open_missing_document_is_io_error() {
        let err = open_document("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)));
    }

    #[test]
    fn test_dump_survives_json_round_trip() {
        let dump = LinkDump::from_pages(vec![DumpPage::new().goto("1", 142).named("2", "143")]);
        let json = dump.to_json().unwrap();
        assert_eq!(LinkDump::from_json(&json).unwrap(), dump);
    }
}
