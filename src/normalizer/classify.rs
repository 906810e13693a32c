use std::sync::Arc;

use super::link::primary_link;
use crate::opds::{rel, OpdsEntry, OpdsLink};

/// An entry narrowed to the shape its extractor needs.
#[derive(Debug, Clone, Copy)]
pub enum EntryKind<'a> {
    Book(BookEntry<'a>),
    Link(LinkEntry<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct BookEntry<'a> {
    pub id: &'a str,
    pub entry: &'a Arc<OpdsEntry>,
}

impl<'a> BookEntry<'a> {
    /// The grouping link that places this book in a lane, if any.
    pub fn lane_link(&self) -> Option<&'a OpdsLink> {
        self.entry.link_with_rel(rel::COLLECTION)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LinkEntry<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub link: &'a OpdsLink,
}

/// Decide what an entry becomes. Any acquisition link makes it a book,
/// whatever kind the feed itself claims to be.
///
/// Returns `None` for entries that cannot produce either shape.
pub fn classify(entry: &Arc<OpdsEntry>) -> Option<EntryKind<'_>> {
    let Some(id) = entry.id.as_deref() else {
        tracing::warn!(
            "Skipping entry {:?} without an id",
            entry.title.as_deref().unwrap_or_default()
        );
        return None;
    };

    if entry.has_acquisition_links() {
        return Some(EntryKind::Book(BookEntry { id, entry }));
    }

    match primary_link(entry) {
        Some(link) => Some(EntryKind::Link(LinkEntry {
            id,
            title: entry.title.as_deref().unwrap_or_default(),
            link,
        })),
        None => {
            tracing::warn!("Skipping navigation entry {} without links", id);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: Option<&str>, links: Vec<OpdsLink>) -> Arc<OpdsEntry> {
        Arc::new(OpdsEntry {
            id: id.map(String::from),
            title: Some("Title".into()),
            links,
            ..OpdsEntry::default()
        })
    }

    #[test]
    fn test_acquisition_link_makes_book() {
        for relation in [rel::ACQUISITION, rel::OPEN_ACCESS, rel::BORROW] {
            let e = entry(Some("b"), vec![OpdsLink::new(Some(relation), "get")]);
            assert!(matches!(classify(&e), Some(EntryKind::Book(_))));
        }
    }

    #[test]
    fn test_image_only_entry_is_link() {
        let e = entry(
            Some("l"),
            vec![
                OpdsLink::new(Some(rel::THUMBNAIL), "thumb.jpg"),
                OpdsLink::new(Some("subsection"), "sub.xml"),
            ],
        );
        match classify(&e) {
            Some(EntryKind::Link(link)) => {
                assert_eq!(link.id, "l");
                assert_eq!(link.title, "Title");
            }
            other => panic!("expected link entry, got {:?}", other),
        }
    }

    #[test]
    fn test_entry_without_id_skipped() {
        let e = entry(None, vec![OpdsLink::new(Some(rel::BORROW), "b")]);
        assert!(classify(&e).is_none());
    }

    #[test]
    fn test_link_entry_without_links_skipped() {
        let e = entry(Some("x"), Vec::new());
        assert!(classify(&e).is_none());
    }

    #[test]
    fn test_book_entry_lane_link() {
        let mut collection = OpdsLink::new(Some(rel::COLLECTION), "/lanes/new");
        collection.title = Some("New Arrivals".into());
        let e = entry(
            Some("b"),
            vec![OpdsLink::new(Some(rel::OPEN_ACCESS), "get"), collection],
        );
        let Some(EntryKind::Book(book)) = classify(&e) else {
            panic!("expected book entry");
        };
        assert!(Arc::ptr_eq(book.entry, &e));
        assert_eq!(book.lane_link().unwrap().href, "/lanes/new");
    }
}
