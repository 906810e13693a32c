pub mod book;
pub mod classify;
pub mod facets;
pub mod link;
pub mod resolve;
pub mod sanitize;

use crate::app::{OpdsError, Result};
use crate::domain::{Book, Collection, Lane, SearchLink};
use crate::opds::{self, rel, FeedKind, OpdsFeed, OpdsLink};

pub use book::entry_to_book;
pub use classify::{classify, BookEntry, EntryKind, LinkEntry};
pub use facets::group_facets;
pub use link::entry_to_link;
pub use resolve::UrlResolver;
pub use sanitize::sanitize_summary;

/// A converted feed together with the document its books point back into.
#[derive(Debug, Clone)]
pub struct NormalizedFeed {
    pub document: OpdsFeed,
    pub collection: Collection,
}

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw feed bytes and convert them, resolving hrefs against
    /// `base_url` (normally the URL the feed was fetched from).
    pub fn normalize(&self, body: &[u8], base_url: Option<&str>) -> Result<NormalizedFeed> {
        let document = opds::parse_feed(body)?;
        let collection = feed_to_collection(&document, base_url)?;
        Ok(NormalizedFeed {
            document,
            collection,
        })
    }
}

/// Convert a parsed feed into a [`Collection`].
///
/// The collection's `url` is `base_url` itself, falling back to the feed's
/// `self` link only when no base is given.
///
/// Pure: the same feed and base URL always give the same collection. A feed
/// without an id is rejected, everything else missing degrades to an
/// omitted field or a skipped entry.
pub fn feed_to_collection(feed: &OpdsFeed, base_url: Option<&str>) -> Result<Collection> {
    let id = feed.id.clone().ok_or(OpdsError::MissingField("id"))?;
    let resolver = UrlResolver::new(base_url)?;

    // Keyed by the URL it was requested at so history lookups match.
    let url = match base_url.map(str::trim).filter(|b| !b.is_empty()) {
        Some(base) => base.to_string(),
        None => feed
            .link_with_rel(rel::SELF)
            .map(|l| l.href.clone())
            .unwrap_or_default(),
    };
    let mut collection = Collection::new(id, url, feed.title.clone().unwrap_or_default());

    for entry in &feed.entries {
        match classify(entry) {
            Some(EntryKind::Book(book_entry)) => {
                let book = entry_to_book(&book_entry, &resolver);
                match book_entry.lane_link() {
                    Some(lane_link) => add_to_lane(&mut collection.lanes, lane_link, book, &resolver),
                    None => collection.books.push(book),
                }
            }
            Some(EntryKind::Link(link_entry)) => {
                collection.links.push(entry_to_link(&link_entry, &resolver));
            }
            None => {}
        }
    }

    collection.facet_groups = group_facets(&feed.links, &resolver);
    collection.search = feed
        .link_with_rel(rel::SEARCH)
        .map(|l| SearchLink::new(resolver.resolve(&l.href)));
    collection.next_page_url = resolve_rel(feed, rel::NEXT, &resolver);
    collection.catalog_root_url = resolve_rel(feed, rel::START, &resolver);

    if feed.kind == FeedKind::Navigation && collection.book_count() > 0 {
        tracing::debug!(
            "Navigation feed {} carries {} book entries",
            collection.id,
            collection.book_count()
        );
    }

    Ok(collection)
}

fn resolve_rel(feed: &OpdsFeed, relation: &str, resolver: &UrlResolver) -> Option<String> {
    feed.link_with_rel(relation).map(|l| resolver.resolve(&l.href))
}

fn add_to_lane(lanes: &mut Vec<Lane>, link: &OpdsLink, book: Book, resolver: &UrlResolver) {
    let url = resolver.resolve(&link.href);
    match lanes.iter_mut().find(|lane| lane.url == url) {
        Some(lane) => lane.books.push(book),
        None => lanes.push(Lane {
            title: link.title.clone().unwrap_or_else(|| link.href.clone()),
            url,
            books: vec![book],
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::opds::{OpdsEntry, Summary};

    fn acquisition_feed(entries: Vec<OpdsEntry>, links: Vec<OpdsLink>) -> OpdsFeed {
        OpdsFeed {
            id: Some("some id".into()),
            title: Some("some title".into()),
            kind: FeedKind::Acquisition,
            links,
            entries: entries.into_iter().map(Arc::new).collect(),
        }
    }

    fn navigation_feed(entries: Vec<OpdsEntry>, links: Vec<OpdsLink>) -> OpdsFeed {
        OpdsFeed {
            kind: FeedKind::Navigation,
            ..acquisition_feed(entries, links)
        }
    }

    fn book_entry(id: &str) -> OpdsEntry {
        OpdsEntry {
            id: Some(id.into()),
            title: Some(format!("Book {}", id)),
            links: vec![OpdsLink::new(Some(rel::OPEN_ACCESS), format!("{}.epub", id))],
            ..OpdsEntry::default()
        }
    }

    fn facet(href: &str, title: &str, group: &str, active: Option<bool>) -> OpdsLink {
        OpdsLink {
            rel: Some(rel::FACET.into()),
            href: href.into(),
            title: Some(title.into()),
            facet_group: Some(group.into()),
            active_facet: active,
            ..OpdsLink::default()
        }
    }

    #[test]
    fn test_extracts_link_info() {
        let entry = OpdsEntry {
            id: Some("feed.xml".into()),
            title: Some("Feed".into()),
            links: vec![OpdsLink::new(None, "href")],
            ..OpdsEntry::default()
        };
        let collection = feed_to_collection(&navigation_feed(vec![entry], vec![]), Some("")).unwrap();

        assert_eq!(collection.links.len(), 1);
        assert!(collection.books.is_empty());
        let link = &collection.links[0];
        assert_eq!(link.id, "feed.xml");
        assert_eq!(link.text, "Feed");
        assert_eq!(link.url, "href");
    }

    #[test]
    fn test_extracts_books_and_keeps_raw_entry_handle() {
        let feed = acquisition_feed(vec![book_entry("a"), book_entry("b")], vec![]);
        let collection = feed_to_collection(&feed, None).unwrap();

        assert_eq!(collection.books.len(), 2);
        assert!(collection.links.is_empty());
        let second = &collection.books[1];
        assert!(Arc::ptr_eq(&second.raw_entry, &feed.entries[1]));
        assert_eq!(second.raw_entry.id.as_deref(), Some("b"));
        assert_eq!(second.raw_entry.acquisition_links().count(), 1);
    }

    #[test]
    fn test_mixed_feed_classifies_per_entry() {
        let nav = OpdsEntry {
            id: Some("sub".into()),
            title: Some("Sub".into()),
            links: vec![OpdsLink::new(Some("subsection"), "sub.xml")],
            ..OpdsEntry::default()
        };
        let feed = navigation_feed(vec![nav, book_entry("a")], vec![]);
        let collection = feed_to_collection(&feed, None).unwrap();

        assert_eq!(collection.links.len(), 1);
        assert_eq!(collection.books.len(), 1);
    }

    #[test]
    fn test_extracts_facet_groups() {
        let feed = acquisition_feed(
            vec![],
            vec![
                facet("href1", "title 1", "group A", Some(true)),
                facet("href2", "title 2", "group B", Some(false)),
                facet("href3", "title 3", "group A", None),
            ],
        );
        let collection = feed_to_collection(&feed, Some("")).unwrap();

        assert_eq!(collection.facet_groups.len(), 2);
        let group_a = &collection.facet_groups[0];
        let group_b = &collection.facet_groups[1];
        assert_eq!(group_a.label, "group A");
        assert_eq!(group_a.facets.len(), 2);
        assert_eq!(group_b.label, "group B");
        assert_eq!(group_b.facets.len(), 1);

        assert_eq!(group_a.facets[0].label, "title 1");
        assert_eq!(group_a.facets[0].href, "href1");
        assert!(group_a.facets[0].active);
        assert_eq!(group_b.facets[0].label, "title 2");
        assert!(!group_b.facets[0].active);
        assert_eq!(group_a.facets[1].label, "title 3");
        assert!(!group_a.facets[1].active);
    }

    #[test]
    fn test_extracts_search_link() {
        let feed = navigation_feed(vec![], vec![OpdsLink::new(Some(rel::SEARCH), "href")]);
        let collection = feed_to_collection(&feed, Some("")).unwrap();

        let search = collection.search.unwrap();
        assert_eq!(search.url, "href");
        assert!(search.search_data.is_none());
    }

    #[test]
    fn test_extracts_next_page_url() {
        let feed = acquisition_feed(vec![], vec![OpdsLink::new(Some(rel::NEXT), "href")]);
        let collection = feed_to_collection(&feed, Some("")).unwrap();
        assert_eq!(collection.next_page_url.as_deref(), Some("href"));
    }

    #[test]
    fn test_missing_feed_id_is_error() {
        let mut feed = acquisition_feed(vec![book_entry("a")], vec![]);
        feed.id = None;
        let result = feed_to_collection(&feed, None);
        assert!(matches!(result, Err(OpdsError::MissingField("id"))));
    }

    #[test]
    fn test_urls_resolved_against_base() {
        let mut entry = book_entry("a");
        entry.links.push(OpdsLink::new(Some(rel::THUMBNAIL), "/thumbs/a.jpg"));
        let feed = acquisition_feed(
            vec![entry],
            vec![
                OpdsLink::new(Some(rel::SELF), "fiction.xml"),
                OpdsLink::new(Some(rel::NEXT), "fiction.xml?page=2"),
                OpdsLink::new(Some(rel::START), "/"),
                OpdsLink::new(Some(rel::SEARCH), "search.xml"),
            ],
        );
        let collection = feed_to_collection(&feed, Some("http://example.com/feeds/index.xml")).unwrap();

        assert_eq!(collection.url, "http://example.com/feeds/index.xml");
        assert_eq!(
            collection.next_page_url.as_deref(),
            Some("http://example.com/feeds/fiction.xml?page=2")
        );
        assert_eq!(collection.catalog_root_url.as_deref(), Some("http://example.com/"));
        assert_eq!(collection.search.unwrap().url, "http://example.com/feeds/search.xml");
        assert_eq!(
            collection.books[0].image_url.as_deref(),
            Some("http://example.com/thumbs/a.jpg")
        );
    }

    #[test]
    fn test_collection_url_falls_back_to_base() {
        let feed = acquisition_feed(vec![], vec![]);
        let collection = feed_to_collection(&feed, Some("http://example.com/feed")).unwrap();
        assert_eq!(collection.url, "http://example.com/feed");
        assert_eq!(collection.title, "some title");
        assert_eq!(collection.id, "some id");
    }

    #[test]
    fn test_collection_url_is_requested_url_not_self_link() {
        let feed = acquisition_feed(vec![], vec![OpdsLink::new(Some(rel::SELF), "/a?lang=en")]);

        let requested = feed_to_collection(&feed, Some("http://example.com/a")).unwrap();
        assert_eq!(requested.url, "http://example.com/a");

        let detached = feed_to_collection(&feed, None).unwrap();
        assert_eq!(detached.url, "/a?lang=en");
    }

    #[test]
    fn test_books_grouped_into_lanes() {
        let lane = |href: &str, title: &str| OpdsLink {
            rel: Some(rel::COLLECTION.into()),
            href: href.into(),
            title: Some(title.into()),
            ..OpdsLink::default()
        };
        let mut a = book_entry("a");
        a.links.push(lane("/lanes/new", "New"));
        let mut b = book_entry("b");
        b.links.push(lane("/lanes/popular", "Popular"));
        let mut c = book_entry("c");
        c.links.push(lane("/lanes/new", "New"));
        let feed = acquisition_feed(vec![a, b, c, book_entry("d")], vec![]);

        let collection = feed_to_collection(&feed, None).unwrap();

        assert_eq!(collection.lanes.len(), 2);
        assert_eq!(collection.lanes[0].title, "New");
        let new_ids: Vec<&str> = collection.lanes[0].books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(new_ids, vec!["a", "c"]);
        assert_eq!(collection.lanes[1].books.len(), 1);
        assert_eq!(collection.books.len(), 1);
        assert_eq!(collection.books[0].id, "d");
    }

    #[test]
    fn test_conversion_is_repeatable() {
        let mut entry = book_entry("a");
        entry.summary = Some(Summary::html("<i>Hi</i>"));
        let feed = acquisition_feed(vec![entry], vec![]);

        let first = feed_to_collection(&feed, Some("http://example.com/")).unwrap();
        let second = feed_to_collection(&feed, Some("http://example.com/")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_from_bytes() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <id>urn:feed</id><title>Popular</title>
  <link rel="next" href="?page=2"/>
  <entry>
    <id>urn:book</id><title>Dune</title>
    <link rel="http://opds-spec.org/acquisition/open-access" href="/dune.epub"/>
  </entry>
</feed>"#;
        let normalized = Normalizer::new()
            .normalize(xml.as_bytes(), Some("http://example.com/popular"))
            .unwrap();

        assert_eq!(normalized.document.kind, FeedKind::Acquisition);
        assert_eq!(normalized.collection.title, "Popular");
        assert_eq!(normalized.collection.books[0].title, "Dune");
        assert_eq!(
            normalized.collection.next_page_url.as_deref(),
            Some("http://example.com/popular?page=2")
        );
    }
}
