use super::classify::LinkEntry;
use super::resolve::UrlResolver;
use crate::domain::Link;
use crate::opds::{rel, OpdsEntry, OpdsLink};

/// The link a navigation entry points at: the first alternate or `self`
/// link, otherwise the first link of any relation.
pub fn primary_link(entry: &OpdsEntry) -> Option<&OpdsLink> {
    entry
        .links
        .iter()
        .find(|l| l.is_alternate() || l.has_rel(rel::SELF))
        .or_else(|| entry.links.first())
}

pub fn entry_to_link(entry: &LinkEntry<'_>, resolver: &UrlResolver) -> Link {
    Link {
        id: entry.id.to_string(),
        text: entry.title.to_string(),
        url: resolver.resolve(&entry.link.href),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_link_prefers_alternate() {
        let entry = OpdsEntry {
            links: vec![
                OpdsLink::new(Some("subsection"), "sub.xml"),
                OpdsLink::new(None, "alt.xml"),
            ],
            ..OpdsEntry::default()
        };
        assert_eq!(primary_link(&entry).unwrap().href, "alt.xml");
    }

    #[test]
    fn test_primary_link_falls_back_to_first() {
        let entry = OpdsEntry {
            links: vec![
                OpdsLink::new(Some("subsection"), "first.xml"),
                OpdsLink::new(Some("related"), "second.xml"),
            ],
            ..OpdsEntry::default()
        };
        assert_eq!(primary_link(&entry).unwrap().href, "first.xml");
    }

    #[test]
    fn test_entry_to_link_resolves_url() {
        let link = OpdsLink::new(None, "feed.xml");
        let entry = LinkEntry {
            id: "feed.xml",
            title: "Feed",
            link: &link,
        };
        let resolver = UrlResolver::new(Some("http://example.com/catalog/")).unwrap();
        let out = entry_to_link(&entry, &resolver);

        assert_eq!(out.id, "feed.xml");
        assert_eq!(out.text, "Feed");
        assert_eq!(out.url, "http://example.com/catalog/feed.xml");
    }
}
