use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::rel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedKind {
    Navigation,
    Acquisition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextKind {
    #[default]
    Text,
    Html,
    Xhtml,
}

impl TextKind {
    pub fn from_type_attr(value: &str) -> Self {
        match value {
            "html" | "text/html" => TextKind::Html,
            "xhtml" | "application/xhtml+xml" => TextKind::Xhtml,
            _ => TextKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub content: String,
    pub kind: TextKind,
}

impl Summary {
    pub fn html(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: TextKind::Html,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: TextKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub uri: Option<String>,
}

impl Person {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Category {
    pub term: String,
    pub label: Option<String>,
}

/// An Atom `<link>` with the OPDS facet attributes kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpdsLink {
    pub rel: Option<String>,
    pub href: String,
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub facet_group: Option<String>,
    pub active_facet: Option<bool>,
}

impl OpdsLink {
    pub fn new(rel: Option<&str>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.map(String::from),
            href: href.into(),
            ..Self::default()
        }
    }

    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel.as_deref() == Some(rel)
    }

    /// Atom treats a link without `rel` as `alternate`.
    pub fn is_alternate(&self) -> bool {
        matches!(self.rel.as_deref(), None | Some(rel::ALTERNATE))
    }

    pub fn is_acquisition(&self) -> bool {
        self.rel.as_deref().is_some_and(rel::is_acquisition)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpdsEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub authors: Vec<Person>,
    pub contributors: Vec<Person>,
    pub summary: Option<Summary>,
    pub categories: Vec<Category>,
    /// Raw timestamp as it appeared in the feed.
    pub published: Option<String>,
    pub publisher: Option<String>,
    pub links: Vec<OpdsLink>,
}

impl OpdsEntry {
    pub fn acquisition_links(&self) -> impl Iterator<Item = &OpdsLink> {
        self.links.iter().filter(|l| l.is_acquisition())
    }

    pub fn has_acquisition_links(&self) -> bool {
        self.acquisition_links().next().is_some()
    }

    pub fn link_with_rel(&self, rel: &str) -> Option<&OpdsLink> {
        self.links.iter().find(|l| l.has_rel(rel))
    }
}

/// The parsed document an adapter run consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpdsFeed {
    pub id: Option<String>,
    pub title: Option<String>,
    pub kind: FeedKind,
    pub links: Vec<OpdsLink>,
    /// Shared so converted books can hold on to their entry.
    pub entries: Vec<Arc<OpdsEntry>>,
}

impl OpdsFeed {
    pub fn link_with_rel(&self, rel: &str) -> Option<&OpdsLink> {
        self.links.iter().find(|l| l.has_rel(rel))
    }

    /// Kind advertised by the `self` or `start` link's media type, if any.
    pub fn declared_kind(&self) -> Option<FeedKind> {
        [rel::SELF, rel::START]
            .iter()
            .filter_map(|r| self.link_with_rel(r))
            .filter_map(|l| l.media_type.as_deref())
            .find_map(|media_type| {
                if media_type.contains(rel::KIND_ACQUISITION) {
                    Some(FeedKind::Acquisition)
                } else if media_type.contains(rel::KIND_NAVIGATION) {
                    Some(FeedKind::Navigation)
                } else {
                    None
                }
            })
    }

    pub fn infer_kind(&self) -> FeedKind {
        self.declared_kind().unwrap_or_else(|| {
            if self.entries.iter().any(|e| e.has_acquisition_links()) {
                FeedKind::Acquisition
            } else {
                FeedKind::Navigation
            }
        })
    }
}
