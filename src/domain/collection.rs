use serde::{Deserialize, Serialize};

use super::{Book, FacetGroup, SearchLink};

/// A navigable reference: a sub-catalog, the next page, a catalog root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub title: String,
    pub url: String,
    pub books: Vec<Book>,
}

/// One converted catalog page. Built once per conversion and never mutated by
/// the adapter afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub url: String,
    pub title: String,
    pub lanes: Vec<Lane>,
    pub books: Vec<Book>,
    pub links: Vec<Link>,
    pub facet_groups: Vec<FacetGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_root_url: Option<String>,
}

impl Collection {
    pub fn new(id: String, url: String, title: String) -> Self {
        Self {
            id,
            url,
            title,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.links.is_empty() && self.lanes.is_empty()
    }

    pub fn book_count(&self) -> usize {
        self.books.len() + self.lanes.iter().map(|l| l.books.len()).sum::<usize>()
    }
}
