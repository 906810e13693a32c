use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::opds::OpdsEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub contributors: Vec<String>,
    /// Sanitized HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Long-form date such as "June 8, 2014".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The parsed entry this book came from, shared with its document.
    pub raw_entry: Arc<OpdsEntry>,
}

impl Book {
    pub fn new(id: String, title: String, raw_entry: Arc<OpdsEntry>) -> Self {
        Self {
            id,
            title,
            authors: Vec::new(),
            contributors: Vec::new(),
            summary: None,
            image_url: None,
            categories: Vec::new(),
            publisher: None,
            published: None,
            url: None,
            raw_entry,
        }
    }

    pub fn display_authors(&self) -> String {
        self.authors.join(", ")
    }
}
