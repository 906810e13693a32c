use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::classify::BookEntry;
use super::resolve::UrlResolver;
use super::sanitize::sanitize_summary;
use crate::domain::Book;
use crate::opds::{rel, Category, OpdsEntry};

pub fn entry_to_book(book: &BookEntry<'_>, resolver: &UrlResolver) -> Book {
    let entry: &OpdsEntry = book.entry;
    let mut out = Book::new(
        book.id.to_string(),
        entry.title.clone().unwrap_or_default(),
        Arc::clone(book.entry),
    );

    out.authors = entry.authors.iter().map(|p| p.name.clone()).collect();
    out.contributors = entry.contributors.iter().map(|p| p.name.clone()).collect();
    out.summary = entry.summary.as_ref().map(sanitize_summary);
    out.categories = entry.categories.iter().filter_map(category_label).collect();
    out.image_url = image_href(entry).map(|href| resolver.resolve(href));
    out.publisher = entry.publisher.clone();
    out.published = entry.published.as_deref().and_then(format_published);
    out.url = book_href(entry).map(|href| resolver.resolve(href));

    out
}

/// The human label when present, the raw term otherwise.
fn category_label(category: &Category) -> Option<String> {
    category
        .label
        .as_deref()
        .filter(|l| !l.is_empty())
        .or(Some(category.term.as_str()).filter(|t| !t.is_empty()))
        .map(String::from)
}

/// Any thumbnail wins over any full-size image.
fn image_href(entry: &OpdsEntry) -> Option<&str> {
    [rel::THUMBNAIL, rel::LEGACY_THUMBNAIL, rel::IMAGE, rel::LEGACY_COVER]
        .iter()
        .find_map(|relation| entry.link_with_rel(relation))
        .map(|l| l.href.as_str())
}

fn book_href(entry: &OpdsEntry) -> Option<&str> {
    entry
        .links
        .iter()
        .find(|l| l.is_alternate())
        .or_else(|| entry.link_with_rel(rel::SELF))
        .map(|l| l.href.as_str())
}

/// Render a feed timestamp as a long date ("June 8, 2014") in the offset the
/// timestamp was written in.
pub fn format_published(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => Some(date.format("%B %-d, %Y").to_string()),
        Err(e) => {
            tracing::debug!("Dropping unparseable published date {:?}: {}", raw, e);
            None
        }
    }
}
