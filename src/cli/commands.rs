use std::path::Path;

use crate::app::{AppContext, OpdsError, Result};
use crate::domain::{Book, Collection};
use crate::navigation::NavigationState;

pub fn convert(ctx: &AppContext, path: &Path, base_url: Option<&str>) -> Result<()> {
    let body = std::fs::read(path)?;
    let normalized = ctx.normalizer.normalize(&body, base_url)?;
    println!("{}", serde_json::to_string_pretty(&normalized.collection)?);
    Ok(())
}

pub async fn fetch(ctx: &AppContext, url: &str, json: bool) -> Result<()> {
    let document = ctx.fetcher.fetch(url).await?;
    let normalized = ctx.normalizer.normalize(&document.body, Some(&document.url))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&normalized.collection)?);
    } else {
        for line in summary_lines(&normalized.collection) {
            println!("{}", line);
        }
    }
    Ok(())
}

pub async fn browse(ctx: &AppContext, urls: Vec<String>) -> Result<()> {
    let urls = if urls.is_empty() {
        ctx.catalog_url(None).into_iter().collect()
    } else {
        urls
    };
    if urls.is_empty() {
        return Err(no_catalog());
    }

    let mut session = ctx.session();
    for url in urls {
        session.load_collection(&url).await;
        print_step(session.state());
        session.close_error();
    }
    Ok(())
}

pub async fn search(ctx: &AppContext, terms: &str, url: Option<String>) -> Result<()> {
    let url = ctx.catalog_url(url).ok_or_else(no_catalog)?;

    let mut session = ctx.session();
    session.load_collection(&url).await;
    if let Some(error) = &session.state().error {
        return Err(OpdsError::Other(error.clone()));
    }

    if !session.load_search_description().await {
        return Err(OpdsError::Other(format!("{} is not searchable", url)));
    }
    session.search(terms).await;

    let state = session.state();
    if let Some(error) = &state.error {
        return Err(OpdsError::Other(error.clone()));
    }

    let books = state.data.as_ref().map(all_books).unwrap_or_default();
    if books.is_empty() {
        println!("No results for \"{}\"", terms);
        return Ok(());
    }
    for book in books {
        println!("{}", book_line(book));
    }
    Ok(())
}

fn no_catalog() -> OpdsError {
    OpdsError::Config("No catalog URL given and no start_url configured".into())
}

fn print_step(state: &NavigationState) {
    if let Some(error) = &state.error {
        eprintln!(
            "Error loading {}: {}",
            state.url.as_deref().unwrap_or_default(),
            error
        );
        return;
    }
    println!("{}", state.breadcrumbs());
    if let Some(data) = &state.data {
        for line in summary_lines(data) {
            println!("  {}", line);
        }
    }
}

fn all_books(collection: &Collection) -> Vec<&Book> {
    collection
        .lanes
        .iter()
        .flat_map(|lane| lane.books.iter())
        .chain(collection.books.iter())
        .collect()
}

fn book_line(book: &Book) -> String {
    let authors = book.display_authors();
    if authors.is_empty() {
        book.title.clone()
    } else {
        format!("{} ({})", book.title, authors)
    }
}

/// Human-readable outline of a collection.
pub fn summary_lines(collection: &Collection) -> Vec<String> {
    let mut lines = vec![format!("{} [{}]", collection.title, collection.url)];
    if collection.is_empty() {
        lines.push("(no entries)".to_string());
    }

    for lane in &collection.lanes {
        lines.push(format!("{} ({} books)", lane.title, lane.books.len()));
    }
    for link in &collection.links {
        lines.push(format!("> {}", link.text));
    }
    for book in &collection.books {
        lines.push(format!("- {}", book_line(book)));
    }
    for group in &collection.facet_groups {
        let active = group
            .active_facet()
            .map(|f| f.label.as_str())
            .unwrap_or("none");
        lines.push(format!("{}: {}", group.label, active));
    }
    if collection.search.is_some() {
        lines.push("Searchable".to_string());
    }
    if let Some(next) = &collection.next_page_url {
        lines.push(format!("More: {}", next));
    }
    lines
}
