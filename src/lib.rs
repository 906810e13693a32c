//! # OPDS Browser
//!
//! Turns OPDS catalog feeds into a browsable collection model and tracks
//! where the reader is inside a catalog.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → OPDS parser → Normalizer → Navigation reducer
//! ```
//!
//! - [`fetcher`]: HTTP client for catalog pages and search descriptions
//! - [`opds`]: Atom/OPDS and OpenSearch document parsing
//! - [`normalizer`]: Converts a parsed feed into a [`Collection`](domain::Collection)
//! - [`navigation`]: Pure state transitions and breadcrumb history
//! - [`session`]: Runs fetches and feeds their results to the reducer
//!
//! ## Quick Start
//!
//! ```bash
//! # Convert a feed saved on disk
//! opds-browser convert feed.xml --base-url https://catalog.example.org/opds/
//!
//! # Show a catalog page
//! opds-browser fetch https://catalog.example.org/opds
//!
//! # Search a catalog
//! opds-browser search "moby dick" --url https://catalog.example.org/opds
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config, fetcher
/// and normalizer.
pub mod app;

/// Command-line interface using clap.
///
/// - `convert <path> [--base-url]` - Convert a feed file to JSON
/// - `fetch <url> [--json]` - Fetch and summarize a catalog page
/// - `browse <url>...` - Walk through pages, printing breadcrumbs
/// - `search <terms> [--url]` - Search a catalog
pub mod cli;

/// Configuration loaded from `~/.config/opds-browser/config.toml`.
pub mod config;

/// Collection model: books, lanes, links, facets and search.
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for fetching documents
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Navigation state, actions and the reducer.
pub mod navigation;

/// Feed to collection conversion.
pub mod normalizer;

/// OPDS feed and OpenSearch description parsing.
pub mod opds;

/// Async driver for the navigation reducer.
pub mod session;
