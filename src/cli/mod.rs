pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "opds-browser")]
#[command(about = "Browse OPDS catalogs from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a feed file on disk and print the collection as JSON
    Convert {
        /// Path to the OPDS feed
        path: std::path::PathBuf,
        /// URL relative links resolve against
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Fetch a catalog page and show what it contains
    Fetch {
        /// URL of the catalog page
        url: String,
        /// Print the converted collection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Visit catalog pages in order, showing the breadcrumb trail after each
    Browse {
        /// URLs to visit (defaults to the configured start catalog)
        urls: Vec<String>,
    },
    /// Search a catalog
    Search {
        /// Search terms
        terms: String,
        /// Catalog to search (defaults to the configured start catalog)
        #[arg(long)]
        url: Option<String>,
    },
}
