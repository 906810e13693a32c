use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::normalizer::Normalizer;
use crate::session::Session;

pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub normalizer: Normalizer,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetcher)?);

        Ok(Self {
            config,
            fetcher,
            normalizer: Normalizer::new(),
        })
    }

    /// A fresh navigation session sharing this context's fetcher.
    pub fn session(&self) -> Session {
        Session::new(self.fetcher.clone(), self.normalizer.clone())
    }

    /// `url` if given, otherwise the configured start catalog.
    pub fn catalog_url(&self, url: Option<String>) -> Option<String> {
        url.or_else(|| self.config.catalog.start_url.clone())
    }
}
