//! Drives the navigation state from network results.
//!
//! Every network operation first dispatches its request action, then awaits
//! the fetcher and dispatches either the loaded data or a failure carrying the
//! error's message. Nothing here returns an error to the caller.

use std::sync::Arc;

use url::Url;

use crate::app::Result;
use crate::domain::{Collection, SearchData};
use crate::fetcher::Fetcher;
use crate::navigation::{reduce, Action, NavigationState, RequestSequence};
use crate::normalizer::Normalizer;
use crate::opds;

pub struct Session {
    state: NavigationState,
    requests: RequestSequence,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
}

impl Session {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, normalizer: Normalizer) -> Self {
        Self {
            state: NavigationState::new(),
            requests: RequestSequence::new(),
            fetcher,
            normalizer,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    pub async fn load_collection(&mut self, url: &str) {
        let request = self.requests.next_id();
        self.dispatch(Action::FetchCollectionRequest {
            url: url.to_string(),
            request,
        });

        match self.fetch_collection(url).await {
            Ok(collection) => self.dispatch(Action::LoadCollection {
                collection,
                url: url.to_string(),
                request,
            }),
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", url, e);
                self.dispatch(Action::FetchCollectionFailure {
                    error: e.to_string(),
                    request,
                });
            }
        }
    }

    /// Fetch the next page of the current collection. Returns `false` when
    /// there is no next page to fetch.
    pub async fn load_next_page(&mut self) -> bool {
        let Some(url) = self
            .state
            .data
            .as_ref()
            .and_then(|d| d.next_page_url.clone())
        else {
            return false;
        };

        let request = self.requests.next_id();
        self.dispatch(Action::FetchPageRequest {
            url: url.clone(),
            request,
        });

        match self.fetch_collection(&url).await {
            Ok(page) => self.dispatch(Action::LoadPage { page, request }),
            Err(e) => {
                tracing::warn!("Failed to load page {}: {}", url, e);
                self.dispatch(Action::FetchPageFailure {
                    error: e.to_string(),
                    request,
                });
            }
        }
        true
    }

    /// Fetch the OpenSearch description advertised by the current collection.
    /// Returns `true` once search data is available.
    pub async fn load_search_description(&mut self) -> bool {
        let Some(search) = self.state.data.as_ref().and_then(|d| d.search.as_ref()) else {
            return false;
        };
        if search.search_data.is_some() {
            return true;
        }
        let url = search.url.clone();

        match self.fetch_search_description(&url).await {
            Ok(search_data) => {
                self.dispatch(Action::LoadSearchDescription { url, search_data });
                true
            }
            Err(e) => {
                tracing::warn!("Failed to load search description {}: {}", url, e);
                false
            }
        }
    }

    /// Run a search against the current collection's search description,
    /// loading the results as the new collection. Returns `false` when no
    /// search description is loaded.
    pub async fn search(&mut self, terms: &str) -> bool {
        let Some(url) = self
            .state
            .data
            .as_ref()
            .and_then(|d| d.search.as_ref())
            .and_then(|s| s.search_data.as_ref())
            .map(|data| data.url_for(terms))
        else {
            return false;
        };

        self.load_collection(&url).await;
        true
    }

    pub fn close_error(&mut self) {
        self.dispatch(Action::CloseError);
    }

    pub fn clear(&mut self) {
        self.dispatch(Action::ClearCollection);
    }

    async fn fetch_collection(&self, url: &str) -> Result<Collection> {
        let document = self.fetcher.fetch(url).await?;
        let mut collection = self
            .normalizer
            .normalize(&document.body, Some(&document.url))?
            .collection;
        // Links resolve against the redirect target; history keys on the request.
        collection.url = url.to_string();
        Ok(collection)
    }

    async fn fetch_search_description(&self, url: &str) -> Result<SearchData> {
        let document = self.fetcher.fetch(url).await?;
        let base = Url::parse(&document.url).ok();
        opds::parse_search_description(&document.body, base.as_ref())
    }
}
