use serde::{Deserialize, Serialize};

use crate::domain::{Collection, SearchData};

/// Identity of one issued fetch. Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues strictly increasing [`RequestId`]s.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    last: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> RequestId {
        self.last += 1;
        RequestId(self.last)
    }
}

/// Events folded into [`NavigationState`](super::NavigationState) by
/// [`reduce`](super::reduce).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchCollectionRequest {
        url: String,
        request: RequestId,
    },
    FetchCollectionFailure {
        error: String,
        request: RequestId,
    },
    LoadCollection {
        collection: Collection,
        url: String,
        request: RequestId,
    },
    FetchPageRequest {
        url: String,
        request: RequestId,
    },
    FetchPageFailure {
        error: String,
        request: RequestId,
    },
    /// Only `books` and `next_page_url` of `page` are used.
    LoadPage {
        page: Collection,
        request: RequestId,
    },
    LoadSearchDescription {
        url: String,
        search_data: SearchData,
    },
    CloseError,
    ClearCollection,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::FetchCollectionRequest { .. } => "FETCH_COLLECTION_REQUEST",
            Action::FetchCollectionFailure { .. } => "FETCH_COLLECTION_FAILURE",
            Action::LoadCollection { .. } => "LOAD_COLLECTION",
            Action::FetchPageRequest { .. } => "FETCH_PAGE_REQUEST",
            Action::FetchPageFailure { .. } => "FETCH_PAGE_FAILURE",
            Action::LoadPage { .. } => "LOAD_PAGE",
            Action::LoadSearchDescription { .. } => "LOAD_SEARCH_DESCRIPTION",
            Action::CloseError => "CLOSE_ERROR",
            Action::ClearCollection => "CLEAR_COLLECTION",
        }
    }
}
