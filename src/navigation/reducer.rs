use super::action::{Action, RequestId};
use super::state::{HistoryEntry, NavigationState};
use crate::domain::{Collection, SearchLink};

/// Fold one action into the navigation state, returning the next state.
///
/// Completions that belong to a request older than the latest one issued are
/// dropped, as are failures and pages that arrive when nothing is in flight.
/// A page requested before the latest collection request belongs to a
/// collection that is no longer current and is dropped too.
pub fn reduce(state: NavigationState, action: Action) -> NavigationState {
    tracing::debug!("Reducing {}", action.name());

    match action {
        Action::FetchCollectionRequest { url, request } => NavigationState {
            url: Some(url),
            is_fetching: true,
            collection_request: Some(request),
            ..state
        },

        Action::FetchCollectionFailure { error, request } => {
            if !state.is_fetching || is_stale(state.collection_request, request) {
                tracing::debug!("Ignoring collection failure for request {}", request.value());
                return state;
            }
            NavigationState {
                is_fetching: false,
                error: Some(error),
                ..state
            }
        }

        Action::LoadCollection {
            collection,
            url,
            request,
        } => {
            if is_stale(state.collection_request, request) {
                tracing::debug!("Ignoring stale collection {} for request {}", url, request.value());
                return state;
            }
            let history = next_history(&state.history, state.data.as_ref(), &collection, &url);
            NavigationState {
                url: Some(url),
                data: Some(collection),
                is_fetching: false,
                is_fetching_page: false,
                page_url: None,
                error: None,
                history,
                ..state
            }
        }

        Action::FetchPageRequest { url, request } => NavigationState {
            is_fetching_page: true,
            page_url: Some(url),
            page_request: Some(request),
            ..state
        },

        Action::FetchPageFailure { error, request } => {
            if !state.is_fetching_page || is_stale_page(&state, request) {
                tracing::debug!("Ignoring page failure for request {}", request.value());
                return state;
            }
            NavigationState {
                is_fetching_page: false,
                error: Some(error),
                ..state
            }
        }

        Action::LoadPage { page, request } => {
            if !state.is_fetching_page || is_stale_page(&state, request) {
                tracing::debug!("Ignoring page for request {}", request.value());
                return state;
            }
            let data = state.data.map(|data| {
                let mut books = data.books;
                books.extend(page.books);
                Collection {
                    books,
                    next_page_url: page.next_page_url,
                    ..data
                }
            });
            NavigationState {
                is_fetching_page: false,
                data,
                ..state
            }
        }

        Action::LoadSearchDescription { url, search_data } => {
            if state.data.is_none() {
                tracing::debug!("Ignoring search description {} with no collection loaded", url);
                return state;
            }
            let data = state.data.map(|data| {
                let search = match data.search {
                    Some(search) => SearchLink {
                        search_data: Some(search_data),
                        ..search
                    },
                    None => SearchLink {
                        url,
                        search_data: Some(search_data),
                    },
                };
                Collection {
                    search: Some(search),
                    ..data
                }
            });
            NavigationState { data, ..state }
        }

        Action::CloseError => NavigationState {
            error: None,
            ..state
        },

        Action::ClearCollection => NavigationState {
            url: None,
            data: None,
            ..state
        },
    }
}

fn is_stale(latest: Option<RequestId>, request: RequestId) -> bool {
    latest.is_some_and(|latest| request < latest)
}

fn is_stale_page(state: &NavigationState, request: RequestId) -> bool {
    is_stale(state.page_request, request) || is_stale(state.collection_request, request)
}

/// Back-stack after loading `incoming` from `url`.
///
/// In order: a reload of the same node (same id or title) keeps history; the
/// catalog root itself or a different catalog clears it; a URL already in
/// history truncates back to just before it; anything else pushes the
/// previous collection. Finally the catalog root is put first unless it is
/// already there or is the page being loaded.
fn next_history(
    history: &[HistoryEntry],
    previous: Option<&Collection>,
    incoming: &Collection,
    url: &str,
) -> Vec<HistoryEntry> {
    let root = incoming.catalog_root_url.as_deref();

    let mut next = match previous {
        None => history.to_vec(),
        Some(previous) => {
            if previous.id == incoming.id || previous.title == incoming.title {
                return history.to_vec();
            }

            if root == Some(url) || root != previous.catalog_root_url.as_deref() {
                Vec::new()
            } else if let Some(pos) = history.iter().position(|h| h.url == url) {
                history[..pos].to_vec()
            } else {
                let mut next = history.to_vec();
                if next.last().map(|h| h.url.as_str()) != Some(previous.url.as_str()) {
                    next.push(HistoryEntry::for_collection(previous));
                }
                next
            }
        }
    };

    if let Some(root) = root {
        let root_first = next.first().is_some_and(|h| h.url == root);
        if root != url && !root_first {
            next.insert(0, HistoryEntry::catalog_root(root));
        }
    }

    next
}
