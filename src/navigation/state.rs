use serde::{Deserialize, Serialize};

use super::action::RequestId;
use crate::domain::Collection;

/// Label of the breadcrumb synthesized for a catalog's root.
pub const CATALOG_ROOT_LABEL: &str = "Catalog";

/// One breadcrumb. The synthesized catalog root has no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Option<String>,
    pub text: String,
    pub url: String,
}

impl HistoryEntry {
    pub fn catalog_root(url: &str) -> Self {
        Self {
            id: None,
            text: CATALOG_ROOT_LABEL.to_string(),
            url: url.to_string(),
        }
    }

    pub fn for_collection(collection: &Collection) -> Self {
        Self {
            id: Some(collection.id.clone()),
            text: collection.title.clone(),
            url: collection.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub url: Option<String>,
    pub data: Option<Collection>,
    pub is_fetching: bool,
    pub is_fetching_page: bool,
    pub page_url: Option<String>,
    pub error: Option<String>,
    /// Root first.
    pub history: Vec<HistoryEntry>,
    /// Latest collection fetch issued; older completions are ignored.
    pub collection_request: Option<RequestId>,
    pub page_request: Option<RequestId>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn breadcrumbs(&self) -> String {
        self.history
            .iter()
            .map(|h| h.text.as_str())
            .chain(self.data.as_ref().map(|d| d.title.as_str()))
            .collect::<Vec<_>>()
            .join(" > ")
    }
}
