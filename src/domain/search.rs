use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const SEARCH_TERMS_PLACEHOLDER: &str = "{searchTerms}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchLink {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_data: Option<SearchData>,
}

impl SearchLink {
    pub fn new(url: String) -> Self {
        Self {
            url,
            search_data: None,
        }
    }
}

/// Contents of an OpenSearch description document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    pub description: String,
    pub short_name: String,
    /// URL template containing a `{searchTerms}` placeholder.
    pub template: String,
}

impl SearchData {
    /// Build a search URL for `terms`, form-encoding them into the template.
    pub fn url_for(&self, terms: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(terms.as_bytes()).collect();
        self.template.replace(SEARCH_TERMS_PLACEHOLDER, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(template: &str) -> SearchData {
        SearchData {
            description: "Search the catalog".into(),
            short_name: "Search".into(),
            template: template.into(),
        }
    }

    #[test]
    fn test_url_for_substitutes_terms() {
        let search = data("http://example.com/search?q={searchTerms}");
        assert_eq!(search.url_for("dune"), "http://example.com/search?q=dune");
    }

    #[test]
    fn test_url_for_encodes_terms() {
        let search = data("http://example.com/search?q={searchTerms}");
        assert_eq!(
            search.url_for("war & peace"),
            "http://example.com/search?q=war+%26+peace"
        );
    }

    #[test]
    fn test_url_for_without_placeholder_is_unchanged() {
        let search = data("http://example.com/search");
        assert_eq!(search.url_for("dune"), "http://example.com/search");
    }
}
