use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetGroup {
    pub label: String,
    pub facets: Vec<Facet>,
}

impl FacetGroup {
    pub fn new(label: String) -> Self {
        Self {
            label,
            facets: Vec::new(),
        }
    }

    pub fn active_facet(&self) -> Option<&Facet> {
        self.facets.iter().find(|f| f.active)
    }
}
