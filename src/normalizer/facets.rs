use super::resolve::UrlResolver;
use crate::domain::{Facet, FacetGroup};
use crate::opds::{rel, OpdsLink};

/// Partition feed-level facet links into groups keyed by `facetGroup`.
///
/// Groups appear in the order their label is first seen and facets keep link
/// order within a group. A facet without `activeFacet` is inactive; a facet
/// link without a group produces nothing.
pub fn group_facets(links: &[OpdsLink], resolver: &UrlResolver) -> Vec<FacetGroup> {
    let mut groups: Vec<FacetGroup> = Vec::new();

    for link in links.iter().filter(|l| l.has_rel(rel::FACET)) {
        let Some(group_label) = link.facet_group.as_deref() else {
            tracing::debug!("Ignoring facet link {} without a facet group", link.href);
            continue;
        };

        let facet = Facet {
            label: link.title.clone().unwrap_or_else(|| link.href.clone()),
            href: resolver.resolve(&link.href),
            active: link.active_facet.unwrap_or(false),
        };

        match groups.iter_mut().find(|g| g.label == group_label) {
            Some(group) => group.facets.push(facet),
            None => {
                let mut group = FacetGroup::new(group_label.to_string());
                group.facets.push(facet);
                groups.push(group);
            }
        }
    }

    groups
}
