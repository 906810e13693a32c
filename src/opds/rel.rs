//! Link relations and media-type markers used by OPDS catalogs.

pub const ACQUISITION: &str = "http://opds-spec.org/acquisition";
pub const OPEN_ACCESS: &str = "http://opds-spec.org/acquisition/open-access";
pub const BORROW: &str = "http://opds-spec.org/acquisition/borrow";

pub const IMAGE: &str = "http://opds-spec.org/image";
pub const THUMBNAIL: &str = "http://opds-spec.org/image/thumbnail";
/// Pre-1.0 spellings still emitted by older catalogs.
pub const LEGACY_THUMBNAIL: &str = "http://opds-spec.org/thumbnail";
pub const LEGACY_COVER: &str = "http://opds-spec.org/cover";

pub const FACET: &str = "http://opds-spec.org/facet";
pub const COLLECTION: &str = "collection";

pub const SEARCH: &str = "search";
pub const NEXT: &str = "next";
pub const START: &str = "start";
pub const SELF: &str = "self";
pub const ALTERNATE: &str = "alternate";

pub const KIND_ACQUISITION: &str = "kind=acquisition";
pub const KIND_NAVIGATION: &str = "kind=navigation";

/// True for the generic acquisition relation and every relation beneath it
/// (open-access, borrow, buy, sample, subscribe).
pub fn is_acquisition(rel: &str) -> bool {
    rel == ACQUISITION
        || rel
            .strip_prefix(ACQUISITION)
            .is_some_and(|rest| rest.starts_with('/'))
}
