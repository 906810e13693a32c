pub mod book;
pub mod collection;
pub mod facet;
pub mod search;

pub use book::Book;
pub use collection::{Collection, Lane, Link};
pub use facet::{Facet, FacetGroup};
pub use search::{SearchData, SearchLink};
