//! Faceted filter state for the wardrobe catalog, independent of any UI
//! toolkit: selection store, dependent facets, availability narrowing and a
//! debounced search session.

pub mod availability;
pub mod dependent_options;
pub mod facet_section;
pub mod hierarchy;
pub mod preferences;
pub mod search_session;
pub mod store;
pub mod url_param;

pub use availability::{Availability, AvailabilityFilter};
pub use facet_section::{FacetSection, SectionOption, facet_section, facet_sections};
pub use hierarchy::{APPAREL_HIERARCHY, DependentFacetResolver};
pub use search_session::{SearchSession, SearchView};
pub use store::FacetStateStore;
pub use url_param::{SessionSnapshot, StateParseError, UrlParam};
