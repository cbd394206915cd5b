//! Endpoint wrappers, one module per service.

pub mod brand_options;
pub mod facet_catalog;
pub mod search;
