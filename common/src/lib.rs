//! Common library exports shared between the catalog client and the filter state.

extern crate serde;


pub mod facet_key;
pub mod facet_option;
pub mod filter_selection;
pub mod available_facets;
pub mod search_query;
pub mod search_result;
pub mod search_const;
