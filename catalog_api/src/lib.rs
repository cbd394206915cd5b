//! Client for the catalog REST services: facet catalogs, brand lines and
//! collections, and SKU search.

pub mod api;
pub mod backend;
pub mod config;
pub mod http_utils;
pub mod wire;

pub use backend::CatalogBackend;
pub use config::CatalogApiConfig;
pub use http_utils::HttpCatalogBackend;
