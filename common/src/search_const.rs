//! Search constants shared by the client and the request builder.

pub const PAGE_SIZE: u64 = 24;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Preference key for the original-vs-background-removed image toggle.
pub const SHOW_ORIGINAL_IMAGE_KEY: &str = "wardrobe.showOriginalImage";
