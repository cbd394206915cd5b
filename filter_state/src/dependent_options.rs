//! Brand lines and collections, refetched whenever the brand selection
//! changes. Runs independently of the main search; stale responses are
//! dropped by sequence number.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use catalog_api::CatalogBackend;
use common::{
    facet_key::FacetKey,
    facet_option::{FacetCatalog, FacetOption},
};
use tokio::sync::watch;


#[derive(Debug, Clone, PartialEq, Default)]
pub struct DependentOptions {
    pub brand_ids: Vec<String>,
    pub lines: Vec<FacetOption>,
    pub collections: Vec<FacetOption>,
    pub applied_seq: u64,
}

impl DependentOptions {
    /// Adds lines and collections to a copy of `catalog`.
    pub fn merged_into(&self, catalog: &FacetCatalog) -> FacetCatalog {
        let mut merged = catalog.clone();
        merged.insert(FacetKey::LineId, self.lines.clone());
        merged.insert(FacetKey::Collection, self.collections.clone());
        merged
    }
}

pub(crate) struct DependentOptionsFetcher<B: CatalogBackend + 'static> {
    backend: Arc<B>,
    latest_seq: Arc<AtomicU64>,
    requested: Vec<String>,
    options: Arc<watch::Sender<DependentOptions>>,
}

impl<B: CatalogBackend + 'static> DependentOptionsFetcher<B> {
    pub(crate) fn new(backend: Arc<B>) -> Self {
        let (options, _) = watch::channel(DependentOptions::default());
        Self { backend, latest_seq: Arc::new(AtomicU64::new(0)), requested: Vec::new(), options: Arc::new(options) }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<DependentOptions> {
        self.options.subscribe()
    }

    pub(crate) fn current(&self) -> DependentOptions {
        self.options.borrow().clone()
    }

    /// Skips the request when the same brands are already applied or already
    /// in flight. A fully failed fetch leaves `brand_ids` untouched, so asking
    /// for the same brands again retries.
    pub(crate) fn brands_changed(&mut self, brand_ids: Vec<String>) {
        let up_to_date = {
            let current = self.options.borrow();
            if self.latest_seq.load(Ordering::SeqCst) != current.applied_seq {
                brand_ids == self.requested
            } else {
                brand_ids == current.brand_ids
            }
        };
        if up_to_date {
            return;
        }
        self.requested = brand_ids.clone();
        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;

        if brand_ids.is_empty() {
            self.options.send_modify(|options| {
                *options = DependentOptions { applied_seq: seq, ..DependentOptions::default() };
            });
            return;
        }

        let backend = self.backend.clone();
        let latest_seq = self.latest_seq.clone();
        let options = self.options.clone();
        tokio::spawn(async move {
            let (lines, collections) = tokio::join!(backend.brand_lines(&brand_ids), backend.brand_collections(&brand_ids));
            options.send_if_modified(|current| {
                if latest_seq.load(Ordering::SeqCst) != seq {
                    tracing::debug!("discarding stale brand options #{}", seq);
                    return false;
                }
                current.applied_seq = seq;
                let mut loaded = false;
                match lines {
                    Ok(lines) => {
                        current.lines = lines;
                        loaded = true;
                    }
                    Err(e) => tracing::warn!("failed to load lines for brands {:?}: {:#}", brand_ids, e),
                }
                match collections {
                    Ok(collections) => {
                        current.collections = collections;
                        loaded = true;
                    }
                    Err(e) => tracing::warn!("failed to load collections for brands {:?}: {:#}", brand_ids, e),
                }
                if !loaded {
                    return false;
                }
                current.brand_ids = brand_ids;
                true
            });
        });
    }
}
