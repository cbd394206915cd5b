//! Debounced search driven by filter mutations.
//!
//! Every mutation cancels the pending timer and schedules a new one carrying
//! the latest state. Once a timer fires its request gets the next sequence
//! number, and its response is applied only if no newer request has been
//! issued meanwhile. Requests already in flight are not aborted.

use std::{
    collections::BTreeSet,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use catalog_api::{CatalogApiConfig, CatalogBackend};
use common::{
    available_facets::AvailableFacetSet,
    facet_key::FacetKey,
    facet_option::FacetCatalog,
    filter_selection::FacetValue,
    search_query::SearchQuery,
    search_result::SkuSummary,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{
    dependent_options::{DependentOptions, DependentOptionsFetcher},
    facet_section::{FacetSection, facet_sections},
    hierarchy::DependentFacetResolver,
    store::FacetStateStore,
    url_param::SessionSnapshot,
};


#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchView {
    pub items: Vec<SkuSummary>,
    pub total: u64,
    pub available_facets: Option<AvailableFacetSet>,
    /// Set when the latest request failed; the items are the last good ones.
    pub error: Option<String>,
    pub loading: bool,
    pub applied_seq: u64,
}

struct SearchRunner<B: CatalogBackend + 'static> {
    backend: Arc<B>,
    latest_seq: Arc<AtomicU64>,
    view: Arc<watch::Sender<SearchView>>,
}

impl<B: CatalogBackend + 'static> Clone for SearchRunner<B> {
    fn clone(&self) -> Self {
        Self { backend: self.backend.clone(), latest_seq: self.latest_seq.clone(), view: self.view.clone() }
    }
}

impl<B: CatalogBackend + 'static> SearchRunner<B> {
    async fn run(self, query: SearchQuery) {
        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("search #{} issued: {}", seq, query.to_query_string());
        let result = self.backend.search(&query).await;

        let latest_seq = self.latest_seq;
        self.view.send_if_modified(|view| {
            if latest_seq.load(Ordering::SeqCst) != seq || seq <= view.applied_seq {
                tracing::debug!("search #{} superseded, response dropped", seq);
                return false;
            }
            match result {
                Ok(response) => {
                    tracing::info!("search #{} applied: {} items of {}", seq, response.items.len(), response.total);
                    view.items = response.items;
                    view.total = response.total;
                    view.available_facets = response.available_facets;
                    view.error = None;
                }
                Err(e) => {
                    tracing::error!("search #{} failed: {:#}", seq, e);
                    view.error = Some(format!("{:#}", e));
                }
            }
            view.loading = false;
            view.applied_seq = seq;
            true
        });
    }
}

pub struct SearchSession<B: CatalogBackend + 'static> {
    store: FacetStateStore,
    page: u64,
    page_size: u64,
    debounce: Duration,
    pending: Option<CancellationToken>,
    runner: SearchRunner<B>,
    dependents: DependentOptionsFetcher<B>,
    resolver: DependentFacetResolver,
}

impl<B: CatalogBackend + 'static> SearchSession<B> {
    pub fn new(backend: Arc<B>, config: &CatalogApiConfig) -> Self {
        Self::with_store(backend, config, FacetStateStore::new())
    }

    /// Starts from a pre-populated store, e.g. one with locked facets.
    /// Must be called inside a tokio runtime when the store already selects brands.
    pub fn with_store(backend: Arc<B>, config: &CatalogApiConfig, store: FacetStateStore) -> Self {
        let (view, _) = watch::channel(SearchView::default());
        let runner = SearchRunner { backend: backend.clone(), latest_seq: Arc::new(AtomicU64::new(0)), view: Arc::new(view) };
        let mut session = Self {
            store,
            page: 0,
            page_size: config.page_size,
            debounce: config.debounce,
            pending: None,
            runner,
            dependents: DependentOptionsFetcher::new(backend),
            resolver: DependentFacetResolver::default(),
        };
        session.sync_brand_options();
        session
    }

    pub fn store(&self) -> &FacetStateStore {
        &self.store
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            query_string: self.store.search_term().to_string(),
            selection: self.store.selection().clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn view(&self) -> SearchView {
        self.runner.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.runner.view.subscribe()
    }

    pub fn dependent_options(&self) -> DependentOptions {
        self.dependents.current()
    }

    pub fn subscribe_dependent_options(&self) -> watch::Receiver<DependentOptions> {
        self.dependents.subscribe()
    }

    pub fn set_single(&mut self, key: &str, value: Option<&str>) -> bool {
        let changed = self.store.set_single(key, value);
        self.after_filter_change(changed)
    }

    pub fn toggle_multi(&mut self, key: &str, value: &str) -> bool {
        let changed = self.store.toggle_multi(key, value);
        self.after_filter_change(changed)
    }

    pub fn clear_facet(&mut self, key: &str) -> bool {
        let changed = self.store.clear_facet(key);
        self.after_filter_change(changed)
    }

    pub fn clear_all(&mut self, except: &BTreeSet<FacetKey>) -> bool {
        let changed = self.store.clear_all(except);
        self.after_filter_change(changed)
    }

    pub fn set_price_range(&mut self, min: Option<&str>, max: Option<&str>) -> bool {
        let changed = self.store.set_price_range(min, max);
        self.after_filter_change(changed)
    }

    pub fn set_search_term(&mut self, term: &str) -> bool {
        let changed = self.store.set_search_term(term);
        self.after_filter_change(changed)
    }

    pub fn lock(&mut self, key: FacetKey, value: FacetValue) -> bool {
        let changed = self.store.lock(key, value);
        self.after_filter_change(changed)
    }

    pub fn set_page(&mut self, page: u64) -> bool {
        if page == self.page {
            return false;
        }
        self.page = page;
        self.schedule_search();
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            selection: self.store.selection().clone(),
            search_term: self.store.search_term().to_string(),
            page: self.page,
        }
    }

    /// Applies a shared snapshot; locked facets keep their pinned values.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> bool {
        let changed = self.store.replace(snapshot.selection, &snapshot.search_term);
        if !changed && snapshot.page == self.page {
            return false;
        }
        self.page = snapshot.page;
        self.sync_brand_options();
        self.schedule_search();
        true
    }

    /// Searches right away, superseding any pending timer.
    pub fn refresh(&mut self) {
        self.cancel_pending();
        self.mark_loading();
        let query = self.query();
        tokio::spawn(self.runner.clone().run(query));
    }

    /// Filter sections for the current selection and last applied results.
    pub fn sections(&self, catalog: &FacetCatalog, keys: &[FacetKey]) -> Vec<FacetSection> {
        let catalog = self.dependents.current().merged_into(catalog);
        let view = self.runner.view.borrow();
        facet_sections(&catalog, self.store.selection(), view.available_facets.as_ref(), &self.resolver, keys)
    }

    fn after_filter_change(&mut self, changed: bool) -> bool {
        if !changed {
            return false;
        }
        self.page = 0;
        self.sync_brand_options();
        self.schedule_search();
        true
    }

    fn sync_brand_options(&mut self) {
        let brand_ids = self
            .store
            .selection()
            .selected_values(FacetKey::BrandId)
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        self.dependents.brands_changed(brand_ids);
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    fn mark_loading(&self) {
        self.runner.view.send_if_modified(|view| !std::mem::replace(&mut view.loading, true));
    }

    fn schedule_search(&mut self) {
        self.cancel_pending();
        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        self.mark_loading();

        let query = self.query();
        let delay = self.debounce;
        let runner = self.runner.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!("debounced search replaced before firing");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }
            runner.run(query).await;
        });
    }
}

impl<B: CatalogBackend + 'static> Drop for SearchSession<B> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
