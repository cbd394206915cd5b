mod support;

use std::{collections::BTreeSet, sync::Arc, time::Duration};

use common::{
    facet_key::FacetKey,
    facet_option::{FacetCatalog, FacetOption},
    filter_selection::{FacetValue, FilterSelection},
};
use filter_state::{FacetStateStore, SearchSession, SessionSnapshot, UrlParam};
use support::{FakeCatalog, config, settle};

#[tokio::test(start_paused = true)]
async fn changes_within_the_debounce_window_issue_one_search() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());

    session.toggle_multi("colorId", "red");
    tokio::time::sleep(Duration::from_millis(100)).await;
    session.toggle_multi("sizeId", "M");
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(backend.search_count(), 0);

    settle().await;
    assert_eq!(backend.search_count(), 1);
    let view = session.view();
    assert_eq!(view.items[0].id, session.query().to_query_string());
    assert!(view.items[0].id.contains("colorId=red"));
    assert!(!view.loading);
}

#[tokio::test(start_paused = true)]
async fn late_response_of_a_superseded_search_is_dropped() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());

    session.set_search_term("slow coat");
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(backend.search_count(), 1);

    session.set_search_term("coat");
    tokio::time::sleep(Duration::from_millis(400)).await;
    let view = session.view();
    assert_eq!(view.items[0].id, "q=coat&page=0&limit=24");
    assert_eq!(view.applied_seq, 2);

    settle().await;
    assert_eq!(backend.search_count(), 2);
    let view = session.view();
    assert_eq!(view.items[0].id, "q=coat&page=0&limit=24");
    assert_eq!(view.applied_seq, 2);
}

#[tokio::test(start_paused = true)]
async fn failed_search_keeps_last_results_and_selection() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());

    session.set_search_term("linen");
    settle().await;
    let good = session.view();
    assert!(good.error.is_none());

    session.toggle_multi("sizeId", "S");
    session.set_search_term("fail");
    settle().await;
    let view = session.view();
    assert_eq!(view.items, good.items);
    assert!(view.error.as_deref().unwrap().contains("connection reset"));
    assert!(session.store().selection().is_selected(FacetKey::SizeId, "S"));

    session.set_search_term("linen");
    settle().await;
    assert!(session.view().error.is_none());
}

#[tokio::test(start_paused = true)]
async fn unchanged_mutations_do_not_search() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());

    assert!(!session.set_single("shoeSize", Some("42")));
    assert!(!session.clear_all(&BTreeSet::new()));
    assert!(!session.set_search_term(""));
    settle().await;
    assert_eq!(backend.search_count(), 0);

    session.refresh();
    settle().await;
    assert_eq!(backend.search_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn filter_changes_reset_pagination() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());

    assert!(session.set_page(3));
    settle().await;
    assert_eq!(backend.searches.lock().unwrap()[0].page, 3);

    session.toggle_multi("fitId", "slim");
    assert_eq!(session.page(), 0);
    settle().await;
    assert_eq!(backend.searches.lock().unwrap()[1].page, 0);
}

#[tokio::test(start_paused = true)]
async fn brand_selection_fetches_lines_and_drops_stale_ones() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());

    session.toggle_multi("brandId", "slow");
    tokio::time::sleep(Duration::from_millis(50)).await;
    session.toggle_multi("brandId", "b2");
    settle().await;

    let options = session.dependent_options();
    assert_eq!(options.brand_ids, vec!["b2".to_string(), "slow".to_string()]);
    let lines = options.lines.iter().map(|o| o.id.as_str()).collect::<Vec<_>>();
    assert_eq!(lines, vec!["b2-line", "slow-line"]);
    assert_eq!(backend.brand_request_count(), 2);

    session.clear_facet("brandId");
    settle().await;
    assert!(session.dependent_options().lines.is_empty());
    assert_eq!(backend.brand_request_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_collections_keep_previous_list() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());

    session.toggle_multi("brandId", "b1");
    settle().await;
    session.toggle_multi("brandId", "broken");
    settle().await;

    let options = session.dependent_options();
    assert_eq!(options.lines.len(), 2);
    let collections = options.collections.iter().map(|o| o.id.as_str()).collect::<Vec<_>>();
    assert_eq!(collections, vec!["b1-fw24"]);
}

#[tokio::test(start_paused = true)]
async fn locked_brand_page_survives_clear_all() {
    let backend = Arc::new(FakeCatalog::default());
    let mut store = FacetStateStore::new();
    store.lock(FacetKey::BrandId, FacetValue::Multi(BTreeSet::from(["b1".to_string()])));
    let mut session = SearchSession::with_store(backend.clone(), &config(), store);

    session.toggle_multi("colorId", "red");
    session.clear_all(&BTreeSet::new());
    assert!(!session.toggle_multi("brandId", "b1"));
    settle().await;

    assert_eq!(session.query().to_query_string(), "page=0&limit=24&brandId=b1");
    assert_eq!(session.dependent_options().brand_ids, vec!["b1".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn sections_use_the_latest_availability() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());
    let mut catalog = FacetCatalog::default();
    catalog.insert(FacetKey::SizeId, ["S", "M", "L"].iter().map(|s| FacetOption::new(*s, *s)).collect());

    let sections = session.sections(&catalog, &[FacetKey::SizeId, FacetKey::LineId]);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].option_ids(), vec!["S", "M", "L"]);

    session.toggle_multi("brandId", "b1");
    settle().await;
    let sections = session.sections(&catalog, &[FacetKey::SizeId, FacetKey::LineId]);
    assert_eq!(sections[0].option_ids(), vec!["S", "M"]);
    assert_eq!(sections[1].option_ids(), vec!["b1-line"]);
}

#[tokio::test(start_paused = true)]
async fn shared_link_restores_the_same_query() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());
    session.set_search_term("parka");
    session.toggle_multi("colorId", "olive");
    session.set_single("genderId", Some("w"));
    session.set_page(1);
    let token = UrlParam(session.snapshot()).to_string();

    let mut restored = SearchSession::new(backend.clone(), &config());
    let snapshot: UrlParam<SessionSnapshot> = token.parse().unwrap();
    assert!(restored.restore(snapshot.0));
    assert_eq!(restored.query(), session.query());

    let mut subscriber = restored.subscribe();
    settle().await;
    assert!(subscriber.has_changed().unwrap());
    assert_eq!(subscriber.borrow_and_update().items[0].id, restored.query().to_query_string());
}

#[tokio::test(start_paused = true)]
async fn failed_brand_fetch_is_retried_on_the_next_change() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());

    session.toggle_multi("brandId", "down");
    settle().await;
    let options = session.dependent_options();
    assert!(options.brand_ids.is_empty());
    assert!(options.lines.is_empty());
    assert_eq!(backend.brand_request_count(), 1);

    session.toggle_multi("colorId", "red");
    settle().await;
    assert_eq!(backend.brand_request_count(), 2);

    session.toggle_multi("colorId", "blue");
    session.toggle_multi("colorId", "blue");
    settle().await;
    assert_eq!(backend.brand_request_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn applied_brands_are_not_refetched() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());

    session.toggle_multi("brandId", "b1");
    session.toggle_multi("sizeId", "M");
    settle().await;
    session.toggle_multi("sizeId", "L");
    settle().await;
    assert_eq!(backend.brand_request_count(), 1);
    assert_eq!(session.dependent_options().brand_ids, vec!["b1".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn repeated_lock_does_not_search_again() {
    let backend = Arc::new(FakeCatalog::default());
    let mut session = SearchSession::new(backend.clone(), &config());
    let b1 = || FacetValue::Multi(BTreeSet::from(["b1".to_string()]));

    assert!(session.lock(FacetKey::BrandId, b1()));
    settle().await;
    assert_eq!(backend.search_count(), 1);
    session.set_page(2);
    settle().await;

    assert!(!session.lock(FacetKey::BrandId, b1()));
    assert!(!session.lock(FacetKey::SizeId, FacetValue::Multi(BTreeSet::new())));
    settle().await;
    assert_eq!(backend.search_count(), 2);
    assert_eq!(session.page(), 2);
}

#[tokio::test(start_paused = true)]
async fn restoring_a_tampered_link_keeps_only_valid_values() {
    let backend = Arc::new(FakeCatalog::default());
    let mut selection = FilterSelection::new();
    selection.insert(FacetKey::SizeId, FacetValue::Multi(BTreeSet::from([String::new()])));
    selection.insert(FacetKey::ColorId, FacetValue::Multi(BTreeSet::from([String::new(), "a,b".to_string(), "red".to_string()])));
    selection.insert(FacetKey::GenderId, FacetValue::Multi(BTreeSet::from(["w".to_string(), "m".to_string()])));
    let token = UrlParam(SessionSnapshot { selection, search_term: String::new(), page: 0 }).to_string();

    let raw: UrlParam<SessionSnapshot> = token.parse().unwrap();
    let mut session = SearchSession::new(backend.clone(), &config());
    assert!(session.restore(raw.0));
    assert!(!session.store().selection().contains_key(FacetKey::SizeId));
    assert_eq!(session.query().to_query_string(), "page=0&limit=24&colorId=red");

    let mut from_link = SearchSession::new(backend.clone(), &config());
    assert!(from_link.restore(SessionSnapshot::from_token(&token).unwrap()));
    assert_eq!(from_link.query(), session.query());

    settle().await;
    assert_eq!(session.view().items[0].id, "page=0&limit=24&colorId=red");
}
