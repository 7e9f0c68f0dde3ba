use std::{collections::BTreeMap, sync::Arc};

use time::macros::datetime;

use shelf_config::{
	ComparatorProviderConfig, Config, Postgres, Providers, Service, Storage,
};
use shelf_domain::{CatalogItem, CategoryRef, ItemProjection, Language, Predicate};
use shelf_service::{
	BoxFuture, CatalogStore, CompareRequest, ComparatorProvider, SearchRequest, ServiceError,
	ShelfService,
};

fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage {
			postgres: Postgres {
				dsn: "postgres://unused".to_string(),
				pool_max_conns: 1,
			},
		},
		providers: Providers {
			comparator: ComparatorProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/chat/completions".to_string(),
				model: "test-model".to_string(),
				temperature: 0.0,
				timeout_ms: 1_000,
				default_headers: serde_json::Map::new(),
			},
		},
	}
}

fn item(id: i64, name: &str, category: Option<(i64, &str)>, day: u8) -> CatalogItem {
	CatalogItem {
		id,
		name: name.to_string(),
		description: Some(format!("{name} description")),
		parameters: BTreeMap::from([("Protocol".to_string(), "EPC Gen2".to_string())]),
		category: category.map(|(id, name)| CategoryRef { id, name: name.to_string() }),
		created_at: datetime!(2025-06-01 00:00:00 UTC) + time::Duration::days(i64::from(day)),
	}
}

/// In-memory store double. Items are held newest-first, matching the real
/// store's default order; `find_matching` evaluates the predicate through
/// its reference semantics.
struct MemoryStore {
	items: Vec<CatalogItem>,
}
impl MemoryStore {
	fn new(mut items: Vec<CatalogItem>) -> Self {
		items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

		Self { items }
	}
}

impl CatalogStore for MemoryStore {
	fn find_matching<'a>(
		&'a self,
		predicate: &'a Predicate,
	) -> BoxFuture<'a, color_eyre::Result<Vec<CatalogItem>>> {
		Box::pin(async move {
			Ok(self.items.iter().filter(|item| predicate.matches(item)).cloned().collect())
		})
	}

	fn find_by_ids<'a>(
		&'a self,
		ids: &'a [i64],
	) -> BoxFuture<'a, color_eyre::Result<Vec<CatalogItem>>> {
		Box::pin(async move {
			Ok(self.items.iter().filter(|item| ids.contains(&item.id)).cloned().collect())
		})
	}
}

/// Store double that reports the same item once per matching token branch,
/// the way a disjunctive query can.
struct DuplicatingStore {
	inner: MemoryStore,
}

impl CatalogStore for DuplicatingStore {
	fn find_matching<'a>(
		&'a self,
		predicate: &'a Predicate,
	) -> BoxFuture<'a, color_eyre::Result<Vec<CatalogItem>>> {
		Box::pin(async move {
			let mut out = Vec::new();
			for item in &self.inner.items {
				if predicate.matches(item) {
					out.push(item.clone());
					out.push(item.clone());
				}
			}
			Ok(out)
		})
	}

	fn find_by_ids<'a>(
		&'a self,
		ids: &'a [i64],
	) -> BoxFuture<'a, color_eyre::Result<Vec<CatalogItem>>> {
		self.inner.find_by_ids(ids)
	}
}

struct FailingComparator;

impl ComparatorProvider for FailingComparator {
	fn compare<'a>(
		&'a self,
		_cfg: &'a ComparatorProviderConfig,
		_items: &'a [ItemProjection],
		_language: Language,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(async { Err(color_eyre::eyre::eyre!("quota exceeded")) })
	}
}

struct StaticComparator {
	reply: String,
}

impl ComparatorProvider for StaticComparator {
	fn compare<'a>(
		&'a self,
		_cfg: &'a ComparatorProviderConfig,
		_items: &'a [ItemProjection],
		_language: Language,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(async { Ok(self.reply.clone()) })
	}
}

fn catalog() -> Vec<CatalogItem> {
	vec![
		item(1, "UHF Reader R500", Some((10, "Readers")), 1),
		item(2, "Handheld UHF Reader", Some((10, "Readers")), 2),
		item(3, "Fixed Gate Reader", Some((10, "Readers")), 3),
		item(4, "On-metal Tag", Some((20, "Tags")), 4),
		item(5, "UHF Reader R700", Some((10, "Readers")), 5),
	]
}

fn service_with(store: Arc<dyn CatalogStore>, comparator: Arc<dyn ComparatorProvider>) -> ShelfService {
	ShelfService::with_parts(test_config(), store, comparator)
}

fn search_service() -> ShelfService {
	service_with(Arc::new(MemoryStore::new(catalog())), Arc::new(FailingComparator))
}

#[tokio::test]
async fn empty_query_returns_full_catalog_in_store_order() {
	let response = search_service()
		.search(SearchRequest { q: "   ".to_string(), category: None })
		.await
		.expect("search failed");
	let ids: Vec<i64> = response.results.iter().map(|item| item.id).collect();

	// Newest first, no tiering.
	assert_eq!(ids, vec![5, 4, 3, 2, 1]);
	assert_eq!(response.count, 5);
	assert_eq!(response.query, "");
}

#[tokio::test]
async fn prefix_tier_ranks_before_contains_tier_before_other() {
	let response = search_service()
		.search(SearchRequest { q: "uhf reader".to_string(), category: None })
		.await
		.expect("search failed");
	let ids: Vec<i64> = response.results.iter().map(|item| item.id).collect();

	// Store order is 5, 2, 1. Prefix matches (5, 1) are front-inserted so
	// the last one scanned ranks first; 2 contains the query elsewhere.
	assert_eq!(ids, vec![1, 5, 2]);
}

#[tokio::test]
async fn items_matching_only_outside_the_name_land_in_the_last_tier() {
	// "gen2" only matches parameter values; "reader" matches names.
	let response = search_service()
		.search(SearchRequest { q: "gen2".to_string(), category: None })
		.await
		.expect("search failed");

	assert_eq!(response.count, 5);

	// Nothing has "gen2" in its name, so store order survives tiering.
	let ids: Vec<i64> = response.results.iter().map(|item| item.id).collect();
	assert_eq!(ids, vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn results_never_contain_duplicate_identifiers() {
	let store = DuplicatingStore { inner: MemoryStore::new(catalog()) };
	let response = service_with(Arc::new(store), Arc::new(FailingComparator))
		.search(SearchRequest { q: "reader".to_string(), category: None })
		.await
		.expect("search failed");
	let mut ids: Vec<i64> = response.results.iter().map(|item| item.id).collect();

	ids.sort_unstable();
	ids.dedup();
	assert_eq!(ids.len(), response.count);
}

#[tokio::test]
async fn category_filter_applies_after_ranking_and_preserves_order() {
	let response = search_service()
		.search(SearchRequest { q: "uhf reader".to_string(), category: Some("10".to_string()) })
		.await
		.expect("search failed");
	let ids: Vec<i64> = response.results.iter().map(|item| item.id).collect();

	assert_eq!(ids, vec![1, 5, 2]);

	let none = search_service()
		.search(SearchRequest { q: "uhf reader".to_string(), category: Some("99".to_string()) })
		.await
		.expect("search failed");

	assert_eq!(none.count, 0);
}

#[tokio::test]
async fn empty_query_with_category_filter_keeps_store_order() {
	let response = search_service()
		.search(SearchRequest { q: String::new(), category: Some("10".to_string()) })
		.await
		.expect("search failed");
	let ids: Vec<i64> = response.results.iter().map(|item| item.id).collect();

	assert_eq!(ids, vec![5, 3, 2, 1]);
}

#[tokio::test]
async fn search_echoes_the_trimmed_original_query() {
	let response = search_service()
		.search(SearchRequest { q: "  UHF Reader  ".to_string(), category: None })
		.await
		.expect("search failed");

	assert_eq!(response.query, "UHF Reader");
}

#[tokio::test]
async fn comparing_one_item_is_rejected_with_a_localized_message() {
	let service = search_service();
	let err = service
		.compare(CompareRequest { product_ids: vec![1], language: Language::En })
		.await
		.expect_err("expected validation error");

	match err {
		ServiceError::InvalidRequest { message } => {
			assert_eq!(message, "At least 2 products are required for comparison.");
		},
		other => panic!("unexpected error: {other:?}"),
	}

	let err = service
		.compare(CompareRequest { product_ids: vec![1], language: Language::Vi })
		.await
		.expect_err("expected validation error");

	match err {
		ServiceError::InvalidRequest { message } => {
			assert_eq!(message, "Cần ít nhất 2 sản phẩm để so sánh.");
		},
		other => panic!("unexpected error: {other:?}"),
	}
}

#[tokio::test]
async fn comparing_four_items_is_rejected() {
	let err = search_service()
		.compare(CompareRequest { product_ids: vec![1, 2, 3, 4], language: Language::En })
		.await
		.expect_err("expected validation error");

	match err {
		ServiceError::InvalidRequest { message } => {
			assert_eq!(message, "A maximum of 3 products can be compared.");
		},
		other => panic!("unexpected error: {other:?}"),
	}
}

#[tokio::test]
async fn an_unknown_identifier_is_a_not_found_error() {
	let err = search_service()
		.compare(CompareRequest { product_ids: vec![1, 2, 999], language: Language::En })
		.await
		.expect_err("expected not-found error");

	assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[tokio::test]
async fn a_failing_comparator_degrades_to_the_deterministic_fallback() {
	let service = search_service();
	let request = || CompareRequest { product_ids: vec![1, 4], language: Language::En };
	let response = service.compare(request()).await.expect("compare failed");

	assert!(response.success);
	assert!(!response.ai_powered);
	assert_eq!(response.products_count, 2);
	assert_eq!(
		response.warning.as_deref(),
		Some("Using basic analysis (AI is temporarily unavailable).")
	);
	assert!(response.error_detail.is_some());
	assert!(!response.comparison.overall.is_empty());
	assert!(!response.comparison.quality.is_empty());
	assert!(!response.comparison.performance.is_empty());
	assert!(!response.comparison.integration.is_empty());
	assert!(!response.comparison.recommendation.is_empty());
	assert_eq!(
		response.comparison.overall,
		"Comparing 2 products in the following categories: Readers, Tags."
	);

	let again = service.compare(request()).await.expect("compare failed");

	assert_eq!(again.comparison, response.comparison);
}

#[tokio::test]
async fn a_fenced_json_reply_is_parsed_exactly() {
	let reply = "Here is the comparison:\n```json\n{\
		\"overall\": \"R500 wins overall\",\
		\"quality\": \"Both industrial grade\",\
		\"performance\": \"R500 reads further\",\
		\"integration\": \"Tag needs no setup\",\
		\"recommendation\": \"R500 for gates\"}\n```";
	let service = service_with(
		Arc::new(MemoryStore::new(catalog())),
		Arc::new(StaticComparator { reply: reply.to_string() }),
	);
	let response = service
		.compare(CompareRequest { product_ids: vec![1, 4], language: Language::En })
		.await
		.expect("compare failed");

	assert!(response.ai_powered);
	assert!(response.warning.is_none());
	assert_eq!(response.comparison.overall, "R500 wins overall");
	assert_eq!(response.comparison.recommendation, "R500 for gates");
}

#[tokio::test]
async fn an_unparseable_reply_keeps_the_raw_text_as_best_effort() {
	let raw = "The R500 is generally the stronger choice for fixed installations.";
	let service = service_with(
		Arc::new(MemoryStore::new(catalog())),
		Arc::new(StaticComparator { reply: raw.to_string() }),
	);
	let response = service
		.compare(CompareRequest { product_ids: vec![1, 4], language: Language::En })
		.await
		.expect("compare failed");

	assert!(response.ai_powered);
	assert!(response.warning.is_none());
	assert_eq!(response.comparison.overall, raw);
	assert_eq!(response.comparison.quality, Language::En.comparison_text().quality);
}

#[tokio::test]
async fn duplicate_identifiers_resolve_short_and_are_rejected_as_not_found() {
	let err = search_service()
		.compare(CompareRequest { product_ids: vec![1, 1], language: Language::En })
		.await
		.expect_err("expected not-found error");

	assert!(matches!(err, ServiceError::NotFound { .. }));
}
