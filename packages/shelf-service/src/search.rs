use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use shelf_domain::{CatalogItem, Predicate};

use crate::{ServiceResult, ShelfService, storage_error};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
	#[serde(default)]
	pub q: String,
	pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
	pub results: Vec<CatalogItem>,
	pub count: usize,
	pub query: String,
}

impl ShelfService {
	/// Search never fails on bad input: an empty query degrades to the full
	/// catalog in store order, an unknown category filter to an empty list.
	pub async fn search(&self, request: SearchRequest) -> ServiceResult<SearchResponse> {
		let query = request.q.trim();
		let folded = query.to_lowercase();
		let predicate = Predicate::parse(&folded);
		let matched = self.store.find_matching(&predicate).await.map_err(storage_error)?;
		let matched = dedupe_by_id(matched);
		let mut results =
			if predicate.is_match_all() { matched } else { rank(matched, &folded) };

		if let Some(filter) = request.category.as_deref().filter(|filter| !filter.is_empty()) {
			results.retain(|item| {
				item.category.as_ref().map(|category| category.id.to_string() == filter)
					== Some(true)
			});
		}

		Ok(SearchResponse { count: results.len(), query: query.to_string(), results })
	}
}

/// Tiered relevance order for a non-empty query: name-prefix matches first,
/// then name-contains matches, then items that matched only through
/// description, category, or parameters.
fn rank(matched: Vec<CatalogItem>, folded_query: &str) -> Vec<CatalogItem> {
	let mut prefix: Vec<CatalogItem> = Vec::new();
	let mut contains: Vec<CatalogItem> = Vec::new();
	let mut other: Vec<CatalogItem> = Vec::new();

	for item in matched {
		let name = item.name.to_lowercase();

		if name.starts_with(folded_query) {
			// Front insertion is deliberate: the last prefix match in scan
			// order ranks first, matching the long-standing behavior the
			// storefront was built against.
			prefix.insert(0, item);
		} else if name.contains(folded_query) {
			contains.push(item);
		} else {
			other.push(item);
		}
	}

	prefix.into_iter().chain(contains).chain(other).collect()
}

fn dedupe_by_id(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
	let mut seen = HashSet::new();

	items.into_iter().filter(|item| seen.insert(item.id)).collect()
}
