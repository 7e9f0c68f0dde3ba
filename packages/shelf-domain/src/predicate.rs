use crate::item::CatalogItem;

/// A conjunction of per-token field disjunctions built from a free-text
/// query. Each token must match somewhere in the item (name, description,
/// category name, or any parameter value), each independently of the others.
/// Zero tokens means match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
	tokens: Vec<String>,
}
impl Predicate {
	/// Splits the case-folded query on whitespace. An empty or
	/// whitespace-only query yields the match-everything predicate.
	pub fn parse(query: &str) -> Self {
		Self {
			tokens: query.to_lowercase().split_whitespace().map(str::to_string).collect(),
		}
	}

	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	pub fn is_match_all(&self) -> bool {
		self.tokens.is_empty()
	}

	/// The executable form of the predicate. The store renders the same
	/// semantics as SQL; this is the reference used by in-memory doubles.
	pub fn matches(&self, item: &CatalogItem) -> bool {
		self.tokens.iter().all(|token| token_matches(token, item))
	}
}

fn token_matches(token: &str, item: &CatalogItem) -> bool {
	if item.name.to_lowercase().contains(token) {
		return true;
	}
	if let Some(description) = item.description.as_deref()
		&& description.to_lowercase().contains(token)
	{
		return true;
	}
	if let Some(category) = item.category.as_ref()
		&& category.name.to_lowercase().contains(token)
	{
		return true;
	}

	item.parameters.values().any(|value| value.to_lowercase().contains(token))
}
