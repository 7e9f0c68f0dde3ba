use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::language::Language;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
	pub id: i64,
	pub name: String,
}

/// A read-only snapshot of one catalog item. The store owns its lifecycle;
/// this crate never creates, mutates, or deletes items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
	pub id: i64,
	pub name: String,
	pub description: Option<String>,
	#[serde(default)]
	pub parameters: BTreeMap<String, String>,
	pub category: Option<CategoryRef>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

/// The normalized, AI-input-ready view of a catalog item. Optional fields
/// are substituted here so nothing downstream branches on presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemProjection {
	pub name: String,
	pub category: String,
	pub description: String,
	pub parameters: BTreeMap<String, String>,
}
impl ItemProjection {
	pub fn from_item(item: &CatalogItem, language: Language) -> Self {
		let messages = language.messages();
		let category = item
			.category
			.as_ref()
			.map(|category| category.name.clone())
			.unwrap_or_else(|| messages.no_category.to_string());
		let description = item
			.description
			.as_deref()
			.map(str::trim)
			.filter(|description| !description.is_empty())
			.map(str::to_string)
			.unwrap_or_else(|| messages.no_description.to_string());

		Self { name: item.name.clone(), category, description, parameters: item.parameters.clone() }
	}
}
