use std::collections::BTreeMap;

use sqlx::types::Json;
use time::OffsetDateTime;

use shelf_domain::{CatalogItem, CategoryRef};

#[derive(Debug, sqlx::FromRow)]
pub struct ProductRow {
	pub id: i64,
	pub name: String,
	pub description: Option<String>,
	pub parameters: Option<Json<BTreeMap<String, String>>>,
	pub category_id: Option<i64>,
	pub category_name: Option<String>,
	pub created_at: OffsetDateTime,
}

impl From<ProductRow> for CatalogItem {
	fn from(row: ProductRow) -> Self {
		let category = match (row.category_id, row.category_name) {
			(Some(id), Some(name)) => Some(CategoryRef { id, name }),
			_ => None,
		};

		Self {
			id: row.id,
			name: row.name,
			description: row.description,
			parameters: row.parameters.map(|Json(parameters)| parameters).unwrap_or_default(),
			category,
			created_at: row.created_at,
		}
	}
}
