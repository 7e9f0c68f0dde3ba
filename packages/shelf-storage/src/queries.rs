use sqlx::{PgPool, Postgres, QueryBuilder};

use shelf_domain::{CatalogItem, Predicate};

use crate::{Result, models::ProductRow};

const SELECT_PRODUCTS: &str = "\
SELECT p.id, p.name, p.description, p.parameters, p.category_id, c.name AS category_name, p.created_at
FROM products p
LEFT JOIN categories c ON c.id = p.category_id";

/// Fetches every item satisfying the predicate in store-default order
/// (most-recently-created first). Each predicate token becomes one ANDed
/// disjunction group over name, description, category name, and the
/// parameter payload, mirroring `Predicate::matches`.
pub async fn find_matching(pool: &PgPool, predicate: &Predicate) -> Result<Vec<CatalogItem>> {
	let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_PRODUCTS);

	for (index, token) in predicate.tokens().iter().enumerate() {
		let pattern = format!("%{}%", escape_like(token));

		builder.push(if index == 0 { "\nWHERE " } else { "\n\tAND " });
		builder.push("(p.name ILIKE ");
		builder.push_bind(pattern.clone());
		builder.push(" OR p.description ILIKE ");
		builder.push_bind(pattern.clone());
		builder.push(" OR c.name ILIKE ");
		builder.push_bind(pattern.clone());
		builder.push(" OR p.parameters::text ILIKE ");
		builder.push_bind(pattern);
		builder.push(")");
	}

	builder.push("\nORDER BY p.created_at DESC");

	let rows: Vec<ProductRow> = builder.build_query_as().fetch_all(pool).await?;

	Ok(rows.into_iter().map(CatalogItem::from).collect())
}

/// Resolves the requested identifiers. Unknown identifiers are simply
/// absent from the result; the caller decides whether that is an error.
pub async fn find_by_ids(pool: &PgPool, ids: &[i64]) -> Result<Vec<CatalogItem>> {
	let sql = format!("{SELECT_PRODUCTS}\nWHERE p.id = ANY($1)\nORDER BY p.created_at DESC");
	let rows: Vec<ProductRow> =
		sqlx::query_as(&sql).bind(ids.to_vec()).fetch_all(pool).await?;

	Ok(rows.into_iter().map(CatalogItem::from).collect())
}

fn escape_like(token: &str) -> String {
	token.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
