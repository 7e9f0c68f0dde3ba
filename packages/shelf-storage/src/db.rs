use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::Result;

/// Connection handle to the catalog database. The catalog is owned by an
/// external system; this crate only reads from it.
pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &shelf_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}
}
