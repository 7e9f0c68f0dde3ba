use std::sync::Arc;

use shelf_service::ShelfService;
use shelf_storage::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ShelfService>,
}
impl AppState {
	pub async fn new(config: shelf_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;
		let service = ShelfService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
