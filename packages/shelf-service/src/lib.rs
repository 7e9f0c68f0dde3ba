pub mod compare;
pub mod search;

use std::{future::Future, pin::Pin, sync::Arc};

pub use compare::{CompareRequest, CompareResponse, MAX_COMPARE_ITEMS, MIN_COMPARE_ITEMS};
pub use search::{SearchRequest, SearchResponse};

use shelf_config::{ComparatorProviderConfig, Config};
use shelf_domain::{CatalogItem, ItemProjection, Language, Predicate};
use shelf_providers::comparator;
use shelf_storage::{Db, queries};

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only view of the catalog store. The real implementation runs SQL;
/// tests substitute an in-memory double evaluating `Predicate::matches`.
pub trait CatalogStore
where
	Self: Send + Sync,
{
	fn find_matching<'a>(
		&'a self,
		predicate: &'a Predicate,
	) -> BoxFuture<'a, color_eyre::Result<Vec<CatalogItem>>>;

	fn find_by_ids<'a>(
		&'a self,
		ids: &'a [i64],
	) -> BoxFuture<'a, color_eyre::Result<Vec<CatalogItem>>>;
}

/// Capability boundary around the generative comparison call, so the
/// degradation logic can be exercised with a double that forces failure.
pub trait ComparatorProvider
where
	Self: Send + Sync,
{
	fn compare<'a>(
		&'a self,
		cfg: &'a ComparatorProviderConfig,
		items: &'a [ItemProjection],
		language: Language,
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

#[derive(Debug)]
pub enum ServiceError {
	InvalidRequest { message: String },
	NotFound { message: String },
	Storage { message: String },
}

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
			Self::NotFound { message } => write!(f, "Not found: {message}"),
			Self::Storage { message } => write!(f, "Storage error: {message}"),
		}
	}
}

impl std::error::Error for ServiceError {}

struct DefaultComparator;

impl ComparatorProvider for DefaultComparator {
	fn compare<'a>(
		&'a self,
		cfg: &'a ComparatorProviderConfig,
		items: &'a [ItemProjection],
		language: Language,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(comparator::compare(cfg, items, language))
	}
}

impl CatalogStore for Db {
	fn find_matching<'a>(
		&'a self,
		predicate: &'a Predicate,
	) -> BoxFuture<'a, color_eyre::Result<Vec<CatalogItem>>> {
		Box::pin(async move {
			queries::find_matching(&self.pool, predicate).await.map_err(color_eyre::Report::from)
		})
	}

	fn find_by_ids<'a>(
		&'a self,
		ids: &'a [i64],
	) -> BoxFuture<'a, color_eyre::Result<Vec<CatalogItem>>> {
		Box::pin(async move {
			queries::find_by_ids(&self.pool, ids).await.map_err(color_eyre::Report::from)
		})
	}
}

pub struct ShelfService {
	cfg: Config,
	store: Arc<dyn CatalogStore>,
	comparator: Arc<dyn ComparatorProvider>,
}
impl ShelfService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self::with_parts(cfg, Arc::new(db), Arc::new(DefaultComparator))
	}

	pub fn with_parts(
		cfg: Config,
		store: Arc<dyn CatalogStore>,
		comparator: Arc<dyn ComparatorProvider>,
	) -> Self {
		Self { cfg, store, comparator }
	}
}

pub(crate) fn storage_error(err: color_eyre::Report) -> ServiceError {
	ServiceError::Storage { message: err.to_string() }
}
