use serde::{Deserialize, Serialize};
use tracing::warn;

use shelf_domain::{ComparisonFields, ItemProjection, Language, comparison};
use shelf_providers::fence;

use crate::{ServiceError, ServiceResult, ShelfService, storage_error};

pub const MIN_COMPARE_ITEMS: usize = 2;
pub const MAX_COMPARE_ITEMS: usize = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct CompareRequest {
	pub product_ids: Vec<i64>,
	#[serde(default)]
	pub language: Language,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareResponse {
	pub success: bool,
	pub comparison: ComparisonFields,
	pub products_count: usize,
	pub ai_powered: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub warning: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_detail: Option<String>,
}

impl ShelfService {
	/// Compares 2-3 catalog items. Validation and unknown identifiers are
	/// the only caller-visible failures; once the items are resolved the
	/// request fails open, degrading to best-effort text when the AI reply
	/// does not parse and to the deterministic fallback when the call
	/// itself errors.
	pub async fn compare(&self, request: CompareRequest) -> ServiceResult<CompareResponse> {
		let language = request.language;
		let messages = language.messages();

		if request.product_ids.len() < MIN_COMPARE_ITEMS {
			return Err(ServiceError::InvalidRequest {
				message: messages.insufficient_items.to_string(),
			});
		}
		if request.product_ids.len() > MAX_COMPARE_ITEMS {
			return Err(ServiceError::InvalidRequest {
				message: messages.too_many_items.to_string(),
			});
		}

		let items = self.store.find_by_ids(&request.product_ids).await.map_err(storage_error)?;

		if items.len() != request.product_ids.len() {
			return Err(ServiceError::NotFound {
				message: messages.items_not_found.to_string(),
			});
		}

		let projections: Vec<ItemProjection> =
			items.iter().map(|item| ItemProjection::from_item(item, language)).collect();

		match self.comparator.compare(&self.cfg.providers.comparator, &projections, language).await
		{
			Ok(raw) => {
				let fields = match fence::parse_comparison(&raw) {
					Ok(fields) => fields,
					Err(err) => {
						warn!(error = %err, "Comparator reply did not parse, keeping raw text.");

						comparison::best_effort_comparison(&raw, &projections, language)
					},
				};

				Ok(CompareResponse {
					success: true,
					comparison: fields,
					products_count: projections.len(),
					ai_powered: true,
					warning: None,
					error_detail: None,
				})
			},
			Err(err) => {
				warn!(error = %err, "Comparator call failed, using deterministic fallback.");

				Ok(CompareResponse {
					success: true,
					comparison: comparison::fallback_comparison(&projections, language),
					products_count: projections.len(),
					ai_powered: false,
					warning: Some(messages.basic_analysis_warning.to_string()),
					error_detail: Some(err.to_string()),
				})
			},
		}
	}
}
