use serde::{Deserialize, Serialize};

use crate::{item::ItemProjection, language::Language};

/// Character budget for the best-effort `overall` text built from raw,
/// unparseable AI output.
pub const BEST_EFFORT_OVERALL_CHARS: usize = 200;

/// The five comparison fields. Every returned comparison carries all five,
/// non-empty, regardless of which path produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonFields {
	pub overall: String,
	pub quality: String,
	pub performance: String,
	pub integration: String,
	pub recommendation: String,
}

/// Locally computed comparison used when the AI call fails. Pure: identical
/// projections and language produce identical output.
pub fn fallback_comparison(items: &[ItemProjection], language: Language) -> ComparisonFields {
	let text = language.comparison_text();
	let mut categories: Vec<&str> = Vec::new();

	for item in items {
		if !categories.contains(&item.category.as_str()) {
			categories.push(item.category.as_str());
		}
	}

	ComparisonFields {
		overall: (text.overall)(items.len(), &categories.join(", ")),
		quality: text.quality.to_string(),
		performance: text.performance.to_string(),
		integration: text.integration.to_string(),
		recommendation: text.recommendation.to_string(),
	}
}

/// Best-effort comparison built from AI text that did not parse: the raw
/// text is truncated into `overall` and the remaining fields come from the
/// static table. Blank raw text falls back to the deterministic comparison
/// so no field is ever empty.
pub fn best_effort_comparison(
	raw: &str,
	items: &[ItemProjection],
	language: Language,
) -> ComparisonFields {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return fallback_comparison(items, language);
	}

	let text = language.comparison_text();

	ComparisonFields {
		overall: truncate_chars(trimmed, BEST_EFFORT_OVERALL_CHARS),
		quality: text.quality.to_string(),
		performance: text.performance.to_string(),
		integration: text.integration.to_string(),
		recommendation: text.recommendation.to_string(),
	}
}

fn truncate_chars(raw: &str, limit: usize) -> String {
	let mut chars = raw.chars();
	let mut out: String = chars.by_ref().take(limit).collect();

	if chars.next().is_some() {
		out.push_str("...");
	}

	out
}
