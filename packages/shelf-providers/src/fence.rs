use shelf_domain::ComparisonFields;

use crate::{Error, Result};

/// Parses raw comparator output into the five comparison fields. The JSON
/// object may arrive bare, inside a ```json fence, or inside a generic
/// fence. Any missing or empty field is a parse failure, not a partial
/// result.
pub fn parse_comparison(raw: &str) -> Result<ComparisonFields> {
	let extracted = extract_json_block(raw);
	let fields: ComparisonFields = serde_json::from_str(extracted)?;

	for (label, value) in [
		("overall", &fields.overall),
		("quality", &fields.quality),
		("performance", &fields.performance),
		("integration", &fields.integration),
		("recommendation", &fields.recommendation),
	] {
		if value.trim().is_empty() {
			return Err(Error::InvalidResponse {
				message: format!("Comparison field {label} is empty."),
			});
		}
	}

	Ok(fields)
}

/// Isolates the JSON payload: the first ```json fence pair wins, then the
/// first generic fence pair, then the text verbatim.
pub fn extract_json_block(raw: &str) -> &str {
	if let Some(block) = fenced_block(raw, "```json") {
		return block;
	}
	if let Some(block) = fenced_block(raw, "```") {
		return block;
	}

	raw.trim()
}

fn fenced_block<'a>(raw: &'a str, opening: &str) -> Option<&'a str> {
	let start = raw.find(opening)? + opening.len();
	let rest = &raw[start..];
	let end = rest.find("```")?;

	Some(rest[..end].trim())
}
