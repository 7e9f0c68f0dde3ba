// std
use std::time::Duration;

// crates.io
use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use shelf_config::ComparatorProviderConfig;
use shelf_domain::{ItemProjection, Language};

const SYSTEM_PROMPT: &str = "You are a product comparison assistant for an equipment catalog. \
	Respond with exactly one JSON object containing the string keys \"overall\", \"quality\", \
	\"performance\", \"integration\" and \"recommendation\", and nothing else. Every value must \
	be a non-empty sentence. Do not wrap the object in markdown fences.";

/// One synchronous comparison call. No retry, no streaming; every transport,
/// auth, or quota problem surfaces as a single opaque failure for the caller
/// to degrade on.
pub async fn compare(
	cfg: &ComparatorProviderConfig,
	items: &[ItemProjection],
	language: Language,
) -> Result<String> {
	if cfg.api_key.is_empty() {
		return Err(eyre::eyre!("Comparator api_key is not configured."));
	}

	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = request_body(cfg, items, language);
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	chat_content(json)
}

fn request_body(
	cfg: &ComparatorProviderConfig,
	items: &[ItemProjection],
	language: Language,
) -> Value {
	serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": [
			{ "role": "system", "content": SYSTEM_PROMPT },
			{ "role": "user", "content": user_prompt(items, language) },
		],
	})
}

fn user_prompt(items: &[ItemProjection], language: Language) -> String {
	let mut prompt = String::new();

	prompt.push_str(match language {
		Language::Vi => "Viết toàn bộ nội dung bằng tiếng Việt.",
		Language::En => "Write all content in English.",
	});
	prompt.push_str("\n\nCompare the following products:\n");

	for (index, item) in items.iter().enumerate() {
		prompt.push_str(&format!("\n{}. {}\n", index + 1, item.name));
		prompt.push_str(&format!("   Category: {}\n", item.category));
		prompt.push_str(&format!("   Description: {}\n", item.description));
		for (key, value) in &item.parameters {
			prompt.push_str(&format!("   {key}: {value}\n"));
		}
	}

	prompt
}

fn chat_content(json: Value) -> Result<String> {
	json.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.map(str::to_string)
		.ok_or_else(|| eyre::eyre!("Comparator response is missing message content."))
}
