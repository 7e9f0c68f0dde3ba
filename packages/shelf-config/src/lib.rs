mod error;
mod types;

pub use error::{Error, Result};
pub use types::{ComparatorProviderConfig, Config, Postgres, Providers, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	let comparator = &cfg.providers.comparator;

	if comparator.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.comparator.api_base must be non-empty.".to_string(),
		});
	}
	if comparator.model.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.comparator.model must be non-empty.".to_string(),
		});
	}
	if comparator.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.comparator.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if !comparator.temperature.is_finite() {
		return Err(Error::Validation {
			message: "providers.comparator.temperature must be a finite number.".to_string(),
		});
	}
	if comparator.temperature < 0.0 {
		return Err(Error::Validation {
			message: "providers.comparator.temperature must be zero or greater.".to_string(),
		});
	}
	// api_key is deliberately not validated: a missing key degrades the
	// comparison path at call time instead of failing startup.

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let comparator = &mut cfg.providers.comparator;

	comparator.api_key = comparator.api_key.trim().to_string();
	comparator.api_base = comparator.api_base.trim().to_string();
}
