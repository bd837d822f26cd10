mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Review, Service, Storage};

use std::{env, fs, path::Path};

/// Environment variables consulted, in order, when the config file carries no DSN.
pub const DSN_ENV_VARS: [&str; 2] = ["REVIEW_PG_DSN", "DATABASE_URL"];

pub fn load(path: &Path) -> Result<Config> {
	load_with(path, |key| env::var(key).ok())
}

pub fn load_with<F>(path: &Path, lookup: F) -> Result<Config>
where
	F: Fn(&str) -> Option<String>,
{
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	finish(cfg, lookup)
}

/// Builds a config from defaults plus the environment, for deployments without a config file.
pub fn from_env() -> Result<Config> {
	from_lookup(|key| env::var(key).ok())
}

pub fn from_lookup<F>(lookup: F) -> Result<Config>
where
	F: Fn(&str) -> Option<String>,
{
	finish(Config::default(), lookup)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let dsn = cfg.storage.postgres.dsn.as_str();

	if dsn.trim().is_empty() {
		return Err(Error::MissingDsn { vars: DSN_ENV_VARS.join(", ") });
	}
	if !(dsn.starts_with("postgres://") || dsn.starts_with("postgresql://")) {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be a postgres:// or postgresql:// URL.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
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
	if cfg.review.hidden_tag_types.iter().any(|tag_type| tag_type.trim().is_empty()) {
		return Err(Error::Validation {
			message: "review.hidden_tag_types must not contain blank entries.".to_string(),
		});
	}

	Ok(())
}

fn finish<F>(mut cfg: Config, lookup: F) -> Result<Config>
where
	F: Fn(&str) -> Option<String>,
{
	normalize(&mut cfg);
	resolve_dsn(&mut cfg, lookup);
	validate(&cfg)?;

	Ok(cfg)
}

fn normalize(cfg: &mut Config) {
	cfg.storage.postgres.dsn = cfg.storage.postgres.dsn.trim().to_string();

	for tag_type in cfg.review.hidden_tag_types.iter_mut() {
		*tag_type = tag_type.trim().to_string();
	}
}

fn resolve_dsn<F>(cfg: &mut Config, lookup: F)
where
	F: Fn(&str) -> Option<String>,
{
	if !cfg.storage.postgres.dsn.is_empty() {
		return;
	}

	if let Some(dsn) = DSN_ENV_VARS
		.iter()
		.filter_map(|key| lookup(*key))
		.map(|value| value.trim().to_string())
		.find(|value| !value.is_empty())
	{
		cfg.storage.postgres.dsn = dsn;
	}
}
