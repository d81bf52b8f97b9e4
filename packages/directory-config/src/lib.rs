mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Security, Service, Storage};

use std::{fs, net::SocketAddr, path::Path};

/// Reads, normalizes and validates the TOML file at `path`.
pub fn load(path: &Path) -> Result<Config> {
	let mut cfg = fs::read_to_string(path)
		.map_err(|source| Error::ReadConfig { path: path.into(), source })
		.and_then(|raw| {
			toml::from_str::<Config>(&raw)
				.map_err(|source| Error::ParseConfig { path: path.into(), source })
		})?;

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let bind = cfg.service.http_bind.trim();

	if bind.is_empty() {
		return Err(Error::invalid("service.http_bind", "must be non-empty"));
	}

	let addr = bind.parse::<SocketAddr>().map_err(|_| {
		Error::invalid("service.http_bind", "must be a socket address such as 127.0.0.1:8080")
	})?;

	if cfg.security.bind_localhost_only && !addr.ip().is_loopback() {
		return Err(Error::invalid(
			"service.http_bind",
			"must be a loopback address when security.bind_localhost_only is true",
		));
	}

	for (key, value) in [
		("service.log_level", &cfg.service.log_level),
		("storage.postgres.dsn", &cfg.storage.postgres.dsn),
	] {
		if value.trim().is_empty() {
			return Err(Error::invalid(key, "must be non-empty"));
		}
	}

	if cfg.service.request_timeout_ms == 0 {
		return Err(Error::invalid("service.request_timeout_ms", "must be greater than zero"));
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::invalid("storage.postgres.pool_max_conns", "must be greater than zero"));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.security.api_auth_token = cfg
		.security
		.api_auth_token
		.take()
		.map(|token| token.trim().to_string())
		.filter(|token| !token.is_empty());
}
