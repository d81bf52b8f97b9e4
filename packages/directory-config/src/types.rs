use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	/// Upper bound for one directory query, storage round trips included.
	#[serde(default = "default_request_timeout_ms")]
	pub request_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Security {
	#[serde(default = "default_bind_localhost_only")]
	pub bind_localhost_only: bool,
	/// Bearer token required on `/api/v1` routes. `None` disables the check.
	pub api_auth_token: Option<String>,
}
impl Default for Security {
	fn default() -> Self {
		Self { bind_localhost_only: default_bind_localhost_only(), api_auth_token: None }
	}
}

fn default_request_timeout_ms() -> u64 {
	5_000
}

fn default_bind_localhost_only() -> bool {
	true
}
