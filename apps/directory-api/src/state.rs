use std::{sync::Arc, time::Duration};

use directory_config::Config;
use directory_service::DirectoryService;
use directory_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DirectoryService>,
	pub request_timeout: Duration,
	pub api_auth_token: Option<Arc<str>>,
}
impl AppState {
	/// Connects to Postgres and makes sure the schema exists before serving.
	pub async fn new(config: &Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::with_db(config, db))
	}

	/// Builds the state on a pool that connects on first use. Requests rejected during
	/// validation never touch the database.
	pub fn lazy(config: &Config) -> color_eyre::Result<Self> {
		let db = Db::connect_lazy(&config.storage.postgres)?;

		Ok(Self::with_db(config, db))
	}

	fn with_db(config: &Config, db: Db) -> Self {
		Self {
			service: Arc::new(DirectoryService::new(db)),
			request_timeout: Duration::from_millis(config.service.request_timeout_ms),
			api_auth_token: config.security.api_auth_token.as_deref().map(Arc::from),
		}
	}
}
