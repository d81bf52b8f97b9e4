use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{Result, schema};

/// Key of the transaction-scoped advisory lock that serializes concurrent schema bootstraps.
const SCHEMA_LOCK_ID: i64 = 4_326_001;

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &directory_config::Postgres) -> Result<Self> {
		let pool = pool_options(cfg).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}

	/// Builds the pool without opening a connection; the first query connects.
	pub fn connect_lazy(cfg: &directory_config::Postgres) -> Result<Self> {
		let pool = pool_options(cfg).connect_lazy(&cfg.dsn)?;

		Ok(Self { pool })
	}

	/// Applies the bundled schema. Every statement is idempotent, so this runs on each start.
	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema();
		let statements = schema::statements(&sql);
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)")
			.bind(SCHEMA_LOCK_ID)
			.execute(&mut *tx)
			.await?;

		for statement in statements.iter().copied() {
			sqlx::query(statement).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		tracing::debug!(statements = statements.len(), "Directory schema ensured.");

		Ok(())
	}
}

fn pool_options(cfg: &directory_config::Postgres) -> PgPoolOptions {
	PgPoolOptions::new().max_connections(cfg.pool_max_conns)
}
