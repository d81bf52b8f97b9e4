//! Throwaway PostGIS databases for integration tests.
//!
//! Tests that need a live store read `DIRECTORY_PG_DSN`, create a uniquely named database on that
//! server and drop it again when done, even when the test panics.

mod error;

pub use error::{Error, Result};

use std::{env, future::Future, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

pub const DSN_ENV: &str = "DIRECTORY_PG_DSN";

/// Maintenance databases tried, in order, for `CREATE DATABASE` and `DROP DATABASE`.
const MAINTENANCE_DATABASES: [&str; 2] = ["postgres", "template1"];

pub struct TestDatabase {
	name: String,
	dsn: String,
	maintenance: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	/// Creates a fresh database next to the one `base_dsn` names and checks that PostGIS can be
	/// installed into it.
	pub async fn new(base_dsn: &str) -> Result<Self> {
		Self::create(base_dsn, require_postgis).await
	}

	/// Creates the database, then runs `verify` on the maintenance connection. The returned guard
	/// exists before `verify` runs, so any failure after `CREATE DATABASE` drops it again.
	async fn create<F>(base_dsn: &str, verify: F) -> Result<Self>
	where
		F: AsyncFnOnce(&mut PgConnection, &str) -> Result<()>,
	{
		let base = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error::Setup(format!("{DSN_ENV} is not a valid DSN: {err}.")))?;
		let (maintenance, mut conn) = open_maintenance(&base).await?;
		let name = format!("directory_test_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str())
			.await
			.map_err(|err| Error::Setup(format!("CREATE DATABASE {name} failed: {err}.")))?;

		let db = Self {
			dsn: base.database(&name).to_url_lossy().to_string(),
			name,
			maintenance,
			dropped: false,
		};

		verify(&mut conn, &db.name).await?;

		Ok(db)
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.drop_database().await
	}

	async fn drop_database(&mut self) -> Result<()> {
		if !self.dropped {
			drop_database(&self.name, &self.maintenance).await?;

			self.dropped = true;
		}

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = self.name.clone();
		let maintenance = self.maintenance.clone();

		// `Drop` may run on a runtime worker, which cannot block; a fresh thread owns a private
		// runtime for the drop instead.
		let outcome = thread::spawn(move || {
			Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| Error::Setup(format!("Cleanup runtime failed to start: {err}.")))
				.and_then(|runtime| runtime.block_on(drop_database(&name, &maintenance)))
		})
		.join();

		match outcome {
			Ok(Ok(())) => {},
			Ok(Err(err)) => eprintln!("Test database {} was not dropped: {err}", self.name),
			Err(_) => eprintln!("Test database {} cleanup thread panicked.", self.name),
		}
	}
}

/// The base DSN for database-backed tests, when configured.
pub fn env_dsn() -> Option<String> {
	env::var(DSN_ENV).ok().filter(|dsn| !dsn.trim().is_empty())
}

/// Runs `f` against a fresh database and drops the database afterwards. A cleanup failure is
/// only reported as the result when `f` itself succeeded.
pub async fn with_test_db<F, Fut, T>(base_dsn: &str, f: F) -> Result<T>
where
	F: FnOnce(&TestDatabase) -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let mut db = TestDatabase::new(base_dsn).await?;
	let outcome = f(&db).await;
	let cleanup = db.drop_database().await;

	match (outcome, cleanup) {
		(Ok(value), Ok(())) => Ok(value),
		(Ok(_), Err(err)) => Err(err),
		(Err(err), cleanup) => {
			if let Err(cleanup_err) = cleanup {
				eprintln!("Test database cleanup also failed: {cleanup_err}");
			}

			Err(err)
		},
	}
}

async fn require_postgis(conn: &mut PgConnection, _name: &str) -> Result<()> {
	let postgis: Option<String> = sqlx::query_scalar(
		"SELECT default_version FROM pg_available_extensions WHERE name = 'postgis'",
	)
	.fetch_optional(conn)
	.await?;

	match postgis {
		Some(_) => Ok(()),
		None => Err(Error::Setup(format!(
			"The server behind {DSN_ENV} does not ship the postgis extension."
		))),
	}
}

async fn open_maintenance(base: &PgConnectOptions) -> Result<(PgConnectOptions, PgConnection)> {
	let mut failures = Vec::new();

	for database in MAINTENANCE_DATABASES {
		let options = base.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => failures.push(format!("{database}: {err}")),
		}
	}

	Err(Error::Setup(format!("No maintenance database reachable ({}).", failures.join("; "))))
}

async fn drop_database(name: &str, maintenance: &PgConnectOptions) -> Result<()> {
	let mut conn = PgConnection::connect_with(maintenance).await?;

	// `FORCE` terminates pool connections the test may still hold.
	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}" WITH (FORCE)"#).as_str()).await?;

	Ok(())
}
