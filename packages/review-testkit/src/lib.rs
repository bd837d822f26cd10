mod error;
pub mod seed;

pub use error::{Error, Result};

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

const DSN_ENV: &str = "REVIEW_PG_DSN";
const ADMIN_DATABASES: &[&str] = &["postgres", "template1"];

/// A per-test database on the server `REVIEW_PG_DSN` points at.
///
/// Dropped on [`TestDatabase::cleanup`], or from a helper thread when the value goes out of scope
/// first (for example after a failed assertion).
pub struct TestDatabase {
	name: String,
	dsn: String,
	admin: Admin,
	dropped: bool,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn).map_err(Error::InvalidDsn)?;
		let admin = Admin::locate(&base).await?;
		let name = format!("review_test_{}", Uuid::new_v4().simple());

		admin.create_database(&name).await?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, admin, dropped: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.admin.drop_database(&self.name).await?;

		self.dropped = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = std::mem::take(&mut self.name);
		let admin = self.admin.clone();
		// The owning test runtime may already be shutting down, so drop on a fresh one.
		let handle = thread::spawn(move || {
			let outcome = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| err.to_string())
				.and_then(|runtime| {
					runtime.block_on(admin.drop_database(&name)).map_err(|err| err.to_string())
				});

			if let Err(err) = outcome {
				eprintln!("Leaked test database {name}: {err}.");
			}
		});

		let _ = handle.join();
	}
}

/// Connection target for `CREATE DATABASE` / `DROP DATABASE`.
#[derive(Clone)]
struct Admin {
	options: PgConnectOptions,
}
impl Admin {
	async fn locate(base: &PgConnectOptions) -> Result<Self> {
		let mut last = None;

		for database in ADMIN_DATABASES {
			let options = base.clone().database(database);

			match PgConnection::connect_with(&options).await {
				Ok(conn) => {
					let _ = conn.close().await;

					return Ok(Self { options });
				},
				Err(err) => last = Some(err),
			}
		}

		Err(Error::AdminUnreachable {
			databases: ADMIN_DATABASES,
			source: last.unwrap_or(sqlx::Error::PoolClosed),
		})
	}

	async fn create_database(&self, name: &str) -> Result<()> {
		let mut conn = PgConnection::connect_with(&self.options).await?;

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str())
			.await
			.map_err(|source| Error::Create { name: name.to_string(), source })?;

		Ok(())
	}

	async fn drop_database(&self, name: &str) -> Result<()> {
		let mut conn = PgConnection::connect_with(&self.options).await?;

		// Pools from the test may still hold connections to the database.
		sqlx::query(
			"\
SELECT pg_terminate_backend(pid)
FROM pg_stat_activity
WHERE datname = $1 AND pid <> pg_backend_pid()",
		)
		.bind(name)
		.fetch_all(&mut conn)
		.await?;

		conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}""#).as_str())
			.await
			.map_err(|source| Error::Drop { name: name.to_string(), source })?;

		Ok(())
	}
}

/// Base DSN for database-backed tests, or `None` when they should be skipped.
pub fn env_dsn() -> Option<String> {
	env::var(DSN_ENV).ok().filter(|dsn| !dsn.trim().is_empty())
}
