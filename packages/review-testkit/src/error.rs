pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("REVIEW_PG_DSN is not a valid Postgres DSN: {0}")]
	InvalidDsn(sqlx::Error),
	#[error("No admin database reachable at {databases:?}: {source}")]
	AdminUnreachable { databases: &'static [&'static str], source: sqlx::Error },
	#[error("Failed to create test database {name}: {source}")]
	Create { name: String, source: sqlx::Error },
	#[error("Failed to drop test database {name}: {source}")]
	Drop { name: String, source: sqlx::Error },

	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error(transparent)]
	SeedDate(#[from] time::error::ComponentRange),
}
