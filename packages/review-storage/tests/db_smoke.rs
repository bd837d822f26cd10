use review_config::Postgres;
use review_storage::db::Db;
use review_testkit::TestDatabase;

#[tokio::test]
#[ignore = "Requires external Postgres. Set REVIEW_PG_DSN to run."]
async fn db_connects_and_bootstraps_twice() {
	let Some(base_dsn) = review_testkit::env_dsn() else {
		eprintln!("Skipping db_connects_and_bootstraps_twice; set REVIEW_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");
	db.ensure_schema().await.expect("Schema bootstrap must be repeatable.");

	for table in [
		"people",
		"linkedin_people_experience",
		"linkedin_people_experience_keywords",
		"linkedin_people_experience_feedback",
	] {
		let count: i64 = sqlx::query_scalar(
			"SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
		)
		.bind(table)
		.fetch_one(&db.pool)
		.await
		.expect("Failed to query schema tables.");

		assert_eq!(count, 1, "Missing table {table}.");
	}

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
