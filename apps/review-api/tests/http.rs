use std::time::Duration;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::util::ServiceExt;

use review_api::{
	routes::{self, HEADER_SESSION_ID},
	state::AppState,
};
use review_config::{Config, Postgres, Storage};
use review_service::ReviewService;
use review_storage::db::Db;
use review_testkit::{TestDatabase, seed};

const SESSION: &str = "6f1c1d2e-9a43-4d8c-8a4b-6d2f0f1a7c11";

fn test_config(dsn: String) -> Config {
	Config {
		storage: Storage { postgres: Postgres { dsn, pool_max_conns: 2 } },
		..Config::default()
	}
}

fn lazy_app() -> Router {
	let dsn = "postgres://unused@127.0.0.1:1/unused".to_string();
	let pool = PgPoolOptions::new()
		.acquire_timeout(Duration::from_millis(500))
		.connect_lazy(&dsn)
		.expect("Failed to build lazy pool.");

	routes::router(AppState::with_service(ReviewService::new(test_config(dsn), Db { pool })))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
	let response = app.oneshot(request).await.expect("Failed to call router.");
	let status = response.status();
	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if body.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&body).expect("Failed to parse response.")
	};

	(status, json)
}

fn submit_request(session: Option<&str>, payload: &Value) -> Request<Body> {
	let mut builder = Request::builder()
		.method("POST")
		.uri("/v1/feedback")
		.header("content-type", "application/json");

	if let Some(session) = session {
		builder = builder.header(HEADER_SESSION_ID, session);
	}

	builder.body(Body::from(payload.to_string())).expect("Failed to build request.")
}

fn record(feedback_id: &str, experience_id: &str, seniority_level: i32) -> Value {
	serde_json::json!({
		"feedback_id": feedback_id,
		"experience_id": experience_id,
		"duration": 3.5,
		"seniority_level": seniority_level,
		"how_long_ago": 2.3,
		"role": "employee",
		"importance": 3
	})
}

#[tokio::test]
async fn health_ok() {
	let request = Request::builder().uri("/health").body(Body::empty()).expect("request");
	let (status, _) = send(lazy_app(), request).await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn empty_submission_is_bad_request() {
	let (status, json) =
		send(lazy_app(), submit_request(None, &serde_json::json!({ "records": [] }))).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn malformed_session_header_is_bad_request() {
	let payload = serde_json::json!({ "records": [record("X_1", "X", 3)] });
	let (status, json) = send(lazy_app(), submit_request(Some("not-a-uuid"), &payload)).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn unreachable_store_is_service_unavailable() {
	let payload = serde_json::json!({ "records": [record("X_1", "X", 3)] });
	let (status, json) = send(lazy_app(), submit_request(Some(SESSION), &payload)).await;

	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(json["error_code"], "WRITE_FAILURE");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set REVIEW_PG_DSN to run."]
async fn review_cycle_over_http() {
	let Some(base_dsn) = review_testkit::env_dsn() else {
		eprintln!("Skipping review_cycle_over_http; set REVIEW_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = test_config(test_db.dsn().to_string());
	let db = Db::connect(&cfg.storage.postgres).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	let owner = seed::insert_person(&db.pool, "Ada Lovelace").await.expect("seed");

	seed::insert_experience(&db.pool, "X", owner).await.expect("seed");
	seed::insert_keyword(&db.pool, owner, "X", "skill", "analysis").await.expect("seed");
	seed::insert_keyword(&db.pool, owner, "X", "generated_skill", "math").await.expect("seed");

	let app = routes::router(AppState::with_service(ReviewService::new(cfg, db)));
	let request = Request::builder().uri("/v1/units/next").body(Body::empty()).expect("request");
	let (status, json) = send(app.clone(), request).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["unit"]["experience_id"], "X");
	assert_eq!(json["unit"]["start_date"], "2019-01-07");
	assert_eq!(json["unit"]["owner"]["full_name"], "Ada Lovelace");
	assert_eq!(json["tags"], serde_json::json!([{ "type": "skill", "keywords": ["analysis"] }]));

	let request = Request::builder()
		.uri(format!("/v1/units/X/tags?people_uuid={owner}"))
		.body(Body::empty())
		.expect("request");
	let (status, json) = send(app.clone(), request).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["tags"][0]["keywords"][0], "analysis");

	let payload = serde_json::json!({ "records": [record("X_1", "X", 3)] });
	let (status, json) = send(app.clone(), submit_request(Some(SESSION), &payload)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["inserted"], 1);
	assert_eq!(json["ignored"], 0);
	assert_eq!(json["session"]["submitted"], 1);

	let payload = serde_json::json!({ "records": [record("X_1", "X", 5)] });
	let (status, json) = send(app.clone(), submit_request(Some(SESSION), &payload)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["inserted"], 0);
	assert_eq!(json["ignored"], 1);
	assert_eq!(json["session"]["submitted"], 1, "An ignored retry must not count.");
	assert_eq!(json["session"]["message"], "Number of feedbacks submitted: 1");

	let (_, json) = send(app.clone(), submit_request(None, &payload)).await;

	assert!(json["session"].is_null());

	let payload = serde_json::json!({ "records": [record("X_2", "X", 9)] });
	let (status, json) = send(app.clone(), submit_request(Some(SESSION), &payload)).await;

	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(json["error_code"], "WRITE_FAILURE");

	let request = Request::builder().uri("/v1/units/next").body(Body::empty()).expect("request");
	let (status, json) = send(app, request).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "EMPTY_POOL");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
