use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use review_service::{Error as ServiceError, FeedbackRecord, ReviewItem, SubmitResponse, TagGroup};

use crate::state::AppState;

pub const HEADER_SESSION_ID: &str = "X-Review-Session-Id";

#[derive(Debug, Deserialize)]
pub struct TagsQuery {
	pub people_uuid: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagsResponse {
	pub experience_id: String,
	pub tags: Vec<TagGroup>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PendingCountResponse {
	pub pending: i64,
}

#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackBody {
	pub records: Vec<FeedbackRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionProgress {
	pub session_id: Uuid,
	pub submitted: u64,
	pub milestone: bool,
	pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitFeedbackResponse {
	#[serde(flatten)]
	pub result: SubmitResponse,
	pub session: Option<SessionProgress>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::EmptyPool =>
				ApiError::new(StatusCode::NOT_FOUND, "EMPTY_POOL", err.to_string()),
			ServiceError::InvalidRequest { .. } =>
				ApiError::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.to_string()),
			ServiceError::WriteFailure { .. } => {
				tracing::warn!(error = %err, "Feedback write failed.");

				ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "WRITE_FAILURE", err.to_string())
			},
			ServiceError::Storage { .. } => {
				tracing::error!(error = %err, "Storage error.");

				ApiError::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"STORAGE_ERROR",
					"Internal storage error.",
				)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/units/next", get(next_unit))
		.route("/v1/units/pending_count", get(pending_count))
		.route("/v1/units/{experience_id}/tags", get(unit_tags))
		.route("/v1/feedback", post(submit_feedback))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn next_unit(State(state): State<AppState>) -> Result<Json<ReviewItem>, ApiError> {
	let item = state.service.next_for_review().await?;

	Ok(Json(item))
}

async fn pending_count(
	State(state): State<AppState>,
) -> Result<Json<PendingCountResponse>, ApiError> {
	let pending = state.service.pending_count().await?;

	Ok(Json(PendingCountResponse { pending }))
}

async fn unit_tags(
	State(state): State<AppState>,
	Path(experience_id): Path<String>,
	Query(query): Query<TagsQuery>,
) -> Result<Json<TagsResponse>, ApiError> {
	let tags = state.service.load_tag_groups(&experience_id, query.people_uuid).await?;

	Ok(Json(TagsResponse { experience_id, tags }))
}

async fn submit_feedback(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(body): Json<SubmitFeedbackBody>,
) -> Result<Json<SubmitFeedbackResponse>, ApiError> {
	let session_id = session_id(&headers)?;
	let result = state.service.submit(body.records).await?;
	let session = session_id.map(|session_id| {
		let session = state.sessions.record(session_id, result.inserted);

		SessionProgress {
			session_id,
			submitted: session.submitted(),
			milestone: session.milestone_reached(),
			message: session.progress_message(),
		}
	});

	Ok(Json(SubmitFeedbackResponse { result, session }))
}

fn session_id(headers: &HeaderMap) -> Result<Option<Uuid>, ApiError> {
	let Some(raw) = headers.get(HEADER_SESSION_ID) else {
		return Ok(None);
	};
	let parsed = raw.to_str().ok().and_then(|value| Uuid::parse_str(value.trim()).ok());

	match parsed {
		Some(session_id) => Ok(Some(session_id)),
		None => Err(ApiError::new(
			StatusCode::BAD_REQUEST,
			"INVALID_REQUEST",
			format!("{HEADER_SESSION_ID} must be a UUID."),
		)),
	}
}
