use time::OffsetDateTime;

use review_domain::{feedback_id, role};
use review_storage::{models::FeedbackRow, queries};

use crate::{Error, Result, ReviewService, UnitOfWork};

/// The reviewer's corrections for one experience.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FeedbackInput {
	pub seniority_level: i32,
	pub role: String,
	/// Reviewer score on the 1-4 scale.
	pub importance: i32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeedbackRecord {
	pub feedback_id: String,
	pub experience_id: String,
	pub duration: f64,
	pub seniority_level: i32,
	pub how_long_ago: f64,
	pub role: String,
	pub importance: i32,
}
impl FeedbackRecord {
	/// Builds the record for one submission. `duration` and `how_long_ago` are carried over from
	/// the reviewed experience unchanged.
	pub fn from_review(
		unit: &UnitOfWork,
		input: FeedbackInput,
		submitted_at: OffsetDateTime,
	) -> Result<Self> {
		let feedback_id = feedback_id::compose(&unit.experience_id, submitted_at).map_err(|err| {
			Error::InvalidRequest { message: format!("Invalid submission time: {err}.") }
		})?;

		Ok(Self {
			feedback_id,
			experience_id: unit.experience_id.clone(),
			duration: unit.duration,
			seniority_level: input.seniority_level,
			how_long_ago: unit.how_long_ago,
			role: input.role,
			importance: input.importance,
		})
	}

	fn into_row(self) -> FeedbackRow {
		FeedbackRow {
			feedback_id: self.feedback_id,
			experience_id: self.experience_id,
			duration: self.duration,
			seniority_level: self.seniority_level,
			how_long_ago: self.how_long_ago,
			role: self.role,
			importance: self.importance,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitResponse {
	pub inserted: u64,
	/// Records skipped because their feedback id was already stored.
	pub ignored: u64,
}

impl ReviewService {
	/// Stores all records in one transaction with one statement.
	///
	/// A record whose `feedback_id` already exists is skipped silently and the stored row keeps its
	/// original content. Any other failure rolls the whole batch back and surfaces as
	/// [`Error::WriteFailure`].
	pub async fn submit(&self, records: Vec<FeedbackRecord>) -> Result<SubmitResponse> {
		validate_records(&records)?;

		let total = records.len() as u64;
		let rows = records.into_iter().map(FeedbackRecord::into_row).collect::<Vec<_>>();
		let mut tx = self.db.pool.begin().await.map_err(write_failure)?;
		let inserted = match queries::insert_feedback_ignore_conflicts(&mut *tx, &rows).await {
			Ok(inserted) => inserted,
			Err(err) => {
				if let Err(rollback_err) = tx.rollback().await {
					tracing::warn!(error = %rollback_err, "Feedback rollback failed.");
				}

				tracing::warn!(error = %err, records = total, "Feedback batch rolled back.");

				return Err(match err {
					review_storage::Error::InvalidArgument(message) =>
						Error::InvalidRequest { message },
					other => write_failure(other),
				});
			},
		};

		tx.commit().await.map_err(write_failure)?;

		let ignored = total.saturating_sub(inserted);

		tracing::info!(inserted, ignored, "Feedback batch committed.");

		Ok(SubmitResponse { inserted, ignored })
	}
}

fn validate_records(records: &[FeedbackRecord]) -> Result<()> {
	if records.is_empty() {
		return Err(Error::InvalidRequest {
			message: "At least one feedback record is required.".to_string(),
		});
	}

	for (idx, record) in records.iter().enumerate() {
		if record.feedback_id.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: format!("records[{idx}].feedback_id must be non-empty."),
			});
		}
		if record.experience_id.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: format!("records[{idx}].experience_id must be non-empty."),
			});
		}
		if !role::is_known(&record.role) {
			return Err(Error::InvalidRequest {
				message: format!(
					"records[{idx}].role must be one of {}.",
					role::ROLES.join(", ")
				),
			});
		}
	}

	Ok(())
}

fn write_failure<E>(err: E) -> Error
where
	E: std::fmt::Display,
{
	Error::WriteFailure { message: err.to_string() }
}
