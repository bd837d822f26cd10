use time::Date;
use uuid::Uuid;

use review_domain::{importance, tags::TagGroup};
use review_storage::{models::ExperienceRow, queries};

use crate::{Error, Result, ReviewService};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Owner {
	pub people_uuid: Uuid,
	pub full_name: String,
	pub linkedin: Option<String>,
	pub strongest_connection_user: Option<String>,
}

/// One experience awaiting human feedback.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UnitOfWork {
	pub experience_id: String,
	pub owner: Owner,
	#[serde(with = "crate::time_serde")]
	pub start_date: Date,
	/// `None` while the experience is ongoing.
	#[serde(with = "crate::time_serde::option")]
	pub end_date: Option<Date>,
	pub duration: f64,
	pub seniority_level: i32,
	pub how_long_ago: f64,
	pub title: Option<String>,
	pub description: Option<String>,
	pub company: Option<String>,
	pub industry: Option<String>,
	pub role: String,
	pub nb_employee_range: Option<String>,
	pub importance: f64,
	/// `importance` projected onto the 1-4 reviewer scale.
	pub importance_score: i32,
}
impl From<ExperienceRow> for UnitOfWork {
	fn from(row: ExperienceRow) -> Self {
		Self {
			importance_score: importance::to_score(row.importance),
			experience_id: row.experience_id,
			owner: Owner {
				people_uuid: row.people_uuid,
				full_name: row.full_name,
				linkedin: row.linkedin,
				strongest_connection_user: row.strongest_connection_user,
			},
			start_date: row.start_date,
			end_date: row.end_date,
			duration: row.duration,
			seniority_level: row.seniority_level,
			how_long_ago: row.how_long_ago,
			title: row.title,
			description: row.description,
			company: row.company,
			industry: row.industry,
			role: row.role,
			nb_employee_range: row.nb_employee_range,
			importance: row.importance,
		}
	}
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReviewItem {
	pub unit: UnitOfWork,
	pub tags: Vec<TagGroup>,
}

impl ReviewService {
	/// Samples one experience without feedback, uniformly at random.
	///
	/// Nothing is reserved: concurrent reviewers may receive the same experience.
	pub async fn pick_next(&self) -> Result<UnitOfWork> {
		let Some(row) = queries::sample_pending_experience(&self.db.pool).await? else {
			tracing::info!("No pending experience left to review.");

			return Err(Error::EmptyPool);
		};

		tracing::debug!(experience_id = %row.experience_id, "Sampled pending experience.");

		Ok(UnitOfWork::from(row))
	}

	/// Samples the next experience and loads its displayable tags.
	pub async fn next_for_review(&self) -> Result<ReviewItem> {
		let unit = self.pick_next().await?;
		let tags = self.load_tag_groups(&unit.experience_id, unit.owner.people_uuid).await?;

		Ok(ReviewItem { unit, tags })
	}

	pub async fn pending_count(&self) -> Result<i64> {
		Ok(queries::count_pending_experiences(&self.db.pool).await?)
	}
}
