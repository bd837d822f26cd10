use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
	Error, Result,
	models::{ExperienceRow, FeedbackRow, KeywordRow},
};

const FEEDBACK_COLUMNS: usize = 7;
// Postgres caps a single statement at 65535 bind parameters.
const MAX_BIND_PARAMS: usize = u16::MAX as usize;

/// Picks one experience without feedback, uniformly at random.
///
/// The candidate pool and the exclusion set are evaluated by one statement, so both come from the
/// same snapshot.
pub async fn sample_pending_experience<'e, E>(executor: E) -> Result<Option<ExperienceRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	let row = sqlx::query_as::<_, ExperienceRow>(
		"\
SELECT
	e.experience_id,
	e.people_uuid,
	p.full_name,
	p.linkedin,
	p.strongest_connection_user,
	e.start_date,
	e.end_date,
	e.duration,
	e.seniority_level,
	e.how_long_ago,
	e.title,
	e.description,
	e.company,
	e.industry,
	e.role,
	e.nb_employee_range,
	e.importance
FROM linkedin_people_experience e
JOIN people p ON p.uuid = e.people_uuid
WHERE NOT EXISTS (
	SELECT 1
	FROM linkedin_people_experience_feedback f
	WHERE f.experience_id = e.experience_id
)
ORDER BY random()
LIMIT 1",
	)
	.fetch_optional(executor)
	.await?;

	Ok(row)
}

pub async fn count_pending_experiences<'e, E>(executor: E) -> Result<i64>
where
	E: Executor<'e, Database = Postgres>,
{
	let count: i64 = sqlx::query_scalar(
		"\
SELECT count(*)
FROM linkedin_people_experience e
JOIN people p ON p.uuid = e.people_uuid
WHERE NOT EXISTS (
	SELECT 1
	FROM linkedin_people_experience_feedback f
	WHERE f.experience_id = e.experience_id
)",
	)
	.fetch_one(executor)
	.await?;

	Ok(count)
}

/// Lists every keyword the owner carries for one experience, in insertion order.
pub async fn list_keywords<'e, E>(
	executor: E,
	experience_id: &str,
	people_uuid: Uuid,
) -> Result<Vec<KeywordRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	let rows = sqlx::query_as::<_, KeywordRow>(
		"\
SELECT keyword_id, experience_id, keyword, type
FROM linkedin_people_experience_keywords
WHERE people_uuid = $1
	AND experience_id = $2
ORDER BY keyword_id ASC",
	)
	.bind(people_uuid)
	.bind(experience_id)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

/// Inserts all rows with one statement. Rows whose `feedback_id` already exists are skipped and
/// left unchanged. Returns the number of rows actually inserted.
pub async fn insert_feedback_ignore_conflicts<'e, E>(
	executor: E,
	rows: &[FeedbackRow],
) -> Result<u64>
where
	E: Executor<'e, Database = Postgres>,
{
	if rows.is_empty() {
		return Ok(0);
	}
	if rows.len() * FEEDBACK_COLUMNS > MAX_BIND_PARAMS {
		return Err(Error::InvalidArgument(format!(
			"Feedback batch of {} rows exceeds the {} rows a single statement can carry.",
			rows.len(),
			MAX_BIND_PARAMS / FEEDBACK_COLUMNS
		)));
	}

	let mut builder = QueryBuilder::<Postgres>::new(
		"\
INSERT INTO linkedin_people_experience_feedback (
	feedback_id,
	experience_id,
	duration,
	seniority_level,
	how_long_ago,
	role,
	importance
) ",
	);

	builder.push_values(rows, |mut tuple, row| {
		tuple
			.push_bind(row.feedback_id.as_str())
			.push_bind(row.experience_id.as_str())
			.push_bind(row.duration)
			.push_bind(row.seniority_level)
			.push_bind(row.how_long_ago)
			.push_bind(row.role.as_str())
			.push_bind(row.importance);
	});
	builder.push(" ON CONFLICT (feedback_id) DO NOTHING");

	let result = builder.build().execute(executor).await?;

	Ok(result.rows_affected())
}

pub async fn get_feedback<'e, E>(executor: E, feedback_id: &str) -> Result<Option<FeedbackRow>>
where
	E: Executor<'e, Database = Postgres>,
{
	let row = sqlx::query_as::<_, FeedbackRow>(
		"\
SELECT feedback_id, experience_id, duration, seniority_level, how_long_ago, role, importance
FROM linkedin_people_experience_feedback
WHERE feedback_id = $1",
	)
	.bind(feedback_id)
	.fetch_optional(executor)
	.await?;

	Ok(row)
}

pub async fn count_feedback_for_experience<'e, E>(executor: E, experience_id: &str) -> Result<i64>
where
	E: Executor<'e, Database = Postgres>,
{
	let count: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM linkedin_people_experience_feedback WHERE experience_id = $1",
	)
	.bind(experience_id)
	.fetch_one(executor)
	.await?;

	Ok(count)
}
