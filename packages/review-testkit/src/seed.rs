//! Upstream rows for tests. The review workflow never writes these tables itself.

use sqlx::PgPool;
use time::{Date, Month};
use uuid::Uuid;

use crate::Result;

pub async fn insert_person(pool: &PgPool, full_name: &str) -> Result<Uuid> {
	let uuid = Uuid::new_v4();

	sqlx::query(
		"\
INSERT INTO people (uuid, full_name, linkedin, strongest_connection_user)
VALUES ($1, $2, $3, $4)",
	)
	.bind(uuid)
	.bind(full_name)
	.bind(format!("https://www.linkedin.com/in/{}", uuid.simple()))
	.bind("reviewer")
	.execute(pool)
	.await?;

	Ok(uuid)
}

/// Inserts a closed senior-engineer experience owned by `people_uuid`.
pub async fn insert_experience(
	pool: &PgPool,
	experience_id: &str,
	people_uuid: Uuid,
) -> Result<()> {
	let start_date = Date::from_calendar_date(2019, Month::January, 7)?;
	let end_date = Date::from_calendar_date(2022, Month::June, 30)?;

	sqlx::query(
		"\
INSERT INTO linkedin_people_experience (
	experience_id,
	people_uuid,
	start_date,
	end_date,
	duration,
	seniority_level,
	how_long_ago,
	title,
	description,
	company,
	industry,
	role,
	nb_employee_range,
	importance
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
	)
	.bind(experience_id)
	.bind(people_uuid)
	.bind(start_date)
	.bind(Some(end_date))
	.bind(3.5_f64)
	.bind(3_i32)
	.bind(2.3_f64)
	.bind("Senior Engineer")
	.bind(None::<String>)
	.bind("Acme")
	.bind("Software")
	.bind("employee")
	.bind("51-200")
	.bind(0.62_f64)
	.execute(pool)
	.await?;

	Ok(())
}

pub async fn insert_keyword(
	pool: &PgPool,
	people_uuid: Uuid,
	experience_id: &str,
	tag_type: &str,
	keyword: &str,
) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO linkedin_people_experience_keywords (people_uuid, experience_id, keyword, type)
VALUES ($1, $2, $3, $4)",
	)
	.bind(people_uuid)
	.bind(experience_id)
	.bind(keyword)
	.bind(tag_type)
	.execute(pool)
	.await?;

	Ok(())
}
