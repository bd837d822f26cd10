use time::Date;
use uuid::Uuid;

/// One pending experience joined with its owner.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct ExperienceRow {
	pub experience_id: String,
	pub people_uuid: Uuid,
	pub full_name: String,
	pub linkedin: Option<String>,
	pub strongest_connection_user: Option<String>,
	pub start_date: Date,
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
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct KeywordRow {
	pub keyword_id: i64,
	pub experience_id: String,
	pub keyword: String,
	pub r#type: String,
}

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct FeedbackRow {
	pub feedback_id: String,
	pub experience_id: String,
	pub duration: f64,
	pub seniority_level: i32,
	pub how_long_ago: f64,
	pub role: String,
	pub importance: i32,
}
