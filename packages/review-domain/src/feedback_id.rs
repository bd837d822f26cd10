//! Feedback identifiers are composed by the caller from the reviewed experience and the
//! submission instant. A retry of the same submission must reuse the identifier it was given.

use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

pub fn compose(
	experience_id: &str,
	submitted_at: OffsetDateTime,
) -> Result<String, time::error::Format> {
	let stamp = submitted_at.to_offset(UtcOffset::UTC).format(&Rfc3339)?;

	Ok(format!("{experience_id}_{stamp}"))
}

pub fn compose_now(experience_id: &str) -> Result<String, time::error::Format> {
	compose(experience_id, OffsetDateTime::now_utc())
}
