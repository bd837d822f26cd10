use uuid::Uuid;

use review_domain::tags::{self, AnnotationTag, TagGroup};
use review_storage::queries;

use crate::{Result, ReviewService};

impl ReviewService {
	/// Returns the owner's displayable tags for one experience, in storage order.
	///
	/// Empty when nothing matches; never an error for a missing experience.
	pub async fn load_tags(
		&self,
		experience_id: &str,
		people_uuid: Uuid,
	) -> Result<Vec<AnnotationTag>> {
		let raw = self.fetch_tags(experience_id, people_uuid).await?;

		Ok(tags::retain_displayable(raw, self.hidden_tag_types()))
	}

	/// Same as [`ReviewService::load_tags`], grouped by tag type in first-seen order.
	pub async fn load_tag_groups(
		&self,
		experience_id: &str,
		people_uuid: Uuid,
	) -> Result<Vec<TagGroup>> {
		let raw = self.fetch_tags(experience_id, people_uuid).await?;

		Ok(tags::group_by_type(&raw, self.hidden_tag_types()))
	}

	async fn fetch_tags(
		&self,
		experience_id: &str,
		people_uuid: Uuid,
	) -> Result<Vec<AnnotationTag>> {
		// Experience ids are opaque; an unknown or blank id simply matches no rows.
		let rows = queries::list_keywords(&self.db.pool, experience_id, people_uuid).await?;

		tracing::debug!(experience_id, %people_uuid, count = rows.len(), "Loaded experience tags.");

		Ok(rows
			.into_iter()
			.map(|row| AnnotationTag { tag_type: row.r#type, keyword: row.keyword })
			.collect())
	}
}
