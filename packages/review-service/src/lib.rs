//! Sampling of unreviewed experiences, context loading for presentation, and idempotent feedback
//! writes.

pub mod load_tags;
pub mod pick_next;
pub mod submit;
pub mod time_serde;

mod error;

pub use error::{Error, Result};
pub use pick_next::{Owner, ReviewItem, UnitOfWork};
pub use review_domain::tags::{AnnotationTag, TagGroup};
pub use submit::{FeedbackInput, FeedbackRecord, SubmitResponse};

use review_config::Config;
use review_storage::db::Db;

pub struct ReviewService {
	pub cfg: Config,
	pub db: Db,
}
impl ReviewService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}

	pub fn hidden_tag_types(&self) -> &[String] {
		&self.cfg.review.hidden_tag_types
	}
}
