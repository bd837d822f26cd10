use serde::{Deserialize, Serialize};

const MILESTONE_EVERY: u64 = 10;

/// Feedback counter owned by one reviewer session.
///
/// Counts stored feedback rows. A resubmission that the store ignored records zero and leaves the
/// count where it was.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSession {
	submitted: u64,
	milestone: bool,
}
impl ReviewSession {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `stored` feedback rows and returns the new total.
	pub fn record_submissions(&mut self, stored: u64) -> u64 {
		let before = self.submitted / MILESTONE_EVERY;

		self.submitted = self.submitted.saturating_add(stored);
		self.milestone = self.submitted / MILESTONE_EVERY > before;

		self.submitted
	}

	pub fn submitted(&self) -> u64 {
		self.submitted
	}

	/// Whether the last recorded batch crossed a multiple of ten.
	pub fn milestone_reached(&self) -> bool {
		self.milestone
	}

	pub fn progress_message(&self) -> String {
		if self.milestone_reached() {
			format!(
				"You have submitted {} feedbacks! Thank you very much! Let's keep going!",
				self.submitted
			)
		} else {
			format!("Number of feedbacks submitted: {}", self.submitted)
		}
	}
}
