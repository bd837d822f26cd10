pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Every experience already carries feedback.
	#[error("No pending experience is left to review.")]
	EmptyPool,
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	/// The submission was rolled back in full. Retrying with the same feedback ids is safe.
	#[error("Feedback write failed and was rolled back: {message}")]
	WriteFailure { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<review_storage::Error> for Error {
	fn from(err: review_storage::Error) -> Self {
		match err {
			review_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			review_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}
