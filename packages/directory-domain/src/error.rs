pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid cursor: {message}")]
	InvalidCursor { message: String },
	#[error("Invalid filter: {message}")]
	InvalidFilter { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Failed to encode cursor: {message}")]
	CursorEncoding { message: String },
}
impl Error {
	pub(crate) fn invalid_filter(message: impl Into<String>) -> Self {
		Self::InvalidFilter { message: message.into() }
	}

	pub(crate) fn invalid_cursor(message: impl Into<String>) -> Self {
		Self::InvalidCursor { message: message.into() }
	}
}
