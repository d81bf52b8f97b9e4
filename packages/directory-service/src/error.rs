pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid cursor: {message}")]
	InvalidCursor { message: String },
	#[error("Invalid filter: {message}")]
	InvalidFilter { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<directory_storage::Error> for Error {
	fn from(err: directory_storage::Error) -> Self {
		match err {
			directory_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			directory_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}

impl From<directory_domain::Error> for Error {
	fn from(err: directory_domain::Error) -> Self {
		match err {
			directory_domain::Error::InvalidCursor { message } => Self::InvalidCursor { message },
			directory_domain::Error::InvalidFilter { message } => Self::InvalidFilter { message },
			directory_domain::Error::InvalidRequest { message } => Self::InvalidRequest { message },
			directory_domain::Error::CursorEncoding { message } => Self::Internal { message },
		}
	}
}
