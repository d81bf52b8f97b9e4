#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Database request failed: {0}")]
	Sqlx(#[from] sqlx::Error),
	#[error("Rejected fixture input: {0}")]
	InvalidArgument(String),
}
