use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot read directory config {path:?}.")]
	ReadConfig { path: PathBuf, source: std::io::Error },
	#[error("Directory config {path:?} is not valid TOML for this service.")]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	#[error("{message}")]
	Validation { message: String },
}
impl Error {
	pub(crate) fn invalid(key: &str, requirement: &str) -> Self {
		Self::Validation { message: format!("{key} {requirement}.") }
	}
}
