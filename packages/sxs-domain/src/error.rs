pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid argument: {message}")]
	InvalidArgument { message: String },
	#[error("Invalid response: {message}")]
	InvalidResponse { message: String },
	#[error(transparent)]
	Xml(#[from] roxmltree::Error),
	#[error(transparent)]
	Url(#[from] url::ParseError),
}
