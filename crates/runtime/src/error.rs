//! Error types for the SDK runtime layer.

use thiserror::Error;

use crate::status::StatusCode;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the process-wide SDK lifecycle.
#[derive(Debug, Error)]
pub enum Error {
	/// The SDK refused to initialize.
	#[error("failed to initialize device SDK: {code}")]
	Init { code: StatusCode },

	/// The SDK reported a failure while tearing down.
	#[error("failed to terminate device SDK: {code}")]
	Term { code: StatusCode },
}

impl Error {
	/// Raw vendor status code behind the failure.
	pub fn status_code(&self) -> StatusCode {
		match self {
			Error::Init { code } | Error::Term { code } => *code,
		}
	}
}
