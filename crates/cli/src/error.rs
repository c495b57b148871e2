use thiserror::Error;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("configuration error: {0}")]
	Config(String),

	#[error(transparent)]
	Camera(#[from] eos::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

fn camera_error_code(err: &eos::Error) -> ErrorCode {
	use eos::Error as E;

	match err {
		E::Runtime(_) => ErrorCode::SdkLifecycle,
		E::Enumeration { .. } => ErrorCode::EnumerationFailed,
		E::DeviceNotFound(_) => ErrorCode::DeviceNotFound,
		E::Session { .. } | E::SessionClose { .. } | E::AlreadyOpen | E::NotOpen => ErrorCode::SessionError,
		E::Command { .. } => ErrorCode::CommandRejected,
		E::PropertyRead { .. } | E::PropertyWrite { .. } => ErrorCode::PropertyError,
		E::InvalidTarget(_) => ErrorCode::InvalidInput,
		E::NoTargetConfigured | E::AlreadyActive | E::NotActive => ErrorCode::LiveViewState,
		E::Notification { .. } | E::Unsupported(_) => ErrorCode::Unsupported,
	}
}

impl CliError {
	/// Convert this error to a CommandError for structured output
	pub fn to_command_error(&self) -> CommandError {
		let (code, details) = match self {
			CliError::Config(_) => (ErrorCode::ConfigError, None),
			CliError::Camera(err) => (
				camera_error_code(err),
				err.status_code().map(|code| {
					serde_json::json!({
						"statusCode": code.0,
						"status": code.to_string(),
					})
				}),
			),
			CliError::Io(_) => (ErrorCode::IoError, None),
			CliError::Json(_) => (ErrorCode::InternalError, None),
			CliError::Anyhow(_) => (ErrorCode::InternalError, None),
		};

		CommandError {
			code,
			message: format!("{self:#}"),
			details,
		}
	}
}
