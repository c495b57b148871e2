//! Error taxonomy for device discovery and camera control.
//!
//! Every failure is returned to the immediate caller. Nothing here is retried:
//! each operation has a physical side effect on the device.

use std::fmt;

use eos_runtime::{CommandId, PropertyId, StatusCode};
use thiserror::Error;

/// Result type alias for camera operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Step of enumeration that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnumerationStage {
	DeviceList,
	ChildCount,
	ChildAt { index: u32 },
	DeviceInfo { index: u32 },
}

impl fmt::Display for EnumerationStage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EnumerationStage::DeviceList => write!(f, "obtaining the device list"),
			EnumerationStage::ChildCount => write!(f, "counting attached devices"),
			EnumerationStage::ChildAt { index } => write!(f, "obtaining device {index}"),
			EnumerationStage::DeviceInfo { index } => write!(f, "reading info for device {index}"),
		}
	}
}

#[derive(Debug, Error)]
pub enum Error {
	/// SDK lifecycle failure (initialize / terminate).
	#[error(transparent)]
	Runtime(#[from] eos_runtime::Error),

	#[error("device enumeration failed while {stage}: {code}")]
	Enumeration { stage: EnumerationStage, code: StatusCode },

	#[error("no attached device on port '{0}'")]
	DeviceNotFound(String),

	#[error("failed to open session with camera: {code}")]
	Session { code: StatusCode },

	#[error("failed to close session with camera: {code}")]
	SessionClose { code: StatusCode },

	#[error("session is already open")]
	AlreadyOpen,

	#[error("session is not open, call open_session first")]
	NotOpen,

	#[error("camera rejected {command}: {code}")]
	Command { command: CommandId, code: StatusCode },

	#[error("failed to read {property}: {code}")]
	PropertyRead { property: PropertyId, code: StatusCode },

	#[error("failed to write {property}: {code}")]
	PropertyWrite { property: PropertyId, code: StatusCode },

	#[error("unrecognized live view output target: {0}")]
	InvalidTarget(String),

	#[error("no live view output target configured")]
	NoTargetConfigured,

	#[error("live view is already active")]
	AlreadyActive,

	#[error("live view is not active")]
	NotActive,

	#[error("failed to register device-added callback: {code}")]
	Notification { code: StatusCode },

	#[error("device SDK does not support {0}")]
	Unsupported(&'static str),
}

impl Error {
	/// Raw vendor status code, when the failure came from the SDK.
	pub fn status_code(&self) -> Option<StatusCode> {
		match self {
			Error::Runtime(err) => Some(err.status_code()),
			Error::Enumeration { code, .. }
			| Error::Notification { code }
			| Error::Session { code }
			| Error::SessionClose { code }
			| Error::Command { code, .. }
			| Error::PropertyRead { code, .. }
			| Error::PropertyWrite { code, .. } => Some(*code),
			_ => None,
		}
	}

	/// Returns true when the call was rejected because of the current session
	/// or live-view state, before anything reached the SDK.
	pub fn is_state_misuse(&self) -> bool {
		matches!(
			self,
			Error::AlreadyOpen | Error::NotOpen | Error::AlreadyActive | Error::NotActive | Error::NoTargetConfigured
		)
	}
}
