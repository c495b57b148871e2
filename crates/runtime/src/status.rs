//! Raw status codes returned by the device-control SDK.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integral status value reported by every SDK call.
///
/// `0` is success. Anything else is passed through untouched so callers can
/// log or compare it against the vendor's documented table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u32);

impl StatusCode {
	pub const OK: StatusCode = StatusCode(0x0000_0000);
	pub const UNIMPLEMENTED: StatusCode = StatusCode(0x0000_0001);
	pub const INTERNAL_ERROR: StatusCode = StatusCode(0x0000_0002);
	pub const NOT_SUPPORTED: StatusCode = StatusCode(0x0000_0007);
	pub const INVALID_PARAMETER: StatusCode = StatusCode(0x0000_0060);
	pub const INVALID_HANDLE: StatusCode = StatusCode(0x0000_0061);
	pub const INVALID_INDEX: StatusCode = StatusCode(0x0000_0063);
	pub const DEVICE_NOT_FOUND: StatusCode = StatusCode(0x0000_0080);
	pub const DEVICE_BUSY: StatusCode = StatusCode(0x0000_0081);
	pub const COMM_DISCONNECTED: StatusCode = StatusCode(0x0000_00C1);
	pub const SESSION_NOT_OPEN: StatusCode = StatusCode(0x0000_2003);
	pub const TAKE_PICTURE_AF_NG: StatusCode = StatusCode(0x0000_8D01);

	pub fn is_ok(self) -> bool {
		self == Self::OK
	}

	/// Symbolic name for codes this crate knows about.
	pub fn name(self) -> Option<&'static str> {
		let name = match self {
			Self::OK => "OK",
			Self::UNIMPLEMENTED => "UNIMPLEMENTED",
			Self::INTERNAL_ERROR => "INTERNAL_ERROR",
			Self::NOT_SUPPORTED => "NOT_SUPPORTED",
			Self::INVALID_PARAMETER => "INVALID_PARAMETER",
			Self::INVALID_HANDLE => "INVALID_HANDLE",
			Self::INVALID_INDEX => "INVALID_INDEX",
			Self::DEVICE_NOT_FOUND => "DEVICE_NOT_FOUND",
			Self::DEVICE_BUSY => "DEVICE_BUSY",
			Self::COMM_DISCONNECTED => "COMM_DISCONNECTED",
			Self::SESSION_NOT_OPEN => "SESSION_NOT_OPEN",
			Self::TAKE_PICTURE_AF_NG => "TAKE_PICTURE_AF_NG",
			_ => return None,
		};
		Some(name)
	}
}

impl fmt::Display for StatusCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.name() {
			Some(name) => write!(f, "{name} (code={:#x})", self.0),
			None => write!(f, "code={:#x}", self.0),
		}
	}
}

impl From<u32> for StatusCode {
	fn from(raw: u32) -> Self {
		StatusCode(raw)
	}
}
