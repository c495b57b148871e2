//! The consumed surface of the vendor device-control SDK.
//!
//! Everything above this trait treats the SDK as an external collaborator:
//! references are opaque, every call reports a [`StatusCode`], and no call is
//! retried here. A native binding and [`SimulatedSdk`](crate::SimulatedSdk)
//! both sit behind the same trait.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::status::StatusCode;

/// Result of a single SDK call.
pub type SdkResult<T> = std::result::Result<T, StatusCode>;

/// Callback fired when the SDK notices a newly attached device.
///
/// Delivered on a thread owned by the SDK. The body must not drive an open
/// camera session without the caller's own serialization.
pub type DeviceAddedFn = Arc<dyn Fn() + Send + Sync>;

/// Opaque reference handed out by the SDK (device list or device).
///
/// Reference counted on the SDK side: every reference obtained must be given
/// back through [`Sdk::release`] exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectRef(u64);

impl ObjectRef {
	pub const fn from_raw(raw: u64) -> Self {
		ObjectRef(raw)
	}

	pub const fn as_raw(self) -> u64 {
		self.0
	}
}

impl fmt::Display for ObjectRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ref@{:x}", self.0)
	}
}

/// Device property identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub u32);

impl PropertyId {
	/// Live-view output routing bitmask.
	pub const EVF_OUTPUT_DEVICE: PropertyId = PropertyId(0x0000_0500);
}

impl fmt::Display for PropertyId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match *self {
			Self::EVF_OUTPUT_DEVICE => write!(f, "Evf_OutputDevice"),
			PropertyId(raw) => write!(f, "property {raw:#x}"),
		}
	}
}

/// Device command identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(pub u32);

impl CommandId {
	pub const TAKE_PICTURE: CommandId = CommandId(0x0000_0000);
}

impl fmt::Display for CommandId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match *self {
			Self::TAKE_PICTURE => write!(f, "TakePicture"),
			CommandId(raw) => write!(f, "command {raw:#x}"),
		}
	}
}

/// Output-routing bits understood by [`PropertyId::EVF_OUTPUT_DEVICE`].
///
/// Opaque vendor values. Set with OR, clear with AND-NOT.
pub mod evf_output {
	/// The camera's built-in display.
	pub const TFT: u32 = 0x0000_0001;
	/// The host computer.
	pub const PC: u32 = 0x0000_0002;
}

/// Static device metadata as reported by the SDK.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeviceInfo {
	pub port_name: String,
	pub description: String,
	pub subtype: u32,
	pub reserved: u32,
}

/// Calls consumed from the vendor SDK.
///
/// Implementations are expected to be blocking; none of these calls has a
/// timeout at this layer.
pub trait Sdk: Send + Sync {
	/// Process-wide initialization. Must precede every other call.
	fn initialize(&self) -> SdkResult<()>;

	/// Process-wide teardown.
	fn terminate(&self) -> SdkResult<()>;

	/// Snapshot of the attached devices, as a list reference.
	fn list_devices(&self) -> SdkResult<ObjectRef>;

	fn child_count(&self, list: ObjectRef) -> SdkResult<u32>;

	fn child_at(&self, list: ObjectRef, index: u32) -> SdkResult<ObjectRef>;

	fn device_info(&self, device: ObjectRef) -> SdkResult<RawDeviceInfo>;

	/// Drops one reference. Releasing the same reference twice is an error in
	/// the SDK's reference accounting.
	fn release(&self, object: ObjectRef) -> SdkResult<()>;

	fn open_session(&self, device: ObjectRef) -> SdkResult<()>;

	fn close_session(&self, device: ObjectRef) -> SdkResult<()>;

	fn send_command(&self, device: ObjectRef, command: CommandId, param: i32) -> SdkResult<()>;

	fn get_property(&self, device: ObjectRef, property: PropertyId) -> SdkResult<u32>;

	fn set_property(&self, device: ObjectRef, property: PropertyId, value: u32) -> SdkResult<()>;

	/// Installs (or with `None`, clears) the single device-added callback.
	///
	/// SDKs without hot-plug notification keep the default.
	fn set_device_added_handler(&self, _handler: Option<DeviceAddedFn>) -> SdkResult<()> {
		Err(StatusCode::NOT_SUPPORTED)
	}
}
