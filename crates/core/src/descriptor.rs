//! Static device metadata captured at enumeration time.

use eos_runtime::RawDeviceInfo;
use serde::Serialize;

/// Immutable description of an attached device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
	port_identifier: String,
	description: String,
	subtype: u32,
	reserved_vendor_field: u32,
}

impl DeviceDescriptor {
	pub fn port_identifier(&self) -> &str {
		&self.port_identifier
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn subtype(&self) -> u32 {
		self.subtype
	}

	pub fn reserved_vendor_field(&self) -> u32 {
		self.reserved_vendor_field
	}
}

impl From<RawDeviceInfo> for DeviceDescriptor {
	fn from(info: RawDeviceInfo) -> Self {
		Self {
			port_identifier: info.port_name,
			description: info.description,
			subtype: info.subtype,
			reserved_vendor_field: info.reserved,
		}
	}
}
