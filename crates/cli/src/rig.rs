//! Simulated device rig the CLI drives in place of a native SDK binding.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use eos::{SimDevice, SimulatedSdk};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::config_error;
use crate::error::Result;

/// Port of the built-in rig's only camera.
pub const DEFAULT_PORT: &str = "0";

/// Devices attached to the simulator, as stored in a rig file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RigFile {
	#[serde(default)]
	pub devices: Vec<SimDevice>,
}

impl Default for RigFile {
	/// One Rebel T4i on port "0" with live view routed nowhere.
	fn default() -> Self {
		Self {
			devices: vec![
				SimDevice::new(DEFAULT_PORT, "Canon EOS REBEL T4i")
					.with_subtype(1)
					.with_reserved(2_971_958_586),
			],
		}
	}
}

impl RigFile {
	pub fn load(path: &Path) -> Result<Self> {
		let rig = fs::read_to_string(path)
			.with_context(|| format!("reading rig {}", path.display()))
			.and_then(|raw| {
				serde_json::from_str::<RigFile>(&raw).with_context(|| format!("parsing rig {}", path.display()))
			})
			.map_err(config_error)?;
		debug!(target = "eos", path = %path.display(), devices = rig.devices.len(), "loaded rig");
		Ok(rig)
	}

	/// Rig at `path`, or the built-in one.
	pub fn resolve(path: Option<&Path>) -> Result<Self> {
		match path {
			Some(path) => Self::load(path),
			None => Ok(Self::default()),
		}
	}

	pub fn into_sdk(self) -> Arc<SimulatedSdk> {
		Arc::new(SimulatedSdk::with_devices(self.devices))
	}
}

#[cfg(test)]
mod tests {
	use tempfile::NamedTempFile;

	use super::*;
	use crate::error::CliError;

	#[test]
	fn default_rig_has_one_camera() {
		let rig = RigFile::default();
		assert_eq!(rig.devices.len(), 1);
		assert_eq!(rig.devices[0].info.port_name, "0");
		assert_eq!(rig.devices[0].info.reserved, 2_971_958_586);
	}

	#[test]
	fn loads_devices_from_json() {
		let file = NamedTempFile::new().unwrap();
		fs::write(
			file.path(),
			r#"{"devices":[
				{"portName":"usb:1","description":"Body A","subtype":1,"reserved":0},
				{"portName":"usb:2","description":"Body B","subtype":1,"reserved":0,"outputDevice":4}
			]}"#,
		)
		.unwrap();

		let rig = RigFile::load(file.path()).unwrap();
		assert_eq!(rig.devices.len(), 2);
		assert_eq!(rig.devices[1].output_device, 4);
		assert_eq!(rig.into_sdk().device_count(), 2);
	}

	#[test]
	fn missing_rig_is_a_config_error() {
		let err = RigFile::resolve(Some(Path::new("/nonexistent/rig.json"))).unwrap_err();
		assert!(matches!(err, CliError::Config(ref msg) if msg.contains("reading rig")));
	}
}
