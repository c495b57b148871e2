use eos::DeviceDescriptor;
use serde::Serialize;

use super::CommandContext;
use crate::error::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicesData {
	pub count: usize,
	pub devices: Vec<DeviceDescriptor>,
}

pub fn execute(ctx: &CommandContext) -> Result<DevicesData> {
	let eos = ctx.connect()?;
	let registry = eos.devices();

	let handles = registry.enumerate()?;
	let devices: Vec<DeviceDescriptor> = handles.iter().map(|h| h.descriptor().clone()).collect();
	for handle in handles {
		registry.release(handle);
	}

	eos.terminate()?;
	Ok(DevicesData {
		count: devices.len(),
		devices,
	})
}
