//! Live-view routing via read-modify-write of the output-device property.

use eos_runtime::PropertyId;
use tracing::{debug, info};

use super::Camera;
use crate::error::{Error, Result};
use crate::output::{OutputMask, OutputTarget};

const OUTPUT_DEVICE: PropertyId = PropertyId::EVF_OUTPUT_DEVICE;

impl Camera<'_> {
	/// Chooses where live view is routed.
	///
	/// If live view is running it is stopped first, so the device never keeps
	/// routing to a target the camera no longer records. On a failed stop the
	/// old target stays in place. Works on a closed camera too.
	pub fn set_live_view_target(&mut self, target: OutputTarget) -> Result<()> {
		if self.state.live_view_active {
			self.stop_live_view()?;
		}
		self.state.live_view_target = Some(target);
		debug!(target = "eos", port = self.port(), output = %target, "live view target set");
		Ok(())
	}

	/// Routes live view to the configured target, preserving every other bit.
	///
	/// # Errors
	///
	/// - [`Error::NotOpen`] / [`Error::AlreadyActive`] on misuse
	/// - [`Error::NoTargetConfigured`] before [`Self::set_live_view_target`]
	/// - [`Error::PropertyRead`]: nothing was written
	/// - [`Error::PropertyWrite`]: state stays `Open`
	pub fn start_live_view(&mut self) -> Result<()> {
		if !self.state.session_open {
			return Err(Error::NotOpen);
		}
		if self.state.live_view_active {
			return Err(Error::AlreadyActive);
		}
		let target = self.state.live_view_target.ok_or(Error::NoTargetConfigured)?;

		let current = self.output_mask()?;
		self.write_output_mask(current.union(target.mask()))?;
		self.state.live_view_active = true;
		info!(target = "eos", port = self.port(), output = %target, "live view started");
		Ok(())
	}

	/// Clears this camera's target bit, leaving any other routing untouched.
	pub fn stop_live_view(&mut self) -> Result<()> {
		if !self.state.session_open {
			return Err(Error::NotOpen);
		}
		if !self.state.live_view_active {
			return Err(Error::NotActive);
		}
		let Some(target) = self.state.live_view_target else {
			return Err(Error::NoTargetConfigured);
		};

		let current = self.output_mask()?;
		self.write_output_mask(current.without(target.mask()))?;
		self.state.live_view_active = false;
		info!(target = "eos", port = self.port(), output = %target, "live view stopped");
		Ok(())
	}

	/// Stops live view if it is running, starts it otherwise.
	pub fn toggle_live_view(&mut self) -> Result<()> {
		if self.state.live_view_active {
			self.stop_live_view()
		} else {
			self.start_live_view()
		}
	}

	/// Reads the device's current output-routing mask.
	pub fn output_mask(&self) -> Result<OutputMask> {
		if !self.state.session_open {
			return Err(Error::NotOpen);
		}
		let bits = self
			.handle
			.sdk()
			.get_property(self.handle.raw(), OUTPUT_DEVICE)
			.map_err(|code| Error::PropertyRead { property: OUTPUT_DEVICE, code })?;
		Ok(OutputMask::from_bits(bits))
	}

	fn write_output_mask(&self, mask: OutputMask) -> Result<()> {
		debug!(target = "eos", port = self.port(), %mask, "writing output device mask");
		self.handle
			.sdk()
			.set_property(self.handle.raw(), OUTPUT_DEVICE, mask.bits())
			.map_err(|code| Error::PropertyWrite { property: OUTPUT_DEVICE, code })
	}
}
