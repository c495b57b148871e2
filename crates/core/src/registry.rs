//! Device discovery.

use std::sync::Arc;

use eos_runtime::{DeviceAddedFn, OwnedRef, Sdk, StatusCode};
use tracing::{debug, info, warn};

use crate::descriptor::DeviceDescriptor;
use crate::error::{EnumerationStage, Error, Result};
use crate::handle::DeviceHandle;

/// Enumerates attached devices and hands out owned [`DeviceHandle`]s.
#[derive(Clone, Copy)]
pub struct DeviceRegistry<'eos> {
	sdk: &'eos dyn Sdk,
}

impl<'eos> DeviceRegistry<'eos> {
	pub(crate) fn new(sdk: &'eos dyn Sdk) -> Self {
		Self { sdk }
	}

	/// Snapshot of the devices attached right now.
	///
	/// All or nothing: if any device cannot be resolved, every handle obtained
	/// so far is released and a single [`Error::Enumeration`] is returned.
	pub fn enumerate(&self) -> Result<Vec<DeviceHandle<'eos>>> {
		let list = self
			.sdk
			.list_devices()
			.map_err(|code| enumeration(EnumerationStage::DeviceList, code))?;
		let list = OwnedRef::new(self.sdk, list);

		let count = self
			.sdk
			.child_count(list.raw())
			.map_err(|code| enumeration(EnumerationStage::ChildCount, code))?;
		debug!(target = "eos", count, "enumerating devices");

		// The count is the SDK's word; grow as devices actually resolve.
		let mut handles = Vec::new();
		for index in 0..count {
			let object = self
				.sdk
				.child_at(list.raw(), index)
				.map_err(|code| enumeration(EnumerationStage::ChildAt { index }, code))?;
			let object = OwnedRef::new(self.sdk, object);

			let info = self
				.sdk
				.device_info(object.raw())
				.map_err(|code| enumeration(EnumerationStage::DeviceInfo { index }, code))?;
			handles.push(DeviceHandle::new(object, DeviceDescriptor::from(info)));
		}

		info!(target = "eos", count = handles.len(), "enumerated devices");
		Ok(handles)
	}

	/// Enumerates and keeps the single device on `port`, releasing the rest.
	pub fn find_by_port(&self, port: &str) -> Result<DeviceHandle<'eos>> {
		self.enumerate()?
			.into_iter()
			.find(|handle| handle.descriptor().port_identifier() == port)
			.ok_or_else(|| Error::DeviceNotFound(port.to_string()))
	}

	/// Releases a handle obtained from [`Self::enumerate`].
	pub fn release(&self, handle: DeviceHandle<'eos>) {
		debug!(target = "eos", port = handle.descriptor().port_identifier(), "releasing device");
		handle.release();
	}

	/// Installs the device-added callback, replacing any previous one.
	///
	/// The callback runs on a thread the SDK chooses. It must not drive a
	/// [`Camera`](crate::Camera) directly; hand the notification off to
	/// whatever owns the camera instead.
	pub fn on_device_added<F>(&self, callback: F) -> Result<()>
	where
		F: Fn() + Send + Sync + 'static,
	{
		let handler: DeviceAddedFn = Arc::new(move || {
			debug!(target = "eos", "device added notification");
			callback();
		});
		self.sdk.set_device_added_handler(Some(handler)).map_err(notification_error)?;
		info!(target = "eos", "device-added callback installed");
		Ok(())
	}

	/// Removes the device-added callback.
	pub fn clear_device_added(&self) -> Result<()> {
		self.sdk.set_device_added_handler(None).map_err(notification_error)
	}
}

fn enumeration(stage: EnumerationStage, code: StatusCode) -> Error {
	warn!(target = "eos", %stage, %code, "device enumeration aborted");
	Error::Enumeration { stage, code }
}

fn notification_error(code: StatusCode) -> Error {
	if code == StatusCode::NOT_SUPPORTED {
		Error::Unsupported("device-added notification")
	} else {
		Error::Notification { code }
	}
}

impl std::fmt::Debug for DeviceRegistry<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DeviceRegistry").finish_non_exhaustive()
	}
}
