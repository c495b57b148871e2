//! Exclusively owned device handles.

use eos_runtime::{ObjectRef, OwnedRef, Sdk};

use crate::descriptor::DeviceDescriptor;

/// One physical device, as returned by [`DeviceRegistry::enumerate`].
///
/// Not `Clone`: a handle has exactly one owner. Dropping it releases the SDK
/// reference; [`DeviceHandle::release`] does so explicitly.
///
/// [`DeviceRegistry::enumerate`]: crate::DeviceRegistry::enumerate
#[derive(Debug)]
pub struct DeviceHandle<'eos> {
	object: OwnedRef<'eos>,
	descriptor: DeviceDescriptor,
}

impl<'eos> DeviceHandle<'eos> {
	pub(crate) fn new(object: OwnedRef<'eos>, descriptor: DeviceDescriptor) -> Self {
		Self { object, descriptor }
	}

	pub fn descriptor(&self) -> &DeviceDescriptor {
		&self.descriptor
	}

	/// Releases the underlying SDK reference.
	pub fn release(self) {
		self.object.release();
	}

	pub(crate) fn raw(&self) -> ObjectRef {
		self.object.raw()
	}

	pub(crate) fn sdk(&self) -> &'eos dyn Sdk {
		self.object.sdk()
	}
}
