//! Scoped ownership of SDK references.

use std::fmt;

use tracing::{debug, warn};

use crate::sdk::{ObjectRef, Sdk};

/// An [`ObjectRef`] that is released exactly once.
///
/// Dropping releases the reference; [`OwnedRef::release`] does the same
/// explicitly and consumes the value, so a second release cannot be written.
pub struct OwnedRef<'sdk> {
	sdk: &'sdk dyn Sdk,
	raw: ObjectRef,
	released: bool,
}

impl<'sdk> OwnedRef<'sdk> {
	/// Takes ownership of a reference the SDK just handed out.
	pub fn new(sdk: &'sdk dyn Sdk, raw: ObjectRef) -> Self {
		Self { sdk, raw, released: false }
	}

	pub fn raw(&self) -> ObjectRef {
		self.raw
	}

	pub fn sdk(&self) -> &'sdk dyn Sdk {
		self.sdk
	}

	/// Gives the reference back to the SDK now.
	pub fn release(mut self) {
		self.release_inner();
	}

	fn release_inner(&mut self) {
		if self.released {
			return;
		}
		self.released = true;
		match self.sdk.release(self.raw) {
			Ok(()) => debug!(target = "eos", object = %self.raw, "released reference"),
			Err(code) => warn!(target = "eos", object = %self.raw, %code, "SDK rejected reference release"),
		}
	}
}

impl Drop for OwnedRef<'_> {
	fn drop(&mut self) {
		self.release_inner();
	}
}

impl fmt::Debug for OwnedRef<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OwnedRef").field("raw", &self.raw).field("released", &self.released).finish()
	}
}
