//! Library entry point.

use std::sync::Arc;

use eos_runtime::{Library, Sdk};

use crate::error::Result;
use crate::registry::DeviceRegistry;

/// An initialized device SDK.
///
/// Registries, handles and cameras borrow from `Eos`, so the SDK cannot be
/// terminated while any of them is alive.
#[derive(Debug)]
pub struct Eos {
	library: Library,
}

impl Eos {
	/// Initializes the SDK behind `sdk`.
	pub fn initialize(sdk: Arc<dyn Sdk>) -> Result<Self> {
		Ok(Self {
			library: Library::initialize(sdk)?,
		})
	}

	pub fn devices(&self) -> DeviceRegistry<'_> {
		DeviceRegistry::new(self.library.sdk())
	}

	/// Terminates the SDK. Dropping `Eos` does the same, logging failures.
	pub fn terminate(self) -> Result<()> {
		Ok(self.library.terminate()?)
	}
}
