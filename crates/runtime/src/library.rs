//! Process-wide SDK lifecycle.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::sdk::Sdk;

/// Brackets every other SDK call between `initialize` and `terminate`.
///
/// Borrowers obtain `&dyn Sdk` through [`Library::sdk`], so no reference
/// taken from the library can outlive [`Library::terminate`].
pub struct Library {
	sdk: Arc<dyn Sdk>,
	terminated: bool,
}

impl Library {
	/// Initializes the SDK.
	///
	/// # Errors
	///
	/// Returns [`Error::Init`] with the vendor code when the SDK refuses.
	pub fn initialize(sdk: Arc<dyn Sdk>) -> Result<Self> {
		sdk.initialize().map_err(|code| Error::Init { code })?;
		info!(target = "eos", "device SDK initialized");
		Ok(Self { sdk, terminated: false })
	}

	pub fn sdk(&self) -> &dyn Sdk {
		self.sdk.as_ref()
	}

	/// Terminates the SDK, reporting the vendor code on failure.
	pub fn terminate(mut self) -> Result<()> {
		self.terminate_inner()
	}

	fn terminate_inner(&mut self) -> Result<()> {
		if self.terminated {
			return Ok(());
		}
		self.terminated = true;
		self.sdk.terminate().map_err(|code| Error::Term { code })?;
		info!(target = "eos", "device SDK terminated");
		Ok(())
	}
}

impl Drop for Library {
	fn drop(&mut self) {
		if let Err(err) = self.terminate_inner() {
			warn!(target = "eos", error = %err, "SDK teardown on drop failed");
		}
	}
}

impl std::fmt::Debug for Library {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Library").field("terminated", &self.terminated).finish_non_exhaustive()
	}
}
