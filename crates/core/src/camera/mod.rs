//! Session controller for one device.
//!
//! ```text
//!            open_session                start_live_view
//!  Closed ───────────────▶ Open ─────────────────────▶ LiveView
//!    ▲                      │  ◀─────────────────────     │
//!    │     close_session    │      stop_live_view         │
//!    └──────────────────────┴─────────────────────────────┘
//! ```
//!
//! State is only changed after the SDK confirms a call. A failed call leaves
//! the recorded state exactly as it was.

mod live_view;
mod state;

use eos_runtime::CommandId;
use tracing::{debug, info, warn};

pub use state::{SessionPhase, SessionState};

use crate::descriptor::DeviceDescriptor;
use crate::error::{Error, Result};
use crate::handle::DeviceHandle;
use crate::output::OutputTarget;

/// Owns one [`DeviceHandle`] and gates every command on session state.
///
/// Not internally synchronized. Callers driving one camera from several
/// threads must serialize access themselves; the live-view read-modify-write
/// is not atomic on the device.
///
/// Dropping a camera closes an open session (without stopping live view
/// first) and releases the handle.
#[derive(Debug)]
pub struct Camera<'eos> {
	handle: DeviceHandle<'eos>,
	state: SessionState,
}

impl<'eos> Camera<'eos> {
	pub fn new(handle: DeviceHandle<'eos>) -> Self {
		Self {
			handle,
			state: SessionState::default(),
		}
	}

	pub fn descriptor(&self) -> &DeviceDescriptor {
		self.handle.descriptor()
	}

	pub fn state(&self) -> SessionState {
		self.state
	}

	pub fn phase(&self) -> SessionPhase {
		self.state.phase()
	}

	pub fn live_view_target(&self) -> Option<OutputTarget> {
		self.state.live_view_target
	}

	/// Opens a command session.
	///
	/// # Errors
	///
	/// - [`Error::AlreadyOpen`] if a session is already open
	/// - [`Error::Session`] if the SDK refuses; the camera stays closed
	pub fn open_session(&mut self) -> Result<()> {
		if self.state.session_open {
			return Err(Error::AlreadyOpen);
		}
		self.handle
			.sdk()
			.open_session(self.handle.raw())
			.map_err(|code| Error::Session { code })?;
		self.state.mark_open();
		info!(target = "eos", port = self.port(), "session opened");
		Ok(())
	}

	/// Closes the session. A no-op when already closed.
	///
	/// Live view is not stopped first: stop it before closing if the device's
	/// output routing matters. The recorded live-view state is cleared either
	/// way once the SDK confirms the close.
	pub fn close_session(&mut self) -> Result<()> {
		if !self.state.session_open {
			debug!(target = "eos", port = self.port(), "close_session on closed camera");
			return Ok(());
		}
		if self.state.live_view_active {
			warn!(
				target = "eos",
				port = self.port(),
				"closing session with live view active; device output routing left as-is"
			);
		}
		self.handle
			.sdk()
			.close_session(self.handle.raw())
			.map_err(|code| Error::SessionClose { code })?;
		self.state.mark_closed();
		info!(target = "eos", port = self.port(), "session closed");
		Ok(())
	}

	/// Fires the shutter once. Never retried.
	pub fn take_picture(&mut self) -> Result<()> {
		if !self.state.session_open {
			return Err(Error::NotOpen);
		}
		let command = CommandId::TAKE_PICTURE;
		self.handle
			.sdk()
			.send_command(self.handle.raw(), command, 0)
			.map_err(|code| Error::Command { command, code })?;
		info!(target = "eos", port = self.port(), "picture taken");
		Ok(())
	}

	/// Closes the session and releases the handle.
	///
	/// The handle is released even when closing fails.
	pub fn close(mut self) -> Result<()> {
		let result = self.close_session();
		if result.is_err() {
			// Drop must not attempt the close a second time.
			self.state.mark_closed();
		}
		result
	}

	fn port(&self) -> &str {
		self.handle.descriptor().port_identifier()
	}
}

impl Drop for Camera<'_> {
	fn drop(&mut self) {
		if let Err(err) = self.close_session() {
			warn!(target = "eos", port = self.port(), error = %err, "best-effort session close failed");
		}
	}
}
