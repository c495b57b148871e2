//! Per-handle session bookkeeping.

use serde::Serialize;

use crate::output::OutputTarget;

/// Coarse state of a [`Camera`](crate::Camera).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
	Closed,
	/// Session open, live view off.
	Open,
	/// Session open, live view routed to the configured target.
	LiveView,
}

/// What the controller believes about the device.
///
/// `live_view_active` implies `session_open` and a configured target. The
/// target survives closing the session; live-view activity does not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
	pub(super) session_open: bool,
	pub(super) live_view_active: bool,
	pub(super) live_view_target: Option<OutputTarget>,
}

impl SessionState {
	pub fn is_open(&self) -> bool {
		self.session_open
	}

	pub fn is_live_view_active(&self) -> bool {
		self.live_view_active
	}

	pub fn live_view_target(&self) -> Option<OutputTarget> {
		self.live_view_target
	}

	pub fn phase(&self) -> SessionPhase {
		match (self.session_open, self.live_view_active) {
			(false, _) => SessionPhase::Closed,
			(true, false) => SessionPhase::Open,
			(true, true) => SessionPhase::LiveView,
		}
	}

	pub(super) fn mark_open(&mut self) {
		self.session_open = true;
		// Never carry live-view activity over from a previous session.
		self.live_view_active = false;
	}

	pub(super) fn mark_closed(&mut self) {
		self.session_open = false;
		self.live_view_active = false;
	}
}
