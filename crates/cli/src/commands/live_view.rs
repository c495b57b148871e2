use std::thread;
use std::time::Duration;

use eos::OutputTarget;
use serde::Serialize;
use tracing::info;

use super::{CommandContext, select_camera};
use crate::cli::LiveViewArgs;
use crate::error::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveViewData {
	pub port: String,
	pub target: OutputTarget,
	pub mask_before: String,
	pub mask_during: String,
	pub mask_after: String,
	pub held_ms: u64,
}

pub fn execute(ctx: &CommandContext, args: LiveViewArgs) -> Result<LiveViewData> {
	let target = match args.target.as_deref() {
		Some(raw) => raw.parse::<OutputTarget>()?,
		None => ctx.config.live_view_target(),
	};
	let hold_ms = args.hold_ms.unwrap_or_else(|| ctx.config.hold_ms());

	let eos = ctx.connect()?;
	let mut camera = select_camera(&eos, ctx.port(args.port.as_deref()))?;
	let port = camera.descriptor().port_identifier().to_string();

	camera.open_session()?;
	camera.set_live_view_target(target)?;

	let before = camera.output_mask()?;
	camera.start_live_view()?;
	let during = camera.output_mask()?;
	info!(target = "eos", port = %port, %target, hold_ms, "holding live view");

	if hold_ms > 0 {
		thread::sleep(Duration::from_millis(hold_ms));
	}

	camera.stop_live_view()?;
	let after = camera.output_mask()?;
	camera.close()?;

	eos.terminate()?;
	Ok(LiveViewData {
		port,
		target,
		mask_before: before.to_string(),
		mask_during: during.to_string(),
		mask_after: after.to_string(),
		held_ms: hold_ms,
	})
}
