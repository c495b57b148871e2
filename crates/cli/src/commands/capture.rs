use serde::Serialize;
use tracing::info;

use super::{CommandContext, select_camera};
use crate::cli::CaptureArgs;
use crate::error::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureData {
	pub port: String,
	pub description: String,
	pub shots: u32,
}

pub fn execute(ctx: &CommandContext, args: CaptureArgs) -> Result<CaptureData> {
	let eos = ctx.connect()?;
	let mut camera = select_camera(&eos, ctx.port(args.port.as_deref()))?;
	let port = camera.descriptor().port_identifier().to_string();
	let description = camera.descriptor().description().to_string();

	camera.open_session()?;
	// No retry on a rejected shot: a second attempt could expose twice.
	for shot in 1..=args.count {
		camera.take_picture()?;
		info!(target = "eos", port = %port, shot, "exposure triggered");
	}
	camera.close()?;

	eos.terminate()?;
	Ok(CaptureData {
		port,
		description,
		shots: args.count,
	})
}
