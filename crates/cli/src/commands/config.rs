use std::path::PathBuf;

use eos::OutputTarget;
use serde::Serialize;
use tracing::info;

use super::emit;
use crate::cli::{ConfigAction, ConfigSetArgs};
use crate::config::{CliConfig, ConfigStore, SCHEMA_VERSION};
use crate::error::Result;
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigData {
	pub path: PathBuf,
	pub config: CliConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetData {
	pub path: PathBuf,
	pub removed: bool,
}

#[derive(Debug, Serialize)]
pub struct PathData {
	pub path: PathBuf,
}

pub fn execute(store: ConfigStore, action: ConfigAction, format: OutputFormat) -> Result<()> {
	let path = store.path().to_path_buf();

	match action {
		ConfigAction::Show => {
			let config = store.load()?;
			emit("config show", ConfigData { path, config }, format);
		}
		ConfigAction::Set(args) => {
			let config = apply(store.load()?, args)?;
			store.save(&config)?;
			info!(target = "eos", path = %path.display(), "config updated");
			emit("config set", ConfigData { path, config }, format);
		}
		ConfigAction::Reset => {
			let removed = store.reset()?;
			emit("config reset", ResetData { path, removed }, format);
		}
		ConfigAction::Path => emit("config path", PathData { path }, format),
	}
	Ok(())
}

/// Merges the given flags over `config`. Unset flags keep stored values.
fn apply(mut config: CliConfig, args: ConfigSetArgs) -> Result<CliConfig> {
	if let Some(raw) = args.target {
		let target = raw.parse::<OutputTarget>()?;
		config.defaults.live_view_target = Some(target);
	}
	if let Some(port) = args.port {
		config.defaults.port = Some(port);
	}
	if let Some(hold_ms) = args.hold_ms {
		config.defaults.hold_ms = Some(hold_ms);
	}
	if let Some(rig) = args.rig_file {
		config.rig = Some(rig);
	}
	config.schema = SCHEMA_VERSION;
	Ok(config)
}
