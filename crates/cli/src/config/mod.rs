//! Persistent CLI configuration.
//!
//! A single JSON file at `$XDG_CONFIG_HOME/eos/cli/config.json` (falling back
//! to `~/.config`), overridable with `--config`. A missing file means
//! defaults; a malformed one is an error rather than being silently replaced.


use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use eos::OutputTarget;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result};

/// Schema version for config files.
pub const SCHEMA_VERSION: u32 = 1;

/// Live-view hold time used when neither flag nor config sets one.
pub const DEFAULT_HOLD_MS: u64 = 3000;

/// Defaults applied to commands when flags are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub live_view_target: Option<OutputTarget>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub port: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hold_ms: Option<u64>,
}

/// Durable CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
	#[serde(default)]
	pub schema: u32,
	#[serde(default)]
	pub defaults: Defaults,
	/// JSON file describing the simulated devices.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rig: Option<PathBuf>,
}

impl CliConfig {
	/// Creates a config with current [`SCHEMA_VERSION`].
	pub fn new() -> Self {
		Self {
			schema: SCHEMA_VERSION,
			..Default::default()
		}
	}

	pub fn live_view_target(&self) -> OutputTarget {
		self.defaults.live_view_target.unwrap_or(OutputTarget::Tft)
	}

	pub fn hold_ms(&self) -> u64 {
		self.defaults.hold_ms.unwrap_or(DEFAULT_HOLD_MS)
	}
}

/// Location of the config file on disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
	path: PathBuf,
}

impl ConfigStore {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	/// Store at `override_path`, or the XDG default.
	pub fn resolve(override_path: Option<&Path>) -> Self {
		match override_path {
			Some(path) => Self::new(path.to_path_buf()),
			None => Self::new(default_config_path()),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn load(&self) -> Result<CliConfig> {
		if !self.path.exists() {
			debug!(target = "eos", path = %self.path.display(), "no config file, using defaults");
			return Ok(CliConfig::new());
		}
		let config = fs::read_to_string(&self.path)
			.with_context(|| format!("reading {}", self.path.display()))
			.and_then(|raw| {
				serde_json::from_str::<CliConfig>(&raw).with_context(|| format!("parsing {}", self.path.display()))
			})
			.map_err(config_error)?;
		Ok(config)
	}

	pub fn save(&self, config: &CliConfig) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		let json = serde_json::to_string_pretty(config)?;
		fs::write(&self.path, json)?;
		debug!(target = "eos", path = %self.path.display(), "config saved");
		Ok(())
	}

	/// Deletes the file. Returns false when there was nothing to delete.
	pub fn reset(&self) -> Result<bool> {
		match fs::remove_file(&self.path) {
			Ok(()) => Ok(true),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
			Err(err) => Err(err.into()),
		}
	}
}

pub(crate) fn config_error(err: anyhow::Error) -> CliError {
	CliError::Config(format!("{err:#}"))
}

fn default_config_path() -> PathBuf {
	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
		.unwrap_or_else(|| PathBuf::from("."));

	config_home.join("eos/cli/config.json")
}
