mod capture;
mod config;
mod devices;
mod live_view;

use std::path::{Path, PathBuf};

use eos::{Camera, Eos, Error as CameraError};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::{CliConfig, ConfigStore};
use crate::error::{CliError, Result};
use crate::output::{self, OutputFormat, ResultBuilder};
use crate::rig::RigFile;

/// Everything a command needs besides its own arguments.
pub struct CommandContext {
	pub config: CliConfig,
	rig_override: Option<PathBuf>,
}

impl CommandContext {
	pub fn new(config_path: Option<&Path>, rig_override: Option<PathBuf>) -> Result<Self> {
		let config = ConfigStore::resolve(config_path).load()?;
		Ok(Self {
			config,
			rig_override,
		})
	}

	/// Initializes the SDK against the selected rig.
	pub fn connect(&self) -> Result<Eos> {
		let rig_path = self.rig_override.as_deref().or(self.config.rig.as_deref());
		let sdk = RigFile::resolve(rig_path)?.into_sdk();
		Ok(Eos::initialize(sdk)?)
	}

	/// Port from the flag, then the config.
	pub fn port<'a>(&'a self, flag: Option<&'a str>) -> Option<&'a str> {
		flag.or(self.config.defaults.port.as_deref())
	}
}

/// Camera for `port`, or for the first enumerated device when none is given.
pub(crate) fn select_camera<'eos>(eos: &'eos Eos, port: Option<&str>) -> Result<Camera<'eos>> {
	let registry = eos.devices();
	let handle = match port {
		Some(port) => registry.find_by_port(port)?,
		None => registry
			.enumerate()?
			.into_iter()
			.next()
			.ok_or_else(|| CliError::Camera(CameraError::DeviceNotFound("<any>".into())))?,
	};
	debug!(target = "eos", port = handle.descriptor().port_identifier(), "selected camera");
	Ok(Camera::new(handle))
}

pub fn dispatch(cli: Cli, format: OutputFormat) -> Result<()> {
	let Cli {
		command,
		config: config_path,
		rig,
		..
	} = cli;
	let config_path = config_path.as_deref();

	match command {
		// Never loads the stored file, so a broken config can still be reset.
		Commands::Config(args) => config::execute(ConfigStore::resolve(config_path), args.action, format)?,
		Commands::Devices => {
			let ctx = CommandContext::new(config_path, rig)?;
			emit("devices", devices::execute(&ctx)?, format);
		}
		Commands::Capture(args) => {
			let ctx = CommandContext::new(config_path, rig)?;
			emit("capture", capture::execute(&ctx, args)?, format);
		}
		Commands::LiveView(args) => {
			let ctx = CommandContext::new(config_path, rig)?;
			emit("live-view", live_view::execute(&ctx, args)?, format);
		}
	}
	Ok(())
}

pub(crate) fn emit<T: Serialize>(command: &str, data: T, format: OutputFormat) {
	let result = ResultBuilder::new(command).data(data).build();
	output::print_result(&result, format);
}
