
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;
use crate::styles::cli_styles;

/// Root CLI.
#[derive(Parser, Debug)]
#[command(name = "eos")]
#[command(about = "Drive tethered EOS camera sessions: capture and live view")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv every SDK call)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: toon (default), json, ndjson, or text
	#[arg(short = 'f', long, global = true, value_enum, default_value = "toon")]
	pub format: OutputFormat,

	/// Config file (defaults to $XDG_CONFIG_HOME/eos/cli/config.json)
	#[arg(long, global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Rig file listing simulated devices; overrides the configured rig
	#[arg(long, global = true, value_name = "PATH")]
	pub rig: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// List attached devices.
	Devices,
	/// Open a session and take one or more pictures.
	Capture(CaptureArgs),
	/// Route live view to a target, hold it, then restore the output mask.
	LiveView(LiveViewArgs),
	/// Manage the persistent CLI configuration.
	Config(ConfigArgs),
}

impl Commands {
	/// Name reported in the output envelope.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Devices => "devices",
			Commands::Capture(_) => "capture",
			Commands::LiveView(_) => "live-view",
			Commands::Config(args) => match args.action {
				ConfigAction::Show => "config show",
				ConfigAction::Set(_) => "config set",
				ConfigAction::Reset => "config reset",
				ConfigAction::Path => "config path",
			},
		}
	}
}

#[derive(Args, Debug, Clone)]
pub struct CaptureArgs {
	/// Port of the camera (defaults to config, then the first device)
	#[arg(long, value_name = "PORT")]
	pub port: Option<String>,

	/// Number of exposures
	#[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
	pub count: u32,
}

#[derive(Args, Debug, Clone)]
pub struct LiveViewArgs {
	/// Port of the camera (defaults to config, then the first device)
	#[arg(long, value_name = "PORT")]
	pub port: Option<String>,

	/// Output target: tft (camera display) or pc (host)
	#[arg(long, value_name = "TARGET")]
	pub target: Option<String>,

	/// How long live view stays on before it is stopped
	#[arg(long, value_name = "MS")]
	pub hold_ms: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
	#[command(subcommand)]
	pub action: ConfigAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
	/// Print the effective configuration.
	Show,
	/// Update stored defaults.
	Set(ConfigSetArgs),
	/// Delete the config file.
	Reset,
	/// Print the config file location.
	Path,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
	/// Default live view target: tft or pc
	#[arg(long, value_name = "TARGET")]
	pub target: Option<String>,

	/// Default camera port
	#[arg(long, value_name = "PORT")]
	pub port: Option<String>,

	/// Default live view hold time
	#[arg(long, value_name = "MS")]
	pub hold_ms: Option<u64>,

	/// Rig file to use when --rig is not given
	#[arg(long = "rig-file", value_name = "PATH")]
	pub rig_file: Option<PathBuf>,
}
