//! Live-view output targets and the routing mask they toggle.

use std::fmt;
use std::str::FromStr;

use eos_runtime::evf_output;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Where the live-view feed is delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
	/// The camera's built-in display.
	Tft,
	/// The host computer.
	Pc,
}

impl OutputTarget {
	pub const ALL: [OutputTarget; 2] = [OutputTarget::Tft, OutputTarget::Pc];

	/// The vendor bit routing live view to this target.
	pub fn mask(self) -> OutputMask {
		match self {
			OutputTarget::Tft => OutputMask(evf_output::TFT),
			OutputTarget::Pc => OutputMask(evf_output::PC),
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			OutputTarget::Tft => "tft",
			OutputTarget::Pc => "pc",
		}
	}
}

impl fmt::Display for OutputTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for OutputTarget {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_lowercase().as_str() {
			"tft" | "display" => Ok(OutputTarget::Tft),
			"pc" | "host" => Ok(OutputTarget::Pc),
			_ => Err(Error::InvalidTarget(s.to_string())),
		}
	}
}

impl TryFrom<u32> for OutputTarget {
	type Error = Error;

	/// Accepts exactly one of the vendor target bits.
	fn try_from(bits: u32) -> Result<Self> {
		OutputTarget::ALL
			.into_iter()
			.find(|target| target.mask().bits() == bits)
			.ok_or_else(|| Error::InvalidTarget(format!("{bits:#x}")))
	}
}

/// Fixed-width output-routing bitmask.
///
/// Only ever combined with OR and AND-NOT; bit positions are the vendor's.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputMask(u32);

impl OutputMask {
	pub const fn from_bits(bits: u32) -> Self {
		OutputMask(bits)
	}

	pub const fn bits(self) -> u32 {
		self.0
	}

	pub const fn contains(self, other: OutputMask) -> bool {
		self.0 & other.0 == other.0
	}

	/// `self | other`
	pub const fn union(self, other: OutputMask) -> Self {
		OutputMask(self.0 | other.0)
	}

	/// `self & !other`
	pub const fn without(self, other: OutputMask) -> Self {
		OutputMask(self.0 & !other.0)
	}
}

impl fmt::Display for OutputMask {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:#x}", self.0)
	}
}
