//! eos: session and live-view control for tethered EOS cameras
//!
//! Sits on top of `eos-runtime`'s [`Sdk`] seam and adds the rules for when a
//! device may be commanded:
//!
//! - [`DeviceRegistry`] enumerates attached devices as owned [`DeviceHandle`]s
//! - [`Camera`] owns one handle and tracks session and live-view state
//!
//! # Examples
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use eos::{Camera, Eos, OutputTarget};
//! use eos_runtime::{SimDevice, SimulatedSdk};
//!
//! let sim = Arc::new(SimulatedSdk::with_devices([SimDevice::new("0", "Canon EOS REBEL T4i")]));
//! let eos = Eos::initialize(sim)?;
//! let handle = eos.devices().enumerate()?.into_iter().next().unwrap();
//!
//! let mut camera = Camera::new(handle);
//! camera.open_session()?;
//! camera.set_live_view_target(OutputTarget::Tft)?;
//! camera.toggle_live_view()?;
//! camera.toggle_live_view()?;
//! camera.take_picture()?;
//! camera.close()?;
//! eos.terminate()?;
//! ```

mod camera;
mod descriptor;
mod eos;
mod error;
mod handle;
mod output;
mod registry;

pub use camera::{Camera, SessionPhase, SessionState};
pub use descriptor::DeviceDescriptor;
pub use eos::Eos;
pub use eos_runtime::{Sdk, SimDevice, SimulatedSdk, StatusCode};
pub use error::{EnumerationStage, Error, Result};
pub use handle::DeviceHandle;
pub use output::{OutputMask, OutputTarget};
pub use registry::DeviceRegistry;
