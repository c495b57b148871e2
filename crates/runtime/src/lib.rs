//! EOS Runtime - the device-control SDK seam
//!
//! This crate owns everything that touches the vendor SDK directly:
//!
//! - **[`Sdk`]**: the consumed call surface (enumeration, sessions, commands,
//!   properties, hot-plug notification)
//! - **[`Library`]**: process-wide initialize/terminate bracket
//! - **[`OwnedRef`]**: a reference released exactly once, on every exit path
//! - **[`SimulatedSdk`]**: an in-memory backend with fault injection
//!
//! Session and live-view rules live one layer up, in `eos-rs`.

pub mod error;
pub mod library;
pub mod object;
pub mod sdk;
pub mod sim;
pub mod status;

pub use error::{Error, Result};
pub use library::Library;
pub use object::OwnedRef;
pub use sdk::{CommandId, DeviceAddedFn, ObjectRef, PropertyId, RawDeviceInfo, Sdk, SdkResult, evf_output};
pub use sim::{FaultPoint, SdkCall, SimDevice, SimulatedSdk};
pub use status::StatusCode;
