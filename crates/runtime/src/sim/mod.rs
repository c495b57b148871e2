//! In-memory [`Sdk`] used by tests and by the CLI's simulated rig.
//!
//! Mirrors the parts of the vendor SDK's contract the upper layers depend on:
//!
//! - references are counted, and releasing an unknown or already released
//!   reference fails with [`StatusCode::INVALID_HANDLE`]
//! - every call except `initialize` fails until the SDK is initialized
//! - commands and property access require an open session
//! - faults can be injected per call site and stay armed until cleared
//!
//! Every call that reaches the simulator is appended to a journal so tests can
//! assert exactly what was (and was not) forwarded.


use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::sdk::{CommandId, DeviceAddedFn, ObjectRef, PropertyId, RawDeviceInfo, Sdk, SdkResult};
use crate::status::StatusCode;

/// A device the simulator pretends is attached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimDevice {
	#[serde(flatten)]
	pub info: RawDeviceInfo,
	/// Initial value of the output-routing property.
	#[serde(default)]
	pub output_device: u32,
}

impl SimDevice {
	pub fn new(port_name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			info: RawDeviceInfo {
				port_name: port_name.into(),
				description: description.into(),
				subtype: 1,
				reserved: 0,
			},
			output_device: 0,
		}
	}

	pub fn with_subtype(mut self, subtype: u32) -> Self {
		self.info.subtype = subtype;
		self
	}

	pub fn with_reserved(mut self, reserved: u32) -> Self {
		self.info.reserved = reserved;
		self
	}

	pub fn with_output_device(mut self, mask: u32) -> Self {
		self.output_device = mask;
		self
	}
}

/// Call sites that can be made to fail with [`SimulatedSdk::inject`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultPoint {
	Initialize,
	Terminate,
	ListDevices,
	ChildCount,
	/// `child_at` for one list index.
	ChildAt(u32),
	/// `device_info` for the device at this attach position.
	DeviceInfo(usize),
	Release,
	OpenSession,
	CloseSession,
	SendCommand,
	GetProperty,
	SetProperty,
	DeviceAddedHandler,
}

/// One call as seen by the simulator. Devices are identified by attach position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SdkCall {
	Initialize,
	Terminate,
	ListDevices,
	ChildCount,
	ChildAt { index: u32 },
	DeviceInfo { device: usize },
	Release { object: ObjectRef },
	OpenSession { device: usize },
	CloseSession { device: usize },
	SendCommand { device: usize, command: CommandId },
	GetProperty { device: usize, property: PropertyId },
	SetProperty { device: usize, property: PropertyId, value: u32 },
	SetDeviceAddedHandler { installed: bool },
}

#[derive(Debug)]
struct DeviceSlot {
	info: RawDeviceInfo,
	properties: HashMap<PropertyId, u32>,
	session_open: bool,
}

#[derive(Debug)]
enum SimObject {
	List(Vec<usize>),
	Device(usize),
}

#[derive(Debug, Default)]
struct SimState {
	initialized: bool,
	devices: Vec<DeviceSlot>,
	objects: HashMap<ObjectRef, SimObject>,
	next_ref: u64,
	faults: HashMap<FaultPoint, StatusCode>,
	journal: Vec<SdkCall>,
}

impl SimState {
	fn begin(&mut self, call: SdkCall, point: FaultPoint) -> SdkResult<()> {
		trace!(target = "eos::sim", ?call, "sdk call");
		self.journal.push(call);
		if !self.initialized && point != FaultPoint::Initialize {
			return Err(StatusCode::INTERNAL_ERROR);
		}
		match self.faults.get(&point) {
			Some(code) => Err(*code),
			None => Ok(()),
		}
	}

	fn alloc(&mut self, object: SimObject) -> ObjectRef {
		self.next_ref += 1;
		let raw = ObjectRef::from_raw(0x1000 + self.next_ref);
		self.objects.insert(raw, object);
		raw
	}

	fn device(&self, object: ObjectRef) -> SdkResult<usize> {
		match self.objects.get(&object) {
			Some(SimObject::Device(index)) => Ok(*index),
			_ => Err(StatusCode::INVALID_HANDLE),
		}
	}

	fn open_device(&mut self, device: usize) -> SdkResult<&mut DeviceSlot> {
		let slot = self.devices.get_mut(device).ok_or(StatusCode::DEVICE_NOT_FOUND)?;
		if !slot.session_open {
			return Err(StatusCode::SESSION_NOT_OPEN);
		}
		Ok(slot)
	}
}

/// Simulated SDK. Cheap to share behind an `Arc`.
#[derive(Default)]
pub struct SimulatedSdk {
	state: Mutex<SimState>,
	device_added: Mutex<Option<DeviceAddedFn>>,
}

impl SimulatedSdk {
	pub fn new() -> Self {
		Self::default()
	}

	/// A simulator with the given devices already attached.
	pub fn with_devices(devices: impl IntoIterator<Item = SimDevice>) -> Self {
		let sdk = Self::new();
		{
			let mut state = sdk.state.lock();
			for device in devices {
				state.devices.push(slot_for(device));
			}
		}
		sdk
	}

	/// Attaches a device and fires the device-added callback, if any, on the
	/// calling thread.
	pub fn attach(&self, device: SimDevice) {
		self.state.lock().devices.push(slot_for(device));
		let handler = self.device_added.lock().clone();
		if let Some(handler) = handler {
			handler();
		}
	}

	/// Makes every call at `point` fail with `code` until [`Self::clear_faults`].
	pub fn inject(&self, point: FaultPoint, code: StatusCode) {
		self.state.lock().faults.insert(point, code);
	}

	pub fn clear_faults(&self) {
		self.state.lock().faults.clear();
	}

	/// Calls issued so far, oldest first.
	pub fn journal(&self) -> Vec<SdkCall> {
		self.state.lock().journal.clone()
	}

	pub fn clear_journal(&self) {
		self.state.lock().journal.clear();
	}

	/// References handed out and not yet released.
	pub fn live_refs(&self) -> usize {
		self.state.lock().objects.len()
	}

	pub fn is_initialized(&self) -> bool {
		self.state.lock().initialized
	}

	pub fn device_count(&self) -> usize {
		self.state.lock().devices.len()
	}

	pub fn session_open(&self, device: usize) -> bool {
		self.state.lock().devices.get(device).is_some_and(|slot| slot.session_open)
	}

	/// Current property value as stored on the device, bypassing the journal.
	pub fn property(&self, device: usize, property: PropertyId) -> Option<u32> {
		self.state.lock().devices.get(device).and_then(|slot| slot.properties.get(&property).copied())
	}

	/// Overwrites a property behind the caller's back, as another subsystem
	/// on the device would.
	pub fn poke_property(&self, device: usize, property: PropertyId, value: u32) {
		if let Some(slot) = self.state.lock().devices.get_mut(device) {
			slot.properties.insert(property, value);
		}
	}

	pub fn has_device_added_handler(&self) -> bool {
		self.device_added.lock().is_some()
	}
}

fn slot_for(device: SimDevice) -> DeviceSlot {
	DeviceSlot {
		info: device.info,
		properties: HashMap::from([(PropertyId::EVF_OUTPUT_DEVICE, device.output_device)]),
		session_open: false,
	}
}

impl Sdk for SimulatedSdk {
	fn initialize(&self) -> SdkResult<()> {
		let mut state = self.state.lock();
		state.begin(SdkCall::Initialize, FaultPoint::Initialize)?;
		state.initialized = true;
		Ok(())
	}

	fn terminate(&self) -> SdkResult<()> {
		let mut state = self.state.lock();
		state.begin(SdkCall::Terminate, FaultPoint::Terminate)?;
		state.initialized = false;
		Ok(())
	}

	fn list_devices(&self) -> SdkResult<ObjectRef> {
		let mut state = self.state.lock();
		state.begin(SdkCall::ListDevices, FaultPoint::ListDevices)?;
		let members = (0..state.devices.len()).collect();
		Ok(state.alloc(SimObject::List(members)))
	}

	fn child_count(&self, list: ObjectRef) -> SdkResult<u32> {
		let mut state = self.state.lock();
		state.begin(SdkCall::ChildCount, FaultPoint::ChildCount)?;
		match state.objects.get(&list) {
			Some(SimObject::List(members)) => Ok(members.len() as u32),
			_ => Err(StatusCode::INVALID_HANDLE),
		}
	}

	fn child_at(&self, list: ObjectRef, index: u32) -> SdkResult<ObjectRef> {
		let mut state = self.state.lock();
		state.begin(SdkCall::ChildAt { index }, FaultPoint::ChildAt(index))?;
		let device = match state.objects.get(&list) {
			Some(SimObject::List(members)) => *members.get(index as usize).ok_or(StatusCode::INVALID_INDEX)?,
			_ => return Err(StatusCode::INVALID_HANDLE),
		};
		Ok(state.alloc(SimObject::Device(device)))
	}

	fn device_info(&self, object: ObjectRef) -> SdkResult<RawDeviceInfo> {
		let mut state = self.state.lock();
		let device = state.device(object)?;
		state.begin(SdkCall::DeviceInfo { device }, FaultPoint::DeviceInfo(device))?;
		state.devices.get(device).map(|slot| slot.info.clone()).ok_or(StatusCode::DEVICE_NOT_FOUND)
	}

	fn release(&self, object: ObjectRef) -> SdkResult<()> {
		let mut state = self.state.lock();
		state.begin(SdkCall::Release { object }, FaultPoint::Release)?;
		state.objects.remove(&object).map(|_| ()).ok_or(StatusCode::INVALID_HANDLE)
	}

	fn open_session(&self, object: ObjectRef) -> SdkResult<()> {
		let mut state = self.state.lock();
		let device = state.device(object)?;
		state.begin(SdkCall::OpenSession { device }, FaultPoint::OpenSession)?;
		let slot = state.devices.get_mut(device).ok_or(StatusCode::DEVICE_NOT_FOUND)?;
		if slot.session_open {
			return Err(StatusCode::DEVICE_BUSY);
		}
		slot.session_open = true;
		Ok(())
	}

	fn close_session(&self, object: ObjectRef) -> SdkResult<()> {
		let mut state = self.state.lock();
		let device = state.device(object)?;
		state.begin(SdkCall::CloseSession { device }, FaultPoint::CloseSession)?;
		state.open_device(device)?.session_open = false;
		Ok(())
	}

	fn send_command(&self, object: ObjectRef, command: CommandId, _param: i32) -> SdkResult<()> {
		let mut state = self.state.lock();
		let device = state.device(object)?;
		state.begin(SdkCall::SendCommand { device, command }, FaultPoint::SendCommand)?;
		state.open_device(device)?;
		Ok(())
	}

	fn get_property(&self, object: ObjectRef, property: PropertyId) -> SdkResult<u32> {
		let mut state = self.state.lock();
		let device = state.device(object)?;
		state.begin(SdkCall::GetProperty { device, property }, FaultPoint::GetProperty)?;
		let slot = state.open_device(device)?;
		slot.properties.get(&property).copied().ok_or(StatusCode::NOT_SUPPORTED)
	}

	fn set_property(&self, object: ObjectRef, property: PropertyId, value: u32) -> SdkResult<()> {
		let mut state = self.state.lock();
		let device = state.device(object)?;
		state.begin(SdkCall::SetProperty { device, property, value }, FaultPoint::SetProperty)?;
		state.open_device(device)?.properties.insert(property, value);
		Ok(())
	}

	fn set_device_added_handler(&self, handler: Option<DeviceAddedFn>) -> SdkResult<()> {
		let installed = handler.is_some();
		self.state
			.lock()
			.begin(SdkCall::SetDeviceAddedHandler { installed }, FaultPoint::DeviceAddedHandler)?;
		*self.device_added.lock() = handler;
		Ok(())
	}
}

impl std::fmt::Debug for SimulatedSdk {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.lock();
		f.debug_struct("SimulatedSdk")
			.field("initialized", &state.initialized)
			.field("devices", &state.devices.len())
			.field("live_refs", &state.objects.len())
			.finish()
	}
}
