//! Live-view routing through the output-device bitmask.

use std::sync::Arc;

use eos::{Camera, Eos, Error, OutputMask, OutputTarget, SessionPhase, StatusCode};
use eos_runtime::{FaultPoint, PropertyId, SdkCall, SimDevice, SimulatedSdk};

const OUTPUT: PropertyId = PropertyId::EVF_OUTPUT_DEVICE;

fn rig(initial_mask: u32) -> (Arc<SimulatedSdk>, Eos) {
	let sim = Arc::new(SimulatedSdk::with_devices([
		SimDevice::new("0", "Canon EOS REBEL T4i").with_output_device(initial_mask)
	]));
	let eos = Eos::initialize(sim.clone()).unwrap();
	(sim, eos)
}

fn open_camera(eos: &Eos, target: OutputTarget) -> Camera<'_> {
	let handle = eos.devices().enumerate().unwrap().into_iter().next().unwrap();
	let mut camera = Camera::new(handle);
	camera.open_session().unwrap();
	camera.set_live_view_target(target).unwrap();
	camera
}

fn writes(sim: &SimulatedSdk) -> Vec<u32> {
	sim.journal()
		.into_iter()
		.filter_map(|call| match call {
			SdkCall::SetProperty { property, value, .. } if property == OUTPUT => Some(value),
			_ => None,
		})
		.collect()
}

#[test]
fn tft_scenario_writes_bit_then_clears_it() {
	let (sim, eos) = rig(0x0);
	let mut camera = open_camera(&eos, OutputTarget::Tft);

	camera.start_live_view().unwrap();
	assert_eq!(camera.phase(), SessionPhase::LiveView);
	camera.stop_live_view().unwrap();

	assert_eq!(writes(&sim), vec![0x1, 0x0]);
	assert_eq!(camera.phase(), SessionPhase::Open);
}

#[test]
fn start_then_stop_restores_foreign_bits() -> anyhow::Result<()> {
	for target in OutputTarget::ALL {
		for initial in [0x0, 0x4, 0x8000_0000, 0xffff_fff0, 0xa5a5_0000] {
			let initial = initial & !target.mask().bits();
			let (sim, eos) = rig(initial);
			let mut camera = open_camera(&eos, target);

			camera.start_live_view()?;
			assert_eq!(sim.property(0, OUTPUT), Some(initial | target.mask().bits()));
			camera.stop_live_view()?;
			assert_eq!(sim.property(0, OUTPUT), Some(initial), "target {target}, initial {initial:#x}");
		}
	}
	Ok(())
}

#[test]
fn stop_only_clears_own_bit_when_others_changed_meanwhile() {
	let (sim, eos) = rig(0x0);
	let mut camera = open_camera(&eos, OutputTarget::Pc);
	camera.start_live_view().unwrap();

	// Another subsystem turns on the built-in display while we stream to the host.
	sim.poke_property(0, OUTPUT, 0x3);
	camera.stop_live_view().unwrap();

	assert_eq!(sim.property(0, OUTPUT), Some(0x1));
}

#[test]
fn toggle_twice_returns_to_open() {
	let (sim, eos) = rig(0x10);
	let mut camera = open_camera(&eos, OutputTarget::Pc);

	camera.toggle_live_view().unwrap();
	assert_eq!(camera.phase(), SessionPhase::LiveView);
	camera.toggle_live_view().unwrap();

	assert_eq!(camera.phase(), SessionPhase::Open);
	assert_eq!(camera.live_view_target(), Some(OutputTarget::Pc));
	assert_eq!(sim.property(0, OUTPUT), Some(0x10));
}

#[test]
fn toggle_propagates_underlying_error() {
	let (_sim, eos) = rig(0x0);
	let handle = eos.devices().enumerate().unwrap().into_iter().next().unwrap();
	let mut camera = Camera::new(handle);

	assert!(matches!(camera.toggle_live_view(), Err(Error::NotOpen)));
}

#[test]
fn changing_target_during_live_view_stops_it_first() {
	let (sim, eos) = rig(0x0);
	let mut camera = open_camera(&eos, OutputTarget::Tft);
	camera.start_live_view().unwrap();

	camera.set_live_view_target(OutputTarget::Pc).unwrap();

	assert_eq!(camera.phase(), SessionPhase::Open);
	assert_eq!(camera.live_view_target(), Some(OutputTarget::Pc));
	assert_eq!(writes(&sim), vec![0x1, 0x0]);
	assert_eq!(sim.property(0, OUTPUT), Some(0x0));

	camera.start_live_view().unwrap();
	assert_eq!(sim.property(0, OUTPUT), Some(0x2));
}

#[test]
fn failed_stop_keeps_old_target() {
	let (sim, eos) = rig(0x0);
	let mut camera = open_camera(&eos, OutputTarget::Tft);
	camera.start_live_view().unwrap();
	sim.inject(FaultPoint::SetProperty, StatusCode::DEVICE_BUSY);

	let err = camera.set_live_view_target(OutputTarget::Pc).unwrap_err();
	assert!(matches!(err, Error::PropertyWrite { .. }));
	assert_eq!(camera.phase(), SessionPhase::LiveView);
	assert_eq!(camera.live_view_target(), Some(OutputTarget::Tft));
}

#[test]
fn start_requires_open_session() {
	let (sim, eos) = rig(0x0);
	let handle = eos.devices().enumerate().unwrap().into_iter().next().unwrap();
	let mut camera = Camera::new(handle);
	camera.set_live_view_target(OutputTarget::Tft).unwrap();
	sim.clear_journal();

	assert!(matches!(camera.start_live_view(), Err(Error::NotOpen)));
	assert!(matches!(camera.stop_live_view(), Err(Error::NotOpen)));
	assert!(sim.journal().is_empty());
}

#[test]
fn start_twice_is_rejected() {
	let (_sim, eos) = rig(0x0);
	let mut camera = open_camera(&eos, OutputTarget::Tft);
	camera.start_live_view().unwrap();

	let err = camera.start_live_view().unwrap_err();
	assert!(matches!(err, Error::AlreadyActive));
	assert_eq!(camera.phase(), SessionPhase::LiveView);
}

#[test]
fn stop_when_inactive_is_rejected() {
	let (_sim, eos) = rig(0x0);
	let mut camera = open_camera(&eos, OutputTarget::Tft);

	assert!(matches!(camera.stop_live_view(), Err(Error::NotActive)));
}

#[test]
fn start_without_target_is_rejected() {
	let (sim, eos) = rig(0x0);
	let handle = eos.devices().enumerate().unwrap().into_iter().next().unwrap();
	let mut camera = Camera::new(handle);
	camera.open_session().unwrap();
	sim.clear_journal();

	assert!(matches!(camera.start_live_view(), Err(Error::NoTargetConfigured)));
	assert!(sim.journal().is_empty());
}

#[test]
fn read_failure_skips_write() {
	let (sim, eos) = rig(0x0);
	let mut camera = open_camera(&eos, OutputTarget::Tft);
	sim.inject(FaultPoint::GetProperty, StatusCode::COMM_DISCONNECTED);

	let err = camera.start_live_view().unwrap_err();
	assert!(matches!(err, Error::PropertyRead { property, .. } if property == OUTPUT));
	assert!(writes(&sim).is_empty());
	assert_eq!(camera.phase(), SessionPhase::Open);
}

#[test]
fn write_failure_leaves_state_unchanged() {
	let (sim, eos) = rig(0x0);
	let mut camera = open_camera(&eos, OutputTarget::Tft);
	sim.inject(FaultPoint::SetProperty, StatusCode::DEVICE_BUSY);

	let err = camera.start_live_view().unwrap_err();
	assert_eq!(err.status_code(), Some(StatusCode::DEVICE_BUSY));
	assert_eq!(camera.phase(), SessionPhase::Open);

	sim.clear_faults();
	camera.start_live_view().unwrap();
	sim.inject(FaultPoint::GetProperty, StatusCode::DEVICE_BUSY);
	assert!(camera.stop_live_view().is_err());
	assert_eq!(camera.phase(), SessionPhase::LiveView);

	sim.clear_faults();
	sim.inject(FaultPoint::SetProperty, StatusCode::COMM_DISCONNECTED);
	let err = camera.stop_live_view().unwrap_err();
	assert!(matches!(err, Error::PropertyWrite { .. }));
	assert_eq!(camera.phase(), SessionPhase::LiveView);
	assert_eq!(sim.property(0, OUTPUT), Some(0x1), "failed write leaves routing on");

	sim.clear_faults();
	camera.stop_live_view().unwrap();
	assert_eq!(camera.phase(), SessionPhase::Open);
}

#[test]
fn closing_during_live_view_does_not_touch_routing() {
	let (sim, eos) = rig(0x0);
	let mut camera = open_camera(&eos, OutputTarget::Tft);
	camera.start_live_view().unwrap();

	camera.close_session().unwrap();

	assert_eq!(camera.phase(), SessionPhase::Closed);
	assert!(!camera.state().is_live_view_active());
	assert_eq!(writes(&sim), vec![0x1], "close does not stop live view");
	assert_eq!(sim.property(0, OUTPUT), Some(0x1));

	camera.open_session().unwrap();
	assert_eq!(camera.phase(), SessionPhase::Open, "activity is not carried into the new session");
	assert_eq!(camera.live_view_target(), Some(OutputTarget::Tft));
}

#[test]
fn output_mask_reads_current_routing() {
	let (_sim, eos) = rig(0x6);
	let camera = open_camera(&eos, OutputTarget::Tft);

	assert_eq!(camera.output_mask().unwrap(), OutputMask::from_bits(0x6));
}
