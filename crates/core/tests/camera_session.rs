//! Session lifecycle and commands.

use std::sync::Arc;

use eos::{Camera, Eos, Error, OutputTarget, SessionPhase, StatusCode};
use eos_runtime::{CommandId, FaultPoint, SdkCall, SimDevice, SimulatedSdk};

fn rig() -> (Arc<SimulatedSdk>, Eos) {
	let sim = Arc::new(SimulatedSdk::with_devices([SimDevice::new("0", "Canon EOS REBEL T4i")]));
	let eos = Eos::initialize(sim.clone()).unwrap();
	(sim, eos)
}

fn first_camera(eos: &Eos) -> Camera<'_> {
	let handle = eos.devices().enumerate().unwrap().into_iter().next().unwrap();
	Camera::new(handle)
}

fn sent_commands(sim: &SimulatedSdk) -> usize {
	sim.journal().iter().filter(|call| matches!(call, SdkCall::SendCommand { .. })).count()
}

#[test]
fn new_camera_starts_closed() {
	let (_sim, eos) = rig();
	let camera = first_camera(&eos);

	assert_eq!(camera.phase(), SessionPhase::Closed);
	assert!(!camera.state().is_live_view_active());
	assert_eq!(camera.live_view_target(), None);
	assert_eq!(camera.descriptor().port_identifier(), "0");
}

#[test]
fn open_then_close_leaves_closed() {
	let (sim, eos) = rig();

	for target in [None, Some(OutputTarget::Tft), Some(OutputTarget::Pc)] {
		let mut camera = first_camera(&eos);
		if let Some(target) = target {
			camera.set_live_view_target(target).unwrap();
		}
		camera.open_session().unwrap();
		assert_eq!(camera.phase(), SessionPhase::Open);
		assert!(sim.session_open(0));

		camera.close_session().unwrap();
		assert_eq!(camera.phase(), SessionPhase::Closed);
		assert!(!camera.state().is_live_view_active());
		assert_eq!(camera.live_view_target(), target, "target survives close");
		assert!(!sim.session_open(0));
	}
}

#[test]
fn reopening_an_open_session_is_rejected() {
	let (sim, eos) = rig();
	let mut camera = first_camera(&eos);
	camera.open_session().unwrap();
	sim.clear_journal();

	let err = camera.open_session().unwrap_err();
	assert!(matches!(err, Error::AlreadyOpen));
	assert!(err.is_state_misuse());
	assert!(sim.journal().is_empty(), "rejected before reaching the SDK");
	assert_eq!(camera.phase(), SessionPhase::Open);
}

#[test]
fn failed_open_stays_closed() {
	let (sim, eos) = rig();
	let mut camera = first_camera(&eos);
	sim.inject(FaultPoint::OpenSession, StatusCode::DEVICE_BUSY);

	let err = camera.open_session().unwrap_err();
	assert!(matches!(err, Error::Session { code } if code == StatusCode::DEVICE_BUSY));
	assert_eq!(camera.phase(), SessionPhase::Closed);

	sim.clear_faults();
	camera.open_session().unwrap();
	assert_eq!(camera.phase(), SessionPhase::Open);
}

#[test]
fn closing_a_closed_session_is_a_no_op() {
	let (sim, eos) = rig();
	let mut camera = first_camera(&eos);
	sim.clear_journal();

	camera.close_session().unwrap();
	camera.close_session().unwrap();
	assert!(sim.journal().is_empty());
}

#[test]
fn failed_close_keeps_session_open() {
	let (sim, eos) = rig();
	let mut camera = first_camera(&eos);
	camera.open_session().unwrap();
	sim.inject(FaultPoint::CloseSession, StatusCode::COMM_DISCONNECTED);

	let err = camera.close_session().unwrap_err();
	assert!(matches!(err, Error::SessionClose { .. }));
	assert_eq!(camera.phase(), SessionPhase::Open);

	sim.clear_faults();
	camera.close_session().unwrap();
	assert_eq!(camera.phase(), SessionPhase::Closed);
}

#[test]
fn take_picture_requires_open_session() {
	let (sim, eos) = rig();
	let mut camera = first_camera(&eos);

	let err = camera.take_picture().unwrap_err();
	assert!(matches!(err, Error::NotOpen));
	assert_eq!(sent_commands(&sim), 0);
}

#[test]
fn take_picture_forwards_one_command() {
	let (sim, eos) = rig();
	let mut camera = first_camera(&eos);
	camera.open_session().unwrap();

	camera.take_picture().unwrap();
	assert!(sim.journal().contains(&SdkCall::SendCommand { device: 0, command: CommandId::TAKE_PICTURE }));
	assert_eq!(sent_commands(&sim), 1);
}

#[test]
fn rejected_capture_is_not_retried() {
	let (sim, eos) = rig();
	let mut camera = first_camera(&eos);
	camera.open_session().unwrap();
	sim.inject(FaultPoint::SendCommand, StatusCode::TAKE_PICTURE_AF_NG);

	let err = camera.take_picture().unwrap_err();
	match err {
		Error::Command { command, code } => {
			assert_eq!(command, CommandId::TAKE_PICTURE);
			assert_eq!(code, StatusCode::TAKE_PICTURE_AF_NG);
		}
		other => panic!("expected command error, got {other:?}"),
	}
	assert_eq!(sent_commands(&sim), 1);
	assert_eq!(camera.phase(), SessionPhase::Open);
}

#[test]
fn take_picture_allowed_during_live_view() {
	let (sim, eos) = rig();
	let mut camera = first_camera(&eos);
	camera.open_session().unwrap();
	camera.set_live_view_target(OutputTarget::Pc).unwrap();
	camera.start_live_view().unwrap();

	camera.take_picture().unwrap();
	assert_eq!(sent_commands(&sim), 1);
	assert_eq!(camera.phase(), SessionPhase::LiveView);
}

#[test]
fn dropping_camera_closes_session_and_releases_handle() {
	let (sim, eos) = rig();
	{
		let mut camera = first_camera(&eos);
		camera.open_session().unwrap();
	}
	assert!(!sim.session_open(0));
	assert_eq!(sim.live_refs(), 0);
}

#[test]
fn close_releases_handle_even_when_close_fails() {
	let (sim, eos) = rig();
	let mut camera = first_camera(&eos);
	camera.open_session().unwrap();
	sim.inject(FaultPoint::CloseSession, StatusCode::COMM_DISCONNECTED);

	assert!(camera.close().is_err());
	assert_eq!(sim.live_refs(), 0);
	let close_attempts = sim.journal().iter().filter(|c| matches!(c, SdkCall::CloseSession { .. })).count();
	assert_eq!(close_attempts, 1);
}
