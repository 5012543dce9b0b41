//! Shared helpers for the engine integration tests.

#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use hallon::testing::{FakeController, FakeSdk};
use hallon::{EventName, Session, SessionOptions};

pub const APP_KEY: &[u8] = b"integration-test-key";

pub fn init_tracing() {
	static INIT: Once = Once::new();
	INIT.call_once(|| {
		let _ = tracing_subscriber::fmt()
			.with_test_writer()
			.with_max_level(tracing::Level::TRACE)
			.try_init();
	});
}

pub fn session_with(options: SessionOptions) -> (Session, FakeController) {
	init_tracing();
	let (sdk, controller) = FakeSdk::new();
	let session = Session::create(sdk, APP_KEY.to_vec(), options).expect("fake session");
	(session, controller)
}

pub fn session() -> (Session, FakeController) {
	session_with(SessionOptions::default())
}

/// A session that has completed a password login.
pub fn logged_in(username: &str) -> (Session, FakeController) {
	let (session, controller) = session();
	session.login(username, "secret", false).expect("login");
	let event = session
		.wait_for(&[EventName::LoggedIn], Duration::from_secs(2))
		.expect("pump")
		.expect("logged_in event");
	assert_eq!(event.status(), Some(Ok(())));
	(session, controller)
}
