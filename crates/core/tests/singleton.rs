//! The process-wide session. Kept in its own binary so no other test can
//! fill the global slot first.

mod common;

use std::sync::Arc;

use common::APP_KEY;
use hallon::testing::FakeSdk;
use hallon::{Session, SessionOptions};

#[test]
fn one_session_per_process() {
	common::init_tracing();
	assert!(Session::instance().unwrap_err().is_state());

	let (sdk, controller) = FakeSdk::new();
	let session = Session::initialize(sdk, APP_KEY.to_vec(), SessionOptions::default()).unwrap();
	assert!(Arc::ptr_eq(&session, &Session::instance().unwrap()));

	let (other, other_controller) = FakeSdk::new();
	let err = Session::initialize(other, APP_KEY.to_vec(), SessionOptions::default().user_agent("second")).unwrap_err();
	assert!(err.is_state());
	assert_eq!(other_controller.sessions_created(), 0);
	assert_eq!(controller.sessions_created(), 1);
	assert_eq!(Session::instance().unwrap().config().user_agent, "Hallon");
}
