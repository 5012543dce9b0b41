//! The process-wide session.
//!
//! libspotify allows one session per process. [`SessionSlot`] enforces that
//! at the binding's top boundary; the global slot behind
//! [`Session::initialize`] and [`Session::instance`] is one of these.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{Session, SessionOptions};
use crate::error::{Error, Result};
use crate::native::NativeApi;

/// Holds at most one session; set once, never replaced.
pub struct SessionSlot {
	session: Mutex<Option<Arc<Session>>>,
}

impl SessionSlot {
	pub const fn new() -> Self {
		Self {
			session: parking_lot::const_mutex(None),
		}
	}

	/// Fills the slot with the session `init` builds.
	///
	/// Fails with a state error, without calling `init`, when the slot is
	/// already filled. A failed `init` leaves the slot empty.
	pub fn initialize(&self, init: impl FnOnce() -> Result<Session>) -> Result<Arc<Session>> {
		let mut slot = self.session.lock();
		if slot.is_some() {
			return Err(Error::state("session has already been initialized"));
		}
		let session = Arc::new(init()?);
		*slot = Some(Arc::clone(&session));
		tracing::debug!("session slot initialized");
		Ok(session)
	}

	pub fn instance(&self) -> Result<Arc<Session>> {
		self.session
			.lock()
			.clone()
			.ok_or_else(|| Error::state("session has not been initialized"))
	}

	pub fn is_initialized(&self) -> bool {
		self.session.lock().is_some()
	}
}

impl Default for SessionSlot {
	fn default() -> Self {
		Self::new()
	}
}

static GLOBAL: SessionSlot = SessionSlot::new();

impl Session {
	/// Creates the process-wide session. A second call fails with a state
	/// error whatever its arguments.
	pub fn initialize<A: NativeApi>(
		api: Arc<A>,
		application_key: impl Into<Vec<u8>>,
		options: SessionOptions,
	) -> Result<Arc<Session>> {
		GLOBAL.initialize(|| Session::create(api, application_key, options))
	}

	/// The process-wide session; a state error before [`Session::initialize`].
	pub fn instance() -> Result<Arc<Session>> {
		GLOBAL.instance()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::FakeSdk;

	#[test]
	fn instance_before_initialize_fails() {
		let slot = SessionSlot::new();
		assert!(slot.instance().unwrap_err().is_state());
		assert!(!slot.is_initialized());
	}

	#[test]
	fn second_initialize_fails_without_building() {
		let slot = SessionSlot::new();
		let (sdk, controller) = FakeSdk::new();
		let first = slot
			.initialize(|| Session::create(sdk, b"appkey".to_vec(), SessionOptions::default()))
			.unwrap();

		let mut called = false;
		let err = slot
			.initialize(|| {
				called = true;
				Err(Error::state("unreachable"))
			})
			.unwrap_err();
		assert!(err.is_state());
		assert!(!called);
		assert_eq!(controller.sessions_created(), 1);
		assert!(Arc::ptr_eq(&first, &slot.instance().unwrap()));
	}

	#[test]
	fn failed_initialize_leaves_the_slot_empty() {
		let slot = SessionSlot::new();
		let (sdk, _controller) = FakeSdk::new();
		let err = slot
			.initialize(|| Session::create(sdk, Vec::new(), SessionOptions::default()))
			.unwrap_err();
		assert!(err.is_validation());
		assert!(!slot.is_initialized());
	}
}
