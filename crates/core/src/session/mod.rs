//! The session engine.
//!
//! A [`Session`] owns the native session handle, the callback table the SDK
//! calls into, and the event bus those callbacks publish on. Everything the
//! native side holds a pointer to (config strings, callback table, callback
//! context) is boxed inside the session and released only after
//! `sp_session_release` has returned.
//!
//! The engine itself is an ordinary value. The process-wide singleton lives
//! in [`slot`] and is reached through [`Session::initialize`] and
//! [`Session::instance`].

mod options;
mod player;
mod pump;
pub(crate) mod slot;

use std::ffi::c_int;
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;
use std::time::Duration;

use hallon_sys as sys;

pub use options::{MAX_USER_AGENT_LEN, ResolvedConfig, SessionOptions};
pub use player::Player;
pub use pump::{PUMP_INTERVAL, Pumped};
pub use slot::SessionSlot;

use self::options::{NativeConfig, c_string};
use crate::callbacks::{self, CallbackContext};
use crate::error::{Error, Result, maybe_raise};
use crate::event::SessionEvent;
use crate::handle::Ownership;
use crate::link::Link;
use crate::native::NativeApi;
use crate::observable::{Observable, Observe};
use crate::playlist::{Playlist, PlaylistContainer};
use crate::types::{Bitrate, ConnectionRules, ConnectionState, ConnectionType, Credential, OfflineSyncStatus};
use crate::user::User;

pub struct Session {
	api: Arc<dyn NativeApi>,
	ptr: NonNull<sys::sp_session>,
	events: Arc<Observable<SessionEvent>>,
	config: ResolvedConfig,
	// Referenced by the native session until release.
	_native: NativeConfig,
	_callbacks: Box<sys::sp_session_callbacks>,
	_context: Box<CallbackContext>,
}

// SAFETY: the SDK serialises access to the session internally; the engine
// only touches the pointer through the thread-safe `NativeApi`.
unsafe impl Send for Session {}
unsafe impl Sync for Session {}

impl Session {
	/// Creates a session on `api`.
	///
	/// Options are validated before the SDK is called. Most SDKs refuse a
	/// second live session; that surfaces as a native error.
	pub fn create<A: NativeApi>(api: Arc<A>, application_key: impl Into<Vec<u8>>, options: SessionOptions) -> Result<Self> {
		let config = options.resolve(application_key)?;
		let native = NativeConfig::new(&config)?;

		let events = Arc::new(Observable::new());
		let context = Box::new(CallbackContext {
			events: Arc::clone(&events),
		});
		let callbacks = Box::new(callbacks::table::<A>());
		let raw_config = native.as_raw(&callbacks, context.as_userdata());

		let api: Arc<dyn NativeApi> = api;
		let mut raw = std::ptr::null_mut();
		// SAFETY: `raw_config` points into `native`, `callbacks` and
		// `context`, all of which move into the session below.
		let code = unsafe { api.session_create(&raw_config, &mut raw) };
		maybe_raise(api.as_ref(), code)?;
		let ptr = NonNull::new(raw).ok_or_else(|| Error::state("session_create reported success without a session"))?;

		tracing::debug!(
			user_agent = %config.user_agent,
			settings_path = %config.settings_path,
			proxy = config.proxy.as_deref(),
			"session created"
		);
		Ok(Self {
			api,
			ptr,
			events,
			config,
			_native: native,
			_callbacks: callbacks,
			_context: context,
		})
	}

	pub fn as_ptr(&self) -> *mut sys::sp_session {
		self.ptr.as_ptr()
	}

	/// Function table the session was created with.
	pub fn api(&self) -> &Arc<dyn NativeApi> {
		&self.api
	}

	pub fn config(&self) -> &ResolvedConfig {
		&self.config
	}

	fn check(&self, code: sys::sp_error) -> Result<()> {
		maybe_raise(self.api.as_ref(), code)
	}

	/// Connection state, read from the SDK on every call.
	pub fn status(&self) -> Result<ConnectionState> {
		// SAFETY: the session is live for `&self`.
		ConnectionState::from_raw(unsafe { self.api.session_connectionstate(self.as_ptr()) })
	}

	pub fn is_logged_in(&self) -> bool {
		matches!(self.status(), Ok(ConnectionState::LoggedIn))
	}

	pub fn is_logged_out(&self) -> bool {
		matches!(self.status(), Ok(ConnectionState::LoggedOut))
	}

	pub fn is_disconnected(&self) -> bool {
		matches!(self.status(), Ok(ConnectionState::Disconnected))
	}

	pub fn is_offline(&self) -> bool {
		matches!(self.status(), Ok(ConnectionState::Offline))
	}

	/// Runs one iteration of the SDK's event loop and returns how long the
	/// SDK would like the caller to wait before the next one.
	pub fn process_events(&self) -> Result<Duration> {
		let mut next_timeout: c_int = 0;
		// SAFETY: the session is live for `&self`.
		let code = unsafe { self.api.session_process_events(self.as_ptr(), &mut next_timeout) };
		self.check(code)?;
		let hint = Duration::from_millis(u64::try_from(next_timeout).unwrap_or(0));
		tracing::trace!(?hint, "processed native events");
		Ok(hint)
	}

	/// Starts logging in; the outcome arrives as a `logged_in` event.
	///
	/// Exactly one of password or blob reaches the SDK, depending on the
	/// [`Credential`] variant.
	pub fn login(&self, username: &str, credential: impl Into<Credential>, remember_me: bool) -> Result<()> {
		let credential = credential.into();
		if username.is_empty() {
			return Err(Error::validation("username must not be empty"));
		}
		if credential.is_empty() {
			return Err(Error::validation("password or blob must not be empty"));
		}

		let username_c = c_string("username", username)?;
		let (password, blob) = match &credential {
			Credential::Password(password) => (Some(c_string("password", password)?), None),
			Credential::Blob(blob) => (None, Some(c_string("blob", blob.as_str())?)),
		};

		tracing::debug!(username, remember_me, blob = blob.is_some(), "logging in");
		// SAFETY: the session is live and the strings outlive the call.
		let code = unsafe {
			self.api
				.session_login(self.as_ptr(), &username_c, password.as_deref(), remember_me, blob.as_deref())
		};
		self.check(code)
	}

	/// Logs in again with the credentials stored by `login(.., true)`.
	pub fn relogin(&self) -> Result<()> {
		// SAFETY: the session is live for `&self`.
		let code = unsafe { self.api.session_relogin(self.as_ptr()) };
		if code == sys::SP_ERROR_NO_CREDENTIALS {
			return Err(Error::state("no credentials have been remembered"));
		}
		tracing::debug!("relogging in");
		self.check(code)
	}

	pub fn remembered_user(&self) -> Option<String> {
		// SAFETY: the session is live for `&self`.
		unsafe { self.api.session_remembered_user(self.as_ptr()) }.filter(|name| !name.is_empty())
	}

	pub fn forget_me(&self) -> Result<()> {
		// SAFETY: the session is live for `&self`.
		self.check(unsafe { self.api.session_forget_me(self.as_ptr()) })
	}

	/// Canonical name of the logged-in user.
	pub fn user_name(&self) -> Option<String> {
		// SAFETY: the session is live for `&self`.
		Some(unsafe { self.api.session_user_name(self.as_ptr()) }).filter(|name| !name.is_empty())
	}

	/// Does nothing unless logged in.
	pub fn logout(&self) -> Result<()> {
		if !self.is_logged_in() {
			tracing::debug!("logout skipped: not logged in");
			return Ok(());
		}
		tracing::debug!("logging out");
		// SAFETY: the session is live for `&self`.
		self.check(unsafe { self.api.session_logout(self.as_ptr()) })
	}

	pub fn user(&self) -> Option<User> {
		if !self.is_logged_in() {
			return None;
		}
		// SAFETY: the user is borrowed from the live session.
		unsafe { User::from_raw(&self.api, self.api.session_user(self.as_ptr()), Ownership::Retain) }
	}

	pub fn container(&self) -> Option<PlaylistContainer> {
		if !self.is_logged_in() {
			return None;
		}
		// SAFETY: the container is borrowed from the live session.
		unsafe {
			PlaylistContainer::from_raw(&self.api, self.api.session_playlistcontainer(self.as_ptr()), Ownership::Retain)
		}
	}

	pub fn starred(&self) -> Option<Playlist> {
		if !self.is_logged_in() {
			return None;
		}
		// SAFETY: `*_create` hands over one reference.
		unsafe { Playlist::from_raw(&self.api, self.api.session_starred_create(self.as_ptr()), Ownership::Adopt) }
	}

	pub fn inbox(&self) -> Option<Playlist> {
		if !self.is_logged_in() {
			return None;
		}
		// SAFETY: `*_create` hands over one reference.
		unsafe { Playlist::from_raw(&self.api, self.api.session_inbox_create(self.as_ptr()), Ownership::Adopt) }
	}

	/// Starred playlist of another user.
	pub fn starred_for(&self, user: &User) -> Result<Option<Playlist>> {
		if !self.is_logged_in() {
			return Ok(None);
		}
		let name = c_string("canonical name", &user.canonical_name())?;
		// SAFETY: `*_create` hands over one reference.
		Ok(unsafe {
			Playlist::from_raw(
				&self.api,
				self.api.session_starred_for_user_create(self.as_ptr(), &name),
				Ownership::Adopt,
			)
		})
	}

	/// Two-letter country code of the logged-in user.
	pub fn country(&self) -> Option<String> {
		// SAFETY: the session is live for `&self`.
		let packed = unsafe { self.api.session_user_country(self.as_ptr()) };
		let code: String = [(packed >> 8) & 0xff, packed & 0xff]
			.into_iter()
			.filter_map(|byte| u8::try_from(byte).ok())
			.filter(u8::is_ascii_alphabetic)
			.map(char::from)
			.collect();
		(code.len() == 2).then_some(code)
	}

	/// Parses a `spotify:` link. `None` for text the SDK does not recognise.
	pub fn link(&self, text: &str) -> Result<Option<Link>> {
		Link::new(&self.api, text)
	}

	pub fn player(&self) -> Player<'_> {
		Player::new(self)
	}

	// Settings

	pub fn set_cache_size(&self, megabytes: usize) -> Result<()> {
		// SAFETY: the session is live for `&self`.
		self.check(unsafe { self.api.session_set_cache_size(self.as_ptr(), megabytes) })
	}

	pub fn set_volume_normalization(&self, on: bool) -> Result<()> {
		// SAFETY: the session is live for `&self`.
		self.check(unsafe { self.api.session_set_volume_normalization(self.as_ptr(), on) })
	}

	pub fn volume_normalization(&self) -> bool {
		// SAFETY: the session is live for `&self`.
		unsafe { self.api.session_get_volume_normalization(self.as_ptr()) }
	}

	pub fn set_private_session(&self, enabled: bool) -> Result<()> {
		// SAFETY: the session is live for `&self`.
		self.check(unsafe { self.api.session_set_private_session(self.as_ptr(), enabled) })
	}

	pub fn is_private_session(&self) -> bool {
		// SAFETY: the session is live for `&self`.
		unsafe { self.api.session_is_private_session(self.as_ptr()) }
	}

	pub fn set_preferred_bitrate(&self, bitrate: Bitrate) -> Result<()> {
		tracing::debug!(%bitrate, "setting preferred bitrate");
		// SAFETY: the session is live for `&self`.
		self.check(unsafe { self.api.session_preferred_bitrate(self.as_ptr(), bitrate.as_raw()) })
	}

	/// Bitrate for offline sync. With `resync`, already synced tracks are
	/// fetched again at the new rate.
	pub fn set_offline_bitrate(&self, bitrate: Bitrate, resync: bool) -> Result<()> {
		tracing::debug!(%bitrate, resync, "setting offline bitrate");
		// SAFETY: the session is live for `&self`.
		self.check(unsafe { self.api.session_preferred_offline_bitrate(self.as_ptr(), bitrate.as_raw(), resync) })
	}

	pub fn set_connection_type(&self, kind: ConnectionType) -> Result<()> {
		tracing::debug!(%kind, "setting connection type");
		// SAFETY: the session is live for `&self`.
		self.check(unsafe { self.api.session_set_connection_type(self.as_ptr(), kind.as_raw()) })
	}

	pub fn set_connection_rules(&self, rules: ConnectionRules) -> Result<()> {
		tracing::debug!(rules = rules.bits(), "setting connection rules");
		// SAFETY: the session is live for `&self`.
		self.check(unsafe { self.api.session_set_connection_rules(self.as_ptr(), rules.bits()) })
	}

	// Offline synchronisation

	/// Fresh snapshot of the sync counters; empty when nothing is syncing.
	pub fn offline_sync_status(&self) -> OfflineSyncStatus {
		let mut raw = sys::sp_offline_sync_status::default();
		// SAFETY: `raw` is writable for the duration of the call.
		let present = unsafe { self.api.offline_sync_get_status(self.as_ptr(), &mut raw) };
		OfflineSyncStatus::from_raw(present.then_some(&raw))
	}

	pub fn offline_tracks_to_sync(&self) -> usize {
		// SAFETY: the session is live for `&self`.
		usize::try_from(unsafe { self.api.offline_tracks_to_sync(self.as_ptr()) }).unwrap_or(0)
	}

	pub fn offline_playlists_count(&self) -> usize {
		// SAFETY: the session is live for `&self`.
		usize::try_from(unsafe { self.api.offline_num_playlists(self.as_ptr()) }).unwrap_or(0)
	}

	/// Time until offline keys expire and the user must go online.
	pub fn offline_time_left(&self) -> Duration {
		// SAFETY: the session is live for `&self`.
		let seconds = unsafe { self.api.offline_time_left(self.as_ptr()) };
		Duration::from_secs(u64::try_from(seconds).unwrap_or(0))
	}
}

impl Observe for Session {
	type Event = SessionEvent;

	fn observable(&self) -> &Observable<SessionEvent> {
		&self.events
	}
}

impl fmt::Debug for Session {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Session")
			.field("ptr", &self.ptr)
			.field("config", &self.config)
			.field("events", &self.events)
			.finish_non_exhaustive()
	}
}

impl Drop for Session {
	fn drop(&mut self) {
		// SAFETY: the session was created by `self.api` and is released once.
		let code = unsafe { self.api.session_release(self.as_ptr()) };
		match maybe_raise(self.api.as_ref(), code) {
			Ok(()) => tracing::debug!("session released"),
			Err(err) => tracing::warn!(%err, "session release failed"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{FakeCall, FakeSdk};

	fn session() -> (Session, crate::testing::FakeController) {
		let (sdk, controller) = FakeSdk::new();
		let session = Session::create(sdk, b"appkey".to_vec(), SessionOptions::default()).unwrap();
		(session, controller)
	}

	#[test]
	fn release_on_drop() {
		let (session, controller) = session();
		assert!(controller.has_live_session());
		drop(session);
		assert!(!controller.has_live_session());
		assert_eq!(controller.take_calls(), vec![FakeCall::Release]);
	}

	#[test]
	fn native_create_failure_is_raised() {
		let (sdk, controller) = FakeSdk::new();
		controller.set_create_error(sys::SP_ERROR_BAD_APPLICATION_KEY);
		let err = Session::create(sdk, b"appkey".to_vec(), SessionOptions::default()).unwrap_err();
		assert_eq!(err.native_kind(), Some(crate::error::ErrorKind::BadApplicationKey));
		assert!(!controller.has_live_session());
	}

	#[test]
	fn country_unpacks_two_letters() {
		let (session, controller) = session();
		assert_eq!(session.country(), None);
		controller.set_country("SE");
		assert_eq!(session.country().as_deref(), Some("SE"));
	}

	#[test]
	fn process_events_returns_the_hint() {
		let (session, controller) = session();
		controller.set_next_timeout(Duration::from_millis(42));
		assert_eq!(session.process_events().unwrap(), Duration::from_millis(42));
		assert_eq!(controller.process_events_count(), 1);
	}

	#[test]
	fn offline_counters() {
		let (session, controller) = session();
		assert!(session.offline_sync_status().is_empty());
		controller.set_offline_counts(3, 2, 3600);
		assert_eq!(session.offline_tracks_to_sync(), 3);
		assert_eq!(session.offline_playlists_count(), 2);
		assert_eq!(session.offline_time_left(), Duration::from_secs(3600));
	}
}
