//! Shared state behind [`FakeSdk`](super::FakeSdk) and its controller.

use std::collections::{HashMap, VecDeque};
use std::ffi::{CStr, c_char, c_int, c_void};

use hallon_sys as sys;

use crate::native::ObjectKind;

/// Boxed behind every fake session pointer so `session_userdata` can reach
/// the engine's context without `&self`.
pub(super) struct FakeSessionCell {
	pub(super) userdata: *mut c_void,
}

/// A native call the engine made, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
	Login {
		username: String,
		password: Option<String>,
		blob: Option<String>,
		remember_me: bool,
	},
	Relogin,
	Logout,
	ForgetMe,
	PlayerLoad(String),
	PlayerPlay(bool),
	PlayerSeek(c_int),
	PlayerUnload,
	SetCacheSize(usize),
	SetVolumeNormalization(bool),
	SetPrivateSession(bool),
	PreferredBitrate(sys::sp_bitrate),
	PreferredOfflineBitrate { bitrate: sys::sp_bitrate, allow_resync: bool },
	SetConnectionType(sys::sp_connection_type),
	SetConnectionRules(sys::sp_connection_rules),
	Release,
}

/// A session callback the fake can deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCallback {
	LoggedIn(sys::sp_error),
	LoggedOut,
	MetadataUpdated,
	ConnectionError(sys::sp_error),
	MessageToUser(String),
	NotifyMainThread,
	PlayTokenLost,
	LogMessage(String),
	EndOfTrack,
	StreamingError(sys::sp_error),
	UserinfoUpdated,
	StartPlayback,
	StopPlayback,
	OfflineStatusUpdated,
	OfflineError(sys::sp_error),
	CredentialsBlobUpdated(String),
	ConnectionstateUpdated,
	ScrobbleError(sys::sp_error),
	PrivateSessionModeChanged(bool),
}

/// Copy of the config the engine passed to `session_create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeConfig {
	pub api_version: c_int,
	pub application_key: Vec<u8>,
	pub user_agent: String,
	pub cache_location: String,
	pub settings_location: String,
	pub has_userdata: bool,
	pub compress_playlists: bool,
	pub dont_save_metadata_for_playlists: bool,
	pub initially_unload_playlists: bool,
	pub device_id: Option<String>,
	pub proxy: Option<String>,
	pub proxy_username: Option<String>,
	pub proxy_password: Option<String>,
	pub ca_certs_filename: Option<String>,
	pub tracefile: Option<String>,
}

impl FakeConfig {
	/// # Safety
	///
	/// Every non-null string in `config` must be NUL-terminated and the key
	/// pointer must cover `application_key_size` bytes.
	pub(super) unsafe fn capture(config: &sys::sp_session_config) -> Self {
		let key = if config.application_key.is_null() {
			Vec::new()
		} else {
			// SAFETY: upheld by the caller.
			unsafe { std::slice::from_raw_parts(config.application_key.cast::<u8>(), config.application_key_size) }.to_vec()
		};
		// SAFETY: upheld by the caller.
		unsafe {
			Self {
				api_version: config.api_version,
				application_key: key,
				user_agent: string(config.user_agent).unwrap_or_default(),
				cache_location: string(config.cache_location).unwrap_or_default(),
				settings_location: string(config.settings_location).unwrap_or_default(),
				has_userdata: !config.userdata.is_null(),
				compress_playlists: config.compress_playlists,
				dont_save_metadata_for_playlists: config.dont_save_metadata_for_playlists,
				initially_unload_playlists: config.initially_unload_playlists,
				device_id: string(config.device_id),
				proxy: string(config.proxy),
				proxy_username: string(config.proxy_username),
				proxy_password: string(config.proxy_password),
				ca_certs_filename: string(config.ca_certs_filename),
				tracefile: string(config.tracefile),
			}
		}
	}
}

unsafe fn string(raw: *const c_char) -> Option<String> {
	if raw.is_null() {
		return None;
	}
	// SAFETY: non-null config strings are NUL-terminated.
	Some(unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned())
}

#[derive(Debug, Clone)]
pub(super) enum FakeObject {
	Track {
		name: String,
		duration_ms: c_int,
		album: Option<usize>,
		artists: Vec<usize>,
		error: sys::sp_error,
		playable: bool,
	},
	Album {
		name: String,
		year: c_int,
		artist: Option<usize>,
	},
	Artist {
		name: String,
	},
	Playlist {
		name: String,
		tracks: Vec<usize>,
	},
	Container {
		playlists: Vec<usize>,
	},
	User {
		canonical: String,
		display: String,
	},
	Link {
		text: String,
	},
	AlbumBrowse {
		album: usize,
		error: sys::sp_error,
	},
	ArtistBrowse {
		artist: usize,
		error: sys::sp_error,
	},
}

impl FakeObject {
	pub(super) fn kind(&self) -> ObjectKind {
		match self {
			Self::Track { .. } => ObjectKind::Track,
			Self::Album { .. } => ObjectKind::Album,
			Self::Artist { .. } => ObjectKind::Artist,
			Self::Playlist { .. } => ObjectKind::Playlist,
			Self::Container { .. } => ObjectKind::PlaylistContainer,
			Self::User { .. } => ObjectKind::User,
			Self::Link { .. } => ObjectKind::Link,
			Self::AlbumBrowse { .. } => ObjectKind::AlbumBrowse,
			Self::ArtistBrowse { .. } => ObjectKind::ArtistBrowse,
		}
	}
}

#[derive(Debug, Clone)]
pub(super) struct Entry {
	pub(super) object: FakeObject,
	pub(super) refcount: i32,
	pub(super) loaded: bool,
	pub(super) link: Option<String>,
}

pub(super) enum Pending {
	Session(FakeCallback),
	AlbumBrowse {
		browse: usize,
		callback: sys::albumbrowse_complete_cb,
		userdata: usize,
	},
	ArtistBrowse {
		browse: usize,
		callback: sys::artistbrowse_complete_cb,
		userdata: usize,
	},
}

#[derive(Clone, Copy)]
pub(super) struct LiveSession {
	pub(super) address: usize,
	pub(super) callbacks: sys::sp_session_callbacks,
}

/// Objects a logged-in account owns.
#[derive(Debug, Clone, Copy)]
pub(super) struct Account {
	pub(super) user: usize,
	pub(super) container: usize,
	pub(super) starred: usize,
	pub(super) inbox: usize,
}

pub(super) struct FakeState {
	next_address: usize,
	pub(super) objects: HashMap<usize, Entry>,
	pub(super) session: Option<LiveSession>,
	pub(super) config: Option<FakeConfig>,
	pub(super) sessions_created: usize,
	pub(super) calls: Vec<FakeCall>,
	pub(super) pending: VecDeque<Pending>,
	pub(super) process_events_calls: usize,
	pub(super) hold_browses: bool,
	pub(super) next_timeout: c_int,
	pub(super) create_error: sys::sp_error,
	pub(super) login_error: sys::sp_error,
	pub(super) connection_state: sys::sp_connectionstate,
	pub(super) remembered_user: Option<String>,
	pub(super) account: Option<Account>,
	pub(super) container_seed: Vec<usize>,
	pub(super) volume_normalization: bool,
	pub(super) private_session: bool,
	pub(super) country: c_int,
	pub(super) offline_status: Option<sys::sp_offline_sync_status>,
	pub(super) offline_tracks: c_int,
	pub(super) offline_playlists: c_int,
	pub(super) offline_time_left: c_int,
}

impl FakeState {
	pub(super) fn new() -> Self {
		Self {
			next_address: 0x1000,
			objects: HashMap::new(),
			session: None,
			config: None,
			sessions_created: 0,
			calls: Vec::new(),
			pending: VecDeque::new(),
			process_events_calls: 0,
			hold_browses: false,
			next_timeout: 1000,
			create_error: sys::SP_ERROR_OK,
			login_error: sys::SP_ERROR_OK,
			connection_state: sys::SP_CONNECTION_STATE_LOGGED_OUT,
			remembered_user: None,
			account: None,
			container_seed: Vec::new(),
			volume_normalization: false,
			private_session: false,
			country: 0,
			offline_status: None,
			offline_tracks: 0,
			offline_playlists: 0,
			offline_time_left: 0,
		}
	}

	/// Registers an object and returns its fabricated address. Addresses are
	/// never dereferenced.
	pub(super) fn alloc(&mut self, object: FakeObject, loaded: bool, link: Option<String>) -> usize {
		let address = self.next_address;
		self.next_address += 0x40;
		self.objects.insert(
			address,
			Entry {
				object,
				refcount: 1,
				loaded,
				link,
			},
		);
		address
	}

	pub(super) fn entry(&self, address: usize) -> Option<&Entry> {
		self.objects.get(&address)
	}

	pub(super) fn retain(&mut self, address: usize) {
		if let Some(entry) = self.objects.get_mut(&address) {
			entry.refcount += 1;
		}
	}

	pub(super) fn release(&mut self, address: usize) {
		if let Some(entry) = self.objects.get_mut(&address) {
			entry.refcount -= 1;
		}
	}

	pub(super) fn is_logged_in(&self) -> bool {
		self.connection_state == sys::SP_CONNECTION_STATE_LOGGED_IN
	}

	pub(super) fn log_in(&mut self, username: &str, remember_me: bool) {
		if self.account.is_some() {
			self.log_out();
		}
		let user = self.alloc(
			FakeObject::User {
				canonical: username.to_owned(),
				display: username.to_owned(),
			},
			true,
			Some(format!("spotify:user:{username}")),
		);
		let container = self.alloc(
			FakeObject::Container {
				playlists: self.container_seed.clone(),
			},
			true,
			None,
		);
		let starred = self.alloc(
			FakeObject::Playlist {
				name: "Starred".to_owned(),
				tracks: Vec::new(),
			},
			true,
			Some(format!("spotify:user:{username}:starred")),
		);
		let inbox = self.alloc(
			FakeObject::Playlist {
				name: "Inbox".to_owned(),
				tracks: Vec::new(),
			},
			true,
			None,
		);
		self.account = Some(Account {
			user,
			container,
			starred,
			inbox,
		});
		self.connection_state = sys::SP_CONNECTION_STATE_LOGGED_IN;
		if remember_me {
			self.remembered_user = Some(username.to_owned());
		}
	}

	/// Drops the session's own references; remembered credentials survive.
	pub(super) fn log_out(&mut self) {
		if let Some(account) = self.account.take() {
			for address in [account.user, account.container, account.starred, account.inbox] {
				self.release(address);
			}
		}
		self.connection_state = sys::SP_CONNECTION_STATE_LOGGED_OUT;
	}

	/// Objects of `kind` whose `pick` returns `target`, in creation order.
	pub(super) fn related(&self, kind: ObjectKind, target: usize, pick: impl Fn(&FakeObject) -> Option<usize>) -> Vec<usize> {
		let mut found: Vec<usize> = self
			.objects
			.iter()
			.filter(|(_, entry)| entry.object.kind() == kind && pick(&entry.object) == Some(target))
			.map(|(address, _)| *address)
			.collect();
		found.sort_unstable();
		found
	}
}

/// Calls the slot for `callback` in `callbacks`.
///
/// # Safety
///
/// `session` must be the live fake session the table was registered with.
pub(super) unsafe fn invoke(callbacks: &sys::sp_session_callbacks, session: *mut sys::sp_session, callback: &FakeCallback) {
	let cstring = |text: &str| std::ffi::CString::new(text.replace('\0', "")).unwrap_or_default();
	// SAFETY: the trampolines accept the session pointer they were
	// registered for and strings valid for the duration of the call.
	unsafe {
		match callback {
			FakeCallback::LoggedIn(code) => call_error(callbacks.logged_in, session, *code),
			FakeCallback::LoggedOut => call(callbacks.logged_out, session),
			FakeCallback::MetadataUpdated => call(callbacks.metadata_updated, session),
			FakeCallback::ConnectionError(code) => call_error(callbacks.connection_error, session, *code),
			FakeCallback::MessageToUser(text) => call_text(callbacks.message_to_user, session, &cstring(text)),
			FakeCallback::NotifyMainThread => call(callbacks.notify_main_thread, session),
			FakeCallback::PlayTokenLost => call(callbacks.play_token_lost, session),
			FakeCallback::LogMessage(text) => call_text(callbacks.log_message, session, &cstring(text)),
			FakeCallback::EndOfTrack => call(callbacks.end_of_track, session),
			FakeCallback::StreamingError(code) => call_error(callbacks.streaming_error, session, *code),
			FakeCallback::UserinfoUpdated => call(callbacks.userinfo_updated, session),
			FakeCallback::StartPlayback => call(callbacks.start_playback, session),
			FakeCallback::StopPlayback => call(callbacks.stop_playback, session),
			FakeCallback::OfflineStatusUpdated => call(callbacks.offline_status_updated, session),
			FakeCallback::OfflineError(code) => call_error(callbacks.offline_error, session, *code),
			FakeCallback::CredentialsBlobUpdated(blob) => {
				call_text(callbacks.credentials_blob_updated, session, &cstring(blob))
			}
			FakeCallback::ConnectionstateUpdated => call(callbacks.connectionstate_updated, session),
			FakeCallback::ScrobbleError(code) => call_error(callbacks.scrobble_error, session, *code),
			FakeCallback::PrivateSessionModeChanged(on) => {
				if let Some(slot) = callbacks.private_session_mode_changed {
					slot(session, *on);
				}
			}
		}
	}
}

unsafe fn call(slot: Option<sys::session_cb>, session: *mut sys::sp_session) {
	if let Some(slot) = slot {
		// SAFETY: see `invoke`.
		unsafe { slot(session) };
	}
}

unsafe fn call_error(slot: Option<sys::session_error_cb>, session: *mut sys::sp_session, code: sys::sp_error) {
	if let Some(slot) = slot {
		// SAFETY: see `invoke`.
		unsafe { slot(session, code) };
	}
}

unsafe fn call_text(slot: Option<sys::session_text_cb>, session: *mut sys::sp_session, text: &CStr) {
	if let Some(slot) = slot {
		// SAFETY: see `invoke`.
		unsafe { slot(session, text.as_ptr()) };
	}
}
