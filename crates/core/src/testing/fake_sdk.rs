//! [`NativeApi`] implementation backed by [`FakeState`].

use std::ffi::{CStr, c_int, c_void};
use std::mem;
use std::sync::Arc;

use hallon_sys as sys;
use parking_lot::Mutex;

use super::FakeController;
use super::state::{FakeCall, FakeConfig, FakeObject, FakeSessionCell, FakeState, LiveSession, Pending, invoke};
use crate::error::ErrorKind;
use crate::native::{NativeApi, ObjectKind};

/// In-memory stand-in for the native SDK.
///
/// Callbacks queued by native calls (or by [`FakeController::queue`]) are
/// delivered on the thread that calls `session_process_events`, the way the
/// real SDK delivers most of its callbacks.
pub struct FakeSdk {
	pub(super) state: Arc<Mutex<FakeState>>,
}

impl FakeSdk {
	pub fn new() -> (Arc<Self>, FakeController) {
		let state = Arc::new(Mutex::new(FakeState::new()));
		let sdk = Arc::new(Self {
			state: Arc::clone(&state),
		});
		(sdk, FakeController { state })
	}

	fn record(&self, call: FakeCall) {
		self.state.lock().calls.push(call);
	}

	fn with_entry<T>(&self, object: *mut c_void, default: T, f: impl FnOnce(&FakeObject, bool) -> T) -> T {
		let state = self.state.lock();
		match state.entry(object as usize) {
			Some(entry) => f(&entry.object, entry.loaded),
			None => default,
		}
	}

	fn account<T>(&self, f: impl FnOnce(&mut FakeState, super::state::Account) -> T) -> Option<T> {
		let mut state = self.state.lock();
		if !state.is_logged_in() {
			return None;
		}
		let account = state.account?;
		Some(f(&mut state, account))
	}
}

fn addr<T>(ptr: *mut T) -> usize {
	ptr as usize
}

fn ptr<T>(address: usize) -> *mut T {
	address as *mut T
}

fn index(list: &[usize], index: c_int) -> usize {
	usize::try_from(index).ok().and_then(|i| list.get(i).copied()).unwrap_or(0)
}

fn count(list: &[usize]) -> c_int {
	c_int::try_from(list.len()).unwrap_or(c_int::MAX)
}

fn link_type(text: &str) -> sys::sp_linktype {
	let parts: Vec<&str> = text.split(':').collect();
	if parts.first() != Some(&"spotify") || parts.len() < 3 || parts.iter().any(|part| part.is_empty()) {
		return sys::SP_LINKTYPE_INVALID;
	}
	match (parts[1], parts.get(3).copied(), parts.len()) {
		("track", None, 3) => sys::SP_LINKTYPE_TRACK,
		("album", None, 3) => sys::SP_LINKTYPE_ALBUM,
		("artist", None, 3) => sys::SP_LINKTYPE_ARTIST,
		("search", None, 3) => sys::SP_LINKTYPE_SEARCH,
		("image", None, 3) => sys::SP_LINKTYPE_IMAGE,
		("local", _, _) => sys::SP_LINKTYPE_LOCALTRACK,
		("user", None, 3) => sys::SP_LINKTYPE_PROFILE,
		("user", Some("starred"), 4) => sys::SP_LINKTYPE_STARRED,
		("user", Some("playlist"), 5) => sys::SP_LINKTYPE_PLAYLIST,
		_ => sys::SP_LINKTYPE_INVALID,
	}
}

impl NativeApi for FakeSdk {
	unsafe fn session_userdata(session: *mut sys::sp_session) -> *mut c_void {
		// SAFETY: fake session pointers are boxed `FakeSessionCell`s.
		unsafe { (*session.cast::<FakeSessionCell>()).userdata }
	}

	fn error_message(&self, code: sys::sp_error) -> String {
		match ErrorKind::from_raw(code) {
			None => "No error".to_owned(),
			Some(kind) => format!("simulated {} failure", kind.name().replace('_', " ")),
		}
	}

	unsafe fn session_create(&self, config: &sys::sp_session_config, session: &mut *mut sys::sp_session) -> sys::sp_error {
		let mut state = self.state.lock();
		if state.session.is_some() {
			return sys::SP_ERROR_API_INITIALIZATION_FAILED;
		}
		if state.create_error != sys::SP_ERROR_OK {
			return state.create_error;
		}
		if config.api_version != sys::SPOTIFY_API_VERSION {
			return sys::SP_ERROR_BAD_API_VERSION;
		}
		if config.application_key.is_null() || config.application_key_size == 0 {
			return sys::SP_ERROR_BAD_APPLICATION_KEY;
		}
		if config.callbacks.is_null() {
			return sys::SP_ERROR_MISSING_CALLBACK;
		}

		// SAFETY: the engine passes a config of valid C strings and a live
		// callback table.
		let (captured, callbacks) = unsafe { (FakeConfig::capture(config), *config.callbacks) };
		if captured.user_agent.len() > 255 {
			return sys::SP_ERROR_BAD_USER_AGENT;
		}

		let cell = Box::into_raw(Box::new(FakeSessionCell {
			userdata: config.userdata,
		}));
		state.session = Some(LiveSession {
			address: cell as usize,
			callbacks,
		});
		state.config = Some(captured);
		state.sessions_created += 1;
		state.connection_state = sys::SP_CONNECTION_STATE_LOGGED_OUT;
		*session = cell.cast();
		sys::SP_ERROR_OK
	}

	unsafe fn session_release(&self, session: *mut sys::sp_session) -> sys::sp_error {
		let mut state = self.state.lock();
		if !state.session.is_some_and(|live| live.address == addr(session)) {
			return sys::SP_ERROR_INVALID_INDATA;
		}
		state.session = None;
		state.log_out();
		state.pending.clear();
		state.calls.push(FakeCall::Release);
		// SAFETY: created by `Box::into_raw` in `session_create`.
		drop(unsafe { Box::from_raw(session.cast::<FakeSessionCell>()) });
		sys::SP_ERROR_OK
	}

	unsafe fn session_process_events(&self, session: *mut sys::sp_session, next_timeout: &mut c_int) -> sys::sp_error {
		let (live, pending) = {
			let mut state = self.state.lock();
			state.process_events_calls += 1;
			*next_timeout = state.next_timeout;
			let Some(live) = state.session.filter(|live| live.address == addr(session)) else {
				return sys::SP_ERROR_INVALID_INDATA;
			};
			let mut pending = mem::take(&mut state.pending);
			if state.hold_browses {
				let (held, ready) = pending.into_iter().partition(|item| !matches!(item, Pending::Session(_)));
				state.pending = held;
				pending = ready;
			}
			for item in &pending {
				let browse = match item {
					Pending::AlbumBrowse { browse, .. } | Pending::ArtistBrowse { browse, .. } => *browse,
					Pending::Session(_) => continue,
				};
				if let Some(entry) = state.objects.get_mut(&browse) {
					entry.loaded = true;
				}
			}
			(live, pending)
		};

		// Delivered without the lock so handlers can call back in.
		for item in pending {
			// SAFETY: `live` is the session these callbacks were registered for.
			unsafe {
				match item {
					Pending::Session(callback) => invoke(&live.callbacks, session, &callback),
					Pending::AlbumBrowse {
						browse,
						callback,
						userdata,
					} => callback(ptr(browse), ptr(userdata)),
					Pending::ArtistBrowse {
						browse,
						callback,
						userdata,
					} => callback(ptr(browse), ptr(userdata)),
				}
			}
		}
		tracing::trace!(target: "hallon::testing", "fake process_events");
		sys::SP_ERROR_OK
	}

	unsafe fn session_connectionstate(&self, _session: *mut sys::sp_session) -> sys::sp_connectionstate {
		self.state.lock().connection_state
	}

	unsafe fn session_login(
		&self,
		_session: *mut sys::sp_session,
		username: &CStr,
		password: Option<&CStr>,
		remember_me: bool,
		blob: Option<&CStr>,
	) -> sys::sp_error {
		let username = username.to_string_lossy().into_owned();
		let mut state = self.state.lock();
		state.calls.push(FakeCall::Login {
			username: username.clone(),
			password: password.map(|p| p.to_string_lossy().into_owned()),
			blob: blob.map(|b| b.to_string_lossy().into_owned()),
			remember_me,
		});

		let outcome = state.login_error;
		if outcome == sys::SP_ERROR_OK {
			state.log_in(&username, remember_me);
		}
		state.pending.push_back(Pending::Session(super::FakeCallback::LoggedIn(outcome)));
		if outcome == sys::SP_ERROR_OK {
			state.pending.push_back(Pending::Session(super::FakeCallback::ConnectionstateUpdated));
		}
		sys::SP_ERROR_OK
	}

	unsafe fn session_relogin(&self, _session: *mut sys::sp_session) -> sys::sp_error {
		let mut state = self.state.lock();
		state.calls.push(FakeCall::Relogin);
		let Some(username) = state.remembered_user.clone() else {
			return sys::SP_ERROR_NO_CREDENTIALS;
		};
		state.log_in(&username, true);
		state.pending.push_back(Pending::Session(super::FakeCallback::LoggedIn(sys::SP_ERROR_OK)));
		state.pending.push_back(Pending::Session(super::FakeCallback::ConnectionstateUpdated));
		sys::SP_ERROR_OK
	}

	unsafe fn session_remembered_user(&self, _session: *mut sys::sp_session) -> Option<String> {
		self.state.lock().remembered_user.clone()
	}

	unsafe fn session_user_name(&self, _session: *mut sys::sp_session) -> String {
		self.account(|state, account| match state.entry(account.user).map(|entry| &entry.object) {
			Some(FakeObject::User { canonical, .. }) => canonical.clone(),
			_ => String::new(),
		})
		.unwrap_or_default()
	}

	unsafe fn session_forget_me(&self, _session: *mut sys::sp_session) -> sys::sp_error {
		let mut state = self.state.lock();
		state.calls.push(FakeCall::ForgetMe);
		state.remembered_user = None;
		sys::SP_ERROR_OK
	}

	unsafe fn session_logout(&self, _session: *mut sys::sp_session) -> sys::sp_error {
		let mut state = self.state.lock();
		state.calls.push(FakeCall::Logout);
		state.log_out();
		state.pending.push_back(Pending::Session(super::FakeCallback::LoggedOut));
		state.pending.push_back(Pending::Session(super::FakeCallback::ConnectionstateUpdated));
		sys::SP_ERROR_OK
	}

	unsafe fn session_user(&self, _session: *mut sys::sp_session) -> *mut sys::sp_user {
		ptr(self.account(|_, account| account.user).unwrap_or(0))
	}

	unsafe fn session_user_country(&self, _session: *mut sys::sp_session) -> c_int {
		self.state.lock().country
	}

	unsafe fn session_player_load(&self, _session: *mut sys::sp_session, track: *mut sys::sp_track) -> sys::sp_error {
		let mut state = self.state.lock();
		let (name, playable) = match state.entry(addr(track)).map(|entry| &entry.object) {
			Some(FakeObject::Track { name, playable, .. }) => (name.clone(), *playable),
			_ => return sys::SP_ERROR_INVALID_INDATA,
		};
		state.calls.push(FakeCall::PlayerLoad(name));
		if playable {
			sys::SP_ERROR_OK
		} else {
			sys::SP_ERROR_TRACK_NOT_PLAYABLE
		}
	}

	unsafe fn session_player_seek(&self, _session: *mut sys::sp_session, offset_ms: c_int) -> sys::sp_error {
		self.record(FakeCall::PlayerSeek(offset_ms));
		sys::SP_ERROR_OK
	}

	unsafe fn session_player_play(&self, _session: *mut sys::sp_session, play: bool) -> sys::sp_error {
		self.record(FakeCall::PlayerPlay(play));
		sys::SP_ERROR_OK
	}

	unsafe fn session_player_unload(&self, _session: *mut sys::sp_session) -> sys::sp_error {
		self.record(FakeCall::PlayerUnload);
		sys::SP_ERROR_OK
	}

	unsafe fn session_playlistcontainer(&self, _session: *mut sys::sp_session) -> *mut sys::sp_playlistcontainer {
		ptr(self.account(|_, account| account.container).unwrap_or(0))
	}

	unsafe fn session_inbox_create(&self, _session: *mut sys::sp_session) -> *mut sys::sp_playlist {
		ptr(self
			.account(|state, account| {
				state.retain(account.inbox);
				account.inbox
			})
			.unwrap_or(0))
	}

	unsafe fn session_starred_create(&self, _session: *mut sys::sp_session) -> *mut sys::sp_playlist {
		ptr(self
			.account(|state, account| {
				state.retain(account.starred);
				account.starred
			})
			.unwrap_or(0))
	}

	unsafe fn session_starred_for_user_create(&self, _session: *mut sys::sp_session, canonical_username: &CStr) -> *mut sys::sp_playlist {
		let username = canonical_username.to_string_lossy().into_owned();
		ptr(self
			.account(|state, _| {
				state.alloc(
					FakeObject::Playlist {
						name: format!("{username}'s starred"),
						tracks: Vec::new(),
					},
					true,
					Some(format!("spotify:user:{username}:starred")),
				)
			})
			.unwrap_or(0))
	}

	unsafe fn session_set_cache_size(&self, _session: *mut sys::sp_session, megabytes: usize) -> sys::sp_error {
		self.record(FakeCall::SetCacheSize(megabytes));
		sys::SP_ERROR_OK
	}

	unsafe fn session_set_volume_normalization(&self, _session: *mut sys::sp_session, on: bool) -> sys::sp_error {
		let mut state = self.state.lock();
		state.calls.push(FakeCall::SetVolumeNormalization(on));
		state.volume_normalization = on;
		sys::SP_ERROR_OK
	}

	unsafe fn session_get_volume_normalization(&self, _session: *mut sys::sp_session) -> bool {
		self.state.lock().volume_normalization
	}

	unsafe fn session_set_private_session(&self, _session: *mut sys::sp_session, enabled: bool) -> sys::sp_error {
		let mut state = self.state.lock();
		state.calls.push(FakeCall::SetPrivateSession(enabled));
		if state.private_session != enabled {
			state.private_session = enabled;
			state
				.pending
				.push_back(Pending::Session(super::FakeCallback::PrivateSessionModeChanged(enabled)));
		}
		sys::SP_ERROR_OK
	}

	unsafe fn session_is_private_session(&self, _session: *mut sys::sp_session) -> bool {
		self.state.lock().private_session
	}

	unsafe fn session_preferred_bitrate(&self, _session: *mut sys::sp_session, bitrate: sys::sp_bitrate) -> sys::sp_error {
		self.record(FakeCall::PreferredBitrate(bitrate));
		sys::SP_ERROR_OK
	}

	unsafe fn session_preferred_offline_bitrate(
		&self,
		_session: *mut sys::sp_session,
		bitrate: sys::sp_bitrate,
		allow_resync: bool,
	) -> sys::sp_error {
		self.record(FakeCall::PreferredOfflineBitrate { bitrate, allow_resync });
		sys::SP_ERROR_OK
	}

	unsafe fn session_set_connection_type(&self, _session: *mut sys::sp_session, kind: sys::sp_connection_type) -> sys::sp_error {
		self.record(FakeCall::SetConnectionType(kind));
		sys::SP_ERROR_OK
	}

	unsafe fn session_set_connection_rules(&self, _session: *mut sys::sp_session, rules: sys::sp_connection_rules) -> sys::sp_error {
		self.record(FakeCall::SetConnectionRules(rules));
		sys::SP_ERROR_OK
	}

	unsafe fn offline_tracks_to_sync(&self, _session: *mut sys::sp_session) -> c_int {
		self.state.lock().offline_tracks
	}

	unsafe fn offline_num_playlists(&self, _session: *mut sys::sp_session) -> c_int {
		self.state.lock().offline_playlists
	}

	unsafe fn offline_sync_get_status(&self, _session: *mut sys::sp_session, status: &mut sys::sp_offline_sync_status) -> bool {
		match self.state.lock().offline_status {
			Some(current) => {
				*status = current;
				true
			}
			None => false,
		}
	}

	unsafe fn offline_time_left(&self, _session: *mut sys::sp_session) -> c_int {
		self.state.lock().offline_time_left
	}

	unsafe fn add_ref(&self, kind: ObjectKind, object: *mut c_void) -> sys::sp_error {
		let mut state = self.state.lock();
		let address = object as usize;
		if !state.entry(address).is_some_and(|entry| entry.object.kind() == kind) {
			return sys::SP_ERROR_INVALID_INDATA;
		}
		state.retain(address);
		sys::SP_ERROR_OK
	}

	unsafe fn release(&self, kind: ObjectKind, object: *mut c_void) -> sys::sp_error {
		let mut state = self.state.lock();
		let address = object as usize;
		if !state.entry(address).is_some_and(|entry| entry.object.kind() == kind) {
			return sys::SP_ERROR_INVALID_INDATA;
		}
		state.release(address);
		sys::SP_ERROR_OK
	}

	unsafe fn track_is_loaded(&self, track: *mut sys::sp_track) -> bool {
		self.with_entry(track.cast(), false, |_, loaded| loaded)
	}

	unsafe fn track_error(&self, track: *mut sys::sp_track) -> sys::sp_error {
		self.with_entry(track.cast(), sys::SP_ERROR_INVALID_INDATA, |object, loaded| match object {
			FakeObject::Track { error, .. } if loaded => *error,
			FakeObject::Track { .. } => sys::SP_ERROR_IS_LOADING,
			_ => sys::SP_ERROR_INVALID_INDATA,
		})
	}

	unsafe fn track_name(&self, track: *mut sys::sp_track) -> String {
		self.with_entry(track.cast(), String::new(), |object, _| match object {
			FakeObject::Track { name, .. } => name.clone(),
			_ => String::new(),
		})
	}

	unsafe fn track_duration(&self, track: *mut sys::sp_track) -> c_int {
		self.with_entry(track.cast(), 0, |object, _| match object {
			FakeObject::Track { duration_ms, .. } => *duration_ms,
			_ => 0,
		})
	}

	unsafe fn track_album(&self, track: *mut sys::sp_track) -> *mut sys::sp_album {
		ptr(self.with_entry(track.cast(), 0, |object, _| match object {
			FakeObject::Track { album, .. } => album.unwrap_or(0),
			_ => 0,
		}))
	}

	unsafe fn track_num_artists(&self, track: *mut sys::sp_track) -> c_int {
		self.with_entry(track.cast(), 0, |object, _| match object {
			FakeObject::Track { artists, .. } => count(artists),
			_ => 0,
		})
	}

	unsafe fn track_artist(&self, track: *mut sys::sp_track, position: c_int) -> *mut sys::sp_artist {
		ptr(self.with_entry(track.cast(), 0, |object, _| match object {
			FakeObject::Track { artists, .. } => index(artists, position),
			_ => 0,
		}))
	}

	unsafe fn album_is_loaded(&self, album: *mut sys::sp_album) -> bool {
		self.with_entry(album.cast(), false, |_, loaded| loaded)
	}

	unsafe fn album_name(&self, album: *mut sys::sp_album) -> String {
		self.with_entry(album.cast(), String::new(), |object, _| match object {
			FakeObject::Album { name, .. } => name.clone(),
			_ => String::new(),
		})
	}

	unsafe fn album_year(&self, album: *mut sys::sp_album) -> c_int {
		self.with_entry(album.cast(), 0, |object, _| match object {
			FakeObject::Album { year, .. } => *year,
			_ => 0,
		})
	}

	unsafe fn album_artist(&self, album: *mut sys::sp_album) -> *mut sys::sp_artist {
		ptr(self.with_entry(album.cast(), 0, |object, _| match object {
			FakeObject::Album { artist, .. } => artist.unwrap_or(0),
			_ => 0,
		}))
	}

	unsafe fn artist_is_loaded(&self, artist: *mut sys::sp_artist) -> bool {
		self.with_entry(artist.cast(), false, |_, loaded| loaded)
	}

	unsafe fn artist_name(&self, artist: *mut sys::sp_artist) -> String {
		self.with_entry(artist.cast(), String::new(), |object, _| match object {
			FakeObject::Artist { name } => name.clone(),
			_ => String::new(),
		})
	}

	unsafe fn playlist_is_loaded(&self, playlist: *mut sys::sp_playlist) -> bool {
		self.with_entry(playlist.cast(), false, |_, loaded| loaded)
	}

	unsafe fn playlist_name(&self, playlist: *mut sys::sp_playlist) -> String {
		self.with_entry(playlist.cast(), String::new(), |object, _| match object {
			FakeObject::Playlist { name, .. } => name.clone(),
			_ => String::new(),
		})
	}

	unsafe fn playlist_num_tracks(&self, playlist: *mut sys::sp_playlist) -> c_int {
		self.with_entry(playlist.cast(), 0, |object, _| match object {
			FakeObject::Playlist { tracks, .. } => count(tracks),
			_ => 0,
		})
	}

	unsafe fn playlist_track(&self, playlist: *mut sys::sp_playlist, position: c_int) -> *mut sys::sp_track {
		ptr(self.with_entry(playlist.cast(), 0, |object, _| match object {
			FakeObject::Playlist { tracks, .. } => index(tracks, position),
			_ => 0,
		}))
	}

	unsafe fn playlistcontainer_is_loaded(&self, container: *mut sys::sp_playlistcontainer) -> bool {
		self.with_entry(container.cast(), false, |_, loaded| loaded)
	}

	unsafe fn playlistcontainer_num_playlists(&self, container: *mut sys::sp_playlistcontainer) -> c_int {
		self.with_entry(container.cast(), 0, |object, _| match object {
			FakeObject::Container { playlists } => count(playlists),
			_ => 0,
		})
	}

	unsafe fn playlistcontainer_playlist(&self, container: *mut sys::sp_playlistcontainer, position: c_int) -> *mut sys::sp_playlist {
		ptr(self.with_entry(container.cast(), 0, |object, _| match object {
			FakeObject::Container { playlists } => index(playlists, position),
			_ => 0,
		}))
	}

	unsafe fn user_is_loaded(&self, user: *mut sys::sp_user) -> bool {
		self.with_entry(user.cast(), false, |_, loaded| loaded)
	}

	unsafe fn user_canonical_name(&self, user: *mut sys::sp_user) -> String {
		self.with_entry(user.cast(), String::new(), |object, _| match object {
			FakeObject::User { canonical, .. } => canonical.clone(),
			_ => String::new(),
		})
	}

	unsafe fn user_display_name(&self, user: *mut sys::sp_user) -> String {
		self.with_entry(user.cast(), String::new(), |object, _| match object {
			FakeObject::User { display, .. } => display.clone(),
			_ => String::new(),
		})
	}

	unsafe fn albumbrowse_create(
		&self,
		_session: *mut sys::sp_session,
		album: *mut sys::sp_album,
		callback: sys::albumbrowse_complete_cb,
		userdata: *mut c_void,
	) -> *mut sys::sp_albumbrowse {
		let mut state = self.state.lock();
		if !matches!(state.entry(addr(album)).map(|entry| &entry.object), Some(FakeObject::Album { .. })) {
			return std::ptr::null_mut();
		}
		let browse = state.alloc(
			FakeObject::AlbumBrowse {
				album: addr(album),
				error: sys::SP_ERROR_OK,
			},
			false,
			None,
		);
		state.pending.push_back(Pending::AlbumBrowse {
			browse,
			callback,
			userdata: userdata as usize,
		});
		ptr(browse)
	}

	unsafe fn albumbrowse_is_loaded(&self, browse: *mut sys::sp_albumbrowse) -> bool {
		self.with_entry(browse.cast(), false, |_, loaded| loaded)
	}

	unsafe fn albumbrowse_error(&self, browse: *mut sys::sp_albumbrowse) -> sys::sp_error {
		self.with_entry(browse.cast(), sys::SP_ERROR_INVALID_INDATA, |object, loaded| match object {
			FakeObject::AlbumBrowse { error, .. } if loaded => *error,
			_ => sys::SP_ERROR_IS_LOADING,
		})
	}

	unsafe fn albumbrowse_num_tracks(&self, browse: *mut sys::sp_albumbrowse) -> c_int {
		count(&self.browse_tracks(addr(browse)))
	}

	unsafe fn albumbrowse_track(&self, browse: *mut sys::sp_albumbrowse, position: c_int) -> *mut sys::sp_track {
		ptr(index(&self.browse_tracks(addr(browse)), position))
	}

	unsafe fn artistbrowse_create(
		&self,
		_session: *mut sys::sp_session,
		artist: *mut sys::sp_artist,
		_kind: sys::sp_artistbrowse_type,
		callback: sys::artistbrowse_complete_cb,
		userdata: *mut c_void,
	) -> *mut sys::sp_artistbrowse {
		let mut state = self.state.lock();
		if !matches!(state.entry(addr(artist)).map(|entry| &entry.object), Some(FakeObject::Artist { .. })) {
			return std::ptr::null_mut();
		}
		let browse = state.alloc(
			FakeObject::ArtistBrowse {
				artist: addr(artist),
				error: sys::SP_ERROR_OK,
			},
			false,
			None,
		);
		state.pending.push_back(Pending::ArtistBrowse {
			browse,
			callback,
			userdata: userdata as usize,
		});
		ptr(browse)
	}

	unsafe fn artistbrowse_is_loaded(&self, browse: *mut sys::sp_artistbrowse) -> bool {
		self.with_entry(browse.cast(), false, |_, loaded| loaded)
	}

	unsafe fn artistbrowse_error(&self, browse: *mut sys::sp_artistbrowse) -> sys::sp_error {
		self.with_entry(browse.cast(), sys::SP_ERROR_INVALID_INDATA, |object, loaded| match object {
			FakeObject::ArtistBrowse { error, .. } if loaded => *error,
			_ => sys::SP_ERROR_IS_LOADING,
		})
	}

	unsafe fn artistbrowse_num_albums(&self, browse: *mut sys::sp_artistbrowse) -> c_int {
		count(&self.browse_albums(addr(browse)))
	}

	unsafe fn artistbrowse_album(&self, browse: *mut sys::sp_artistbrowse, position: c_int) -> *mut sys::sp_album {
		ptr(index(&self.browse_albums(addr(browse)), position))
	}

	unsafe fn link_create_from_string(&self, link: &CStr) -> *mut sys::sp_link {
		let text = link.to_string_lossy().into_owned();
		if link_type(&text) == sys::SP_LINKTYPE_INVALID {
			return std::ptr::null_mut();
		}
		ptr(self.state.lock().alloc(FakeObject::Link { text }, true, None))
	}

	unsafe fn link_create_from(&self, kind: ObjectKind, object: *mut c_void) -> *mut sys::sp_link {
		let mut state = self.state.lock();
		let address = object as usize;
		let Some(entry) = state.objects.get_mut(&address) else {
			return std::ptr::null_mut();
		};
		if entry.object.kind() != kind {
			return std::ptr::null_mut();
		}
		let generated = match &entry.object {
			FakeObject::Track { .. } => format!("spotify:track:{address:x}"),
			FakeObject::Album { .. } => format!("spotify:album:{address:x}"),
			FakeObject::Artist { .. } => format!("spotify:artist:{address:x}"),
			FakeObject::Playlist { .. } => format!("spotify:user:fake:playlist:{address:x}"),
			FakeObject::User { canonical, .. } => format!("spotify:user:{canonical}"),
			_ => return std::ptr::null_mut(),
		};
		let text = entry.link.get_or_insert(generated).clone();
		ptr(state.alloc(FakeObject::Link { text }, true, None))
	}

	unsafe fn link_as_string(&self, link: *mut sys::sp_link) -> String {
		self.with_entry(link.cast(), String::new(), |object, _| match object {
			FakeObject::Link { text } => text.clone(),
			_ => String::new(),
		})
	}

	unsafe fn link_type(&self, link: *mut sys::sp_link) -> sys::sp_linktype {
		self.with_entry(link.cast(), sys::SP_LINKTYPE_INVALID, |object, _| match object {
			FakeObject::Link { text } => link_type(text),
			_ => sys::SP_LINKTYPE_INVALID,
		})
	}

	unsafe fn link_as(&self, link: *mut sys::sp_link, kind: ObjectKind) -> *mut c_void {
		let state = self.state.lock();
		let Some(FakeObject::Link { text }) = state.entry(addr(link)).map(|entry| &entry.object) else {
			return std::ptr::null_mut();
		};
		let found = state
			.objects
			.iter()
			.filter(|(_, entry)| entry.object.kind() == kind && entry.link.as_deref() == Some(text.as_str()))
			.map(|(address, _)| *address)
			.min()
			.unwrap_or(0);
		ptr(found)
	}
}

impl FakeSdk {
	fn browse_tracks(&self, browse: usize) -> Vec<usize> {
		let state = self.state.lock();
		match state.entry(browse) {
			Some(entry) if entry.loaded => match entry.object {
				FakeObject::AlbumBrowse { album, .. } => state.related(ObjectKind::Track, album, |object| match object {
					FakeObject::Track { album, .. } => *album,
					_ => None,
				}),
				_ => Vec::new(),
			},
			_ => Vec::new(),
		}
	}

	fn browse_albums(&self, browse: usize) -> Vec<usize> {
		let state = self.state.lock();
		match state.entry(browse) {
			Some(entry) if entry.loaded => match entry.object {
				FakeObject::ArtistBrowse { artist, .. } => state.related(ObjectKind::Album, artist, |object| match object {
					FakeObject::Album { artist, .. } => *artist,
					_ => None,
				}),
				_ => Vec::new(),
			},
			_ => Vec::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn link_grammar() {
		assert_eq!(link_type("spotify:track:4uLU6hMCjMI75M1A2tKUQC"), sys::SP_LINKTYPE_TRACK);
		assert_eq!(link_type("spotify:user:kim"), sys::SP_LINKTYPE_PROFILE);
		assert_eq!(link_type("spotify:user:kim:starred"), sys::SP_LINKTYPE_STARRED);
		assert_eq!(link_type("spotify:user:kim:playlist:abc"), sys::SP_LINKTYPE_PLAYLIST);
		assert_eq!(link_type("spotify:track:"), sys::SP_LINKTYPE_INVALID);
		assert_eq!(link_type("http://example.com"), sys::SP_LINKTYPE_INVALID);
	}

	#[test]
	fn second_live_session_is_refused() {
		let (sdk, _controller) = FakeSdk::new();
		let callbacks = sys::sp_session_callbacks::default();
		let key = [1_u8; 4];
		let config = sys::sp_session_config {
			application_key: key.as_ptr().cast(),
			application_key_size: key.len(),
			callbacks: &callbacks,
			..Default::default()
		};

		let mut first = std::ptr::null_mut();
		let mut second = std::ptr::null_mut();
		unsafe {
			assert_eq!(sdk.session_create(&config, &mut first), sys::SP_ERROR_OK);
			assert_eq!(sdk.session_create(&config, &mut second), sys::SP_ERROR_API_INITIALIZATION_FAILED);
			assert_eq!(sdk.session_release(first), sys::SP_ERROR_OK);
		}
		assert!(second.is_null());
	}
}
