use std::ffi::c_int;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::mem;
use std::sync::Arc;
use std::time::Duration;

use hallon_sys as sys;
use parking_lot::Mutex;

use super::state::{FakeCall, FakeCallback, FakeConfig, FakeObject, FakeState, LiveSession, Pending, invoke};
use crate::handle::NativeObject;
use crate::types::ConnectionState;

/// Drives a [`FakeSdk`](super::FakeSdk) from the test side.
#[derive(Clone)]
pub struct FakeController {
	pub(super) state: Arc<Mutex<FakeState>>,
}

impl FakeController {
	/// Takes every recorded native call, clearing the log.
	pub fn take_calls(&self) -> Vec<FakeCall> {
		std::mem::take(&mut self.state.lock().calls)
	}

	pub fn calls(&self) -> Vec<FakeCall> {
		self.state.lock().calls.clone()
	}

	pub fn process_events_count(&self) -> usize {
		self.state.lock().process_events_calls
	}

	pub fn sessions_created(&self) -> usize {
		self.state.lock().sessions_created
	}

	pub fn has_live_session(&self) -> bool {
		self.state.lock().session.is_some()
	}

	/// Config passed to the last successful `session_create`.
	pub fn config(&self) -> Option<FakeConfig> {
		self.state.lock().config.clone()
	}

	/// Current reference count of a fake object; 0 for unknown pointers.
	pub fn refcount<T>(&self, object: *mut T) -> i32 {
		self.state.lock().entry(object as usize).map_or(0, |entry| entry.refcount)
	}

	pub fn set_create_error(&self, code: sys::sp_error) {
		self.state.lock().create_error = code;
	}

	/// Outcome delivered through `logged_in` by later logins.
	pub fn set_login_error(&self, code: sys::sp_error) {
		self.state.lock().login_error = code;
	}

	pub fn set_connection_state(&self, state: ConnectionState) {
		self.state.lock().connection_state = state.as_raw();
	}

	pub fn set_remembered_user(&self, username: Option<&str>) {
		self.state.lock().remembered_user = username.map(str::to_owned);
	}

	pub fn set_next_timeout(&self, timeout: Duration) {
		self.state.lock().next_timeout = c_int::try_from(timeout.as_millis()).unwrap_or(c_int::MAX);
	}

	/// Two-letter country code reported for the logged-in user.
	pub fn set_country(&self, code: &str) {
		let packed = code.bytes().take(2).fold(0, |packed, byte| (packed << 8) | c_int::from(byte));
		self.state.lock().country = packed;
	}

	pub fn set_offline_status(&self, status: Option<sys::sp_offline_sync_status>) {
		self.state.lock().offline_status = status;
	}

	pub fn set_offline_counts(&self, tracks_to_sync: c_int, playlists: c_int, time_left_secs: c_int) {
		let mut state = self.state.lock();
		state.offline_tracks = tracks_to_sync;
		state.offline_playlists = playlists;
		state.offline_time_left = time_left_secs;
	}

	/// Playlists placed in the container of every later login.
	pub fn seed_container(&self, playlist: *mut sys::sp_playlist) {
		let mut state = self.state.lock();
		state.container_seed.push(playlist as usize);
		let Some(account) = state.account else {
			return;
		};
		if let Some(FakeObject::Container { playlists }) = state.objects.get_mut(&account.container).map(|entry| &mut entry.object) {
			playlists.push(playlist as usize);
		}
	}

	/// Adds a track to a fake playlist.
	pub fn push_track(&self, playlist: *mut sys::sp_playlist, track: *mut sys::sp_track) {
		let mut state = self.state.lock();
		if let Some(FakeObject::Playlist { tracks, .. }) = state.objects.get_mut(&(playlist as usize)).map(|entry| &mut entry.object) {
			tracks.push(track as usize);
		}
	}

	pub fn set_loaded<T>(&self, object: *mut T, loaded: bool) {
		if let Some(entry) = self.state.lock().objects.get_mut(&(object as usize)) {
			entry.loaded = loaded;
		}
	}

	/// Starred playlist of the logged-in account.
	pub fn starred(&self) -> Option<*mut sys::sp_playlist> {
		self.state.lock().account.map(|account| account.starred as *mut _)
	}

	/// Keeps browse completions out of `process_events` until
	/// [`complete_browses`](Self::complete_browses).
	pub fn hold_browses(&self, hold: bool) {
		self.state.lock().hold_browses = hold;
	}

	/// Finishes every queued browse request on the calling thread and
	/// returns how many there were.
	pub fn complete_browses(&self) -> usize {
		let browses: Vec<Pending> = {
			let mut state = self.state.lock();
			let (browses, rest): (VecDeque<Pending>, VecDeque<Pending>) =
				mem::take(&mut state.pending).into_iter().partition(|item| !matches!(item, Pending::Session(_)));
			state.pending = rest;
			let browses: Vec<Pending> = browses.into_iter().collect();
			for item in &browses {
				let browse = match item {
					Pending::AlbumBrowse { browse, .. } | Pending::ArtistBrowse { browse, .. } => *browse,
					Pending::Session(_) => continue,
				};
				if let Some(entry) = state.objects.get_mut(&browse) {
					entry.loaded = true;
				}
			}
			browses
		};

		let completed = browses.len();
		for item in browses {
			// SAFETY: callback and userdata are the ones the browse was created with.
			unsafe {
				match item {
					Pending::AlbumBrowse {
						browse,
						callback,
						userdata,
					} => callback(browse as *mut _, userdata as *mut _),
					Pending::ArtistBrowse {
						browse,
						callback,
						userdata,
					} => callback(browse as *mut _, userdata as *mut _),
					Pending::Session(_) => {}
				}
			}
		}
		completed
	}

	pub fn pending(&self) -> usize {
		self.state.lock().pending.len()
	}

	/// Queues a callback for the next `process_events`.
	pub fn queue(&self, callback: FakeCallback) {
		self.state.lock().pending.push_back(Pending::Session(callback));
	}

	/// Invokes a callback right away on the calling thread, the way the SDK
	/// calls from its own internal thread.
	pub fn fire(&self, callback: FakeCallback) {
		let Some((live, session)) = self.live() else {
			return;
		};
		// SAFETY: the session is live and owns this callback table.
		unsafe { invoke(&live.callbacks, session, &callback) };
	}

	/// Delivers interleaved samples through `music_delivery` and returns the
	/// frame count the engine reported as consumed.
	pub fn deliver_music(&self, format: sys::sp_audioformat, samples: &[i16]) -> c_int {
		let Some((live, session)) = self.live() else {
			return 0;
		};
		let Some(slot) = live.callbacks.music_delivery else {
			return 0;
		};
		let channels = usize::try_from(format.channels).unwrap_or(0).max(1);
		let frames = c_int::try_from(samples.len() / channels).unwrap_or(c_int::MAX);
		// SAFETY: `samples` holds `frames * channels` samples for the call.
		unsafe { slot(session, &format, samples.as_ptr().cast(), frames) }
	}

	/// Asks the engine for its buffer stats through `get_audio_buffer_stats`.
	pub fn audio_buffer_stats(&self) -> sys::sp_audio_buffer_stats {
		let mut stats = sys::sp_audio_buffer_stats {
			samples: -1,
			stutter: -1,
		};
		if let Some((live, session)) = self.live() {
			if let Some(slot) = live.callbacks.get_audio_buffer_stats {
				// SAFETY: `stats` is writable for the duration of the call.
				unsafe { slot(session, &mut stats) };
			}
		}
		stats
	}

	fn live(&self) -> Option<(LiveSession, *mut sys::sp_session)> {
		let live = self.state.lock().session?;
		Some((live, live.address as *mut sys::sp_session))
	}

	pub fn track(&self, name: &str) -> FakeBuilder<'_, sys::sp_track> {
		self.builder(FakeObject::Track {
			name: name.to_owned(),
			duration_ms: 0,
			album: None,
			artists: Vec::new(),
			error: sys::SP_ERROR_OK,
			playable: true,
		})
	}

	pub fn album(&self, name: &str) -> FakeBuilder<'_, sys::sp_album> {
		self.builder(FakeObject::Album {
			name: name.to_owned(),
			year: 0,
			artist: None,
		})
	}

	pub fn artist(&self, name: &str) -> FakeBuilder<'_, sys::sp_artist> {
		self.builder(FakeObject::Artist { name: name.to_owned() })
	}

	pub fn playlist(&self, name: &str) -> FakeBuilder<'_, sys::sp_playlist> {
		self.builder(FakeObject::Playlist {
			name: name.to_owned(),
			tracks: Vec::new(),
		})
	}

	pub fn user(&self, canonical: &str) -> FakeBuilder<'_, sys::sp_user> {
		self.builder(FakeObject::User {
			canonical: canonical.to_owned(),
			display: canonical.to_owned(),
		})
	}

	fn builder<T: NativeObject>(&self, object: FakeObject) -> FakeBuilder<'_, T> {
		FakeBuilder {
			controller: self,
			object,
			loaded: true,
			link: None,
			_kind: PhantomData,
		}
	}
}

/// Configures one fake object; [`build`](FakeBuilder::build) returns its
/// pointer holding a single reference.
pub struct FakeBuilder<'a, T> {
	controller: &'a FakeController,
	object: FakeObject,
	loaded: bool,
	link: Option<String>,
	_kind: PhantomData<*mut T>,
}

impl<T: NativeObject> FakeBuilder<'_, T> {
	pub fn loaded(mut self, loaded: bool) -> Self {
		self.loaded = loaded;
		self
	}

	/// Link string the object answers to.
	pub fn link(mut self, link: &str) -> Self {
		self.link = Some(link.to_owned());
		self
	}

	pub fn build(self) -> *mut T {
		let address = self.controller.state.lock().alloc(self.object, self.loaded, self.link);
		address as *mut T
	}
}

impl FakeBuilder<'_, sys::sp_track> {
	pub fn duration(mut self, duration: Duration) -> Self {
		if let FakeObject::Track { duration_ms, .. } = &mut self.object {
			*duration_ms = c_int::try_from(duration.as_millis()).unwrap_or(c_int::MAX);
		}
		self
	}

	pub fn album(mut self, album: *mut sys::sp_album) -> Self {
		if let FakeObject::Track { album: slot, .. } = &mut self.object {
			*slot = Some(album as usize);
		}
		self
	}

	pub fn artist(mut self, artist: *mut sys::sp_artist) -> Self {
		if let FakeObject::Track { artists, .. } = &mut self.object {
			artists.push(artist as usize);
		}
		self
	}

	pub fn error(mut self, code: sys::sp_error) -> Self {
		if let FakeObject::Track { error, .. } = &mut self.object {
			*error = code;
		}
		self
	}

	pub fn unplayable(mut self) -> Self {
		if let FakeObject::Track { playable, .. } = &mut self.object {
			*playable = false;
		}
		self
	}
}

impl FakeBuilder<'_, sys::sp_album> {
	pub fn year(mut self, value: c_int) -> Self {
		if let FakeObject::Album { year, .. } = &mut self.object {
			*year = value;
		}
		self
	}

	pub fn artist(mut self, artist: *mut sys::sp_artist) -> Self {
		if let FakeObject::Album { artist: slot, .. } = &mut self.object {
			*slot = Some(artist as usize);
		}
		self
	}
}

impl FakeBuilder<'_, sys::sp_playlist> {
	pub fn track(mut self, track: *mut sys::sp_track) -> Self {
		if let FakeObject::Playlist { tracks, .. } = &mut self.object {
			tracks.push(track as usize);
		}
		self
	}
}

impl FakeBuilder<'_, sys::sp_user> {
	pub fn display_name(mut self, name: &str) -> Self {
		if let FakeObject::User { display, .. } = &mut self.object {
			*display = name.to_owned();
		}
		self
	}
}
