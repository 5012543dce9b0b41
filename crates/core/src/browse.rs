//! Album and artist browse requests.
//!
//! A browse request is created loading; the SDK calls its completion
//! callback from inside `process_events` once the result is in. Each browse
//! object carries its own [`Observable`] that publishes [`BrowseEvent::Load`]
//! at that point.

use std::ffi::c_void;
use std::sync::Arc;
use std::time::Duration;

use hallon_sys as sys;

use crate::album::Album;
use crate::artist::Artist;
use crate::callbacks;
use crate::error::{Error, ErrorKind, Result, Status};
use crate::handle::{Handle, Ownership, count};
use crate::observable::{Observable, Observe, Signal};
use crate::session::Session;
use crate::track::Track;

/// Event published by a browse request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowseEvent {
	/// The request finished, successfully or not.
	Load,
}

impl Signal for BrowseEvent {
	type Name = BrowseEvent;
	type Reply = ();

	fn name(&self) -> BrowseEvent {
		*self
	}
}

/// How much of an artist to fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArtistBrowseType {
	#[default]
	Full,
	NoTracks,
	NoAlbums,
}

impl ArtistBrowseType {
	pub fn as_raw(self) -> sys::sp_artistbrowse_type {
		match self {
			Self::Full => sys::SP_ARTISTBROWSE_FULL,
			Self::NoTracks => sys::SP_ARTISTBROWSE_NO_TRACKS,
			Self::NoAlbums => sys::SP_ARTISTBROWSE_NO_ALBUMS,
		}
	}
}

/// Leaks one strong count of `events` as callback userdata.
fn userdata(events: &Arc<Observable<BrowseEvent>>) -> *mut c_void {
	Arc::into_raw(Arc::clone(events)).cast_mut().cast()
}

/// Takes back a count leaked by [`userdata`] when the SDK refused the
/// request and will never call back.
///
/// # Safety
///
/// `userdata` must come from [`userdata`] and not have been reclaimed.
unsafe fn reclaim(userdata: *mut c_void) {
	// SAFETY: upheld by the caller.
	drop(unsafe { Arc::from_raw(userdata.cast_const().cast::<Observable<BrowseEvent>>()) });
}

/// Pumps `session` until `loaded` holds or `timeout` passes, waking as soon
/// as `events` publishes [`BrowseEvent::Load`].
fn wait_loaded(
	session: &Session,
	events: &Observable<BrowseEvent>,
	timeout: Duration,
	loaded: impl Fn() -> bool,
) -> Result<bool> {
	let mut scope = events.scoped();
	session.pump_until(
		timeout,
		|waker| {
			scope.on(BrowseEvent::Load, move |_| {
				waker.wake();
				None
			});
		},
		loaded,
	)
}

/// Tracks of an album.
pub struct AlbumBrowse {
	handle: Handle<sys::sp_albumbrowse>,
	events: Arc<Observable<BrowseEvent>>,
}

impl AlbumBrowse {
	pub fn new(session: &Session, album: &Album) -> Result<Self> {
		let events = Arc::new(Observable::new());
		let userdata = userdata(&events);
		let api = session.api();
		// SAFETY: session and album are live; the callback reclaims `userdata`.
		let raw = unsafe { api.albumbrowse_create(session.as_ptr(), album.as_ptr(), callbacks::albumbrowse_complete, userdata) };
		// SAFETY: a `*_create` result carries one reference.
		match unsafe { Handle::wrap(api, raw, Ownership::Adopt) } {
			Some(handle) => {
				tracing::debug!(album = %album.name(), "album browse started");
				Ok(Self { handle, events })
			}
			None => {
				// SAFETY: the SDK refused the request and kept no callback.
				unsafe { reclaim(userdata) };
				Err(Error::state("album browse request was refused"))
			}
		}
	}

	pub fn is_loaded(&self) -> bool {
		// SAFETY: the handle keeps the browse alive.
		unsafe { self.handle.api().albumbrowse_is_loaded(self.handle.as_ptr()) }
	}

	pub fn error(&self) -> Status {
		// SAFETY: the handle keeps the browse alive.
		ErrorKind::status(unsafe { self.handle.api().albumbrowse_error(self.handle.as_ptr()) })
	}

	/// Empty until loaded.
	pub fn tracks(&self) -> Vec<Track> {
		let api = self.handle.api();
		let browse = self.handle.as_ptr();
		// SAFETY: the handle keeps the browse alive.
		let total = count(unsafe { api.albumbrowse_num_tracks(browse) });
		(0..total)
			// SAFETY: `index` is in range; tracks are borrowed from the browse.
			.filter_map(|index| unsafe { Track::from_raw(api, api.albumbrowse_track(browse, index), Ownership::Retain) })
			.collect()
	}

	/// Drives `session` until the browse has loaded. Returns `false` when
	/// `timeout` passes first.
	pub fn wait_until_loaded(&self, session: &Session, timeout: Duration) -> Result<bool> {
		wait_loaded(session, &self.events, timeout, || self.is_loaded())
	}
}

impl Observe for AlbumBrowse {
	type Event = BrowseEvent;

	fn observable(&self) -> &Observable<BrowseEvent> {
		&self.events
	}
}

/// Albums of an artist.
pub struct ArtistBrowse {
	handle: Handle<sys::sp_artistbrowse>,
	events: Arc<Observable<BrowseEvent>>,
}

impl ArtistBrowse {
	pub fn new(session: &Session, artist: &Artist, kind: ArtistBrowseType) -> Result<Self> {
		let events = Arc::new(Observable::new());
		let userdata = userdata(&events);
		let api = session.api();
		// SAFETY: session and artist are live; the callback reclaims `userdata`.
		let raw = unsafe {
			api.artistbrowse_create(
				session.as_ptr(),
				artist.as_ptr(),
				kind.as_raw(),
				callbacks::artistbrowse_complete,
				userdata,
			)
		};
		// SAFETY: a `*_create` result carries one reference.
		match unsafe { Handle::wrap(api, raw, Ownership::Adopt) } {
			Some(handle) => {
				tracing::debug!(artist = %artist.name(), ?kind, "artist browse started");
				Ok(Self { handle, events })
			}
			None => {
				// SAFETY: the SDK refused the request and kept no callback.
				unsafe { reclaim(userdata) };
				Err(Error::state("artist browse request was refused"))
			}
		}
	}

	pub fn is_loaded(&self) -> bool {
		// SAFETY: the handle keeps the browse alive.
		unsafe { self.handle.api().artistbrowse_is_loaded(self.handle.as_ptr()) }
	}

	pub fn error(&self) -> Status {
		// SAFETY: the handle keeps the browse alive.
		ErrorKind::status(unsafe { self.handle.api().artistbrowse_error(self.handle.as_ptr()) })
	}

	/// Empty until loaded.
	pub fn albums(&self) -> Vec<Album> {
		let api = self.handle.api();
		let browse = self.handle.as_ptr();
		// SAFETY: the handle keeps the browse alive.
		let total = count(unsafe { api.artistbrowse_num_albums(browse) });
		(0..total)
			// SAFETY: `index` is in range; albums are borrowed from the browse.
			.filter_map(|index| unsafe { Album::from_raw(api, api.artistbrowse_album(browse, index), Ownership::Retain) })
			.collect()
	}

	pub fn wait_until_loaded(&self, session: &Session, timeout: Duration) -> Result<bool> {
		wait_loaded(session, &self.events, timeout, || self.is_loaded())
	}
}

impl Observe for ArtistBrowse {
	type Event = BrowseEvent;

	fn observable(&self) -> &Observable<BrowseEvent> {
		&self.events
	}
}
