//! The native SDK function table.
//!
//! [`NativeApi`] is the only seam between the engine and the native library.
//! The engine never calls a linked symbol directly; it holds an
//! `Arc<dyn NativeApi>` and goes through it for every operation, so the same
//! engine runs against libspotify ([`LibSpotify`], feature `libspotify`) or
//! against the in-memory SDK in [`crate::testing`].
//!
//! # Safety contract
//!
//! Pointer-taking methods are `unsafe`: callers must pass pointers that were
//! produced by the same implementation and are still alive (the session has
//! not been released, the object still holds at least one reference). The
//! wrappers in this crate uphold this by only calling through live
//! [`Handle`](crate::handle::Handle)s.

#[cfg(feature = "libspotify")]
mod libspotify;

use std::ffi::{CStr, c_int, c_void};

use hallon_sys as sys;

#[cfg(feature = "libspotify")]
pub use libspotify::LibSpotify;

/// Reference-counted native object types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
	Track,
	Album,
	Artist,
	Playlist,
	PlaylistContainer,
	User,
	Link,
	AlbumBrowse,
	ArtistBrowse,
}

/// Fixed function table of the native media SDK.
///
/// Getter methods return owned Rust values: the table is responsible for
/// copying native strings out before the SDK reuses its buffers. A null or
/// missing native string is returned as an empty `String`.
pub trait NativeApi: Send + Sync + 'static {
	/// Recovers the `userdata` pointer that was passed in the session config.
	///
	/// This is an associated function because the callback trampolines only
	/// receive the bare session pointer.
	///
	/// # Safety
	///
	/// `session` must be a live session created by this implementation.
	unsafe fn session_userdata(session: *mut sys::sp_session) -> *mut c_void
	where
		Self: Sized;

	/// Human-readable explanation of a status code.
	fn error_message(&self, code: sys::sp_error) -> String;

	// Session lifecycle

	unsafe fn session_create(&self, config: &sys::sp_session_config, session: &mut *mut sys::sp_session) -> sys::sp_error;
	unsafe fn session_release(&self, session: *mut sys::sp_session) -> sys::sp_error;
	unsafe fn session_process_events(&self, session: *mut sys::sp_session, next_timeout: &mut c_int) -> sys::sp_error;
	unsafe fn session_connectionstate(&self, session: *mut sys::sp_session) -> sys::sp_connectionstate;

	// Authentication

	/// Exactly one of `password` and `blob` is `Some`.
	unsafe fn session_login(
		&self,
		session: *mut sys::sp_session,
		username: &CStr,
		password: Option<&CStr>,
		remember_me: bool,
		blob: Option<&CStr>,
	) -> sys::sp_error;
	unsafe fn session_relogin(&self, session: *mut sys::sp_session) -> sys::sp_error;
	unsafe fn session_remembered_user(&self, session: *mut sys::sp_session) -> Option<String>;
	unsafe fn session_user_name(&self, session: *mut sys::sp_session) -> String;
	unsafe fn session_forget_me(&self, session: *mut sys::sp_session) -> sys::sp_error;
	unsafe fn session_logout(&self, session: *mut sys::sp_session) -> sys::sp_error;
	unsafe fn session_user(&self, session: *mut sys::sp_session) -> *mut sys::sp_user;
	unsafe fn session_user_country(&self, session: *mut sys::sp_session) -> c_int;

	// Player

	unsafe fn session_player_load(&self, session: *mut sys::sp_session, track: *mut sys::sp_track) -> sys::sp_error;
	unsafe fn session_player_seek(&self, session: *mut sys::sp_session, offset_ms: c_int) -> sys::sp_error;
	unsafe fn session_player_play(&self, session: *mut sys::sp_session, play: bool) -> sys::sp_error;
	unsafe fn session_player_unload(&self, session: *mut sys::sp_session) -> sys::sp_error;

	// Playlists owned by the session

	unsafe fn session_playlistcontainer(&self, session: *mut sys::sp_session) -> *mut sys::sp_playlistcontainer;
	unsafe fn session_inbox_create(&self, session: *mut sys::sp_session) -> *mut sys::sp_playlist;
	unsafe fn session_starred_create(&self, session: *mut sys::sp_session) -> *mut sys::sp_playlist;
	unsafe fn session_starred_for_user_create(&self, session: *mut sys::sp_session, canonical_username: &CStr) -> *mut sys::sp_playlist;

	// Settings

	unsafe fn session_set_cache_size(&self, session: *mut sys::sp_session, megabytes: usize) -> sys::sp_error;
	unsafe fn session_set_volume_normalization(&self, session: *mut sys::sp_session, on: bool) -> sys::sp_error;
	unsafe fn session_get_volume_normalization(&self, session: *mut sys::sp_session) -> bool;
	unsafe fn session_set_private_session(&self, session: *mut sys::sp_session, enabled: bool) -> sys::sp_error;
	unsafe fn session_is_private_session(&self, session: *mut sys::sp_session) -> bool;
	unsafe fn session_preferred_bitrate(&self, session: *mut sys::sp_session, bitrate: sys::sp_bitrate) -> sys::sp_error;
	unsafe fn session_preferred_offline_bitrate(
		&self,
		session: *mut sys::sp_session,
		bitrate: sys::sp_bitrate,
		allow_resync: bool,
	) -> sys::sp_error;
	unsafe fn session_set_connection_type(&self, session: *mut sys::sp_session, kind: sys::sp_connection_type) -> sys::sp_error;
	unsafe fn session_set_connection_rules(&self, session: *mut sys::sp_session, rules: sys::sp_connection_rules) -> sys::sp_error;

	// Offline synchronisation

	unsafe fn offline_tracks_to_sync(&self, session: *mut sys::sp_session) -> c_int;
	unsafe fn offline_num_playlists(&self, session: *mut sys::sp_session) -> c_int;
	unsafe fn offline_sync_get_status(&self, session: *mut sys::sp_session, status: &mut sys::sp_offline_sync_status) -> bool;
	unsafe fn offline_time_left(&self, session: *mut sys::sp_session) -> c_int;

	// Reference counting, keyed by object kind

	unsafe fn add_ref(&self, kind: ObjectKind, object: *mut c_void) -> sys::sp_error;
	unsafe fn release(&self, kind: ObjectKind, object: *mut c_void) -> sys::sp_error;

	// Track

	unsafe fn track_is_loaded(&self, track: *mut sys::sp_track) -> bool;
	unsafe fn track_error(&self, track: *mut sys::sp_track) -> sys::sp_error;
	unsafe fn track_name(&self, track: *mut sys::sp_track) -> String;
	unsafe fn track_duration(&self, track: *mut sys::sp_track) -> c_int;
	unsafe fn track_album(&self, track: *mut sys::sp_track) -> *mut sys::sp_album;
	unsafe fn track_num_artists(&self, track: *mut sys::sp_track) -> c_int;
	unsafe fn track_artist(&self, track: *mut sys::sp_track, index: c_int) -> *mut sys::sp_artist;

	// Album

	unsafe fn album_is_loaded(&self, album: *mut sys::sp_album) -> bool;
	unsafe fn album_name(&self, album: *mut sys::sp_album) -> String;
	unsafe fn album_year(&self, album: *mut sys::sp_album) -> c_int;
	unsafe fn album_artist(&self, album: *mut sys::sp_album) -> *mut sys::sp_artist;

	// Artist

	unsafe fn artist_is_loaded(&self, artist: *mut sys::sp_artist) -> bool;
	unsafe fn artist_name(&self, artist: *mut sys::sp_artist) -> String;

	// Playlist

	unsafe fn playlist_is_loaded(&self, playlist: *mut sys::sp_playlist) -> bool;
	unsafe fn playlist_name(&self, playlist: *mut sys::sp_playlist) -> String;
	unsafe fn playlist_num_tracks(&self, playlist: *mut sys::sp_playlist) -> c_int;
	unsafe fn playlist_track(&self, playlist: *mut sys::sp_playlist, index: c_int) -> *mut sys::sp_track;

	// Playlist container

	unsafe fn playlistcontainer_is_loaded(&self, container: *mut sys::sp_playlistcontainer) -> bool;
	unsafe fn playlistcontainer_num_playlists(&self, container: *mut sys::sp_playlistcontainer) -> c_int;
	unsafe fn playlistcontainer_playlist(&self, container: *mut sys::sp_playlistcontainer, index: c_int) -> *mut sys::sp_playlist;

	// User

	unsafe fn user_is_loaded(&self, user: *mut sys::sp_user) -> bool;
	unsafe fn user_canonical_name(&self, user: *mut sys::sp_user) -> String;
	unsafe fn user_display_name(&self, user: *mut sys::sp_user) -> String;

	// Album browse

	unsafe fn albumbrowse_create(
		&self,
		session: *mut sys::sp_session,
		album: *mut sys::sp_album,
		callback: sys::albumbrowse_complete_cb,
		userdata: *mut c_void,
	) -> *mut sys::sp_albumbrowse;
	unsafe fn albumbrowse_is_loaded(&self, browse: *mut sys::sp_albumbrowse) -> bool;
	unsafe fn albumbrowse_error(&self, browse: *mut sys::sp_albumbrowse) -> sys::sp_error;
	unsafe fn albumbrowse_num_tracks(&self, browse: *mut sys::sp_albumbrowse) -> c_int;
	unsafe fn albumbrowse_track(&self, browse: *mut sys::sp_albumbrowse, index: c_int) -> *mut sys::sp_track;

	// Artist browse

	unsafe fn artistbrowse_create(
		&self,
		session: *mut sys::sp_session,
		artist: *mut sys::sp_artist,
		kind: sys::sp_artistbrowse_type,
		callback: sys::artistbrowse_complete_cb,
		userdata: *mut c_void,
	) -> *mut sys::sp_artistbrowse;
	unsafe fn artistbrowse_is_loaded(&self, browse: *mut sys::sp_artistbrowse) -> bool;
	unsafe fn artistbrowse_error(&self, browse: *mut sys::sp_artistbrowse) -> sys::sp_error;
	unsafe fn artistbrowse_num_albums(&self, browse: *mut sys::sp_artistbrowse) -> c_int;
	unsafe fn artistbrowse_album(&self, browse: *mut sys::sp_artistbrowse, index: c_int) -> *mut sys::sp_album;

	// Links

	/// Parses a link string; null when the string is not a valid link.
	unsafe fn link_create_from_string(&self, link: &CStr) -> *mut sys::sp_link;
	/// Creates a link for `object` of the given kind; null when unsupported.
	unsafe fn link_create_from(&self, kind: ObjectKind, object: *mut c_void) -> *mut sys::sp_link;
	unsafe fn link_as_string(&self, link: *mut sys::sp_link) -> String;
	unsafe fn link_type(&self, link: *mut sys::sp_link) -> sys::sp_linktype;
	/// Borrowed object the link points at; null on a kind mismatch.
	unsafe fn link_as(&self, link: *mut sys::sp_link, kind: ObjectKind) -> *mut c_void;
}
