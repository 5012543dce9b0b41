//! [`NativeApi`] backed by the linked libspotify symbols.

use std::ffi::{CStr, c_char, c_int, c_void};
use std::ptr;

use hallon_sys::{self as sys, ffi};

use super::{NativeApi, ObjectKind};

/// The system libspotify.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibSpotify;

fn opt_ptr(value: Option<&CStr>) -> *const c_char {
	value.map_or(ptr::null(), CStr::as_ptr)
}

unsafe fn owned(text: *const c_char) -> String {
	if text.is_null() {
		return String::new();
	}
	unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
}

impl NativeApi for LibSpotify {
	unsafe fn session_userdata(session: *mut sys::sp_session) -> *mut c_void {
		unsafe { ffi::sp_session_userdata(session) }
	}

	fn error_message(&self, code: sys::sp_error) -> String {
		// SAFETY: sp_error_message returns a static string for any code.
		unsafe { owned(ffi::sp_error_message(code)) }
	}

	unsafe fn session_create(&self, config: &sys::sp_session_config, session: &mut *mut sys::sp_session) -> sys::sp_error {
		unsafe { ffi::sp_session_create(config, session) }
	}

	unsafe fn session_release(&self, session: *mut sys::sp_session) -> sys::sp_error {
		unsafe { ffi::sp_session_release(session) }
	}

	unsafe fn session_process_events(&self, session: *mut sys::sp_session, next_timeout: &mut c_int) -> sys::sp_error {
		unsafe { ffi::sp_session_process_events(session, next_timeout) }
	}

	unsafe fn session_connectionstate(&self, session: *mut sys::sp_session) -> sys::sp_connectionstate {
		unsafe { ffi::sp_session_connectionstate(session) }
	}

	unsafe fn session_login(
		&self,
		session: *mut sys::sp_session,
		username: &CStr,
		password: Option<&CStr>,
		remember_me: bool,
		blob: Option<&CStr>,
	) -> sys::sp_error {
		unsafe { ffi::sp_session_login(session, username.as_ptr(), opt_ptr(password), remember_me, opt_ptr(blob)) }
	}

	unsafe fn session_relogin(&self, session: *mut sys::sp_session) -> sys::sp_error {
		unsafe { ffi::sp_session_relogin(session) }
	}

	unsafe fn session_remembered_user(&self, session: *mut sys::sp_session) -> Option<String> {
		// First call reports the length, second fills the buffer.
		let len = unsafe { ffi::sp_session_remembered_user(session, ptr::null_mut(), 0) };
		if len < 0 {
			return None;
		}
		let mut buffer = vec![0u8; len as usize + 1];
		unsafe { ffi::sp_session_remembered_user(session, buffer.as_mut_ptr().cast(), buffer.len()) };
		buffer.truncate(len as usize);
		Some(String::from_utf8_lossy(&buffer).into_owned())
	}

	unsafe fn session_user_name(&self, session: *mut sys::sp_session) -> String {
		unsafe { owned(ffi::sp_session_user_name(session)) }
	}

	unsafe fn session_forget_me(&self, session: *mut sys::sp_session) -> sys::sp_error {
		unsafe { ffi::sp_session_forget_me(session) }
	}

	unsafe fn session_logout(&self, session: *mut sys::sp_session) -> sys::sp_error {
		unsafe { ffi::sp_session_logout(session) }
	}

	unsafe fn session_user(&self, session: *mut sys::sp_session) -> *mut sys::sp_user {
		unsafe { ffi::sp_session_user(session) }
	}

	unsafe fn session_user_country(&self, session: *mut sys::sp_session) -> c_int {
		unsafe { ffi::sp_session_user_country(session) }
	}

	unsafe fn session_player_load(&self, session: *mut sys::sp_session, track: *mut sys::sp_track) -> sys::sp_error {
		unsafe { ffi::sp_session_player_load(session, track) }
	}

	unsafe fn session_player_seek(&self, session: *mut sys::sp_session, offset_ms: c_int) -> sys::sp_error {
		unsafe { ffi::sp_session_player_seek(session, offset_ms) }
	}

	unsafe fn session_player_play(&self, session: *mut sys::sp_session, play: bool) -> sys::sp_error {
		unsafe { ffi::sp_session_player_play(session, play) }
	}

	unsafe fn session_player_unload(&self, session: *mut sys::sp_session) -> sys::sp_error {
		unsafe { ffi::sp_session_player_unload(session) }
	}

	unsafe fn session_playlistcontainer(&self, session: *mut sys::sp_session) -> *mut sys::sp_playlistcontainer {
		unsafe { ffi::sp_session_playlistcontainer(session) }
	}

	unsafe fn session_inbox_create(&self, session: *mut sys::sp_session) -> *mut sys::sp_playlist {
		unsafe { ffi::sp_session_inbox_create(session) }
	}

	unsafe fn session_starred_create(&self, session: *mut sys::sp_session) -> *mut sys::sp_playlist {
		unsafe { ffi::sp_session_starred_create(session) }
	}

	unsafe fn session_starred_for_user_create(&self, session: *mut sys::sp_session, canonical_username: &CStr) -> *mut sys::sp_playlist {
		unsafe { ffi::sp_session_starred_for_user_create(session, canonical_username.as_ptr()) }
	}

	unsafe fn session_set_cache_size(&self, session: *mut sys::sp_session, megabytes: usize) -> sys::sp_error {
		unsafe { ffi::sp_session_set_cache_size(session, megabytes) }
	}

	unsafe fn session_set_volume_normalization(&self, session: *mut sys::sp_session, on: bool) -> sys::sp_error {
		unsafe { ffi::sp_session_set_volume_normalization(session, on) }
	}

	unsafe fn session_get_volume_normalization(&self, session: *mut sys::sp_session) -> bool {
		unsafe { ffi::sp_session_get_volume_normalization(session) }
	}

	unsafe fn session_set_private_session(&self, session: *mut sys::sp_session, enabled: bool) -> sys::sp_error {
		unsafe { ffi::sp_session_set_private_session(session, enabled) }
	}

	unsafe fn session_is_private_session(&self, session: *mut sys::sp_session) -> bool {
		unsafe { ffi::sp_session_is_private_session(session) }
	}

	unsafe fn session_preferred_bitrate(&self, session: *mut sys::sp_session, bitrate: sys::sp_bitrate) -> sys::sp_error {
		unsafe { ffi::sp_session_preferred_bitrate(session, bitrate) }
	}

	unsafe fn session_preferred_offline_bitrate(
		&self,
		session: *mut sys::sp_session,
		bitrate: sys::sp_bitrate,
		allow_resync: bool,
	) -> sys::sp_error {
		unsafe { ffi::sp_session_preferred_offline_bitrate(session, bitrate, allow_resync) }
	}

	unsafe fn session_set_connection_type(&self, session: *mut sys::sp_session, kind: sys::sp_connection_type) -> sys::sp_error {
		unsafe { ffi::sp_session_set_connection_type(session, kind) }
	}

	unsafe fn session_set_connection_rules(&self, session: *mut sys::sp_session, rules: sys::sp_connection_rules) -> sys::sp_error {
		unsafe { ffi::sp_session_set_connection_rules(session, rules) }
	}

	unsafe fn offline_tracks_to_sync(&self, session: *mut sys::sp_session) -> c_int {
		unsafe { ffi::sp_offline_tracks_to_sync(session) }
	}

	unsafe fn offline_num_playlists(&self, session: *mut sys::sp_session) -> c_int {
		unsafe { ffi::sp_offline_num_playlists(session) }
	}

	unsafe fn offline_sync_get_status(&self, session: *mut sys::sp_session, status: &mut sys::sp_offline_sync_status) -> bool {
		unsafe { ffi::sp_offline_sync_get_status(session, status) }
	}

	unsafe fn offline_time_left(&self, session: *mut sys::sp_session) -> c_int {
		unsafe { ffi::sp_offline_time_left(session) }
	}

	unsafe fn add_ref(&self, kind: ObjectKind, object: *mut c_void) -> sys::sp_error {
		unsafe {
			match kind {
				ObjectKind::Track => ffi::sp_track_add_ref(object.cast()),
				ObjectKind::Album => ffi::sp_album_add_ref(object.cast()),
				ObjectKind::Artist => ffi::sp_artist_add_ref(object.cast()),
				ObjectKind::Playlist => ffi::sp_playlist_add_ref(object.cast()),
				ObjectKind::PlaylistContainer => ffi::sp_playlistcontainer_add_ref(object.cast()),
				ObjectKind::User => ffi::sp_user_add_ref(object.cast()),
				ObjectKind::Link => ffi::sp_link_add_ref(object.cast()),
				ObjectKind::AlbumBrowse => ffi::sp_albumbrowse_add_ref(object.cast()),
				ObjectKind::ArtistBrowse => ffi::sp_artistbrowse_add_ref(object.cast()),
			}
		}
	}

	unsafe fn release(&self, kind: ObjectKind, object: *mut c_void) -> sys::sp_error {
		unsafe {
			match kind {
				ObjectKind::Track => ffi::sp_track_release(object.cast()),
				ObjectKind::Album => ffi::sp_album_release(object.cast()),
				ObjectKind::Artist => ffi::sp_artist_release(object.cast()),
				ObjectKind::Playlist => ffi::sp_playlist_release(object.cast()),
				ObjectKind::PlaylistContainer => ffi::sp_playlistcontainer_release(object.cast()),
				ObjectKind::User => ffi::sp_user_release(object.cast()),
				ObjectKind::Link => ffi::sp_link_release(object.cast()),
				ObjectKind::AlbumBrowse => ffi::sp_albumbrowse_release(object.cast()),
				ObjectKind::ArtistBrowse => ffi::sp_artistbrowse_release(object.cast()),
			}
		}
	}

	unsafe fn track_is_loaded(&self, track: *mut sys::sp_track) -> bool {
		unsafe { ffi::sp_track_is_loaded(track) }
	}

	unsafe fn track_error(&self, track: *mut sys::sp_track) -> sys::sp_error {
		unsafe { ffi::sp_track_error(track) }
	}

	unsafe fn track_name(&self, track: *mut sys::sp_track) -> String {
		unsafe { owned(ffi::sp_track_name(track)) }
	}

	unsafe fn track_duration(&self, track: *mut sys::sp_track) -> c_int {
		unsafe { ffi::sp_track_duration(track) }
	}

	unsafe fn track_album(&self, track: *mut sys::sp_track) -> *mut sys::sp_album {
		unsafe { ffi::sp_track_album(track) }
	}

	unsafe fn track_num_artists(&self, track: *mut sys::sp_track) -> c_int {
		unsafe { ffi::sp_track_num_artists(track) }
	}

	unsafe fn track_artist(&self, track: *mut sys::sp_track, index: c_int) -> *mut sys::sp_artist {
		unsafe { ffi::sp_track_artist(track, index) }
	}

	unsafe fn album_is_loaded(&self, album: *mut sys::sp_album) -> bool {
		unsafe { ffi::sp_album_is_loaded(album) }
	}

	unsafe fn album_name(&self, album: *mut sys::sp_album) -> String {
		unsafe { owned(ffi::sp_album_name(album)) }
	}

	unsafe fn album_year(&self, album: *mut sys::sp_album) -> c_int {
		unsafe { ffi::sp_album_year(album) }
	}

	unsafe fn album_artist(&self, album: *mut sys::sp_album) -> *mut sys::sp_artist {
		unsafe { ffi::sp_album_artist(album) }
	}

	unsafe fn artist_is_loaded(&self, artist: *mut sys::sp_artist) -> bool {
		unsafe { ffi::sp_artist_is_loaded(artist) }
	}

	unsafe fn artist_name(&self, artist: *mut sys::sp_artist) -> String {
		unsafe { owned(ffi::sp_artist_name(artist)) }
	}

	unsafe fn playlist_is_loaded(&self, playlist: *mut sys::sp_playlist) -> bool {
		unsafe { ffi::sp_playlist_is_loaded(playlist) }
	}

	unsafe fn playlist_name(&self, playlist: *mut sys::sp_playlist) -> String {
		unsafe { owned(ffi::sp_playlist_name(playlist)) }
	}

	unsafe fn playlist_num_tracks(&self, playlist: *mut sys::sp_playlist) -> c_int {
		unsafe { ffi::sp_playlist_num_tracks(playlist) }
	}

	unsafe fn playlist_track(&self, playlist: *mut sys::sp_playlist, index: c_int) -> *mut sys::sp_track {
		unsafe { ffi::sp_playlist_track(playlist, index) }
	}

	unsafe fn playlistcontainer_is_loaded(&self, container: *mut sys::sp_playlistcontainer) -> bool {
		unsafe { ffi::sp_playlistcontainer_is_loaded(container) }
	}

	unsafe fn playlistcontainer_num_playlists(&self, container: *mut sys::sp_playlistcontainer) -> c_int {
		unsafe { ffi::sp_playlistcontainer_num_playlists(container) }
	}

	unsafe fn playlistcontainer_playlist(&self, container: *mut sys::sp_playlistcontainer, index: c_int) -> *mut sys::sp_playlist {
		unsafe { ffi::sp_playlistcontainer_playlist(container, index) }
	}

	unsafe fn user_is_loaded(&self, user: *mut sys::sp_user) -> bool {
		unsafe { ffi::sp_user_is_loaded(user) }
	}

	unsafe fn user_canonical_name(&self, user: *mut sys::sp_user) -> String {
		unsafe { owned(ffi::sp_user_canonical_name(user)) }
	}

	unsafe fn user_display_name(&self, user: *mut sys::sp_user) -> String {
		unsafe { owned(ffi::sp_user_display_name(user)) }
	}

	unsafe fn albumbrowse_create(
		&self,
		session: *mut sys::sp_session,
		album: *mut sys::sp_album,
		callback: sys::albumbrowse_complete_cb,
		userdata: *mut c_void,
	) -> *mut sys::sp_albumbrowse {
		unsafe { ffi::sp_albumbrowse_create(session, album, Some(callback), userdata) }
	}

	unsafe fn albumbrowse_is_loaded(&self, browse: *mut sys::sp_albumbrowse) -> bool {
		unsafe { ffi::sp_albumbrowse_is_loaded(browse) }
	}

	unsafe fn albumbrowse_error(&self, browse: *mut sys::sp_albumbrowse) -> sys::sp_error {
		unsafe { ffi::sp_albumbrowse_error(browse) }
	}

	unsafe fn albumbrowse_num_tracks(&self, browse: *mut sys::sp_albumbrowse) -> c_int {
		unsafe { ffi::sp_albumbrowse_num_tracks(browse) }
	}

	unsafe fn albumbrowse_track(&self, browse: *mut sys::sp_albumbrowse, index: c_int) -> *mut sys::sp_track {
		unsafe { ffi::sp_albumbrowse_track(browse, index) }
	}

	unsafe fn artistbrowse_create(
		&self,
		session: *mut sys::sp_session,
		artist: *mut sys::sp_artist,
		kind: sys::sp_artistbrowse_type,
		callback: sys::artistbrowse_complete_cb,
		userdata: *mut c_void,
	) -> *mut sys::sp_artistbrowse {
		unsafe { ffi::sp_artistbrowse_create(session, artist, kind, Some(callback), userdata) }
	}

	unsafe fn artistbrowse_is_loaded(&self, browse: *mut sys::sp_artistbrowse) -> bool {
		unsafe { ffi::sp_artistbrowse_is_loaded(browse) }
	}

	unsafe fn artistbrowse_error(&self, browse: *mut sys::sp_artistbrowse) -> sys::sp_error {
		unsafe { ffi::sp_artistbrowse_error(browse) }
	}

	unsafe fn artistbrowse_num_albums(&self, browse: *mut sys::sp_artistbrowse) -> c_int {
		unsafe { ffi::sp_artistbrowse_num_albums(browse) }
	}

	unsafe fn artistbrowse_album(&self, browse: *mut sys::sp_artistbrowse, index: c_int) -> *mut sys::sp_album {
		unsafe { ffi::sp_artistbrowse_album(browse, index) }
	}

	unsafe fn link_create_from_string(&self, link: &CStr) -> *mut sys::sp_link {
		unsafe { ffi::sp_link_create_from_string(link.as_ptr()) }
	}

	unsafe fn link_create_from(&self, kind: ObjectKind, object: *mut c_void) -> *mut sys::sp_link {
		unsafe {
			match kind {
				ObjectKind::Track => ffi::sp_link_create_from_track(object.cast(), 0),
				ObjectKind::Album => ffi::sp_link_create_from_album(object.cast()),
				ObjectKind::Artist => ffi::sp_link_create_from_artist(object.cast()),
				ObjectKind::Playlist => ffi::sp_link_create_from_playlist(object.cast()),
				ObjectKind::User => ffi::sp_link_create_from_user(object.cast()),
				_ => ptr::null_mut(),
			}
		}
	}

	unsafe fn link_as_string(&self, link: *mut sys::sp_link) -> String {
		let len = unsafe { ffi::sp_link_as_string(link, ptr::null_mut(), 0) };
		if len <= 0 {
			return String::new();
		}
		let mut buffer = vec![0u8; len as usize + 1];
		unsafe { ffi::sp_link_as_string(link, buffer.as_mut_ptr().cast(), buffer.len() as c_int) };
		buffer.truncate(len as usize);
		String::from_utf8_lossy(&buffer).into_owned()
	}

	unsafe fn link_type(&self, link: *mut sys::sp_link) -> sys::sp_linktype {
		unsafe { ffi::sp_link_type(link) }
	}

	unsafe fn link_as(&self, link: *mut sys::sp_link, kind: ObjectKind) -> *mut c_void {
		unsafe {
			match kind {
				ObjectKind::Track => ffi::sp_link_as_track(link).cast(),
				ObjectKind::Album => ffi::sp_link_as_album(link).cast(),
				ObjectKind::Artist => ffi::sp_link_as_artist(link).cast(),
				ObjectKind::User => ffi::sp_link_as_user(link).cast(),
				_ => ptr::null_mut(),
			}
		}
	}
}
