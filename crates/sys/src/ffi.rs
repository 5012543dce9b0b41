//! Linked libspotify symbols.

use core::ffi::{c_char, c_int, c_void};

use crate::*;

#[link(name = "spotify")]
unsafe extern "C" {
	pub fn sp_error_message(error: sp_error) -> *const c_char;

	// Session
	pub fn sp_session_create(config: *const sp_session_config, session: *mut *mut sp_session) -> sp_error;
	pub fn sp_session_release(session: *mut sp_session) -> sp_error;
	pub fn sp_session_login(
		session: *mut sp_session,
		username: *const c_char,
		password: *const c_char,
		remember_me: bool,
		blob: *const c_char,
	) -> sp_error;
	pub fn sp_session_relogin(session: *mut sp_session) -> sp_error;
	pub fn sp_session_remembered_user(session: *mut sp_session, buffer: *mut c_char, buffer_size: usize) -> c_int;
	pub fn sp_session_user_name(session: *mut sp_session) -> *const c_char;
	pub fn sp_session_forget_me(session: *mut sp_session) -> sp_error;
	pub fn sp_session_user(session: *mut sp_session) -> *mut sp_user;
	pub fn sp_session_logout(session: *mut sp_session) -> sp_error;
	pub fn sp_session_connectionstate(session: *mut sp_session) -> sp_connectionstate;
	pub fn sp_session_userdata(session: *mut sp_session) -> *mut c_void;
	pub fn sp_session_set_cache_size(session: *mut sp_session, size: usize) -> sp_error;
	pub fn sp_session_process_events(session: *mut sp_session, next_timeout: *mut c_int) -> sp_error;
	pub fn sp_session_player_load(session: *mut sp_session, track: *mut sp_track) -> sp_error;
	pub fn sp_session_player_seek(session: *mut sp_session, offset: c_int) -> sp_error;
	pub fn sp_session_player_play(session: *mut sp_session, play: bool) -> sp_error;
	pub fn sp_session_player_unload(session: *mut sp_session) -> sp_error;
	pub fn sp_session_playlistcontainer(session: *mut sp_session) -> *mut sp_playlistcontainer;
	pub fn sp_session_inbox_create(session: *mut sp_session) -> *mut sp_playlist;
	pub fn sp_session_starred_create(session: *mut sp_session) -> *mut sp_playlist;
	pub fn sp_session_starred_for_user_create(session: *mut sp_session, canonical_username: *const c_char) -> *mut sp_playlist;
	pub fn sp_session_set_volume_normalization(session: *mut sp_session, on: bool) -> sp_error;
	pub fn sp_session_get_volume_normalization(session: *mut sp_session) -> bool;
	pub fn sp_session_set_private_session(session: *mut sp_session, enabled: bool) -> sp_error;
	pub fn sp_session_is_private_session(session: *mut sp_session) -> bool;
	pub fn sp_session_preferred_bitrate(session: *mut sp_session, bitrate: sp_bitrate) -> sp_error;
	pub fn sp_session_preferred_offline_bitrate(session: *mut sp_session, bitrate: sp_bitrate, allow_resync: bool) -> sp_error;
	pub fn sp_session_set_connection_type(session: *mut sp_session, kind: sp_connection_type) -> sp_error;
	pub fn sp_session_set_connection_rules(session: *mut sp_session, rules: sp_connection_rules) -> sp_error;
	pub fn sp_session_user_country(session: *mut sp_session) -> c_int;

	// Offline
	pub fn sp_offline_tracks_to_sync(session: *mut sp_session) -> c_int;
	pub fn sp_offline_num_playlists(session: *mut sp_session) -> c_int;
	pub fn sp_offline_sync_get_status(session: *mut sp_session, status: *mut sp_offline_sync_status) -> bool;
	pub fn sp_offline_time_left(session: *mut sp_session) -> c_int;

	// Track
	pub fn sp_track_is_loaded(track: *mut sp_track) -> bool;
	pub fn sp_track_error(track: *mut sp_track) -> sp_error;
	pub fn sp_track_name(track: *mut sp_track) -> *const c_char;
	pub fn sp_track_duration(track: *mut sp_track) -> c_int;
	pub fn sp_track_album(track: *mut sp_track) -> *mut sp_album;
	pub fn sp_track_num_artists(track: *mut sp_track) -> c_int;
	pub fn sp_track_artist(track: *mut sp_track, index: c_int) -> *mut sp_artist;
	pub fn sp_track_add_ref(track: *mut sp_track) -> sp_error;
	pub fn sp_track_release(track: *mut sp_track) -> sp_error;

	// Album
	pub fn sp_album_is_loaded(album: *mut sp_album) -> bool;
	pub fn sp_album_name(album: *mut sp_album) -> *const c_char;
	pub fn sp_album_year(album: *mut sp_album) -> c_int;
	pub fn sp_album_artist(album: *mut sp_album) -> *mut sp_artist;
	pub fn sp_album_add_ref(album: *mut sp_album) -> sp_error;
	pub fn sp_album_release(album: *mut sp_album) -> sp_error;

	// Artist
	pub fn sp_artist_is_loaded(artist: *mut sp_artist) -> bool;
	pub fn sp_artist_name(artist: *mut sp_artist) -> *const c_char;
	pub fn sp_artist_add_ref(artist: *mut sp_artist) -> sp_error;
	pub fn sp_artist_release(artist: *mut sp_artist) -> sp_error;

	// Playlist
	pub fn sp_playlist_is_loaded(playlist: *mut sp_playlist) -> bool;
	pub fn sp_playlist_name(playlist: *mut sp_playlist) -> *const c_char;
	pub fn sp_playlist_num_tracks(playlist: *mut sp_playlist) -> c_int;
	pub fn sp_playlist_track(playlist: *mut sp_playlist, index: c_int) -> *mut sp_track;
	pub fn sp_playlist_add_ref(playlist: *mut sp_playlist) -> sp_error;
	pub fn sp_playlist_release(playlist: *mut sp_playlist) -> sp_error;

	// Playlist container
	pub fn sp_playlistcontainer_is_loaded(container: *mut sp_playlistcontainer) -> bool;
	pub fn sp_playlistcontainer_num_playlists(container: *mut sp_playlistcontainer) -> c_int;
	pub fn sp_playlistcontainer_playlist(container: *mut sp_playlistcontainer, index: c_int) -> *mut sp_playlist;
	pub fn sp_playlistcontainer_add_ref(container: *mut sp_playlistcontainer) -> sp_error;
	pub fn sp_playlistcontainer_release(container: *mut sp_playlistcontainer) -> sp_error;

	// User
	pub fn sp_user_is_loaded(user: *mut sp_user) -> bool;
	pub fn sp_user_canonical_name(user: *mut sp_user) -> *const c_char;
	pub fn sp_user_display_name(user: *mut sp_user) -> *const c_char;
	pub fn sp_user_add_ref(user: *mut sp_user) -> sp_error;
	pub fn sp_user_release(user: *mut sp_user) -> sp_error;

	// Album browse
	pub fn sp_albumbrowse_create(
		session: *mut sp_session,
		album: *mut sp_album,
		callback: Option<albumbrowse_complete_cb>,
		userdata: *mut c_void,
	) -> *mut sp_albumbrowse;
	pub fn sp_albumbrowse_is_loaded(browse: *mut sp_albumbrowse) -> bool;
	pub fn sp_albumbrowse_error(browse: *mut sp_albumbrowse) -> sp_error;
	pub fn sp_albumbrowse_num_tracks(browse: *mut sp_albumbrowse) -> c_int;
	pub fn sp_albumbrowse_track(browse: *mut sp_albumbrowse, index: c_int) -> *mut sp_track;
	pub fn sp_albumbrowse_add_ref(browse: *mut sp_albumbrowse) -> sp_error;
	pub fn sp_albumbrowse_release(browse: *mut sp_albumbrowse) -> sp_error;

	// Artist browse
	pub fn sp_artistbrowse_create(
		session: *mut sp_session,
		artist: *mut sp_artist,
		kind: sp_artistbrowse_type,
		callback: Option<artistbrowse_complete_cb>,
		userdata: *mut c_void,
	) -> *mut sp_artistbrowse;
	pub fn sp_artistbrowse_is_loaded(browse: *mut sp_artistbrowse) -> bool;
	pub fn sp_artistbrowse_error(browse: *mut sp_artistbrowse) -> sp_error;
	pub fn sp_artistbrowse_num_albums(browse: *mut sp_artistbrowse) -> c_int;
	pub fn sp_artistbrowse_album(browse: *mut sp_artistbrowse, index: c_int) -> *mut sp_album;
	pub fn sp_artistbrowse_add_ref(browse: *mut sp_artistbrowse) -> sp_error;
	pub fn sp_artistbrowse_release(browse: *mut sp_artistbrowse) -> sp_error;

	// Link
	pub fn sp_link_create_from_string(link: *const c_char) -> *mut sp_link;
	pub fn sp_link_create_from_track(track: *mut sp_track, offset: c_int) -> *mut sp_link;
	pub fn sp_link_create_from_album(album: *mut sp_album) -> *mut sp_link;
	pub fn sp_link_create_from_artist(artist: *mut sp_artist) -> *mut sp_link;
	pub fn sp_link_create_from_playlist(playlist: *mut sp_playlist) -> *mut sp_link;
	pub fn sp_link_create_from_user(user: *mut sp_user) -> *mut sp_link;
	pub fn sp_link_as_string(link: *mut sp_link, buffer: *mut c_char, buffer_size: c_int) -> c_int;
	pub fn sp_link_type(link: *mut sp_link) -> sp_linktype;
	pub fn sp_link_as_track(link: *mut sp_link) -> *mut sp_track;
	pub fn sp_link_as_album(link: *mut sp_link) -> *mut sp_album;
	pub fn sp_link_as_artist(link: *mut sp_link) -> *mut sp_artist;
	pub fn sp_link_as_user(link: *mut sp_link) -> *mut sp_user;
	pub fn sp_link_add_ref(link: *mut sp_link) -> sp_error;
	pub fn sp_link_release(link: *mut sp_link) -> sp_error;
}
