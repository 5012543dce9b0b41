//! `sp_session_callbacks`, the native callback table.
//!
//! Field order is part of the ABI. Every slot is nullable; the native library
//! skips slots left as `None`.

use core::ffi::{c_char, c_int, c_void};

use crate::{sp_audio_buffer_stats, sp_audioformat, sp_error, sp_session};

pub type session_cb = unsafe extern "C" fn(session: *mut sp_session);
pub type session_error_cb = unsafe extern "C" fn(session: *mut sp_session, error: sp_error);
pub type session_text_cb = unsafe extern "C" fn(session: *mut sp_session, text: *const c_char);
pub type music_delivery_cb = unsafe extern "C" fn(
	session: *mut sp_session,
	format: *const sp_audioformat,
	frames: *const c_void,
	num_frames: c_int,
) -> c_int;
pub type audio_buffer_stats_cb =
	unsafe extern "C" fn(session: *mut sp_session, stats: *mut sp_audio_buffer_stats);
pub type private_session_mode_cb = unsafe extern "C" fn(session: *mut sp_session, is_private: bool);

#[repr(C)]
#[derive(Clone, Copy, Default)]
pub struct sp_session_callbacks {
	pub logged_in: Option<session_error_cb>,
	pub logged_out: Option<session_cb>,
	pub metadata_updated: Option<session_cb>,
	pub connection_error: Option<session_error_cb>,
	pub message_to_user: Option<session_text_cb>,
	pub notify_main_thread: Option<session_cb>,
	pub music_delivery: Option<music_delivery_cb>,
	pub play_token_lost: Option<session_cb>,
	pub log_message: Option<session_text_cb>,
	pub end_of_track: Option<session_cb>,
	pub streaming_error: Option<session_error_cb>,
	pub userinfo_updated: Option<session_cb>,
	pub start_playback: Option<session_cb>,
	pub stop_playback: Option<session_cb>,
	pub get_audio_buffer_stats: Option<audio_buffer_stats_cb>,
	pub offline_status_updated: Option<session_cb>,
	pub offline_error: Option<session_error_cb>,
	pub credentials_blob_updated: Option<session_text_cb>,
	pub connectionstate_updated: Option<session_cb>,
	pub scrobble_error: Option<session_error_cb>,
	pub private_session_mode_changed: Option<private_session_mode_cb>,
}
