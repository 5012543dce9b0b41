//! `sp_session_config`, passed to `sp_session_create`.

use core::ffi::{c_char, c_int, c_void};

use crate::sp_session_callbacks;

/// Session configuration.
///
/// All string pointers must stay valid until `sp_session_create` returns;
/// `callbacks` must stay valid for the whole lifetime of the session.
#[repr(C)]
pub struct sp_session_config {
	pub api_version: c_int,
	pub cache_location: *const c_char,
	pub settings_location: *const c_char,
	pub application_key: *const c_void,
	pub application_key_size: usize,
	pub user_agent: *const c_char,
	pub callbacks: *const sp_session_callbacks,
	pub userdata: *mut c_void,
	pub compress_playlists: bool,
	pub dont_save_metadata_for_playlists: bool,
	pub initially_unload_playlists: bool,
	pub device_id: *const c_char,
	pub proxy: *const c_char,
	pub proxy_username: *const c_char,
	pub proxy_password: *const c_char,
	pub ca_certs_filename: *const c_char,
	pub tracefile: *const c_char,
}

impl Default for sp_session_config {
	fn default() -> Self {
		Self {
			api_version: crate::SPOTIFY_API_VERSION,
			cache_location: core::ptr::null(),
			settings_location: core::ptr::null(),
			application_key: core::ptr::null(),
			application_key_size: 0,
			user_agent: core::ptr::null(),
			callbacks: core::ptr::null(),
			userdata: core::ptr::null_mut(),
			compress_playlists: false,
			dont_save_metadata_for_playlists: false,
			initially_unload_playlists: false,
			device_id: core::ptr::null(),
			proxy: core::ptr::null(),
			proxy_username: core::ptr::null(),
			proxy_password: core::ptr::null(),
			ca_certs_filename: core::ptr::null(),
			tracefile: core::ptr::null(),
		}
	}
}
