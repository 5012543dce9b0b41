//! Offline synchronisation snapshot.

use core::ffi::c_int;

/// `sp_offline_sync_status`, filled in by `sp_offline_sync_get_status`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct sp_offline_sync_status {
	pub queued_tracks: c_int,
	pub queued_bytes: u64,
	pub done_tracks: c_int,
	pub done_bytes: u64,
	pub copied_tracks: c_int,
	pub copied_bytes: u64,
	pub willnotcopy_tracks: c_int,
	pub error_tracks: c_int,
	pub syncing: bool,
}
