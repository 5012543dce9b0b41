//! `sp_error` status codes.

/// Status code returned by most native calls.
pub type sp_error = core::ffi::c_int;

pub const SP_ERROR_OK: sp_error = 0;
pub const SP_ERROR_BAD_API_VERSION: sp_error = 1;
pub const SP_ERROR_API_INITIALIZATION_FAILED: sp_error = 2;
pub const SP_ERROR_TRACK_NOT_PLAYABLE: sp_error = 3;
pub const SP_ERROR_BAD_APPLICATION_KEY: sp_error = 5;
pub const SP_ERROR_BAD_USERNAME_OR_PASSWORD: sp_error = 6;
pub const SP_ERROR_USER_BANNED: sp_error = 7;
pub const SP_ERROR_UNABLE_TO_CONTACT_SERVER: sp_error = 8;
pub const SP_ERROR_CLIENT_TOO_OLD: sp_error = 9;
pub const SP_ERROR_OTHER_PERMANENT: sp_error = 10;
pub const SP_ERROR_BAD_USER_AGENT: sp_error = 11;
pub const SP_ERROR_MISSING_CALLBACK: sp_error = 12;
pub const SP_ERROR_INVALID_INDATA: sp_error = 13;
pub const SP_ERROR_INDEX_OUT_OF_RANGE: sp_error = 14;
pub const SP_ERROR_USER_NEEDS_PREMIUM: sp_error = 15;
pub const SP_ERROR_OTHER_TRANSIENT: sp_error = 16;
pub const SP_ERROR_IS_LOADING: sp_error = 17;
pub const SP_ERROR_NO_STREAM_AVAILABLE: sp_error = 18;
pub const SP_ERROR_PERMISSION_DENIED: sp_error = 19;
pub const SP_ERROR_INBOX_IS_FULL: sp_error = 20;
pub const SP_ERROR_NO_CACHE: sp_error = 21;
pub const SP_ERROR_NO_SUCH_USER: sp_error = 22;
pub const SP_ERROR_NO_CREDENTIALS: sp_error = 23;
pub const SP_ERROR_NETWORK_DISABLED: sp_error = 24;
pub const SP_ERROR_INVALID_DEVICE_ID: sp_error = 25;
pub const SP_ERROR_CANT_OPEN_TRACE_FILE: sp_error = 26;
pub const SP_ERROR_APPLICATION_BANNED: sp_error = 27;
pub const SP_ERROR_OFFLINE_TOO_MANY_TRACKS: sp_error = 31;
pub const SP_ERROR_OFFLINE_DISK_CACHE: sp_error = 32;
pub const SP_ERROR_OFFLINE_EXPIRED: sp_error = 33;
pub const SP_ERROR_OFFLINE_NOT_ALLOWED: sp_error = 34;
pub const SP_ERROR_OFFLINE_LICENSE_LOST: sp_error = 35;
pub const SP_ERROR_OFFLINE_LICENSE_ERROR: sp_error = 36;
pub const SP_ERROR_LASTFM_AUTH_ERROR: sp_error = 39;
pub const SP_ERROR_INVALID_ARGUMENT: sp_error = 40;
pub const SP_ERROR_SYSTEM_FAILURE: sp_error = 41;
