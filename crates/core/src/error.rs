//! Error taxonomy and native status translation.
//!
//! Three categories surface to callers:
//!
//! * [`Error::Validation`]: a bad argument caught before any native call.
//! * [`Error::Native`]: the SDK returned a non-success `sp_error`.
//! * [`Error::State`]: the operation is invalid in the engine's current state.
//!
//! Every status-returning native call is routed through [`maybe_raise`].

use std::fmt;

use hallon_sys as sys;
use thiserror::Error;

use crate::native::NativeApi;

/// Result type used throughout hallon.
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome carried by error-bearing events such as `logged_in`.
pub type Status = std::result::Result<(), ErrorKind>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("invalid argument: {0}")]
	Validation(String),

	#[error(transparent)]
	Native(#[from] NativeError),

	#[error("invalid state: {0}")]
	State(String),

	/// The SDK reported an enum value outside the known set.
	#[error("unknown {kind} value {value}")]
	UnknownValue { kind: &'static str, value: i32 },

	#[error("invalid options: {0}")]
	Options(#[from] serde_json::Error),
}

impl Error {
	pub(crate) fn validation(message: impl Into<String>) -> Self {
		Self::Validation(message.into())
	}

	pub(crate) fn state(message: impl Into<String>) -> Self {
		Self::State(message.into())
	}

	pub fn is_validation(&self) -> bool {
		matches!(self, Self::Validation(_))
	}

	pub fn is_native(&self) -> bool {
		matches!(self, Self::Native(_))
	}

	pub fn is_state(&self) -> bool {
		matches!(self, Self::State(_))
	}

	/// Native error kind, if this error came from the SDK.
	pub fn native_kind(&self) -> Option<ErrorKind> {
		match self {
			Self::Native(err) => Some(err.kind),
			_ => None,
		}
	}
}

/// A failed native call: the translated kind plus the SDK's own explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeError {
	pub kind: ErrorKind,
	pub message: String,
}

impl fmt::Display for NativeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({}, code {})", self.message, self.kind, self.kind.as_raw())
	}
}

impl std::error::Error for NativeError {}

/// Every non-success `sp_error` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	BadApiVersion,
	ApiInitializationFailed,
	TrackNotPlayable,
	BadApplicationKey,
	BadUsernameOrPassword,
	UserBanned,
	UnableToContactServer,
	ClientTooOld,
	OtherPermanent,
	BadUserAgent,
	MissingCallback,
	InvalidIndata,
	IndexOutOfRange,
	UserNeedsPremium,
	OtherTransient,
	IsLoading,
	NoStreamAvailable,
	PermissionDenied,
	InboxIsFull,
	NoCache,
	NoSuchUser,
	NoCredentials,
	NetworkDisabled,
	InvalidDeviceId,
	CantOpenTraceFile,
	ApplicationBanned,
	OfflineTooManyTracks,
	OfflineDiskCache,
	OfflineExpired,
	OfflineNotAllowed,
	OfflineLicenseLost,
	OfflineLicenseError,
	LastfmAuthError,
	InvalidArgument,
	SystemFailure,
	/// A code this binding does not know about.
	Unknown(sys::sp_error),
}

const KINDS: &[(sys::sp_error, ErrorKind, &str)] = &[
	(sys::SP_ERROR_BAD_API_VERSION, ErrorKind::BadApiVersion, "bad_api_version"),
	(sys::SP_ERROR_API_INITIALIZATION_FAILED, ErrorKind::ApiInitializationFailed, "api_initialization_failed"),
	(sys::SP_ERROR_TRACK_NOT_PLAYABLE, ErrorKind::TrackNotPlayable, "track_not_playable"),
	(sys::SP_ERROR_BAD_APPLICATION_KEY, ErrorKind::BadApplicationKey, "bad_application_key"),
	(sys::SP_ERROR_BAD_USERNAME_OR_PASSWORD, ErrorKind::BadUsernameOrPassword, "bad_username_or_password"),
	(sys::SP_ERROR_USER_BANNED, ErrorKind::UserBanned, "user_banned"),
	(sys::SP_ERROR_UNABLE_TO_CONTACT_SERVER, ErrorKind::UnableToContactServer, "unable_to_contact_server"),
	(sys::SP_ERROR_CLIENT_TOO_OLD, ErrorKind::ClientTooOld, "client_too_old"),
	(sys::SP_ERROR_OTHER_PERMANENT, ErrorKind::OtherPermanent, "other_permanent"),
	(sys::SP_ERROR_BAD_USER_AGENT, ErrorKind::BadUserAgent, "bad_user_agent"),
	(sys::SP_ERROR_MISSING_CALLBACK, ErrorKind::MissingCallback, "missing_callback"),
	(sys::SP_ERROR_INVALID_INDATA, ErrorKind::InvalidIndata, "invalid_indata"),
	(sys::SP_ERROR_INDEX_OUT_OF_RANGE, ErrorKind::IndexOutOfRange, "index_out_of_range"),
	(sys::SP_ERROR_USER_NEEDS_PREMIUM, ErrorKind::UserNeedsPremium, "user_needs_premium"),
	(sys::SP_ERROR_OTHER_TRANSIENT, ErrorKind::OtherTransient, "other_transient"),
	(sys::SP_ERROR_IS_LOADING, ErrorKind::IsLoading, "is_loading"),
	(sys::SP_ERROR_NO_STREAM_AVAILABLE, ErrorKind::NoStreamAvailable, "no_stream_available"),
	(sys::SP_ERROR_PERMISSION_DENIED, ErrorKind::PermissionDenied, "permission_denied"),
	(sys::SP_ERROR_INBOX_IS_FULL, ErrorKind::InboxIsFull, "inbox_is_full"),
	(sys::SP_ERROR_NO_CACHE, ErrorKind::NoCache, "no_cache"),
	(sys::SP_ERROR_NO_SUCH_USER, ErrorKind::NoSuchUser, "no_such_user"),
	(sys::SP_ERROR_NO_CREDENTIALS, ErrorKind::NoCredentials, "no_credentials"),
	(sys::SP_ERROR_NETWORK_DISABLED, ErrorKind::NetworkDisabled, "network_disabled"),
	(sys::SP_ERROR_INVALID_DEVICE_ID, ErrorKind::InvalidDeviceId, "invalid_device_id"),
	(sys::SP_ERROR_CANT_OPEN_TRACE_FILE, ErrorKind::CantOpenTraceFile, "cant_open_trace_file"),
	(sys::SP_ERROR_APPLICATION_BANNED, ErrorKind::ApplicationBanned, "application_banned"),
	(sys::SP_ERROR_OFFLINE_TOO_MANY_TRACKS, ErrorKind::OfflineTooManyTracks, "offline_too_many_tracks"),
	(sys::SP_ERROR_OFFLINE_DISK_CACHE, ErrorKind::OfflineDiskCache, "offline_disk_cache"),
	(sys::SP_ERROR_OFFLINE_EXPIRED, ErrorKind::OfflineExpired, "offline_expired"),
	(sys::SP_ERROR_OFFLINE_NOT_ALLOWED, ErrorKind::OfflineNotAllowed, "offline_not_allowed"),
	(sys::SP_ERROR_OFFLINE_LICENSE_LOST, ErrorKind::OfflineLicenseLost, "offline_license_lost"),
	(sys::SP_ERROR_OFFLINE_LICENSE_ERROR, ErrorKind::OfflineLicenseError, "offline_license_error"),
	(sys::SP_ERROR_LASTFM_AUTH_ERROR, ErrorKind::LastfmAuthError, "lastfm_auth_error"),
	(sys::SP_ERROR_INVALID_ARGUMENT, ErrorKind::InvalidArgument, "invalid_argument"),
	(sys::SP_ERROR_SYSTEM_FAILURE, ErrorKind::SystemFailure, "system_failure"),
];

impl ErrorKind {
	/// Translates a raw code; `None` for `SP_ERROR_OK`.
	pub fn from_raw(code: sys::sp_error) -> Option<Self> {
		if code == sys::SP_ERROR_OK {
			return None;
		}
		let kind = KINDS
			.iter()
			.find(|(raw, _, _)| *raw == code)
			.map(|(_, kind, _)| *kind)
			.unwrap_or(Self::Unknown(code));
		Some(kind)
	}

	/// Translates a raw code into an event status.
	pub fn status(code: sys::sp_error) -> Status {
		match Self::from_raw(code) {
			None => Ok(()),
			Some(kind) => Err(kind),
		}
	}

	pub fn as_raw(&self) -> sys::sp_error {
		match self {
			Self::Unknown(code) => *code,
			kind => KINDS
				.iter()
				.find(|(_, known, _)| known == kind)
				.map(|(raw, _, _)| *raw)
				.unwrap_or(sys::SP_ERROR_OTHER_PERMANENT),
		}
	}

	/// Stable snake_case name, e.g. `"bad_username_or_password"`.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Unknown(_) => "unknown",
			kind => KINDS
				.iter()
				.find(|(_, known, _)| known == kind)
				.map(|(_, _, name)| *name)
				.unwrap_or("unknown"),
		}
	}
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Translates a native status code into a structured error, asking the SDK
/// for its explanation. `None` on success.
pub fn translate(api: &dyn NativeApi, code: sys::sp_error) -> Option<NativeError> {
	let kind = ErrorKind::from_raw(code)?;
	Some(NativeError {
		kind,
		message: api.error_message(code),
	})
}

/// No-op on success, otherwise returns the translated [`Error::Native`].
pub fn maybe_raise(api: &dyn NativeApi, code: sys::sp_error) -> Result<()> {
	match translate(api, code) {
		None => Ok(()),
		Some(err) => {
			tracing::debug!(kind = %err.kind, code, "native call failed");
			Err(err.into())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::FakeSdk;

	#[test]
	fn ok_code_is_not_an_error() {
		assert_eq!(ErrorKind::from_raw(sys::SP_ERROR_OK), None);
		assert_eq!(ErrorKind::status(sys::SP_ERROR_OK), Ok(()));
	}

	#[test]
	fn known_codes_round_trip() {
		for (raw, kind, _) in KINDS {
			assert_eq!(ErrorKind::from_raw(*raw), Some(*kind));
			assert_eq!(kind.as_raw(), *raw);
		}
	}

	#[test]
	fn unknown_codes_keep_their_value() {
		let kind = ErrorKind::from_raw(9999).unwrap();
		assert_eq!(kind, ErrorKind::Unknown(9999));
		assert_eq!(kind.as_raw(), 9999);
		assert_eq!(kind.name(), "unknown");
	}

	#[test]
	fn maybe_raise_carries_code_and_explanation() {
		let (sdk, _controller) = FakeSdk::new();
		assert!(maybe_raise(sdk.as_ref(), sys::SP_ERROR_OK).is_ok());

		let err = maybe_raise(sdk.as_ref(), sys::SP_ERROR_BAD_USERNAME_OR_PASSWORD).unwrap_err();
		assert!(err.is_native());
		assert_eq!(err.native_kind(), Some(ErrorKind::BadUsernameOrPassword));
		let message = err.to_string();
		assert!(message.contains("bad_username_or_password"), "{message}");
		assert!(message.contains("code 6"), "{message}");
	}

	#[test]
	fn categories_are_distinct() {
		let validation = Error::validation("empty username");
		let state = Error::state("not initialized");
		assert!(validation.is_validation() && !validation.is_native() && !validation.is_state());
		assert!(state.is_state() && !state.is_validation());
		assert_eq!(validation.to_string(), "invalid argument: empty username");
		assert_eq!(state.to_string(), "invalid state: not initialized");
	}
}
