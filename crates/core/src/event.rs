//! Session events and their names.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result, Status};
use crate::observable::Signal;
use crate::types::{AudioBufferStats, AudioFormat, Blob, Frames};

macro_rules! event_names {
	($($variant:ident => $name:literal),* $(,)?) => {
		/// Every event a session publishes, one per native callback slot.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub enum EventName {
			$($variant,)*
		}

		impl EventName {
			pub const ALL: &'static [EventName] = &[$(Self::$variant,)*];

			/// Stable snake_case name.
			pub fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $name,)*
				}
			}
		}

		impl FromStr for EventName {
			type Err = Error;

			fn from_str(s: &str) -> Result<Self> {
				match s {
					$($name => Ok(Self::$variant),)*
					other => Err(Error::validation(format!("unknown event {other:?}"))),
				}
			}
		}
	};
}

event_names!(
	LoggedIn => "logged_in",
	LoggedOut => "logged_out",
	MetadataUpdated => "metadata_updated",
	ConnectionError => "connection_error",
	MessageToUser => "message_to_user",
	NotifyMainThread => "notify_main_thread",
	MusicDelivery => "music_delivery",
	PlayTokenLost => "play_token_lost",
	LogMessage => "log_message",
	EndOfTrack => "end_of_track",
	StreamingError => "streaming_error",
	UserinfoUpdated => "userinfo_updated",
	StartPlayback => "start_playback",
	StopPlayback => "stop_playback",
	GetAudioBufferStats => "get_audio_buffer_stats",
	OfflineStatusUpdated => "offline_status_updated",
	OfflineError => "offline_error",
	CredentialsBlobUpdated => "credentials_blob_updated",
	ConnectionstateUpdated => "connectionstate_updated",
	ScrobbleError => "scrobble_error",
	PrivateSessionModeChanged => "private_session_mode_changed",
);

impl fmt::Display for EventName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A decoded native callback.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
	LoggedIn(Status),
	LoggedOut,
	MetadataUpdated,
	ConnectionError(Status),
	MessageToUser(String),
	NotifyMainThread,
	/// Handlers reply with [`Reply::FramesConsumed`].
	MusicDelivery { format: AudioFormat, frames: Frames },
	PlayTokenLost,
	LogMessage(String),
	EndOfTrack,
	StreamingError(Status),
	UserinfoUpdated,
	StartPlayback,
	StopPlayback,
	/// Handlers reply with [`Reply::BufferStats`].
	GetAudioBufferStats,
	OfflineStatusUpdated,
	OfflineError(Status),
	CredentialsBlobUpdated(Blob),
	ConnectionstateUpdated,
	ScrobbleError(Status),
	PrivateSessionModeChanged(bool),
}

impl SessionEvent {
	/// Status carried by error-bearing events.
	pub fn status(&self) -> Option<Status> {
		match self {
			Self::LoggedIn(status)
			| Self::ConnectionError(status)
			| Self::StreamingError(status)
			| Self::OfflineError(status)
			| Self::ScrobbleError(status) => Some(*status),
			_ => None,
		}
	}

	/// Error kind of a failed error-bearing event.
	pub fn error(&self) -> Option<ErrorKind> {
		self.status().and_then(|status| status.err())
	}

	pub fn text(&self) -> Option<&str> {
		match self {
			Self::MessageToUser(text) | Self::LogMessage(text) => Some(text),
			_ => None,
		}
	}
}

impl Signal for SessionEvent {
	type Name = EventName;
	type Reply = Reply;

	fn name(&self) -> EventName {
		match self {
			Self::LoggedIn(_) => EventName::LoggedIn,
			Self::LoggedOut => EventName::LoggedOut,
			Self::MetadataUpdated => EventName::MetadataUpdated,
			Self::ConnectionError(_) => EventName::ConnectionError,
			Self::MessageToUser(_) => EventName::MessageToUser,
			Self::NotifyMainThread => EventName::NotifyMainThread,
			Self::MusicDelivery { .. } => EventName::MusicDelivery,
			Self::PlayTokenLost => EventName::PlayTokenLost,
			Self::LogMessage(_) => EventName::LogMessage,
			Self::EndOfTrack => EventName::EndOfTrack,
			Self::StreamingError(_) => EventName::StreamingError,
			Self::UserinfoUpdated => EventName::UserinfoUpdated,
			Self::StartPlayback => EventName::StartPlayback,
			Self::StopPlayback => EventName::StopPlayback,
			Self::GetAudioBufferStats => EventName::GetAudioBufferStats,
			Self::OfflineStatusUpdated => EventName::OfflineStatusUpdated,
			Self::OfflineError(_) => EventName::OfflineError,
			Self::CredentialsBlobUpdated(_) => EventName::CredentialsBlobUpdated,
			Self::ConnectionstateUpdated => EventName::ConnectionstateUpdated,
			Self::ScrobbleError(_) => EventName::ScrobbleError,
			Self::PrivateSessionModeChanged(_) => EventName::PrivateSessionModeChanged,
		}
	}
}

/// Value a handler hands back to the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
	FramesConsumed(usize),
	BufferStats(AudioBufferStats),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_parse_back() {
		for name in EventName::ALL {
			assert_eq!(name.as_str().parse::<EventName>().unwrap(), *name);
		}
		assert_eq!(EventName::ALL.len(), 21);
		assert!("tea_time".parse::<EventName>().unwrap_err().is_validation());
	}

	#[test]
	fn events_report_their_name() {
		assert_eq!(SessionEvent::LoggedIn(Ok(())).name(), EventName::LoggedIn);
		assert_eq!(SessionEvent::PrivateSessionModeChanged(true).name().as_str(), "private_session_mode_changed");
	}

	#[test]
	fn error_payloads() {
		let failed = SessionEvent::ConnectionError(Err(ErrorKind::UnableToContactServer));
		assert_eq!(failed.error(), Some(ErrorKind::UnableToContactServer));
		assert_eq!(SessionEvent::LoggedIn(Ok(())).error(), None);
		assert_eq!(SessionEvent::EndOfTrack.status(), None);
		assert_eq!(SessionEvent::LogMessage("hi".into()).text(), Some("hi"));
	}
}
