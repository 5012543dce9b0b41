use std::ffi::c_int;
use std::time::Duration;

use super::Session;
use crate::error::{Error, Result};
use crate::track::Track;

/// Playback control for a session.
///
/// Decoded audio arrives through the `music_delivery` event, not here.
#[derive(Debug, Clone, Copy)]
pub struct Player<'a> {
	session: &'a Session,
}

impl<'a> Player<'a> {
	pub(super) fn new(session: &'a Session) -> Self {
		Self { session }
	}

	pub fn load(&self, track: &Track) -> Result<()> {
		tracing::debug!(track = %track.name(), "loading track");
		// SAFETY: session and track are live for the call.
		self.session
			.check(unsafe { self.session.api.session_player_load(self.session.as_ptr(), track.as_ptr()) })
	}

	pub fn play(&self) -> Result<()> {
		self.set_playing(true)
	}

	pub fn pause(&self) -> Result<()> {
		self.set_playing(false)
	}

	fn set_playing(&self, play: bool) -> Result<()> {
		tracing::debug!(play, "setting playback");
		// SAFETY: the session is live for the call.
		self.session
			.check(unsafe { self.session.api.session_player_play(self.session.as_ptr(), play) })
	}

	pub fn seek(&self, position: Duration) -> Result<()> {
		let offset = c_int::try_from(position.as_millis())
			.map_err(|_| Error::validation(format!("seek position {position:?} is out of range")))?;
		// SAFETY: the session is live for the call.
		self.session
			.check(unsafe { self.session.api.session_player_seek(self.session.as_ptr(), offset) })
	}

	pub fn unload(&self) -> Result<()> {
		// SAFETY: the session is live for the call.
		self.session
			.check(unsafe { self.session.api.session_player_unload(self.session.as_ptr()) })
	}
}
