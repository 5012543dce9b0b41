//! Native callback trampolines.
//!
//! One `extern "C"` entry point per slot of `sp_session_callbacks`. Each
//! trampoline resolves the session's [`CallbackContext`] from the session
//! userdata, decodes the native arguments into a [`SessionEvent`], publishes
//! it, and writes any reply back into the native output parameters.
//!
//! The table is generic over the [`NativeApi`] implementation only so the
//! trampolines can call [`NativeApi::session_userdata`] without a global.

mod guard;

use std::ffi::{CStr, c_char, c_int, c_void};
use std::sync::Arc;

use hallon_sys as sys;

use guard::{guard_void, guard_with_default};

use crate::browse::BrowseEvent;
use crate::error::ErrorKind;
use crate::event::{EventName, Reply, SessionEvent};
use crate::native::NativeApi;
use crate::observable::{Observable, Signal};
use crate::types::{AudioBufferStats, AudioFormat, Blob, Frames};

/// What the session userdata points at.
pub(crate) struct CallbackContext {
	pub(crate) events: Arc<Observable<SessionEvent>>,
}

impl CallbackContext {
	pub(crate) fn as_userdata(&self) -> *mut c_void {
		std::ptr::from_ref(self).cast_mut().cast()
	}
}

/// Builds the callback table for sessions created through `A`.
pub(crate) fn table<A: NativeApi>() -> sys::sp_session_callbacks {
	sys::sp_session_callbacks {
		logged_in: Some(logged_in::<A>),
		logged_out: Some(logged_out::<A>),
		metadata_updated: Some(metadata_updated::<A>),
		connection_error: Some(connection_error::<A>),
		message_to_user: Some(message_to_user::<A>),
		notify_main_thread: Some(notify_main_thread::<A>),
		music_delivery: Some(music_delivery::<A>),
		play_token_lost: Some(play_token_lost::<A>),
		log_message: Some(log_message::<A>),
		end_of_track: Some(end_of_track::<A>),
		streaming_error: Some(streaming_error::<A>),
		userinfo_updated: Some(userinfo_updated::<A>),
		start_playback: Some(start_playback::<A>),
		stop_playback: Some(stop_playback::<A>),
		get_audio_buffer_stats: Some(get_audio_buffer_stats::<A>),
		offline_status_updated: Some(offline_status_updated::<A>),
		offline_error: Some(offline_error::<A>),
		credentials_blob_updated: Some(credentials_blob_updated::<A>),
		connectionstate_updated: Some(connectionstate_updated::<A>),
		scrobble_error: Some(scrobble_error::<A>),
		private_session_mode_changed: Some(private_session_mode_changed::<A>),
	}
}

/// # Safety
///
/// `session` must be null or a live session created by `A` whose userdata is
/// a [`CallbackContext`] that outlives the returned reference.
unsafe fn events<'a, A: NativeApi>(session: *mut sys::sp_session) -> Option<&'a Observable<SessionEvent>> {
	if session.is_null() {
		return None;
	}
	// SAFETY: upheld by the caller.
	let context = unsafe { A::session_userdata(session) }.cast::<CallbackContext>();
	// SAFETY: the engine keeps the context boxed until after session_release.
	unsafe { context.as_ref() }.map(|context| context.events.as_ref())
}

unsafe fn dispatch<A: NativeApi>(session: *mut sys::sp_session, event: SessionEvent) -> Option<Reply> {
	// SAFETY: forwarded from the trampoline.
	let Some(events) = (unsafe { events::<A>(session) }) else {
		tracing::warn!(event = %event.name(), "native callback for a session without context");
		return None;
	};
	match event.name() {
		EventName::NotifyMainThread | EventName::LogMessage => tracing::trace!(event = %event.name(), "native callback"),
		name => tracing::debug!(event = %name, "native callback"),
	}
	events.trigger(&event)
}

/// Copies a native string; null becomes empty.
unsafe fn text(raw: *const c_char) -> String {
	if raw.is_null() {
		return String::new();
	}
	// SAFETY: the SDK passes NUL-terminated strings valid for the call.
	unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned()
}

macro_rules! notify_trampolines {
	($($slot:ident => $event:ident),* $(,)?) => {
		$(unsafe extern "C" fn $slot<A: NativeApi>(session: *mut sys::sp_session) {
			guard_void(stringify!($slot), || {
				// SAFETY: called by the SDK with its own session pointer.
				unsafe { dispatch::<A>(session, SessionEvent::$event) };
			});
		})*
	};
}

macro_rules! error_trampolines {
	($($slot:ident => $event:ident),* $(,)?) => {
		$(unsafe extern "C" fn $slot<A: NativeApi>(session: *mut sys::sp_session, error: sys::sp_error) {
			guard_void(stringify!($slot), || {
				// SAFETY: called by the SDK with its own session pointer.
				unsafe { dispatch::<A>(session, SessionEvent::$event(ErrorKind::status(error))) };
			});
		})*
	};
}

notify_trampolines!(
	logged_out => LoggedOut,
	metadata_updated => MetadataUpdated,
	notify_main_thread => NotifyMainThread,
	play_token_lost => PlayTokenLost,
	end_of_track => EndOfTrack,
	userinfo_updated => UserinfoUpdated,
	start_playback => StartPlayback,
	stop_playback => StopPlayback,
	offline_status_updated => OfflineStatusUpdated,
	connectionstate_updated => ConnectionstateUpdated,
);

error_trampolines!(
	logged_in => LoggedIn,
	connection_error => ConnectionError,
	streaming_error => StreamingError,
	offline_error => OfflineError,
	scrobble_error => ScrobbleError,
);

unsafe extern "C" fn message_to_user<A: NativeApi>(session: *mut sys::sp_session, message: *const c_char) {
	guard_void("message_to_user", || {
		// SAFETY: called by the SDK with its own session pointer and string.
		unsafe { dispatch::<A>(session, SessionEvent::MessageToUser(text(message))) };
	});
}

unsafe extern "C" fn log_message<A: NativeApi>(session: *mut sys::sp_session, data: *const c_char) {
	guard_void("log_message", || {
		// SAFETY: called by the SDK with its own session pointer and string.
		let line = unsafe { text(data) };
		tracing::debug!(target: "hallon::native", "{}", line.trim_end());
		unsafe { dispatch::<A>(session, SessionEvent::LogMessage(line)) };
	});
}

unsafe extern "C" fn credentials_blob_updated<A: NativeApi>(session: *mut sys::sp_session, blob: *const c_char) {
	guard_void("credentials_blob_updated", || {
		// SAFETY: called by the SDK with its own session pointer and string.
		let blob = Blob::new(unsafe { text(blob) });
		unsafe { dispatch::<A>(session, SessionEvent::CredentialsBlobUpdated(blob)) };
	});
}

unsafe extern "C" fn private_session_mode_changed<A: NativeApi>(session: *mut sys::sp_session, is_private: bool) {
	guard_void("private_session_mode_changed", || {
		// SAFETY: called by the SDK with its own session pointer.
		unsafe { dispatch::<A>(session, SessionEvent::PrivateSessionModeChanged(is_private)) };
	});
}

/// Returns the number of frames consumed; 0 asks the SDK to redeliver.
unsafe extern "C" fn music_delivery<A: NativeApi>(
	session: *mut sys::sp_session,
	format: *const sys::sp_audioformat,
	frames: *const c_void,
	num_frames: c_int,
) -> c_int {
	guard_with_default("music_delivery", 0, || {
		// SAFETY: the SDK passes a format and `num_frames` frames valid for
		// the duration of the call.
		unsafe { deliver::<A>(session, format, frames, num_frames) }
	})
}

unsafe fn deliver<A: NativeApi>(
	session: *mut sys::sp_session,
	format: *const sys::sp_audioformat,
	data: *const c_void,
	num_frames: c_int,
) -> c_int {
	// SAFETY: forwarded from the trampoline.
	let Some(raw) = (unsafe { format.as_ref() }) else {
		tracing::warn!("music delivery without an audio format");
		return 0;
	};
	let format = match AudioFormat::from_raw(raw) {
		Ok(format) => format,
		Err(err) => {
			tracing::warn!(%err, "discarding undecodable audio delivery");
			return 0;
		}
	};
	// SAFETY: forwarded from the trampoline.
	let Some(events) = (unsafe { events::<A>(session) }) else {
		return 0;
	};

	let handlers = events.handler_count(EventName::MusicDelivery);
	if handlers > 1 {
		tracing::warn!(handlers, "several music_delivery handlers; only the last one's reply reaches the SDK");
	}

	let requested = usize::try_from(num_frames).unwrap_or(0);
	// SAFETY: `data` holds `num_frames` frames of `format`.
	let frames = unsafe { Frames::read(&format, data, requested) };
	tracing::trace!(frames = requested, rate = format.sample_rate, "music delivery");

	match events.trigger(&SessionEvent::MusicDelivery { format, frames }) {
		Some(Reply::FramesConsumed(consumed)) => c_int::try_from(consumed.min(requested)).unwrap_or(0),
		Some(other) => {
			tracing::warn!(?other, "unexpected reply to music_delivery");
			0
		}
		None => 0,
	}
}

unsafe extern "C" fn get_audio_buffer_stats<A: NativeApi>(
	session: *mut sys::sp_session,
	stats: *mut sys::sp_audio_buffer_stats,
) {
	// SAFETY: the SDK passes a writable stats struct.
	let Some(out) = (unsafe { stats.as_mut() }) else {
		return;
	};
	*out = AudioBufferStats::default().to_raw();

	let reply = guard_with_default("get_audio_buffer_stats", None, || {
		// SAFETY: called by the SDK with its own session pointer.
		let events = unsafe { events::<A>(session) }?;
		let handlers = events.handler_count(EventName::GetAudioBufferStats);
		if handlers > 1 {
			tracing::warn!(handlers, "several get_audio_buffer_stats handlers; only the last one's reply reaches the SDK");
		}
		events.trigger(&SessionEvent::GetAudioBufferStats)
	});

	match reply {
		Some(Reply::BufferStats(reported)) => *out = reported.to_raw(),
		Some(other) => tracing::warn!(?other, "unexpected reply to get_audio_buffer_stats"),
		None => {}
	}
}

/// Completion callback for `sp_albumbrowse_create`.
///
/// # Safety
///
/// `userdata` must come from `Arc::into_raw` on the browse object's event bus
/// and is consumed by this call.
pub(crate) unsafe extern "C" fn albumbrowse_complete(_result: *mut sys::sp_albumbrowse, userdata: *mut c_void) {
	guard_void("albumbrowse_complete", || {
		// SAFETY: upheld by the caller.
		unsafe { browse_complete(userdata) }
	});
}

/// Completion callback for `sp_artistbrowse_create`.
///
/// # Safety
///
/// Same contract as [`albumbrowse_complete`].
pub(crate) unsafe extern "C" fn artistbrowse_complete(_result: *mut sys::sp_artistbrowse, userdata: *mut c_void) {
	guard_void("artistbrowse_complete", || {
		// SAFETY: upheld by the caller.
		unsafe { browse_complete(userdata) }
	});
}

unsafe fn browse_complete(userdata: *mut c_void) {
	if userdata.is_null() {
		return;
	}
	// SAFETY: the browse constructor leaked exactly one strong count into
	// `userdata`; it is reclaimed here once.
	let events = unsafe { Arc::from_raw(userdata.cast_const().cast::<Observable<BrowseEvent>>()) };
	tracing::debug!("browse request completed");
	events.trigger(&BrowseEvent::Load);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn table_fills_every_slot() {
		let table = table::<crate::testing::FakeSdk>();
		assert!(table.logged_in.is_some());
		assert!(table.music_delivery.is_some());
		assert!(table.get_audio_buffer_stats.is_some());
		assert!(table.private_session_mode_changed.is_some());
		assert!(table.scrobble_error.is_some());
	}

	#[test]
	fn browse_completion_fires_load_once() {
		let bus = Arc::new(Observable::<BrowseEvent>::new());
		let hits = Arc::new(std::sync::atomic::AtomicUsize::new(0));
		{
			let hits = Arc::clone(&hits);
			bus.on(BrowseEvent::Load, move |_| {
				hits.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
				None
			});
		}

		let userdata = Arc::into_raw(Arc::clone(&bus)).cast_mut().cast::<c_void>();
		assert_eq!(Arc::strong_count(&bus), 2);
		unsafe { albumbrowse_complete(std::ptr::null_mut(), userdata) };
		assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
		assert_eq!(Arc::strong_count(&bus), 1);
	}

	#[test]
	fn null_userdata_is_ignored() {
		unsafe { artistbrowse_complete(std::ptr::null_mut(), std::ptr::null_mut()) };
	}
}
