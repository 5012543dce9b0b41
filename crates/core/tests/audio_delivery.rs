//! Reply-carrying callbacks: `music_delivery` and `get_audio_buffer_stats`.

mod common;

use std::sync::Arc;

use common::session;
use hallon::{AudioBufferStats, EventName, Observe, Reply, SampleType, SessionEvent};
use parking_lot::Mutex;

fn stereo() -> hallon_sys::sp_audioformat {
	hallon_sys::sp_audioformat {
		sample_type: hallon_sys::SP_SAMPLETYPE_INT16_NATIVE_ENDIAN,
		sample_rate: 44_100,
		channels: 2,
	}
}

#[test]
fn frames_reach_the_handler_and_consumption_flows_back() {
	let (session, controller) = session();
	let delivered = Arc::new(Mutex::new(Vec::new()));
	{
		let delivered = Arc::clone(&delivered);
		session.on(EventName::MusicDelivery, move |event| {
			let SessionEvent::MusicDelivery { format, frames } = event else {
				return None;
			};
			assert_eq!(format.sample_type, SampleType::Int16NativeEndian);
			assert_eq!(format.sample_rate, 44_100);
			assert_eq!(format.channels, 2);
			delivered.lock().extend_from_slice(frames.samples());
			Some(Reply::FramesConsumed(frames.len()))
		});
	}

	let consumed = controller.deliver_music(stereo(), &[1, -1, 2, -2, 3, -3]);
	assert_eq!(consumed, 3);
	assert_eq!(*delivered.lock(), [1, -1, 2, -2, 3, -3]);
}

#[test]
fn consumption_is_clamped_to_what_was_delivered() {
	let (session, controller) = session();
	session.on(EventName::MusicDelivery, |_| Some(Reply::FramesConsumed(10_000)));
	assert_eq!(controller.deliver_music(stereo(), &[0; 8]), 4);
}

#[test]
fn no_handler_consumes_nothing() {
	let (_session, controller) = session();
	assert_eq!(controller.deliver_music(stereo(), &[0; 8]), 0);
}

#[test]
fn last_handler_reply_wins() {
	let (session, controller) = session();
	session.on(EventName::MusicDelivery, |_| Some(Reply::FramesConsumed(3)));
	session.on(EventName::MusicDelivery, |_| Some(Reply::FramesConsumed(1)));
	assert_eq!(controller.deliver_music(stereo(), &[0; 8]), 1);
}

#[test]
fn unknown_sample_type_is_discarded() {
	let (session, controller) = session();
	session.on(EventName::MusicDelivery, |_| Some(Reply::FramesConsumed(4)));
	let format = hallon_sys::sp_audioformat {
		sample_type: 7,
		..stereo()
	};
	assert_eq!(controller.deliver_music(format, &[0; 8]), 0);
}

#[test]
fn panicking_handler_never_crosses_the_boundary() {
	let (session, controller) = session();
	session.on(EventName::MusicDelivery, |_| panic!("audio sink exploded"));
	assert_eq!(controller.deliver_music(stereo(), &[0; 8]), 0);
}

#[test]
fn buffer_stats_are_written_back() {
	let (session, controller) = session();
	session.on(EventName::GetAudioBufferStats, |_| {
		Some(Reply::BufferStats(AudioBufferStats {
			samples: 4410,
			stutter: 2,
		}))
	});
	let stats = controller.audio_buffer_stats();
	assert_eq!((stats.samples, stats.stutter), (4410, 2));
}

#[test]
fn buffer_stats_default_to_zero() {
	let (_session, controller) = session();
	let stats = controller.audio_buffer_stats();
	assert_eq!((stats.samples, stats.stutter), (0, 0));
}

#[test]
fn panicking_stats_handler_reports_zero() {
	let (session, controller) = session();
	session.on(EventName::GetAudioBufferStats, |_| panic!("no stats today"));
	let stats = controller.audio_buffer_stats();
	assert_eq!((stats.samples, stats.stutter), (0, 0));
}
