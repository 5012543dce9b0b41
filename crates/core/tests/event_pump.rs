//! `process_events_on` and `wait_for` driven by the fake SDK.

mod common;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use common::{logged_in, session};
use hallon::testing::FakeCallback;
use hallon::{EventName, Observe, Pumped, SessionEvent};

#[test]
fn returns_the_first_defined_result() {
	let (session, _controller) = session();
	session.login("kim", "secret", false).unwrap();

	let status = session
		.process_events_on(&[EventName::LoggedIn], |pumped| match pumped {
			Pumped::Event(event) => event.status(),
			Pumped::Timeout => None,
		})
		.unwrap();
	assert_eq!(status, Ok(()));
}

#[test]
fn wake_ups_restart_the_loop_without_calling_the_block() {
	let (session, controller) = session();
	let before = controller.process_events_count();

	let background = controller.clone();
	let notifier = thread::spawn(move || {
		for _ in 0..3 {
			thread::sleep(Duration::from_millis(40));
			background.fire(FakeCallback::NotifyMainThread);
		}
		thread::sleep(Duration::from_millis(40));
		background.fire(FakeCallback::EndOfTrack);
	});

	let mut seen = Vec::new();
	session
		.process_events_on(&[EventName::EndOfTrack], |pumped| {
			seen.push(pumped.clone());
			matches!(pumped, Pumped::Event(SessionEvent::EndOfTrack)).then_some(())
		})
		.unwrap();
	notifier.join().unwrap();

	assert!(seen.iter().all(|pumped| matches!(pumped, Pumped::Timeout | Pumped::Event(SessionEvent::EndOfTrack))));
	assert_eq!(seen.last(), Some(&Pumped::Event(SessionEvent::EndOfTrack)));
	// Every wake-up drives the SDK loop again.
	assert!(controller.process_events_count() - before >= 2);
}

#[test]
fn handlers_are_removed_after_returning() {
	let (session, _controller) = session();
	session.login("kim", "secret", false).unwrap();
	session
		.process_events_on(&[EventName::LoggedIn, EventName::ConnectionError], |pumped| match pumped {
			Pumped::Event(_) => Some(()),
			Pumped::Timeout => None,
		})
		.unwrap();

	for name in EventName::ALL {
		assert_eq!(session.observable().handler_count(*name), 0, "{name} handler left behind");
	}
}

#[test]
fn handlers_are_removed_when_the_block_panics() {
	let (session, controller) = session();
	controller.queue(FakeCallback::MetadataUpdated);

	let outcome = catch_unwind(AssertUnwindSafe(|| {
		session.process_events_on(&[EventName::MetadataUpdated], |_| -> Option<()> { panic!("block failed") })
	}));
	assert!(outcome.is_err());
	assert_eq!(session.observable().handler_count(EventName::MetadataUpdated), 0);
	assert_eq!(session.observable().handler_count(EventName::NotifyMainThread), 0);
}

#[test]
fn user_handlers_survive_the_pump() {
	let (session, controller) = session();
	let hits = Arc::new(AtomicUsize::new(0));
	{
		let hits = Arc::clone(&hits);
		session.on(EventName::MetadataUpdated, move |_| {
			hits.fetch_add(1, Ordering::SeqCst);
			None
		});
	}

	controller.queue(FakeCallback::MetadataUpdated);
	let event = session.wait_for(&[EventName::MetadataUpdated], Duration::from_secs(2)).unwrap();
	assert_eq!(event, Some(SessionEvent::MetadataUpdated));
	assert_eq!(hits.load(Ordering::SeqCst), 1);
	assert_eq!(session.observable().handler_count(EventName::MetadataUpdated), 1);
}

#[test]
fn timeouts_reach_the_block() {
	let (session, _controller) = session();
	let mut timeouts = 0;
	let started = Instant::now();
	session
		.process_events_on(&[EventName::LoggedOut], |pumped| {
			assert_eq!(pumped, Pumped::Timeout);
			timeouts += 1;
			(timeouts == 2).then_some(())
		})
		.unwrap();
	assert_eq!(timeouts, 2);
	assert!(started.elapsed() >= hallon::session::PUMP_INTERVAL);
}

#[test]
fn wait_for_gives_up_at_the_deadline() {
	let (session, _controller) = session();
	let started = Instant::now();
	let event = session.wait_for(&[EventName::PlayTokenLost], Duration::from_millis(300)).unwrap();
	assert_eq!(event, None);
	assert!(started.elapsed() >= Duration::from_millis(300));
}

#[test]
fn notify_main_thread_can_be_awaited_explicitly() {
	let (session, controller) = session();
	controller.queue(FakeCallback::NotifyMainThread);
	let event = session.wait_for(&[EventName::NotifyMainThread], Duration::from_secs(2)).unwrap();
	assert_eq!(event, Some(SessionEvent::NotifyMainThread));
}

#[test]
fn error_events_carry_their_status() {
	let (session, controller) = logged_in("kim");
	controller.queue(FakeCallback::StreamingError(hallon_sys::SP_ERROR_NO_STREAM_AVAILABLE));
	let event = session.wait_for(&[EventName::StreamingError], Duration::from_secs(2)).unwrap().unwrap();
	assert_eq!(event.error(), Some(hallon::ErrorKind::NoStreamAvailable));
}

#[test]
fn text_and_blob_events_are_decoded() {
	let (session, controller) = session();
	controller.queue(FakeCallback::MessageToUser("Welcome back".into()));
	let event = session.wait_for(&[EventName::MessageToUser], Duration::from_secs(2)).unwrap().unwrap();
	assert_eq!(event.text(), Some("Welcome back"));

	controller.queue(FakeCallback::CredentialsBlobUpdated("b64blob".into()));
	let event = session
		.wait_for(&[EventName::CredentialsBlobUpdated], Duration::from_secs(2))
		.unwrap()
		.unwrap();
	assert_eq!(event, SessionEvent::CredentialsBlobUpdated(hallon::Blob::new("b64blob")));
}
