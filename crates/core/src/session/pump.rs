//! Blocking wait for asynchronous session events.
//!
//! The SDK delivers callbacks on its own thread (or from inside
//! `process_events`). [`Session::process_events_on`] registers temporary
//! handlers that hand matching events over a single-slot channel to the
//! waiting thread, which keeps driving the SDK loop between receives.
//!
//! The slot holds at most one value. A `notify_main_thread` wake-up never
//! displaces a pending event, an event displaces a pending wake-up, and an
//! event arriving while another is pending is dropped with a warning. No
//! handler ever blocks on the slot.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError, bounded};
use parking_lot::Mutex;

use super::Session;
use crate::error::{Error, Result};
use crate::event::{EventName, SessionEvent};
use crate::observable::Signal;

/// Longest a single receive waits before the pump drives the SDK again.
pub const PUMP_INTERVAL: Duration = Duration::from_millis(250);

/// What a [`Session::process_events_on`] callback is handed.
#[derive(Debug, Clone, PartialEq)]
pub enum Pumped {
	/// One of the awaited events fired.
	Event(SessionEvent),
	/// Nothing arrived within [`PUMP_INTERVAL`].
	Timeout,
}

enum Rendezvous {
	Wake,
	Event(SessionEvent),
}

struct Slot {
	tx: Sender<Rendezvous>,
	rx: Receiver<Rendezvous>,
	// Held by every producer, so a displaced value can always be put back.
	offering: Mutex<()>,
}

impl Slot {
	fn new() -> Self {
		let (tx, rx) = bounded(1);
		Self {
			tx,
			rx,
			offering: Mutex::new(()),
		}
	}

	fn wake(&self) {
		let _producer = self.offering.lock();
		match self.tx.try_send(Rendezvous::Wake) {
			Ok(()) => tracing::trace!("pump wake-up offered"),
			Err(TrySendError::Full(_)) => tracing::trace!("pump wake-up coalesced"),
			Err(TrySendError::Disconnected(_)) => {}
		}
	}

	fn offer(&self, event: SessionEvent) {
		let _producer = self.offering.lock();
		let event = match self.tx.try_send(Rendezvous::Event(event)) {
			Err(TrySendError::Full(Rendezvous::Event(event))) => event,
			// Sent, or the waiter is gone.
			_ => return,
		};

		match self.rx.try_recv() {
			Ok(Rendezvous::Event(pending)) => {
				tracing::warn!(
					dropped = %event.name(),
					pending = %pending.name(),
					"pump slot already holds an event; dropping the newer one"
				);
				if let Err(err) = self.tx.try_send(Rendezvous::Event(pending)) {
					tracing::warn!(%err, "pending pump event could not be put back");
				}
			}
			Ok(Rendezvous::Wake) | Err(TryRecvError::Empty) => {
				if let Err(err) = self.tx.try_send(Rendezvous::Event(event)) {
					tracing::warn!(%err, "pump event dropped");
				}
			}
			Err(TryRecvError::Disconnected) => {}
		}
	}
}

/// Wakes a [`Session::pump_until`] wait from any thread.
#[derive(Clone)]
pub(crate) struct Waker(Arc<Slot>);

impl Waker {
	pub(crate) fn wake(&self) {
		self.0.wake();
	}
}

impl Session {
	/// Drives the SDK until `f` returns a value.
	///
	/// Each iteration runs `process_events` once and then waits up to
	/// [`PUMP_INTERVAL`] for one of `names`. A matching event is passed to
	/// `f` as [`Pumped::Event`]; an expired wait as [`Pumped::Timeout`]. A
	/// `notify_main_thread` wake-up restarts the loop without calling `f`,
	/// unless `names` asks for that event explicitly.
	///
	/// The temporary handlers are removed on every exit path, including a
	/// panic in `f`.
	///
	/// Handlers registered here reply nothing, so waiting on
	/// `music_delivery` or `get_audio_buffer_stats` makes the SDK see the
	/// default reply.
	pub fn process_events_on<T>(&self, names: &[EventName], mut f: impl FnMut(Pumped) -> Option<T>) -> Result<T> {
		let slot = Arc::new(Slot::new());
		let mut scope = self.events.scoped();

		let mut registered: Vec<EventName> = Vec::with_capacity(names.len());
		for &name in names {
			if registered.contains(&name) {
				continue;
			}
			registered.push(name);
			let slot = Arc::clone(&slot);
			scope.on(name, move |event| {
				slot.offer(event.clone());
				None
			});
		}
		if !registered.contains(&EventName::NotifyMainThread) {
			let slot = Arc::clone(&slot);
			scope.on(EventName::NotifyMainThread, move |_| {
				slot.wake();
				None
			});
		}
		tracing::debug!(?registered, "pumping session events");

		loop {
			self.process_events()?;
			let pumped = match slot.rx.recv_timeout(PUMP_INTERVAL) {
				Ok(Rendezvous::Wake) => {
					tracing::trace!("pump woken by notify_main_thread");
					continue;
				}
				Ok(Rendezvous::Event(event)) => {
					tracing::trace!(event = %event.name(), "pump received event");
					Pumped::Event(event)
				}
				Err(RecvTimeoutError::Timeout) => Pumped::Timeout,
				Err(RecvTimeoutError::Disconnected) => return Err(Error::state("pump channel closed")),
			};
			if let Some(value) = f(pumped) {
				return Ok(value);
			}
		}
	}

	/// Waits for the first of `names`, giving up after `timeout`.
	///
	/// The deadline is checked on every empty wait, so it may overrun by up
	/// to [`PUMP_INTERVAL`].
	pub fn wait_for(&self, names: &[EventName], timeout: Duration) -> Result<Option<SessionEvent>> {
		let deadline = Instant::now() + timeout;
		self.process_events_on(names, |pumped| match pumped {
			Pumped::Event(event) => Some(Some(event)),
			Pumped::Timeout if Instant::now() >= deadline => Some(None),
			Pumped::Timeout => None,
		})
	}

	/// Drives the SDK until `done` holds, giving up after `timeout`.
	///
	/// Between iterations the thread sleeps until `notify_main_thread`, a
	/// call on the [`Waker`] handed to `arm`, or [`PUMP_INTERVAL`], whichever
	/// comes first. `done` is checked before and after every
	/// `process_events`.
	pub(crate) fn pump_until(&self, timeout: Duration, arm: impl FnOnce(Waker), done: impl Fn() -> bool) -> Result<bool> {
		let deadline = Instant::now() + timeout;
		let slot = Arc::new(Slot::new());
		let mut scope = self.events.scoped();
		{
			let slot = Arc::clone(&slot);
			scope.on(EventName::NotifyMainThread, move |_| {
				slot.wake();
				None
			});
		}
		arm(Waker(Arc::clone(&slot)));

		loop {
			if done() {
				return Ok(true);
			}
			if Instant::now() >= deadline {
				return Ok(false);
			}
			self.process_events()?;
			if done() {
				return Ok(true);
			}
			let remaining = deadline.saturating_duration_since(Instant::now());
			match slot.rx.recv_timeout(remaining.min(PUMP_INTERVAL)) {
				Ok(_) | Err(RecvTimeoutError::Timeout) => {}
				Err(RecvTimeoutError::Disconnected) => return Err(Error::state("pump channel closed")),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn take(slot: &Slot) -> Option<Rendezvous> {
		slot.rx.try_recv().ok()
	}

	#[test]
	fn wake_never_displaces_an_event() {
		let slot = Slot::new();
		slot.offer(SessionEvent::LoggedOut);
		slot.wake();
		assert!(matches!(take(&slot), Some(Rendezvous::Event(SessionEvent::LoggedOut))));
		assert!(take(&slot).is_none());
	}

	#[test]
	fn event_displaces_a_wake() {
		let slot = Slot::new();
		slot.wake();
		slot.offer(SessionEvent::EndOfTrack);
		assert!(matches!(take(&slot), Some(Rendezvous::Event(SessionEvent::EndOfTrack))));
	}

	#[test]
	fn pending_event_wins_over_a_newer_one() {
		let slot = Slot::new();
		slot.offer(SessionEvent::StartPlayback);
		slot.offer(SessionEvent::StopPlayback);
		assert!(matches!(take(&slot), Some(Rendezvous::Event(SessionEvent::StartPlayback))));
		assert!(take(&slot).is_none());
	}

	#[test]
	fn concurrent_wake_ups_never_replace_a_pending_event() {
		use std::sync::atomic::{AtomicBool, Ordering};

		let slot = Arc::new(Slot::new());
		let stop = Arc::new(AtomicBool::new(false));
		let waker = {
			let slot = Arc::clone(&slot);
			let stop = Arc::clone(&stop);
			std::thread::spawn(move || {
				while !stop.load(Ordering::Relaxed) {
					slot.wake();
				}
			})
		};

		let mut lost = 0;
		for _ in 0..20_000 {
			while take(&slot).is_some() {}
			slot.offer(SessionEvent::StartPlayback);
			slot.offer(SessionEvent::StartPlayback);
			slot.offer(SessionEvent::StopPlayback);
			if !matches!(take(&slot), Some(Rendezvous::Event(SessionEvent::StartPlayback))) {
				lost += 1;
			}
		}
		stop.store(true, Ordering::Relaxed);
		waker.join().unwrap();
		assert_eq!(lost, 0);
	}

	#[test]
	fn wake_ups_coalesce() {
		let slot = Slot::new();
		slot.wake();
		slot.wake();
		assert!(matches!(take(&slot), Some(Rendezvous::Wake)));
		assert!(take(&slot).is_none());
	}
}
