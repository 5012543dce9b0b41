//! Publish/subscribe event bus.
//!
//! An [`Observable`] keeps one ordered handler list per event name. Handlers
//! run synchronously on the thread that calls [`Observable::trigger`]; for
//! native callbacks that is the SDK's own thread, so handlers must return
//! quickly.
//!
//! The value returned from `trigger` is the return value of the **last**
//! handler in the list. Callbacks that hand a value back to the SDK
//! (`music_delivery`, `get_audio_buffer_stats`) rely on this.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// An event that can be published on an [`Observable`].
pub trait Signal: Send + Sync + 'static {
	/// Name handlers register under.
	type Name: Copy + Eq + Hash + Debug + Send + Sync + 'static;
	/// Value a handler may hand back to the publisher.
	type Reply: Send + 'static;

	fn name(&self) -> Self::Name;
}

/// Identifies one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<E> = Arc<dyn Fn(&E) -> Option<<E as Signal>::Reply> + Send + Sync>;

pub struct Observable<E: Signal> {
	handlers: RwLock<HashMap<E::Name, Vec<(HandlerId, Handler<E>)>>>,
	next_id: AtomicU64,
}

impl<E: Signal> Observable<E> {
	pub fn new() -> Self {
		Self {
			handlers: RwLock::new(HashMap::new()),
			next_id: AtomicU64::new(0),
		}
	}

	/// Appends `handler` to the list for `name`.
	pub fn on<F>(&self, name: E::Name, handler: F) -> HandlerId
	where
		F: Fn(&E) -> Option<E::Reply> + Send + Sync + 'static,
	{
		let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.handlers.write().entry(name).or_default().push((id, Arc::new(handler)));
		tracing::trace!(?name, ?id, "handler registered");
		id
	}

	/// Removes one handler. Returns `false` if it was not registered.
	pub fn off(&self, name: E::Name, id: HandlerId) -> bool {
		let mut handlers = self.handlers.write();
		let Some(list) = handlers.get_mut(&name) else {
			return false;
		};
		let before = list.len();
		list.retain(|(existing, _)| *existing != id);
		let removed = list.len() != before;
		if list.is_empty() {
			handlers.remove(&name);
		}
		removed
	}

	pub fn handler_count(&self, name: E::Name) -> usize {
		self.handlers.read().get(&name).map_or(0, Vec::len)
	}

	/// Runs every handler for `event.name()` in registration order and
	/// returns the last handler's result.
	///
	/// The handler list is snapshotted first, so handlers may register or
	/// remove handlers without deadlocking.
	pub fn trigger(&self, event: &E) -> Option<E::Reply> {
		let name = event.name();
		let snapshot: Vec<Handler<E>> = match self.handlers.read().get(&name) {
			Some(list) => list.iter().map(|(_, handler)| Arc::clone(handler)).collect(),
			None => return None,
		};

		let mut reply = None;
		for handler in snapshot {
			reply = handler(event);
		}
		reply
	}

	/// Starts a scoped set of registrations removed when the guard drops.
	pub fn scoped(&self) -> Subscriptions<'_, E> {
		Subscriptions {
			bus: self,
			registered: Vec::new(),
		}
	}
}

impl<E: Signal> Default for Observable<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E: Signal> Debug for Observable<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let handlers = self.handlers.read();
		let counts: HashMap<_, _> = handlers.iter().map(|(name, list)| (*name, list.len())).collect();
		f.debug_struct("Observable").field("handlers", &counts).finish()
	}
}

/// Handlers registered for the lifetime of a scope.
///
/// Dropping the guard (normal return, early `?`, or unwinding panic) removes
/// every handler it registered.
pub struct Subscriptions<'a, E: Signal> {
	bus: &'a Observable<E>,
	registered: Vec<(E::Name, HandlerId)>,
}

impl<E: Signal> Subscriptions<'_, E> {
	pub fn on<F>(&mut self, name: E::Name, handler: F) -> HandlerId
	where
		F: Fn(&E) -> Option<E::Reply> + Send + Sync + 'static,
	{
		let id = self.bus.on(name, handler);
		self.registered.push((name, id));
		id
	}

	pub fn len(&self) -> usize {
		self.registered.len()
	}

	pub fn is_empty(&self) -> bool {
		self.registered.is_empty()
	}
}

impl<E: Signal> Drop for Subscriptions<'_, E> {
	fn drop(&mut self) {
		for (name, id) in self.registered.drain(..) {
			self.bus.off(name, id);
		}
	}
}

/// Capability of objects that publish events.
pub trait Observe {
	type Event: Signal;

	fn observable(&self) -> &Observable<Self::Event>;

	fn on<F>(&self, name: <Self::Event as Signal>::Name, handler: F) -> HandlerId
	where
		F: Fn(&Self::Event) -> Option<<Self::Event as Signal>::Reply> + Send + Sync + 'static,
	{
		self.observable().on(name, handler)
	}

	fn off(&self, name: <Self::Event as Signal>::Name, id: HandlerId) -> bool {
		self.observable().off(name, id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use parking_lot::Mutex;

	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	enum Name {
		Ping,
		Pong,
	}

	struct Ping(u32);

	impl Signal for Ping {
		type Name = Name;
		type Reply = u32;

		fn name(&self) -> Name {
			Name::Ping
		}
	}

	#[test]
	fn trigger_without_handlers_returns_none() {
		let bus = Observable::<Ping>::new();
		assert_eq!(bus.trigger(&Ping(1)), None);
	}

	#[test]
	fn handlers_run_in_registration_order() {
		let bus = Observable::<Ping>::new();
		let seen = Arc::new(Mutex::new(Vec::new()));

		for tag in ["first", "second", "third"] {
			let seen = Arc::clone(&seen);
			bus.on(Name::Ping, move |_| {
				seen.lock().push(tag);
				None
			});
		}

		bus.trigger(&Ping(0));
		assert_eq!(*seen.lock(), vec!["first", "second", "third"]);
	}

	#[test]
	fn last_handler_result_wins() {
		let bus = Observable::<Ping>::new();
		bus.on(Name::Ping, |ping| Some(ping.0 + 1));
		bus.on(Name::Ping, |ping| Some(ping.0 * 10));
		assert_eq!(bus.trigger(&Ping(4)), Some(40));

		// A trailing handler without a reply clears the result.
		bus.on(Name::Ping, |_| None);
		assert_eq!(bus.trigger(&Ping(4)), None);
	}

	#[test]
	fn off_removes_only_the_given_handler() {
		let bus = Observable::<Ping>::new();
		let first = bus.on(Name::Ping, |_| Some(1));
		bus.on(Name::Ping, |_| Some(2));

		assert!(bus.off(Name::Ping, first));
		assert!(!bus.off(Name::Ping, first));
		assert!(!bus.off(Name::Pong, first));
		assert_eq!(bus.handler_count(Name::Ping), 1);
		assert_eq!(bus.trigger(&Ping(0)), Some(2));
	}

	#[test]
	fn handlers_may_register_while_dispatching() {
		let bus = Arc::new(Observable::<Ping>::new());
		let inner = Arc::clone(&bus);
		bus.on(Name::Ping, move |_| {
			inner.on(Name::Pong, |_| None);
			None
		});

		bus.trigger(&Ping(0));
		assert_eq!(bus.handler_count(Name::Pong), 1);
	}

	#[test]
	fn scoped_subscriptions_are_removed_on_drop() {
		let bus = Observable::<Ping>::new();
		bus.on(Name::Ping, |_| Some(0));
		{
			let mut scope = bus.scoped();
			scope.on(Name::Ping, |_| Some(1));
			scope.on(Name::Pong, |_| Some(2));
			assert_eq!(scope.len(), 2);
			assert_eq!(bus.handler_count(Name::Ping), 2);
		}
		assert_eq!(bus.handler_count(Name::Ping), 1);
		assert_eq!(bus.handler_count(Name::Pong), 0);
	}

	#[test]
	fn scoped_subscriptions_survive_a_panicking_scope() {
		let bus = Observable::<Ping>::new();
		let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
			let mut scope = bus.scoped();
			scope.on(Name::Ping, |_| Some(1));
			panic!("scope body failed");
		}));
		assert!(result.is_err());
		assert_eq!(bus.handler_count(Name::Ping), 0);
	}
}
