//! In-memory native SDK for exercising the engine without libspotify.
//!
//! ```ignore
//! let (sdk, controller) = FakeSdk::new();
//! let session = Session::create(sdk, b"key".to_vec(), SessionOptions::default())?;
//!
//! session.login("kim", "secret", false)?;
//! let outcome = session.process_events_on(&[EventName::LoggedIn], |pumped| match pumped {
//!     Pumped::Event(event) => event.status(),
//!     Pumped::Timeout => None,
//! })?;
//! assert_eq!(controller.take_calls().len(), 1);
//! ```

mod controller;
mod fake_sdk;
mod state;

pub use controller::{FakeBuilder, FakeController};
pub use fake_sdk::FakeSdk;
pub use state::{FakeCall, FakeCallback, FakeConfig};
