//! Safe, event-driven bindings for libspotify.
//!
//! The centre of the crate is [`Session`]: it owns the native session, turns
//! the SDK's asynchronous callbacks into [`SessionEvent`]s on an
//! [`Observable`] bus, and offers [`Session::process_events_on`] so
//! synchronous code can wait for an event without busy-polling.
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use hallon::{EventName, LibSpotify, Session, SessionOptions};
//!
//! let session = Session::initialize(Arc::new(LibSpotify), include_bytes!("appkey.key").to_vec(), SessionOptions::default())?;
//! session.login("kim", "secret", false)?;
//! let outcome = session.wait_for(&[EventName::LoggedIn], Duration::from_secs(10))?;
//! ```
//!
//! Every native entry point goes through the [`NativeApi`] trait. Build with
//! the `libspotify` feature to bind against the real library, or use
//! [`testing::FakeSdk`] to run the engine in memory.

pub mod album;
pub mod artist;
pub mod browse;
mod callbacks;
pub mod error;
pub mod event;
pub mod handle;
pub mod link;
pub mod native;
pub mod observable;
pub mod playlist;
pub mod session;
pub mod testing;
pub mod track;
pub mod types;
pub mod user;

pub use album::Album;
pub use artist::Artist;
pub use browse::{AlbumBrowse, ArtistBrowse, ArtistBrowseType, BrowseEvent};
pub use error::{Error, ErrorKind, NativeError, Result, Status};
pub use event::{EventName, Reply, SessionEvent};
pub use handle::{Handle, NativeObject, Ownership};
pub use link::{FromLink, Link, LinkType, Linkable};
#[cfg(feature = "libspotify")]
pub use native::LibSpotify;
pub use native::{NativeApi, ObjectKind};
pub use observable::{HandlerId, Observable, Observe, Signal, Subscriptions};
pub use playlist::{Playlist, PlaylistContainer};
pub use session::{Player, Pumped, ResolvedConfig, Session, SessionOptions, SessionSlot};
pub use track::Track;
pub use types::{
	AudioBufferStats, AudioFormat, Bitrate, Blob, ConnectionRule, ConnectionRules, ConnectionState, ConnectionType,
	Credential, Frames, OfflineSyncStatus, SampleType,
};
pub use user::User;
