//! Value types exchanged with the SDK.

mod audio;
mod connection;
mod credential;
mod offline;

pub use audio::{AudioBufferStats, AudioFormat, Bitrate, Frames, SampleType};
pub use connection::{ConnectionRule, ConnectionRules, ConnectionState, ConnectionType};
pub use credential::{Blob, Credential};
pub use offline::OfflineSyncStatus;
