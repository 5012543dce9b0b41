use std::collections::BTreeMap;

use hallon_sys as sys;
use serde::Serialize;

/// Snapshot of the offline synchronisation counters.
///
/// Fetched fresh on every read. When the SDK has nothing to report the
/// snapshot is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OfflineSyncStatus {
	#[serde(flatten)]
	counters: BTreeMap<&'static str, u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	syncing: Option<bool>,
}

impl OfflineSyncStatus {
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn from_raw(raw: Option<&sys::sp_offline_sync_status>) -> Self {
		let Some(raw) = raw else {
			return Self::empty();
		};
		let count = |value: std::ffi::c_int| u64::try_from(value).unwrap_or(0);
		let counters = BTreeMap::from([
			("queued_tracks", count(raw.queued_tracks)),
			("queued_bytes", raw.queued_bytes),
			("done_tracks", count(raw.done_tracks)),
			("done_bytes", raw.done_bytes),
			("copied_tracks", count(raw.copied_tracks)),
			("copied_bytes", raw.copied_bytes),
			("willnotcopy_tracks", count(raw.willnotcopy_tracks)),
			("error_tracks", count(raw.error_tracks)),
		]);
		Self {
			counters,
			syncing: Some(raw.syncing),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.counters.is_empty()
	}

	pub fn get(&self, counter: &str) -> Option<u64> {
		self.counters.get(counter).copied()
	}

	/// `None` when the snapshot is empty.
	pub fn syncing(&self) -> Option<bool> {
		self.syncing
	}

	pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
		self.counters.iter().map(|(name, value)| (*name, *value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn absent_data_is_an_empty_mapping() {
		let status = OfflineSyncStatus::from_raw(None);
		assert!(status.is_empty());
		assert_eq!(status.syncing(), None);
		assert_eq!(serde_json::to_value(&status).unwrap(), serde_json::json!({}));
	}

	#[test]
	fn counters_are_named() {
		let raw = sys::sp_offline_sync_status {
			queued_tracks: 3,
			queued_bytes: 4096,
			done_tracks: 1,
			syncing: true,
			..Default::default()
		};
		let status = OfflineSyncStatus::from_raw(Some(&raw));
		assert_eq!(status.get("queued_tracks"), Some(3));
		assert_eq!(status.get("queued_bytes"), Some(4096));
		assert_eq!(status.get("error_tracks"), Some(0));
		assert_eq!(status.get("nonsense"), None);
		assert_eq!(status.syncing(), Some(true));

		let json = serde_json::to_value(&status).unwrap();
		assert_eq!(json["done_tracks"], 1);
		assert_eq!(json["syncing"], true);
	}
}
