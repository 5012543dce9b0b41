use std::time::Duration;

use crate::album::Album;
use crate::artist::Artist;
use crate::error::{ErrorKind, Status};
use crate::handle::{Ownership, count, handle_wrapper};

handle_wrapper!(
	/// A track, possibly still loading.
	Track => sp_track
);

impl Track {
	pub fn is_loaded(&self) -> bool {
		// SAFETY: the handle keeps the track alive.
		unsafe { self.handle.api().track_is_loaded(self.as_ptr()) }
	}

	/// Load or availability problem reported for this track.
	pub fn error(&self) -> Status {
		// SAFETY: the handle keeps the track alive.
		ErrorKind::status(unsafe { self.handle.api().track_error(self.as_ptr()) })
	}

	pub fn name(&self) -> String {
		// SAFETY: the handle keeps the track alive.
		unsafe { self.handle.api().track_name(self.as_ptr()) }
	}

	/// Zero until the track is loaded.
	pub fn duration(&self) -> Duration {
		// SAFETY: the handle keeps the track alive.
		let millis = unsafe { self.handle.api().track_duration(self.as_ptr()) };
		Duration::from_millis(u64::try_from(millis).unwrap_or(0))
	}

	pub fn album(&self) -> Option<Album> {
		let api = self.handle.api();
		// SAFETY: the album pointer is borrowed from a live track.
		unsafe { Album::from_raw(api, api.track_album(self.as_ptr()), Ownership::Retain) }
	}

	pub fn artists(&self) -> Vec<Artist> {
		let api = self.handle.api();
		// SAFETY: the handle keeps the track alive.
		let total = count(unsafe { api.track_num_artists(self.as_ptr()) });
		(0..total)
			// SAFETY: `index` is in range; artists are borrowed from the track.
			.filter_map(|index| unsafe { Artist::from_raw(api, api.track_artist(self.as_ptr(), index), Ownership::Retain) })
			.collect()
	}

	/// First credited artist.
	pub fn artist(&self) -> Option<Artist> {
		self.artists().into_iter().next()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::native::NativeApi;
	use crate::testing::FakeSdk;

	#[test]
	fn relations_are_retained() {
		let (sdk, controller) = FakeSdk::new();
		let artist = controller.artist("Kim").build();
		let album = controller.album("Debut").artist(artist).build();
		let raw = controller
			.track("Opener")
			.album(album)
			.artist(artist)
			.duration(Duration::from_millis(215_000))
			.build();
		let api: Arc<dyn NativeApi> = sdk;

		let track = unsafe { Track::from_raw(&api, raw, Ownership::Adopt) }.unwrap();
		assert_eq!(track.name(), "Opener");
		assert_eq!(track.duration(), Duration::from_secs(215));
		assert_eq!(track.error(), Ok(()));

		let album_ref = track.album().unwrap();
		assert_eq!(album_ref.name(), "Debut");
		assert_eq!(controller.refcount(album), 2);
		drop(album_ref);
		assert_eq!(controller.refcount(album), 1);

		let artists = track.artists();
		assert_eq!(artists.len(), 1);
		assert_eq!(artists[0].name(), "Kim");

		drop(track);
		assert_eq!(controller.refcount(raw), 0);
	}

	#[test]
	fn missing_album_is_absent() {
		let (sdk, controller) = FakeSdk::new();
		let raw = controller.track("Loose").build();
		let api: Arc<dyn NativeApi> = sdk;

		let track = unsafe { Track::from_raw(&api, raw, Ownership::Adopt) }.unwrap();
		assert!(track.album().is_none());
		assert!(track.artist().is_none());
	}

	#[test]
	fn track_error_is_translated() {
		let (sdk, controller) = FakeSdk::new();
		let raw = controller.track("Gone").error(hallon_sys::SP_ERROR_OTHER_PERMANENT).build();
		let api: Arc<dyn NativeApi> = sdk;

		let track = unsafe { Track::from_raw(&api, raw, Ownership::Adopt) }.unwrap();
		assert_eq!(track.error(), Err(ErrorKind::OtherPermanent));
	}
}
