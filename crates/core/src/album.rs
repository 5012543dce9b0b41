use crate::artist::Artist;
use crate::browse::AlbumBrowse;
use crate::error::Result;
use crate::handle::{Ownership, handle_wrapper};
use crate::session::Session;

handle_wrapper!(
	/// An album.
	Album => sp_album
);

impl Album {
	pub fn is_loaded(&self) -> bool {
		// SAFETY: the handle keeps the album alive.
		unsafe { self.handle.api().album_is_loaded(self.as_ptr()) }
	}

	pub fn name(&self) -> String {
		// SAFETY: the handle keeps the album alive.
		unsafe { self.handle.api().album_name(self.as_ptr()) }
	}

	/// Release year; 0 when unknown or not loaded.
	pub fn year(&self) -> i32 {
		// SAFETY: the handle keeps the album alive.
		unsafe { self.handle.api().album_year(self.as_ptr()) }
	}

	pub fn artist(&self) -> Option<Artist> {
		let api = self.handle.api();
		// SAFETY: the artist pointer is borrowed from a live album.
		unsafe { Artist::from_raw(api, api.album_artist(self.as_ptr()), Ownership::Retain) }
	}

	/// Starts an album browse request on `session`.
	pub fn browse(&self, session: &Session) -> Result<AlbumBrowse> {
		AlbumBrowse::new(session, self)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::native::NativeApi;
	use crate::testing::FakeSdk;

	#[test]
	fn reads_year_and_artist() {
		let (sdk, controller) = FakeSdk::new();
		let artist = controller.artist("Kim").build();
		let raw = controller.album("Debut").year(1999).artist(artist).loaded(false).build();
		let api: Arc<dyn NativeApi> = sdk;

		let album = unsafe { Album::from_raw(&api, raw, Ownership::Adopt) }.unwrap();
		assert!(!album.is_loaded());
		assert_eq!(album.year(), 1999);
		assert_eq!(album.artist().map(|artist| artist.name()).as_deref(), Some("Kim"));
	}
}
