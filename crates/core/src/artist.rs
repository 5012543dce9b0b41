use crate::browse::{ArtistBrowse, ArtistBrowseType};
use crate::error::Result;
use crate::handle::handle_wrapper;
use crate::session::Session;

handle_wrapper!(
	/// An artist.
	Artist => sp_artist
);

impl Artist {
	pub fn is_loaded(&self) -> bool {
		// SAFETY: the handle keeps the artist alive.
		unsafe { self.handle.api().artist_is_loaded(self.as_ptr()) }
	}

	pub fn name(&self) -> String {
		// SAFETY: the handle keeps the artist alive.
		unsafe { self.handle.api().artist_name(self.as_ptr()) }
	}

	/// Starts an artist browse request on `session`.
	pub fn browse(&self, session: &Session, kind: ArtistBrowseType) -> Result<ArtistBrowse> {
		ArtistBrowse::new(session, self, kind)
	}
}
