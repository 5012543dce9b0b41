//! Playlists and the per-user playlist container.

use crate::handle::{Ownership, count, handle_wrapper};
use crate::track::Track;

handle_wrapper!(
	/// A playlist, including the starred and inbox lists.
	Playlist => sp_playlist
);

impl Playlist {
	pub fn is_loaded(&self) -> bool {
		// SAFETY: the handle keeps the playlist alive.
		unsafe { self.handle.api().playlist_is_loaded(self.as_ptr()) }
	}

	pub fn name(&self) -> String {
		// SAFETY: the handle keeps the playlist alive.
		unsafe { self.handle.api().playlist_name(self.as_ptr()) }
	}

	pub fn len(&self) -> usize {
		// SAFETY: the handle keeps the playlist alive.
		let total = count(unsafe { self.handle.api().playlist_num_tracks(self.as_ptr()) });
		usize::try_from(total).unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn track(&self, index: usize) -> Option<Track> {
		let index = std::ffi::c_int::try_from(index).ok()?;
		if usize::try_from(index).ok()? >= self.len() {
			return None;
		}
		let api = self.handle.api();
		// SAFETY: `index` is in range; the track is borrowed from the playlist.
		unsafe { Track::from_raw(api, api.playlist_track(self.as_ptr(), index), Ownership::Retain) }
	}

	/// Tracks in playlist order, fetched fresh on every call.
	pub fn tracks(&self) -> Vec<Track> {
		let api = self.handle.api();
		// SAFETY: the handle keeps the playlist alive.
		let total = count(unsafe { api.playlist_num_tracks(self.as_ptr()) });
		(0..total)
			// SAFETY: `index` is in range; tracks are borrowed from the playlist.
			.filter_map(|index| unsafe { Track::from_raw(api, api.playlist_track(self.as_ptr(), index), Ownership::Retain) })
			.collect()
	}
}

handle_wrapper!(
	/// Root folder of a user's playlists.
	PlaylistContainer => sp_playlistcontainer
);

impl PlaylistContainer {
	pub fn is_loaded(&self) -> bool {
		// SAFETY: the handle keeps the container alive.
		unsafe { self.handle.api().playlistcontainer_is_loaded(self.as_ptr()) }
	}

	pub fn len(&self) -> usize {
		// SAFETY: the handle keeps the container alive.
		let total = count(unsafe { self.handle.api().playlistcontainer_num_playlists(self.as_ptr()) });
		usize::try_from(total).unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn playlists(&self) -> Vec<Playlist> {
		let api = self.handle.api();
		// SAFETY: the handle keeps the container alive.
		let total = count(unsafe { api.playlistcontainer_num_playlists(self.as_ptr()) });
		(0..total)
			.filter_map(|index| {
				// SAFETY: `index` is in range; playlists are borrowed from the container.
				unsafe { Playlist::from_raw(api, api.playlistcontainer_playlist(self.as_ptr(), index), Ownership::Retain) }
			})
			.collect()
	}
}
