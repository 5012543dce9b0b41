//! `spotify:` links and conversion between links and metadata objects.

use std::ffi::CString;
use std::fmt;
use std::sync::Arc;

use hallon_sys as sys;

use crate::album::Album;
use crate::artist::Artist;
use crate::error::{Error, Result};
use crate::handle::{NativeObject, Ownership, handle_wrapper};
use crate::native::NativeApi;
use crate::playlist::Playlist;
use crate::track::Track;
use crate::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
	Invalid,
	Track,
	Album,
	Artist,
	Search,
	Playlist,
	Profile,
	Starred,
	LocalTrack,
	Image,
}

impl LinkType {
	pub fn from_raw(raw: sys::sp_linktype) -> Result<Self> {
		Ok(match raw {
			sys::SP_LINKTYPE_INVALID => Self::Invalid,
			sys::SP_LINKTYPE_TRACK => Self::Track,
			sys::SP_LINKTYPE_ALBUM => Self::Album,
			sys::SP_LINKTYPE_ARTIST => Self::Artist,
			sys::SP_LINKTYPE_SEARCH => Self::Search,
			sys::SP_LINKTYPE_PLAYLIST => Self::Playlist,
			sys::SP_LINKTYPE_PROFILE => Self::Profile,
			sys::SP_LINKTYPE_STARRED => Self::Starred,
			sys::SP_LINKTYPE_LOCALTRACK => Self::LocalTrack,
			sys::SP_LINKTYPE_IMAGE => Self::Image,
			value => return Err(Error::UnknownValue { kind: "link type", value }),
		})
	}
}

handle_wrapper!(
	/// A parsed `spotify:` URI.
	Link => sp_link
);

impl Link {
	/// Parses `text`. Returns `None` when the SDK does not recognise it.
	pub fn new(api: &Arc<dyn NativeApi>, text: &str) -> Result<Option<Self>> {
		let text = CString::new(text).map_err(|_| Error::validation("link must not contain NUL bytes"))?;
		// SAFETY: `text` is a valid C string for the call; a created link
		// carries one reference.
		Ok(unsafe { Self::from_raw(api, api.link_create_from_string(&text), Ownership::Adopt) })
	}

	pub fn link_type(&self) -> Result<LinkType> {
		// SAFETY: the handle keeps the link alive.
		LinkType::from_raw(unsafe { self.handle.api().link_type(self.as_ptr()) })
	}

	pub fn as_str(&self) -> String {
		// SAFETY: the handle keeps the link alive.
		unsafe { self.handle.api().link_as_string(self.as_ptr()) }
	}

	/// The object this link points at, when it is a `T`.
	pub fn get<T: FromLink>(&self) -> Option<T> {
		T::from_link(self)
	}
}

impl fmt::Display for Link {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.as_str())
	}
}

/// Objects that have a link.
pub trait Linkable {
	fn to_link(&self) -> Option<Link>;

	fn to_uri(&self) -> Option<String> {
		self.to_link().map(|link| link.as_str())
	}
}

/// Objects a link can point at.
pub trait FromLink: Sized {
	fn from_link(link: &Link) -> Option<Self>;
}

macro_rules! linkable {
	($($ty:ident => $raw:ident),* $(,)?) => {
		$(impl Linkable for $ty {
			fn to_link(&self) -> Option<Link> {
				let api = self.handle().api();
				// SAFETY: the handle keeps the object alive; a created link
				// carries one reference.
				unsafe {
					let raw = api.link_create_from(<sys::$raw as NativeObject>::KIND, self.as_ptr().cast());
					Link::from_raw(api, raw, Ownership::Adopt)
				}
			}
		})*
	};
}

linkable!(
	Track => sp_track,
	Album => sp_album,
	Artist => sp_artist,
	Playlist => sp_playlist,
	User => sp_user,
);

macro_rules! from_link {
	($($ty:ident => $raw:ident),* $(,)?) => {
		$(impl FromLink for $ty {
			fn from_link(link: &Link) -> Option<Self> {
				let api = link.handle().api();
				// SAFETY: the returned object is borrowed from a live link.
				unsafe {
					let raw = api.link_as(link.as_ptr(), <sys::$raw as NativeObject>::KIND);
					Self::from_raw(api, raw.cast(), Ownership::Retain)
				}
			}
		})*
	};
}

from_link!(
	Track => sp_track,
	Album => sp_album,
	Artist => sp_artist,
);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::FakeSdk;

	#[test]
	fn unparsable_text_is_absent() {
		let (sdk, _controller) = FakeSdk::new();
		let api: Arc<dyn NativeApi> = sdk;
		assert!(Link::new(&api, "http://example.com").unwrap().is_none());
		assert!(Link::new(&api, "spotify:track\0").unwrap_err().is_validation());
	}

	#[test]
	fn link_types() {
		let (sdk, _controller) = FakeSdk::new();
		let api: Arc<dyn NativeApi> = sdk;
		let link = Link::new(&api, "spotify:user:kim:starred").unwrap().unwrap();
		assert_eq!(link.link_type().unwrap(), LinkType::Starred);
		assert_eq!(link.to_string(), "spotify:user:kim:starred");
	}

	#[test]
	fn object_to_link_and_back() {
		let (sdk, controller) = FakeSdk::new();
		let raw = controller.track("Song").link("spotify:track:4uLU6hMCjMI75M1A2tKUQC").build();
		let api: Arc<dyn NativeApi> = sdk;
		let track = unsafe { Track::from_raw(&api, raw, Ownership::Adopt) }.unwrap();

		assert_eq!(track.to_uri().as_deref(), Some("spotify:track:4uLU6hMCjMI75M1A2tKUQC"));

		let link = Link::new(&api, "spotify:track:4uLU6hMCjMI75M1A2tKUQC").unwrap().unwrap();
		assert_eq!(link.get::<Track>(), Some(track.clone()));
		assert_eq!(link.get::<Album>(), None);
	}

	#[test]
	fn links_are_released() {
		let (sdk, controller) = FakeSdk::new();
		let raw = controller.artist("Kim").build();
		let api: Arc<dyn NativeApi> = sdk;
		let artist = unsafe { Artist::from_raw(&api, raw, Ownership::Adopt) }.unwrap();

		let link = artist.to_link().unwrap();
		let link_ptr = link.as_ptr();
		assert_eq!(controller.refcount(link_ptr), 1);
		drop(link);
		assert_eq!(controller.refcount(link_ptr), 0);
	}
}
