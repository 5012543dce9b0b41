//! Opaque native object types.
//!
//! The native library never exposes the layout of these objects; they are
//! only ever handled through pointers.

macro_rules! opaque {
	($($name:ident),* $(,)?) => {
		$(
			#[repr(C)]
			pub struct $name {
				_private: [u8; 0],
			}
		)*
	};
}

opaque!(
	sp_session,
	sp_track,
	sp_album,
	sp_artist,
	sp_playlist,
	sp_playlistcontainer,
	sp_user,
	sp_link,
	sp_albumbrowse,
	sp_artistbrowse,
);

/// `sp_linktype`
pub type sp_linktype = core::ffi::c_int;

pub const SP_LINKTYPE_INVALID: sp_linktype = 0;
pub const SP_LINKTYPE_TRACK: sp_linktype = 1;
pub const SP_LINKTYPE_ALBUM: sp_linktype = 2;
pub const SP_LINKTYPE_ARTIST: sp_linktype = 3;
pub const SP_LINKTYPE_SEARCH: sp_linktype = 4;
pub const SP_LINKTYPE_PLAYLIST: sp_linktype = 5;
pub const SP_LINKTYPE_PROFILE: sp_linktype = 6;
pub const SP_LINKTYPE_STARRED: sp_linktype = 7;
pub const SP_LINKTYPE_LOCALTRACK: sp_linktype = 8;
pub const SP_LINKTYPE_IMAGE: sp_linktype = 9;

/// `sp_artistbrowse_type`
pub type sp_artistbrowse_type = core::ffi::c_int;

pub const SP_ARTISTBROWSE_FULL: sp_artistbrowse_type = 0;
pub const SP_ARTISTBROWSE_NO_TRACKS: sp_artistbrowse_type = 1;
pub const SP_ARTISTBROWSE_NO_ALBUMS: sp_artistbrowse_type = 2;

/// `albumbrowse_complete_cb`
pub type albumbrowse_complete_cb =
	unsafe extern "C" fn(result: *mut sp_albumbrowse, userdata: *mut core::ffi::c_void);

/// `artistbrowse_complete_cb`
pub type artistbrowse_complete_cb =
	unsafe extern "C" fn(result: *mut sp_artistbrowse, userdata: *mut core::ffi::c_void);
