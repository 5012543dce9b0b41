//! Ownership wrapper for native object pointers.
//!
//! A [`Handle`] pairs a non-null native pointer with its [`ObjectKind`] tag and
//! an ownership flag. Owning handles give their reference back to the SDK on
//! drop; borrowed handles never touch the reference count.
//!
//! Null never becomes a handle: [`Handle::wrap`] returns `None` for it, and
//! every `from_raw` constructor on the metadata types is built on top of it.

use std::ffi::c_void;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;
use std::sync::Arc;

use hallon_sys as sys;

use crate::native::{NativeApi, ObjectKind};

/// Native object types that can be held by a [`Handle`].
pub trait NativeObject {
	const KIND: ObjectKind;
}

macro_rules! native_object {
	($($ty:ident => $kind:ident),* $(,)?) => {
		$(impl NativeObject for sys::$ty {
			const KIND: ObjectKind = ObjectKind::$kind;
		})*
	};
}

native_object!(
	sp_track => Track,
	sp_album => Album,
	sp_artist => Artist,
	sp_playlist => Playlist,
	sp_playlistcontainer => PlaylistContainer,
	sp_user => User,
	sp_link => Link,
	sp_albumbrowse => AlbumBrowse,
	sp_artistbrowse => ArtistBrowse,
);

/// How a raw pointer is taken into a [`Handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
	/// The pointer already carries a reference (a `*_create` result); the
	/// handle takes it over and releases it on drop.
	Adopt,
	/// The pointer is borrowed from another object; the handle adds its own
	/// reference and releases it on drop.
	Retain,
	/// The handle never touches the reference count.
	Borrow,
}

pub struct Handle<T: NativeObject> {
	api: Arc<dyn NativeApi>,
	ptr: NonNull<T>,
	owned: bool,
}

// SAFETY: the SDK's reference-counted objects may be used from any thread;
// the handle only exposes the pointer through the thread-safe `NativeApi`.
unsafe impl<T: NativeObject> Send for Handle<T> {}
unsafe impl<T: NativeObject> Sync for Handle<T> {}

impl<T: NativeObject> Handle<T> {
	/// Wraps `raw`, or returns `None` when it is null.
	///
	/// # Safety
	///
	/// A non-null `raw` must be a live object of kind `T::KIND` created by
	/// `api`. With [`Ownership::Adopt`] the caller gives up one reference.
	pub unsafe fn wrap(api: &Arc<dyn NativeApi>, raw: *mut T, ownership: Ownership) -> Option<Self> {
		let ptr = NonNull::new(raw)?;
		let owned = match ownership {
			Ownership::Adopt => true,
			Ownership::Retain => {
				// SAFETY: the caller guarantees `raw` is live.
				unsafe { api.add_ref(T::KIND, ptr.as_ptr().cast()) };
				true
			}
			Ownership::Borrow => false,
		};
		Some(Self {
			api: Arc::clone(api),
			ptr,
			owned,
		})
	}

	pub fn as_ptr(&self) -> *mut T {
		self.ptr.as_ptr()
	}

	pub fn kind(&self) -> ObjectKind {
		T::KIND
	}

	pub fn is_owned(&self) -> bool {
		self.owned
	}

	pub fn api(&self) -> &Arc<dyn NativeApi> {
		&self.api
	}

	/// Gives the reference back now instead of at drop.
	pub fn release(self) {
		drop(self);
	}

	fn erased(&self) -> *mut c_void {
		self.ptr.as_ptr().cast()
	}
}

impl<T: NativeObject> Clone for Handle<T> {
	fn clone(&self) -> Self {
		if self.owned {
			// SAFETY: we hold a reference, so the object is live.
			unsafe { self.api.add_ref(T::KIND, self.erased()) };
		}
		Self {
			api: Arc::clone(&self.api),
			ptr: self.ptr,
			owned: self.owned,
		}
	}
}

impl<T: NativeObject> Drop for Handle<T> {
	fn drop(&mut self) {
		if self.owned {
			// SAFETY: this handle's reference is given back exactly once.
			unsafe { self.api.release(T::KIND, self.erased()) };
		}
	}
}

impl<T: NativeObject> PartialEq for Handle<T> {
	fn eq(&self, other: &Self) -> bool {
		self.ptr == other.ptr
	}
}

impl<T: NativeObject> Eq for Handle<T> {}

impl<T: NativeObject> Hash for Handle<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.ptr.hash(state);
	}
}

impl<T: NativeObject> fmt::Debug for Handle<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Handle")
			.field("kind", &T::KIND)
			.field("ptr", &self.ptr)
			.field("owned", &self.owned)
			.finish()
	}
}

/// Declares a metadata type that owns a [`Handle`] to `sys::$raw`.
macro_rules! handle_wrapper {
	($(#[$meta:meta])* $name:ident => $raw:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash)]
		pub struct $name {
			handle: $crate::handle::Handle<hallon_sys::$raw>,
		}

		impl $name {
			/// Wraps `raw`; `None` when it is null.
			///
			/// # Safety
			///
			/// Same contract as [`Handle::wrap`](crate::handle::Handle::wrap).
			pub unsafe fn from_raw(
				api: &std::sync::Arc<dyn $crate::native::NativeApi>,
				raw: *mut hallon_sys::$raw,
				ownership: $crate::handle::Ownership,
			) -> Option<Self> {
				// SAFETY: upheld by the caller.
				unsafe { $crate::handle::Handle::wrap(api, raw, ownership) }.map(|handle| Self { handle })
			}

			pub fn handle(&self) -> &$crate::handle::Handle<hallon_sys::$raw> {
				&self.handle
			}

			pub fn as_ptr(&self) -> *mut hallon_sys::$raw {
				self.handle.as_ptr()
			}
		}
	};
}

pub(crate) use handle_wrapper;

/// Native counts are never negative in practice; treat a negative one as empty.
pub(crate) fn count(raw: std::ffi::c_int) -> std::ffi::c_int {
	raw.max(0)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::FakeSdk;

	#[test]
	fn null_is_absence() {
		let (sdk, _controller) = FakeSdk::new();
		let api: Arc<dyn NativeApi> = sdk;
		let handle = unsafe { Handle::<sys::sp_track>::wrap(&api, std::ptr::null_mut(), Ownership::Adopt) };
		assert!(handle.is_none());
	}

	#[test]
	fn retain_and_release_balance() {
		let (sdk, controller) = FakeSdk::new();
		let raw = controller.track("Song").build();
		let api: Arc<dyn NativeApi> = sdk;

		let handle = unsafe { Handle::wrap(&api, raw, Ownership::Retain) }.unwrap();
		assert_eq!(controller.refcount(raw), 2);

		let copy = handle.clone();
		assert_eq!(controller.refcount(raw), 3);

		copy.release();
		drop(handle);
		assert_eq!(controller.refcount(raw), 1);
	}

	#[test]
	fn borrowed_handles_never_release() {
		let (sdk, controller) = FakeSdk::new();
		let raw = controller.track("Song").build();
		let api: Arc<dyn NativeApi> = sdk;

		let handle = unsafe { Handle::wrap(&api, raw, Ownership::Borrow) }.unwrap();
		let copy = handle.clone();
		drop(handle);
		drop(copy);
		assert_eq!(controller.refcount(raw), 1);
	}

	#[test]
	fn equality_follows_the_pointer() {
		let (sdk, controller) = FakeSdk::new();
		let first = controller.track("Same").build();
		let second = controller.track("Same").build();
		let api: Arc<dyn NativeApi> = sdk;

		let a = unsafe { Handle::wrap(&api, first, Ownership::Retain) }.unwrap();
		let b = unsafe { Handle::wrap(&api, first, Ownership::Borrow) }.unwrap();
		let c = unsafe { Handle::wrap(&api, second, Ownership::Retain) }.unwrap();
		assert_eq!(a, b);
		assert_ne!(a, c);
	}
}
