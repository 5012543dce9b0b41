//! Raw ABI types for libspotify.
//!
//! This crate contains the `#[repr(C)]` declarations shared with the native
//! media SDK. These types represent the "ABI layer" - the shapes of data as
//! the native library reads and writes them.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond trivial constructors
//! * 1:1 with `libspotify/api.h` (API version 12)
//! * Stable: Changes only when the native ABI changes
//!
//! Safe, owning wrappers are built on top of these types in `hallon`.
//! The `extern "C"` symbol declarations are only compiled with the `link`
//! feature, so the crate can be used without libspotify installed.

#![allow(non_camel_case_types)]

pub mod audio;
pub mod callbacks;
pub mod config;
pub mod error;
#[cfg(feature = "link")]
pub mod ffi;
pub mod objects;
pub mod offline;
pub mod settings;

pub use audio::*;
pub use callbacks::*;
pub use config::*;
pub use error::*;
pub use objects::*;
pub use offline::*;
pub use settings::*;

/// API version this crate's layouts correspond to.
pub const SPOTIFY_API_VERSION: core::ffi::c_int = 12;
