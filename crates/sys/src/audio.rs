//! Audio delivery structures.

use core::ffi::c_int;

/// `sp_sampletype`
pub type sp_sampletype = c_int;

/// 16-bit signed integer samples in native byte order.
pub const SP_SAMPLETYPE_INT16_NATIVE_ENDIAN: sp_sampletype = 0;

/// `sp_audioformat`, passed by pointer to `music_delivery`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct sp_audioformat {
	pub sample_type: sp_sampletype,
	pub sample_rate: c_int,
	pub channels: c_int,
}

/// `sp_audio_buffer_stats`, filled in by `get_audio_buffer_stats`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct sp_audio_buffer_stats {
	/// Samples currently held in the application's output buffer.
	pub samples: c_int,
	/// Dropouts since the last call.
	pub stutter: c_int,
}

/// `sp_bitrate`
pub type sp_bitrate = c_int;

pub const SP_BITRATE_160K: sp_bitrate = 0;
pub const SP_BITRATE_320K: sp_bitrate = 1;
pub const SP_BITRATE_96K: sp_bitrate = 2;
