use std::ffi::{c_int, c_void};
use std::fmt;
use std::str::FromStr;

use hallon_sys as sys;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
	/// Signed 16-bit samples in native byte order.
	Int16NativeEndian,
}

impl SampleType {
	pub fn from_raw(raw: sys::sp_sampletype) -> Result<Self> {
		match raw {
			sys::SP_SAMPLETYPE_INT16_NATIVE_ENDIAN => Ok(Self::Int16NativeEndian),
			value => Err(Error::UnknownValue {
				kind: "sample type",
				value,
			}),
		}
	}

	pub fn as_raw(self) -> sys::sp_sampletype {
		match self {
			Self::Int16NativeEndian => sys::SP_SAMPLETYPE_INT16_NATIVE_ENDIAN,
		}
	}
}

/// Decoded `sp_audioformat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioFormat {
	pub sample_type: SampleType,
	pub sample_rate: u32,
	pub channels: u16,
}

impl AudioFormat {
	pub fn from_raw(raw: &sys::sp_audioformat) -> Result<Self> {
		let sample_type = SampleType::from_raw(raw.sample_type)?;
		let sample_rate = u32::try_from(raw.sample_rate).map_err(|_| Error::UnknownValue {
			kind: "sample rate",
			value: raw.sample_rate,
		})?;
		let channels = u16::try_from(raw.channels)
			.ok()
			.filter(|channels| *channels > 0)
			.ok_or(Error::UnknownValue {
				kind: "channel count",
				value: raw.channels,
			})?;
		Ok(Self {
			sample_type,
			sample_rate,
			channels,
		})
	}

	pub fn to_raw(&self) -> sys::sp_audioformat {
		sys::sp_audioformat {
			sample_type: self.sample_type.as_raw(),
			sample_rate: c_int::try_from(self.sample_rate).unwrap_or(c_int::MAX),
			channels: self.channels.into(),
		}
	}
}

/// Interleaved PCM frames copied out of a `music_delivery` call.
#[derive(Clone, PartialEq, Eq)]
pub struct Frames {
	samples: Vec<i16>,
	channels: u16,
}

impl Frames {
	pub fn new(samples: Vec<i16>, channels: u16) -> Self {
		Self { samples, channels }
	}

	/// Copies exactly `num_frames` frames from the SDK's buffer.
	///
	/// # Safety
	///
	/// `data` must point to at least `num_frames * format.channels` samples
	/// of `format.sample_type`, or `num_frames` must be zero.
	pub(crate) unsafe fn read(format: &AudioFormat, data: *const c_void, num_frames: usize) -> Self {
		let len = num_frames * usize::from(format.channels);
		let samples = if len == 0 || data.is_null() {
			Vec::new()
		} else {
			// SAFETY: guaranteed by the caller; the slice is copied before
			// the SDK reclaims the buffer.
			unsafe { std::slice::from_raw_parts(data.cast::<i16>(), len) }.to_vec()
		};
		Self::new(samples, format.channels)
	}

	/// Number of frames (samples per channel).
	pub fn len(&self) -> usize {
		if self.channels == 0 {
			return 0;
		}
		self.samples.len() / usize::from(self.channels)
	}

	pub fn is_empty(&self) -> bool {
		self.samples.is_empty()
	}

	pub fn channels(&self) -> u16 {
		self.channels
	}

	pub fn samples(&self) -> &[i16] {
		&self.samples
	}

	/// One slice per frame, holding one sample per channel.
	pub fn iter(&self) -> impl Iterator<Item = &[i16]> {
		self.samples.chunks_exact(usize::from(self.channels.max(1)))
	}

	pub fn into_samples(self) -> Vec<i16> {
		self.samples
	}
}

impl fmt::Debug for Frames {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Frames")
			.field("frames", &self.len())
			.field("channels", &self.channels)
			.finish()
	}
}

/// Reply to `get_audio_buffer_stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioBufferStats {
	/// Samples waiting in the output buffer.
	pub samples: i32,
	/// Dropouts since the previous query.
	pub stutter: i32,
}

impl AudioBufferStats {
	pub fn to_raw(self) -> sys::sp_audio_buffer_stats {
		sys::sp_audio_buffer_stats {
			samples: self.samples,
			stutter: self.stutter,
		}
	}
}

/// Streaming and offline-sync bitrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bitrate {
	Kbps96,
	Kbps160,
	Kbps320,
}

impl Bitrate {
	pub fn as_raw(self) -> sys::sp_bitrate {
		match self {
			Self::Kbps96 => sys::SP_BITRATE_96K,
			Self::Kbps160 => sys::SP_BITRATE_160K,
			Self::Kbps320 => sys::SP_BITRATE_320K,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Kbps96 => "96k",
			Self::Kbps160 => "160k",
			Self::Kbps320 => "320k",
		}
	}
}

impl FromStr for Bitrate {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"96k" => Ok(Self::Kbps96),
			"160k" => Ok(Self::Kbps160),
			"320k" => Ok(Self::Kbps320),
			other => Err(Error::validation(format!("unknown bitrate {other:?}, expected 96k, 160k or 320k"))),
		}
	}
}

impl fmt::Display for Bitrate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn stereo() -> sys::sp_audioformat {
		sys::sp_audioformat {
			sample_type: sys::SP_SAMPLETYPE_INT16_NATIVE_ENDIAN,
			sample_rate: 44100,
			channels: 2,
		}
	}

	#[test]
	fn oversized_sample_rate_saturates() {
		let mut format = AudioFormat::from_raw(&stereo()).unwrap();
		format.sample_rate = u32::MAX;
		assert_eq!(format.to_raw().sample_rate, c_int::MAX);
		format.sample_rate = 48000;
		assert_eq!(format.to_raw().sample_rate, 48000);
	}

	#[test]
	fn decodes_native_format() {
		let format = AudioFormat::from_raw(&stereo()).unwrap();
		assert_eq!(format.sample_type, SampleType::Int16NativeEndian);
		assert_eq!(format.sample_rate, 44100);
		assert_eq!(format.channels, 2);
		assert_eq!(format.to_raw(), stereo());
	}

	#[test]
	fn rejects_unknown_sample_type_and_zero_channels() {
		let mut raw = stereo();
		raw.sample_type = 7;
		assert!(matches!(
			AudioFormat::from_raw(&raw),
			Err(Error::UnknownValue { kind: "sample type", value: 7 })
		));

		let mut raw = stereo();
		raw.channels = 0;
		assert!(AudioFormat::from_raw(&raw).is_err());
	}

	#[test]
	fn reads_exactly_num_frames() {
		let format = AudioFormat::from_raw(&stereo()).unwrap();
		let buffer: Vec<i16> = (0..10).collect();

		let frames = unsafe { Frames::read(&format, buffer.as_ptr().cast(), 3) };
		assert_eq!(frames.len(), 3);
		assert_eq!(frames.samples(), &[0, 1, 2, 3, 4, 5]);
		assert_eq!(frames.iter().nth(1), Some(&[2, 3][..]));
	}

	#[test]
	fn zero_frames_never_touch_the_buffer() {
		let format = AudioFormat::from_raw(&stereo()).unwrap();
		let frames = unsafe { Frames::read(&format, std::ptr::null(), 0) };
		assert!(frames.is_empty());
		assert_eq!(frames.len(), 0);
	}

	#[test]
	fn bitrate_whitelist() {
		assert_eq!("320k".parse::<Bitrate>().unwrap().as_raw(), sys::SP_BITRATE_320K);
		assert_eq!("96k".parse::<Bitrate>().unwrap(), Bitrate::Kbps96);
		assert!("128k".parse::<Bitrate>().unwrap_err().is_validation());
	}
}
