//! Panic guards for `extern "C"` entry points.
//!
//! Unwinding across the native boundary is undefined behaviour. Every
//! trampoline runs its body through one of these helpers; a panic is logged
//! and replaced by the callback's neutral return value.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Extracts a readable message from a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&'static str>() {
		return (*message).to_owned();
	}
	if let Some(message) = payload.downcast_ref::<String>() {
		return message.clone();
	}
	"non-string panic payload".to_owned()
}

/// Runs `f`, swallowing a panic.
pub fn guard_void(callback: &'static str, f: impl FnOnce()) {
	guard_with_default(callback, (), f);
}

/// Runs `f`, returning `default` if it panics.
pub fn guard_with_default<T>(callback: &'static str, default: T, f: impl FnOnce() -> T) -> T {
	match panic::catch_unwind(AssertUnwindSafe(f)) {
		Ok(value) => value,
		Err(payload) => {
			tracing::error!(
				callback,
				panic = %panic_message(payload.as_ref()),
				"handler panicked inside a native callback"
			);
			default
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn passes_values_through() {
		assert_eq!(guard_with_default("test", 0, || 7), 7);
	}

	#[test]
	fn panics_become_the_default() {
		assert_eq!(guard_with_default("test", -1, || panic!("boom")), -1);
		guard_void("test", || panic!("{} failed", "handler"));
	}

	#[test]
	fn messages_from_both_payload_kinds() {
		let payload = panic::catch_unwind(|| panic!("static")).unwrap_err();
		assert_eq!(panic_message(payload.as_ref()), "static");
		let payload = panic::catch_unwind(|| panic!("formatted {}", 1)).unwrap_err();
		assert_eq!(panic_message(payload.as_ref()), "formatted 1");
		let payload = panic::catch_unwind(|| std::panic::panic_any(5_u8)).unwrap_err();
		assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
	}
}
