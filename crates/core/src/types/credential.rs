use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

/// Secret half of a login.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
	Password(String),
	/// Opaque blob previously handed out by `credentials_blob_updated`.
	Blob(Blob),
}

impl Credential {
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Password(password) => password.is_empty(),
			Self::Blob(blob) => blob.as_str().is_empty(),
		}
	}
}

impl From<&str> for Credential {
	fn from(password: &str) -> Self {
		Self::Password(password.to_owned())
	}
}

impl From<String> for Credential {
	fn from(password: String) -> Self {
		Self::Password(password)
	}
}

impl From<Blob> for Credential {
	fn from(blob: Blob) -> Self {
		Self::Blob(blob)
	}
}

impl fmt::Debug for Credential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Password(_) => f.write_str("Password(<redacted>)"),
			Self::Blob(_) => f.write_str("Blob(<redacted>)"),
		}
	}
}

/// Reusable login credential issued by the SDK.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Blob(String);

impl Blob {
	pub fn new(blob: impl Into<String>) -> Self {
		Self(blob.into())
	}

	/// Encodes stored raw bytes into the textual form the SDK expects.
	pub fn from_bytes(bytes: &[u8]) -> Self {
		Self(STANDARD.encode(bytes))
	}

	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		STANDARD
			.decode(&self.0)
			.map_err(|err| Error::validation(format!("credentials blob is not base64: {err}")))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for Blob {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Blob").field(&format_args!("{} bytes", self.0.len())).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blobs_go_through_base64() {
		let blob = Blob::from_bytes(b"\x00\x01secret");
		assert_eq!(blob.as_str(), "AAFzZWNyZXQ=");
		assert_eq!(blob.to_bytes().unwrap(), b"\x00\x01secret");
		assert!(Blob::new("not base64!").to_bytes().unwrap_err().is_validation());
	}

	#[test]
	fn debug_output_hides_secrets() {
		let password = Credential::from("hunter2");
		assert!(!format!("{password:?}").contains("hunter2"));
		let blob = Credential::from(Blob::new("c2VjcmV0"));
		assert!(!format!("{blob:?}").contains("c2VjcmV0"));
	}

	#[test]
	fn emptiness() {
		assert!(Credential::from("").is_empty());
		assert!(Credential::from(Blob::new("")).is_empty());
		assert!(!Credential::from("x").is_empty());
	}
}
