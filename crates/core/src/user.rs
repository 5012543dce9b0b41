use crate::handle::handle_wrapper;

handle_wrapper!(
	/// A user profile.
	User => sp_user
);

impl User {
	pub fn is_loaded(&self) -> bool {
		// SAFETY: the handle keeps the user alive.
		unsafe { self.handle.api().user_is_loaded(self.as_ptr()) }
	}

	/// Login name; stable across sessions.
	pub fn canonical_name(&self) -> String {
		// SAFETY: the handle keeps the user alive.
		unsafe { self.handle.api().user_canonical_name(self.as_ptr()) }
	}

	/// Falls back to the canonical name until the profile is loaded.
	pub fn display_name(&self) -> String {
		// SAFETY: the handle keeps the user alive.
		unsafe { self.handle.api().user_display_name(self.as_ptr()) }
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::handle::Ownership;
	use crate::native::NativeApi;
	use crate::testing::FakeSdk;

	#[test]
	fn names() {
		let (sdk, controller) = FakeSdk::new();
		let raw = controller.user("kim").display_name("Kim W").build();
		let api: Arc<dyn NativeApi> = sdk;

		let user = unsafe { User::from_raw(&api, raw, Ownership::Adopt) }.unwrap();
		assert_eq!(user.canonical_name(), "kim");
		assert_eq!(user.display_name(), "Kim W");
	}
}
