use std::sync::Arc;

use sift_matcher::normalize_token;
use sift_registry::{Command, RegistrySnapshot};

/// Direct name lookup, then alias lookup.
pub struct ExactResolver<'a> {
	snap: &'a RegistrySnapshot,
}

impl<'a> ExactResolver<'a> {
	pub fn new(snap: &'a RegistrySnapshot) -> Self {
		Self { snap }
	}

	pub fn resolve(&self, token: &str) -> Option<&'a Arc<Command>> {
		self.snap.get(&normalize_token(token))
	}
}
