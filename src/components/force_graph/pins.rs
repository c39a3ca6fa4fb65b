//! The set of pinned node ids.
//!
//! Owned by the app rather than the canvas, so pins survive graph reloads and
//! remounting the component.

use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PinSet {
	ids: HashSet<String>,
}

impl PinSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.ids.contains(id)
	}

	pub fn pin(&mut self, id: impl Into<String>) {
		self.ids.insert(id.into());
	}

	pub fn unpin(&mut self, id: &str) -> bool {
		self.ids.remove(id)
	}

	/// Pin an unpinned node or unpin a pinned one. Returns the new pinned state.
	pub fn toggle(&mut self, id: &str) -> bool {
		if self.ids.remove(id) {
			false
		} else {
			self.ids.insert(id.to_string());
			true
		}
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}
}
