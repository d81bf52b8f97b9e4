//! Activity selection and the bounded-depth hierarchy expansion.
//!
//! Selecting an activity "with descendants" matches the activity itself, its children and its
//! grandchildren. Deeper levels are deliberately not matched; [`DESCENDANT_DEPTH`] is the only
//! knob and both the SQL renderer and [`ActivityTree::expand`] read it.

use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

use crate::{Error, Result};

/// Number of levels below the selected activity that "include descendants" reaches.
pub const DESCENDANT_DEPTH: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivitySelection {
	pub activity_id: Uuid,
	pub include_descendants: bool,
}
impl ActivitySelection {
	pub fn exact(activity_id: Uuid) -> Self {
		Self { activity_id, include_descendants: false }
	}

	pub fn with_descendants(activity_id: Uuid) -> Self {
		Self { activity_id, include_descendants: true }
	}

	/// Levels below `activity_id` that the selection covers: `0` for an exact match.
	pub fn depth(&self) -> usize {
		if self.include_descendants { DESCENDANT_DEPTH } else { 0 }
	}
}

/// Arena of activities keyed by identifier with parent links, mirroring the `activities` table.
///
/// Queries never load the tree; the SQL renderer expands selections inside the database. The
/// arena is the in-memory reference model that tests compare the rendered expansion against.
#[derive(Clone, Debug, Default)]
pub struct ActivityTree {
	parents: HashMap<Uuid, Option<Uuid>>,
	children: HashMap<Uuid, Vec<Uuid>>,
}
impl ActivityTree {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds one activity. The parent, when given, must already be present, which keeps the arena
	/// acyclic by construction.
	pub fn insert(&mut self, activity_id: Uuid, parent_id: Option<Uuid>) -> Result<()> {
		if self.parents.contains_key(&activity_id) {
			return Err(Error::InvalidRequest {
				message: format!("activity {activity_id} is already present."),
			});
		}
		if let Some(parent_id) = parent_id {
			if !self.parents.contains_key(&parent_id) {
				return Err(Error::InvalidRequest {
					message: format!("parent activity {parent_id} is unknown."),
				});
			}

			self.children.entry(parent_id).or_default().push(activity_id);
		}

		self.parents.insert(activity_id, parent_id);

		Ok(())
	}

	pub fn contains(&self, activity_id: Uuid) -> bool {
		self.parents.contains_key(&activity_id)
	}

	pub fn parent(&self, activity_id: Uuid) -> Option<Uuid> {
		self.parents.get(&activity_id).copied().flatten()
	}

	/// Identifiers matched by `selection`. Empty when the selected activity is unknown.
	pub fn expand(&self, selection: &ActivitySelection) -> BTreeSet<Uuid> {
		let mut matched = BTreeSet::new();

		if !self.contains(selection.activity_id) {
			return matched;
		}

		let mut frontier = vec![selection.activity_id];

		matched.insert(selection.activity_id);

		for _ in 0..selection.depth() {
			let next: Vec<Uuid> = frontier
				.iter()
				.filter_map(|id| self.children.get(id))
				.flatten()
				.copied()
				.collect();

			if next.is_empty() {
				break;
			}

			matched.extend(next.iter().copied());

			frontier = next;
		}

		matched
	}
}
