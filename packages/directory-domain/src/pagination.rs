use serde::{Deserialize, Serialize};

use crate::{Cursor, Error, Result};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Forward-only keyset pagination request. `limit` is always within `1..=MAX_PAGE_LIMIT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
	cursor: Option<String>,
	limit: u32,
}
impl Pagination {
	pub fn new(cursor: Option<String>, limit: Option<u32>) -> Result<Self> {
		let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);

		if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
			return Err(Error::InvalidRequest {
				message: format!("limit must be between 1 and {MAX_PAGE_LIMIT}."),
			});
		}

		Ok(Self { cursor, limit })
	}

	pub fn cursor(&self) -> Option<&str> {
		self.cursor.as_deref()
	}

	pub fn limit(&self) -> u32 {
		self.limit
	}

	/// Rows to request from the store: one past the page so the assembler can see whether more
	/// data remains without a count query.
	pub fn fetch_limit(&self) -> i64 {
		i64::from(self.limit) + 1
	}

	pub fn decode_cursor(&self) -> Result<Option<Cursor>> {
		self.cursor.as_deref().map(Cursor::decode).transpose()
	}
}
impl Default for Pagination {
	fn default() -> Self {
		Self { cursor: None, limit: DEFAULT_PAGE_LIMIT }
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
	pub items: Vec<T>,
	pub next_cursor: Option<String>,
}
impl<T> Page<T> {
	/// Turns the `limit + 1` rows of a keyset scan into a page.
	///
	/// When more than `limit` rows came back, the surplus is dropped and `next_cursor` names the
	/// last retained row. Otherwise this is the final page and `next_cursor` is `None`.
	pub fn from_overfetch<F>(mut rows: Vec<T>, limit: u32, key: F) -> Result<Self>
	where
		F: Fn(&T) -> Cursor,
	{
		let limit = limit as usize;

		if rows.len() <= limit {
			return Ok(Self { items: rows, next_cursor: None });
		}

		rows.truncate(limit);

		let next_cursor = rows.last().map(|row| key(row).encode()).transpose()?;

		Ok(Self { items: rows, next_cursor })
	}

	pub fn map<U, F>(self, f: F) -> Page<U>
	where
		F: FnMut(T) -> U,
	{
		Page { items: self.items.into_iter().map(f).collect(), next_cursor: self.next_cursor }
	}
}
