//! Opaque keyset cursors.
//!
//! A cursor names the last row of a page by its `(created_at, id)` sort key. On the wire it is the
//! URL-safe, unpadded base64 of a small JSON object, so callers can pass it through query strings
//! untouched and never see how rows are stored. Ordering is defined on the decoded tuple only.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result};

/// Keyset position. The derived `Ord` compares `created_at` first and breaks ties on `id`, which
/// is the same total order the compiled queries scan in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
	pub created_at: OffsetDateTime,
	pub id: Uuid,
}
impl Cursor {
	pub fn new(created_at: OffsetDateTime, id: Uuid) -> Self {
		Self { created_at, id }
	}

	pub fn encode(&self) -> Result<String> {
		let payload = CursorPayload { created_at: self.created_at, id: self.id };
		let json = serde_json::to_vec(&payload)
			.map_err(|err| Error::CursorEncoding { message: err.to_string() })?;

		Ok(URL_SAFE_NO_PAD.encode(json))
	}

	pub fn decode(raw: &str) -> Result<Self> {
		if raw.is_empty() {
			return Err(Error::invalid_cursor("cursor must not be empty."));
		}

		let bytes = URL_SAFE_NO_PAD
			.decode(raw)
			.map_err(|_| Error::invalid_cursor("cursor is not valid base64."))?;
		let payload: CursorPayload = serde_json::from_slice(&bytes)
			.map_err(|err| Error::invalid_cursor(format!("cursor payload is malformed: {err}.")))?;

		Ok(Self { created_at: payload.created_at, id: payload.id })
	}

	/// True when `self` sorts strictly after `other` in keyset order. This is the rule the
	/// `(created_at, id) > (..)` predicate enforces in SQL; tests use it as the reference model.
	pub fn is_after(&self, other: &Self) -> bool {
		self > other
	}
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CursorPayload {
	#[serde(with = "crate::time_serde")]
	created_at: OffsetDateTime,
	id: Uuid,
}
