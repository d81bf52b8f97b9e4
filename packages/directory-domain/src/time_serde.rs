//! RFC 3339 timestamps that keep both the sub-second digits and the UTC offset intact.

use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
use time::{OffsetDateTime, error::Format, format_description::well_known::Rfc3339};

pub fn format(value: &OffsetDateTime) -> Result<String, Format> {
	value.format(&Rfc3339)
}

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let formatted = format(value).map_err(S::Error::custom)?;

	serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	OffsetDateTime::parse(&raw, &Rfc3339)
		.map_err(|err| D::Error::custom(format!("timestamp {raw:?} is not RFC 3339: {err}")))
}
