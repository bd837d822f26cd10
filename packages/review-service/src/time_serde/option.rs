use serde::{Deserialize as _, Deserializer, Serializer};
use time::Date;

use crate::time_serde::DATE_FORMAT;

pub fn serialize<S>(value: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	match value {
		Some(value) => crate::time_serde::serialize(value, serializer),
		None => serializer.serialize_none(),
	}
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<String>::deserialize(deserializer)?;

	match raw {
		Some(value) => Date::parse(&value, DATE_FORMAT).map(Some).map_err(serde::de::Error::custom),
		None => Ok(None),
	}
}
