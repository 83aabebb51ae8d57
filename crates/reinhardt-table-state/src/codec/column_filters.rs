//! Column filters codec.
//!
//! Each filter is written as `id.<value>` where the value is serialized to
//! JSON and then percent-escaped, so strings, numbers and arrays keep their
//! type: `name.%22John%22,age.%5B18%2C65%5D`.

use super::{
	ENTRY_SEPARATOR, FIELD_SEPARATOR, escape_id, fallback, single, split_entries, unescape_id,
};
use crate::query::QueryValue;
use crate::state::{ColumnFilter, StateSlice};

/// Encodes column filters, keeping their order.
pub fn encode(value: &[ColumnFilter], default: &[ColumnFilter]) -> Option<String> {
	if value == default {
		return None;
	}
	let entries: Vec<String> = value
		.iter()
		.map(|filter| {
			format!(
				"{}{}{}",
				escape_id(&filter.id),
				FIELD_SEPARATOR,
				urlencoding::encode(&filter.value.to_string())
			)
		})
		.collect();
	Some(entries.join(&ENTRY_SEPARATOR.to_string()))
}

/// Decodes column filters. Any malformed entry discards the whole value.
pub fn decode(raw: Option<&QueryValue>, default: &[ColumnFilter]) -> Vec<ColumnFilter> {
	let Some(raw) = raw else {
		return default.to_vec();
	};
	let Some(raw) = single(StateSlice::ColumnFilters, Some(raw)) else {
		return default.to_vec();
	};

	split_entries(raw)
		.map(parse_entry)
		.collect::<Option<Vec<_>>>()
		.unwrap_or_else(|| fallback(StateSlice::ColumnFilters, raw, &default.to_vec()))
}

fn parse_entry(entry: &str) -> Option<ColumnFilter> {
	let (id, value) = entry.split_once(FIELD_SEPARATOR)?;
	let json = urlencoding::decode(value).ok()?;
	Some(ColumnFilter {
		id: unescape_id(id)?,
		value: serde_json::from_str(&json).ok()?,
	})
}
