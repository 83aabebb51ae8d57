//! Column order codec: `name,age,email`.

use super::{ENTRY_SEPARATOR, escape_id, fallback, single, split_entries, unescape_id};
use crate::query::QueryValue;
use crate::state::StateSlice;

/// Encodes the column order.
pub fn encode(value: &[String], default: &[String]) -> Option<String> {
	if value == default {
		return None;
	}
	let ids: Vec<String> = value.iter().map(|id| escape_id(id)).collect();
	Some(ids.join(&ENTRY_SEPARATOR.to_string()))
}

/// Decodes the column order.
pub fn decode(raw: Option<&QueryValue>, default: &[String]) -> Vec<String> {
	let Some(raw) = raw else {
		return default.to_vec();
	};
	let Some(raw) = single(StateSlice::ColumnOrder, Some(raw)) else {
		return default.to_vec();
	};

	split_entries(raw)
		.map(unescape_id)
		.collect::<Option<Vec<_>>>()
		.unwrap_or_else(|| fallback(StateSlice::ColumnOrder, raw, &default.to_vec()))
}
