//! Row selection codec: only selected row ids are written, `1,4,7`.

use super::{ENTRY_SEPARATOR, escape_id, fallback, single, split_entries, unescape_id};
use crate::query::QueryValue;
use crate::state::{RowSelection, StateSlice};

fn selected_ids(selection: &RowSelection) -> Vec<&str> {
	selection
		.iter()
		.filter(|(_, selected)| **selected)
		.map(|(id, _)| id.as_str())
		.collect()
}

/// Encodes the ids whose value is `true`.
///
/// Unselected entries carry no information, so two selections with the
/// same selected ids encode identically.
pub fn encode(value: &RowSelection, default: &RowSelection) -> Option<String> {
	let selected = selected_ids(value);
	if selected == selected_ids(default) {
		return None;
	}
	let ids: Vec<String> = selected.into_iter().map(escape_id).collect();
	Some(ids.join(&ENTRY_SEPARATOR.to_string()))
}

/// Decodes the selection. Every listed id maps to `true`.
pub fn decode(raw: Option<&QueryValue>, default: &RowSelection) -> RowSelection {
	let Some(raw) = raw else {
		return default.clone();
	};
	let Some(raw) = single(StateSlice::RowSelection, Some(raw)) else {
		return default.clone();
	};

	split_entries(raw)
		.map(|entry| unescape_id(entry).map(|id| (id, true)))
		.collect::<Option<RowSelection>>()
		.unwrap_or_else(|| fallback(StateSlice::RowSelection, raw, default))
}
