//! Sorting codec: `id.desc,id.asc`, highest priority first.

use super::{
	ENTRY_SEPARATOR, FIELD_SEPARATOR, escape_id, fallback, single, split_entries, unescape_id,
};
use crate::query::QueryValue;
use crate::state::{ColumnSort, SortDirection, StateSlice};

/// Encodes sort entries, keeping their order.
///
/// Returns `None` for the default. An empty list that differs from a
/// non-empty default encodes to the empty string.
pub fn encode(value: &[ColumnSort], default: &[ColumnSort]) -> Option<String> {
	if value == default {
		return None;
	}
	let entries: Vec<String> = value
		.iter()
		.map(|sort| {
			format!(
				"{}{}{}",
				escape_id(&sort.id),
				FIELD_SEPARATOR,
				sort.direction().as_query_suffix()
			)
		})
		.collect();
	Some(entries.join(&ENTRY_SEPARATOR.to_string()))
}

/// Decodes sort entries. Any malformed entry discards the whole value.
pub fn decode(raw: Option<&QueryValue>, default: &[ColumnSort]) -> Vec<ColumnSort> {
	let Some(raw) = raw else {
		return default.to_vec();
	};
	let Some(raw) = single(StateSlice::Sorting, Some(raw)) else {
		return default.to_vec();
	};

	split_entries(raw)
		.map(parse_entry)
		.collect::<Option<Vec<_>>>()
		.unwrap_or_else(|| fallback(StateSlice::Sorting, raw, &default.to_vec()))
}

fn parse_entry(entry: &str) -> Option<ColumnSort> {
	let (id, direction) = entry.split_once(FIELD_SEPARATOR)?;
	let direction = SortDirection::from_query_suffix(direction)?;
	Some(ColumnSort {
		id: unescape_id(id)?,
		desc: direction == SortDirection::Descending,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_encode_preserves_order_and_direction() {
		let value = vec![ColumnSort::desc("name"), ColumnSort::asc("age")];
		assert_eq!(encode(&value, &[]), Some("name.desc,age.asc".to_string()));
	}

	#[rstest]
	fn test_encode_empty_is_omitted() {
		assert_eq!(encode(&[], &[]), None);
	}

	#[rstest]
	fn test_encode_default_is_omitted() {
		let default = vec![ColumnSort::asc("id")];
		assert_eq!(encode(&default.clone(), &default), None);
	}

	#[rstest]
	fn test_encode_empty_against_non_empty_default() {
		let default = vec![ColumnSort::asc("id")];
		assert_eq!(encode(&[], &default), Some(String::new()));
		assert!(decode(Some(&QueryValue::from("")), &default).is_empty());
	}

	#[rstest]
	fn test_decode() {
		let raw = QueryValue::from("name.desc,first%20name.asc");
		assert_eq!(
			decode(Some(&raw), &[]),
			vec![ColumnSort::desc("name"), ColumnSort::asc("first name")]
		);
	}

	#[rstest]
	fn test_decode_id_with_separator() {
		let value = vec![ColumnSort::asc("user.name")];
		let encoded = encode(&value, &[]).unwrap();

		assert_eq!(encoded, "user%2Ename.asc");
		assert_eq!(decode(Some(&QueryValue::from(encoded)), &[]), value);
	}

	#[rstest]
	#[case("name")]
	#[case("name.up")]
	#[case(".asc")]
	#[case("name.asc,,age.desc")]
	fn test_decode_malformed_falls_back(#[case] input: &str) {
		let default = vec![ColumnSort::asc("id")];
		assert_eq!(decode(Some(&QueryValue::from(input)), &default), default);
	}

	#[rstest]
	fn test_decode_missing_yields_default() {
		let default = vec![ColumnSort::desc("created")];
		assert_eq!(decode(None, &default), default);
	}
}
