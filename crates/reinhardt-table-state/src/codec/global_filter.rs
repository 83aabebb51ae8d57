//! Global filter codec: the filter text is written verbatim.

use crate::query::QueryValue;
use crate::state::StateSlice;

/// Encodes the global filter. `None` and the default are omitted.
pub fn encode(value: &Option<String>, default: &Option<String>) -> Option<String> {
	if value == default {
		return None;
	}
	value.clone()
}

/// Decodes the global filter.
pub fn decode(raw: Option<&QueryValue>, default: &Option<String>) -> Option<String> {
	match raw {
		None => default.clone(),
		Some(raw) => match super::single(StateSlice::GlobalFilter, Some(raw)) {
			Some(value) => Some(value.to_string()),
			None => default.clone(),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Some("john"), None, Some("john"))]
	#[case(None, None, None)]
	#[case(Some("all"), Some("all"), None)]
	#[case(None, Some("all"), None)]
	#[case(Some(""), None, Some(""))]
	fn test_encode(
		#[case] value: Option<&str>,
		#[case] default: Option<&str>,
		#[case] expected: Option<&str>,
	) {
		let value = value.map(str::to_string);
		let default = default.map(str::to_string);

		assert_eq!(encode(&value, &default).as_deref(), expected);
	}

	#[rstest]
	fn test_decode_missing_yields_default() {
		assert_eq!(decode(None, &None), None);
		assert_eq!(decode(None, &Some("all".to_string())), Some("all".to_string()));
	}

	#[rstest]
	fn test_decode_single() {
		let raw = QueryValue::from("john");
		assert_eq!(decode(Some(&raw), &None), Some("john".to_string()));
	}

	#[rstest]
	fn test_decode_multi_falls_back() {
		let raw = QueryValue::Multi(vec!["a".to_string(), "b".to_string()]);
		assert_eq!(decode(Some(&raw), &Some("x".to_string())), Some("x".to_string()));
	}
}
