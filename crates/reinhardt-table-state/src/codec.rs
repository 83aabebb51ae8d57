//! Query-string codecs for each table state slice.
//!
//! Each submodule provides a pure `encode`/`decode` pair:
//!
//! - `encode(value, default)` returns `None` when the parameter should be
//!   omitted (the value equals its default).
//! - `decode(raw, default)` never fails: missing, malformed or
//!   type-mismatched input yields the default.
//!
//! [`encode_slice`] and [`decode_slice`] route through the caller's
//! overrides when configured and apply the configured parameter names.
//!
//! | Slice | Format |
//! |-------|--------|
//! | global filter | `globalFilter=john` |
//! | sorting | `sorting=name.desc,age.asc` |
//! | column filters | `columnFilters=name.%22John%22,age.%5B18%2C65%5D` |
//! | column order | `columnOrder=name,age,email` |
//! | row selection | `rowSelection=1,4,7` |
//! | pagination | `pageIndex=3&pageSize=20` (page index is one-based) |

pub mod column_filters;
pub mod column_order;
pub mod global_filter;
pub mod pagination;
pub mod row_selection;
pub mod sorting;

use crate::config::{DecodeFn, EncodeFn, EncodedPagination, UrlStateConfig};
use crate::error::{CodecError, Result};
use crate::query::{Query, QueryUpdate, QueryValue};
use crate::state::{StateSlice, TableState};
use std::borrow::Cow;

/// Separator between entries of a multi-entry parameter.
pub const ENTRY_SEPARATOR: char = ',';

/// Separator between a column id and its payload.
pub const FIELD_SEPARATOR: char = '.';

/// Percent-escapes a column or row id so it never contains a separator.
pub(crate) fn escape_id(id: &str) -> String {
	urlencoding::encode(id).replace(FIELD_SEPARATOR, "%2E")
}

/// Reverses [`escape_id`]. Empty ids are rejected.
pub(crate) fn unescape_id(raw: &str) -> Option<String> {
	if raw.is_empty() {
		return None;
	}
	urlencoding::decode(raw).ok().map(Cow::into_owned)
}

/// Splits a multi-entry value, treating the empty string as no entries.
pub(crate) fn split_entries(raw: &str) -> impl Iterator<Item = &str> {
	raw.split(ENTRY_SEPARATOR).filter(move |_| !raw.is_empty())
}

/// Extracts a single string, logging a type mismatch.
pub(crate) fn single<'a>(slice: StateSlice, raw: Option<&'a QueryValue>) -> Option<&'a str> {
	let raw = raw?;
	let value = raw.as_single();
	if value.is_none() {
		tracing::debug!(%slice, "repeated parameter where a single value was expected");
	}
	value
}

/// Logs a decode fallback and returns the default.
pub(crate) fn fallback<T: Clone>(slice: StateSlice, raw: &str, default: &T) -> T {
	tracing::debug!(%slice, raw, "malformed query value, falling back to default");
	default.clone()
}

fn run_encoder<T>(
	slice: StateSlice,
	value: &T,
	custom: Option<&EncodeFn<T>>,
	builtin: impl FnOnce() -> Option<String>,
) -> Result<Option<QueryValue>> {
	match custom {
		Some(encode) => encode(value).map_err(|source| CodecError::Encoder { slice, source }),
		None => Ok(builtin().map(QueryValue::Single)),
	}
}

fn run_decoder<T>(
	slice: StateSlice,
	raw: Option<&QueryValue>,
	custom: Option<&DecodeFn<T>>,
	builtin: impl FnOnce() -> T,
) -> Result<T> {
	match custom {
		Some(decode) => decode(raw).map_err(|source| CodecError::Decoder { slice, source }),
		None => Ok(builtin()),
	}
}

/// Encodes one slice of `state` into parameter writes and deletions.
///
/// Every parameter owned by the slice appears in the result: `Some` to
/// write it, `None` to delete it.
///
/// # Errors
///
/// Returns [`CodecError::Encoder`] if an encoder override fails.
pub fn encode_slice(
	slice: StateSlice,
	state: &TableState,
	config: &UrlStateConfig,
) -> Result<QueryUpdate> {
	let names = &config.param_names;
	let defaults = &config.default_values;
	let encoders = &config.encoders;
	let mut update = QueryUpdate::new();

	match slice {
		StateSlice::GlobalFilter => {
			let value = run_encoder(
				slice,
				&state.global_filter,
				encoders.global_filter.as_ref(),
				|| global_filter::encode(&state.global_filter, &defaults.global_filter),
			)?;
			update.set(names.global_filter.clone(), value);
		}
		StateSlice::Sorting => {
			let value = run_encoder(slice, &state.sorting, encoders.sorting.as_ref(), || {
				sorting::encode(&state.sorting, &defaults.sorting)
			})?;
			update.set(names.sorting.clone(), value);
		}
		StateSlice::ColumnFilters => {
			let value = run_encoder(
				slice,
				&state.column_filters,
				encoders.column_filters.as_ref(),
				|| column_filters::encode(&state.column_filters, &defaults.column_filters),
			)?;
			update.set(names.column_filters.clone(), value);
		}
		StateSlice::ColumnOrder => {
			let value = run_encoder(slice, &state.column_order, encoders.column_order.as_ref(), || {
				column_order::encode(&state.column_order, &defaults.column_order)
			})?;
			update.set(names.column_order.clone(), value);
		}
		StateSlice::RowSelection => {
			let value = run_encoder(
				slice,
				&state.row_selection,
				encoders.row_selection.as_ref(),
				|| row_selection::encode(&state.row_selection, &defaults.row_selection),
			)?;
			update.set(names.row_selection.clone(), value);
		}
		StateSlice::Pagination => {
			let encoded = match encoders.pagination.as_ref() {
				Some(encode) => encode(&state.pagination)
					.map_err(|source| CodecError::Encoder { slice, source })?,
				None => {
					let (page_index, page_size) =
						pagination::encode(&state.pagination, &defaults.pagination);
					EncodedPagination {
						page_index: page_index.map(QueryValue::Single),
						page_size: page_size.map(QueryValue::Single),
					}
				}
			};
			update.set(names.pagination.page_index.clone(), encoded.page_index);
			update.set(names.pagination.page_size.clone(), encoded.page_size);
		}
	}

	tracing::trace!(%slice, ?update, "encoded slice");
	Ok(update)
}

/// Encodes every slice of `state`.
///
/// # Errors
///
/// Returns [`CodecError::Encoder`] if an encoder override fails.
pub fn encode_state(state: &TableState, config: &UrlStateConfig) -> Result<QueryUpdate> {
	let mut update = QueryUpdate::new();
	for slice in StateSlice::ALL {
		update.extend(encode_slice(slice, state, config)?);
	}
	Ok(update)
}

/// Decodes one slice from `query` into `state`.
///
/// # Errors
///
/// Returns [`CodecError::Decoder`] if a decoder override fails. The
/// built-in codecs never fail.
pub fn decode_slice(
	slice: StateSlice,
	query: &Query,
	config: &UrlStateConfig,
	state: &mut TableState,
) -> Result<()> {
	let names = &config.param_names;
	let defaults = &config.default_values;
	let decoders = &config.decoders;

	match slice {
		StateSlice::GlobalFilter => {
			let raw = query.get(&names.global_filter);
			state.global_filter = run_decoder(slice, raw, decoders.global_filter.as_ref(), || {
				global_filter::decode(raw, &defaults.global_filter)
			})?;
		}
		StateSlice::Sorting => {
			let raw = query.get(&names.sorting);
			state.sorting = run_decoder(slice, raw, decoders.sorting.as_ref(), || {
				sorting::decode(raw, &defaults.sorting)
			})?;
		}
		StateSlice::ColumnFilters => {
			let raw = query.get(&names.column_filters);
			state.column_filters = run_decoder(slice, raw, decoders.column_filters.as_ref(), || {
				column_filters::decode(raw, &defaults.column_filters)
			})?;
		}
		StateSlice::ColumnOrder => {
			let raw = query.get(&names.column_order);
			state.column_order = run_decoder(slice, raw, decoders.column_order.as_ref(), || {
				column_order::decode(raw, &defaults.column_order)
			})?;
		}
		StateSlice::RowSelection => {
			let raw = query.get(&names.row_selection);
			state.row_selection = run_decoder(slice, raw, decoders.row_selection.as_ref(), || {
				row_selection::decode(raw, &defaults.row_selection)
			})?;
		}
		StateSlice::Pagination => {
			let page_index = query.get(&names.pagination.page_index);
			let page_size = query.get(&names.pagination.page_size);
			state.pagination = match decoders.pagination.as_ref() {
				Some(decode) => decode(page_index, page_size)
					.map_err(|source| CodecError::Decoder { slice, source })?,
				None => pagination::decode(page_index, page_size, &defaults.pagination),
			};
		}
	}
	Ok(())
}

/// Decodes a full [`TableState`] from `query`.
///
/// # Errors
///
/// Returns [`CodecError::Decoder`] if a decoder override fails.
pub fn decode_state(query: &Query, config: &UrlStateConfig) -> Result<TableState> {
	let mut state = config.default_values.clone();
	for slice in StateSlice::ALL {
		decode_slice(slice, query, config, &mut state)?;
	}
	Ok(state)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{Decoders, Encoders, ParamNames};
	use crate::state::{ColumnFilter, ColumnSort, PaginationState};
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn config() -> UrlStateConfig {
		UrlStateConfig::default()
	}

	#[fixture]
	fn populated() -> TableState {
		TableState {
			global_filter: Some("john doe".to_string()),
			sorting: vec![ColumnSort::desc("name"), ColumnSort::asc("age")],
			column_filters: vec![
				ColumnFilter::new("name", "John"),
				ColumnFilter::new("age", json!([18, 65])),
			],
			column_order: vec!["name".to_string(), "age".to_string()],
			row_selection: [("1".to_string(), true), ("4".to_string(), true)].into(),
			pagination: PaginationState::new(2, 20),
		}
	}

	#[rstest]
	#[case("a.b,c", "a%2Eb%2Cc")]
	#[case("first name", "first%20name")]
	#[case("plain", "plain")]
	fn test_escape_id(#[case] id: &str, #[case] expected: &str) {
		assert_eq!(escape_id(id), expected);
		assert_eq!(unescape_id(expected).as_deref(), Some(id));
	}

	#[rstest]
	fn test_split_entries_empty() {
		assert_eq!(split_entries("").count(), 0);
		assert_eq!(split_entries("a,b").collect::<Vec<_>>(), vec!["a", "b"]);
	}

	#[rstest]
	fn test_encode_state_default_writes_nothing(config: UrlStateConfig) {
		let update = encode_state(&TableState::default(), &config).unwrap();

		assert_eq!(update.len(), 7);
		assert!(update.iter().all(|(_, value)| value.is_none()));
	}

	#[rstest]
	fn test_encode_state_populated(config: UrlStateConfig, populated: TableState) {
		let mut query = Query::new();
		query.apply(&encode_state(&populated, &config).unwrap());

		assert_eq!(query.get_single("globalFilter"), Some("john doe"));
		assert_eq!(query.get_single("sorting"), Some("name.desc,age.asc"));
		assert_eq!(
			query.get_single("columnFilters"),
			Some("name.%22John%22,age.%5B18%2C65%5D")
		);
		assert_eq!(query.get_single("columnOrder"), Some("name,age"));
		assert_eq!(query.get_single("rowSelection"), Some("1,4"));
		assert_eq!(query.get_single("pageIndex"), Some("3"));
		assert_eq!(query.get_single("pageSize"), Some("20"));
	}

	#[rstest]
	fn test_decode_state_inverts_encode_state(config: UrlStateConfig, populated: TableState) {
		let mut query = Query::new();
		query.apply(&encode_state(&populated, &config).unwrap());

		assert_eq!(decode_state(&query, &config).unwrap(), populated);
	}

	#[rstest]
	fn test_decode_state_through_search_params(config: UrlStateConfig, populated: TableState) {
		let mut query = Query::new();
		query.apply(&encode_state(&populated, &config).unwrap());
		let reparsed = Query::parse(&query.to_search_params());

		assert_eq!(decode_state(&reparsed, &config).unwrap(), populated);
	}

	#[rstest]
	fn test_decode_empty_query_yields_defaults() {
		let defaults = TableState {
			sorting: vec![ColumnSort::asc("id")],
			pagination: PaginationState::new(0, 50),
			..TableState::default()
		};
		let config = UrlStateConfig::new().with_default_values(defaults.clone());

		assert_eq!(decode_state(&Query::new(), &config).unwrap(), defaults);
	}

	#[rstest]
	fn test_custom_param_names_are_used(populated: TableState) {
		let config = UrlStateConfig::new().with_param_names(
			ParamNames::default()
				.with_global_filter("q")
				.with_pagination("page", "size"),
		);
		let mut query = Query::new();
		query.apply(&encode_state(&populated, &config).unwrap());

		assert_eq!(query.get_single("q"), Some("john doe"));
		assert_eq!(query.get_single("page"), Some("3"));
		assert_eq!(query.get_single("size"), Some("20"));
		assert!(!query.contains_key("globalFilter"));
		assert_eq!(decode_state(&query, &config).unwrap(), populated);
	}

	#[rstest]
	fn test_encoder_override_replaces_builtin(populated: TableState) {
		let config = UrlStateConfig::new().with_encoders(Encoders::new().with_sorting(|sorting| {
			Ok(Some(QueryValue::Multi(
				sorting.iter().map(|s| s.id.clone()).collect(),
			)))
		}));

		let update = encode_slice(StateSlice::Sorting, &populated, &config).unwrap();

		assert_eq!(
			update.get("sorting"),
			Some(Some(&QueryValue::Multi(vec!["name".to_string(), "age".to_string()])))
		);
	}

	#[rstest]
	fn test_encoder_override_error_propagates(populated: TableState) {
		let config = UrlStateConfig::new()
			.with_encoders(Encoders::new().with_global_filter(|_| Err("encoder exploded".into())));

		let err = encode_state(&populated, &config).unwrap_err();

		assert!(matches!(err, CodecError::Encoder { slice: StateSlice::GlobalFilter, .. }));
	}

	#[rstest]
	fn test_decoder_override_replaces_builtin() {
		let decoders = Decoders::new().with_pagination(|index, _| {
			let page = index
				.and_then(QueryValue::as_single)
				.and_then(|v| v.parse::<usize>().ok())
				.unwrap_or(0);
			Ok(PaginationState::new(page, 99))
		});
		let config = UrlStateConfig::new().with_decoders(decoders);

		let state = decode_state(&Query::parse("pageIndex=4"), &config).unwrap();

		assert_eq!(state.pagination, PaginationState::new(4, 99));
	}

	#[rstest]
	fn test_decoder_override_error_propagates() {
		let config = UrlStateConfig::new()
			.with_decoders(Decoders::new().with_row_selection(|_| Err("decoder exploded".into())));

		let err = decode_state(&Query::new(), &config).unwrap_err();

		assert_eq!(err.slice(), StateSlice::RowSelection);
	}

	#[rstest]
	fn test_malformed_values_fall_back_per_slice(config: UrlStateConfig) {
		let query = Query::parse(concat!(
			"globalFilter=ok&sorting=name.sideways&columnFilters=name.%7Bbad",
			"&pageIndex=abc&pageSize=0&globalFilter=dup",
		));

		let state = decode_state(&query, &config).unwrap();

		assert_eq!(state, TableState::default());
	}
}
