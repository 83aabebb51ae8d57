//! Pagination codec.
//!
//! Page index and page size are two independent parameters, each omitted
//! when equal to its default. The page index is zero-based in
//! [`PaginationState`] and one-based in the URL.

use super::single;
use crate::query::QueryValue;
use crate::state::{PaginationState, StateSlice};

/// Encodes pagination as `(page_index, page_size)` parameter values.
///
/// The one-based page number saturates at `usize::MAX`.
pub fn encode(
	value: &PaginationState,
	default: &PaginationState,
) -> (Option<String>, Option<String>) {
	let page_index = (value.page_index != default.page_index)
		.then(|| value.page_index.saturating_add(1).to_string());
	let page_size = (value.page_size != default.page_size)
		.then(|| value.page_size.to_string());
	(page_index, page_size)
}

/// Decodes pagination. Each value falls back to its default independently.
pub fn decode(
	page_index: Option<&QueryValue>,
	page_size: Option<&QueryValue>,
	default: &PaginationState,
) -> PaginationState {
	PaginationState {
		page_index: parse_positive(page_index)
			.map(|page| page - 1)
			.unwrap_or(default.page_index),
		page_size: parse_positive(page_size).unwrap_or(default.page_size),
	}
}

fn parse_positive(raw: Option<&QueryValue>) -> Option<usize> {
	let raw = single(StateSlice::Pagination, raw)?;
	match raw.trim().parse::<usize>() {
		Ok(value) if value >= 1 => Some(value),
		_ => {
			tracing::debug!(
				slice = %StateSlice::Pagination,
				raw,
				"invalid page value, using default"
			);
			None
		}
	}
}
