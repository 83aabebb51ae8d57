//! Table state model.
//!
//! [`TableState`] is the in-memory snapshot a table component owns. It is
//! split into six independent slices ([`StateSlice`]), each of which maps to
//! its own query parameter(s).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Row selection: row id to selected flag.
pub type RowSelection = BTreeMap<String, bool>;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
	/// Ascending order
	Ascending,
	/// Descending order
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Returns the suffix written after a column id in the `sorting` parameter
	pub fn as_query_suffix(&self) -> &'static str {
		match self {
			Self::Ascending => "asc",
			Self::Descending => "desc",
		}
	}

	/// Parses a sort direction suffix (`"asc"` or `"desc"`)
	pub fn from_query_suffix(s: &str) -> Option<Self> {
		match s {
			"asc" => Some(Self::Ascending),
			"desc" => Some(Self::Descending),
			_ => None,
		}
	}
}

/// Sort entry for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSort {
	/// Column id.
	pub id: String,
	/// Whether the column is sorted descending.
	pub desc: bool,
}

impl ColumnSort {
	/// Creates an ascending sort entry.
	pub fn asc(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			desc: false,
		}
	}

	/// Creates a descending sort entry.
	pub fn desc(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			desc: true,
		}
	}

	/// Returns the sort direction.
	pub fn direction(&self) -> SortDirection {
		if self.desc {
			SortDirection::Descending
		} else {
			SortDirection::Ascending
		}
	}

	/// Returns the same column sorted the other way.
	pub fn toggled(&self) -> Self {
		Self {
			id: self.id.clone(),
			desc: self.direction().toggle() == SortDirection::Descending,
		}
	}
}

/// Filter applied to a single column.
///
/// The value is arbitrary JSON so strings, numbers, ranges (arrays) and
/// objects all survive the trip through the URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
	/// Column id.
	pub id: String,
	/// Filter value.
	pub value: serde_json::Value,
}

impl ColumnFilter {
	/// Creates a column filter from any serializable value.
	///
	/// Values that cannot be represented as JSON become `null`.
	pub fn new(id: impl Into<String>, value: impl Serialize) -> Self {
		Self {
			id: id.into(),
			value: serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
		}
	}
}

/// Pagination state.
///
/// `page_index` is zero-based. The query string carries it one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationState {
	/// Current page (0-indexed)
	pub page_index: usize,
	/// Number of rows per page
	pub page_size: usize,
}

impl PaginationState {
	/// Default number of rows per page
	pub const DEFAULT_PAGE_SIZE: usize = 10;

	/// Creates a pagination state
	pub fn new(page_index: usize, page_size: usize) -> Self {
		Self {
			page_index,
			page_size,
		}
	}

	/// Returns the index of the first row on the current page (0-indexed)
	pub fn start_index(&self) -> usize {
		self.page_index.saturating_mul(self.page_size)
	}

	/// Returns the total number of pages for `total_rows` rows
	pub fn total_pages(&self, total_rows: usize) -> usize {
		if total_rows == 0 || self.page_size == 0 {
			0
		} else {
			total_rows.div_ceil(self.page_size)
		}
	}
}

impl Default for PaginationState {
	fn default() -> Self {
		Self::new(0, Self::DEFAULT_PAGE_SIZE)
	}
}

/// Complete table state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableState {
	/// Free-text filter applied to every column.
	pub global_filter: Option<String>,
	/// Sort entries, highest priority first.
	pub sorting: Vec<ColumnSort>,
	/// Per-column filters.
	pub column_filters: Vec<ColumnFilter>,
	/// Column ids in display order.
	pub column_order: Vec<String>,
	/// Selected rows.
	pub row_selection: RowSelection,
	/// Pagination.
	pub pagination: PaginationState,
}

impl TableState {
	/// Returns whether `slice` holds the same value in both states.
	pub fn slice_eq(&self, other: &Self, slice: StateSlice) -> bool {
		match slice {
			StateSlice::GlobalFilter => self.global_filter == other.global_filter,
			StateSlice::Sorting => self.sorting == other.sorting,
			StateSlice::ColumnFilters => self.column_filters == other.column_filters,
			StateSlice::ColumnOrder => self.column_order == other.column_order,
			StateSlice::RowSelection => self.row_selection == other.row_selection,
			StateSlice::Pagination => self.pagination == other.pagination,
		}
	}

	/// Copies the value of `slice` from `source` into `self`.
	pub fn copy_slice_from(&mut self, source: &Self, slice: StateSlice) {
		match slice {
			StateSlice::GlobalFilter => self.global_filter = source.global_filter.clone(),
			StateSlice::Sorting => self.sorting = source.sorting.clone(),
			StateSlice::ColumnFilters => self.column_filters = source.column_filters.clone(),
			StateSlice::ColumnOrder => self.column_order = source.column_order.clone(),
			StateSlice::RowSelection => self.row_selection = source.row_selection.clone(),
			StateSlice::Pagination => self.pagination = source.pagination,
		}
	}
}

/// One independently synchronized part of [`TableState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateSlice {
	/// `global_filter`
	GlobalFilter,
	/// `sorting`
	Sorting,
	/// `column_filters`
	ColumnFilters,
	/// `column_order`
	ColumnOrder,
	/// `row_selection`
	RowSelection,
	/// `pagination`
	Pagination,
}

impl StateSlice {
	/// All slices in encoding order.
	pub const ALL: [StateSlice; 6] = [
		Self::GlobalFilter,
		Self::Sorting,
		Self::ColumnFilters,
		Self::ColumnOrder,
		Self::RowSelection,
		Self::Pagination,
	];

	/// Returns the camelCase name used in configuration and logs.
	pub fn name(&self) -> &'static str {
		match self {
			Self::GlobalFilter => "globalFilter",
			Self::Sorting => "sorting",
			Self::ColumnFilters => "columnFilters",
			Self::ColumnOrder => "columnOrder",
			Self::RowSelection => "rowSelection",
			Self::Pagination => "pagination",
		}
	}

	/// Returns the slices whose value differs between `old` and `new`.
	///
	/// Sequences compare order-sensitively.
	pub fn changed(old: &TableState, new: &TableState) -> Vec<StateSlice> {
		Self::ALL
			.into_iter()
			.filter(|slice| !old.slice_eq(new, *slice))
			.collect()
	}
}

impl fmt::Display for StateSlice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
