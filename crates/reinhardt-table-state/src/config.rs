//! Configuration for table state synchronization.
//!
//! Everything is optional: [`UrlStateConfig::default`] uses the standard
//! parameter names, empty defaults, the built-in codecs and no debouncing.
//!
//! ```
//! use reinhardt_table_state::config::{DebounceMilliseconds, ParamNames, UrlStateConfig};
//! use reinhardt_table_state::state::{StateSlice, TableState};
//!
//! let config = UrlStateConfig::new()
//!     .with_param_names(ParamNames::default().with_global_filter("q"))
//!     .with_debounce(DebounceMilliseconds::default().with(StateSlice::GlobalFilter, 300));
//!
//! assert_eq!(config.param_names.global_filter, "q");
//! assert_eq!(config.debounce.get(StateSlice::GlobalFilter), 300);
//! ```

use crate::error::BoxError;
use crate::query::QueryValue;
use crate::state::{ColumnFilter, ColumnSort, PaginationState, RowSelection, StateSlice, TableState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Per-slice fallback values.
///
/// A slice equal to its default is omitted from the URL, and a missing
/// parameter decodes to the default.
pub type DefaultValues = TableState;

/// Query parameter names for the two pagination values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationParamNames {
	/// Parameter carrying the one-based page number.
	pub page_index: String,
	/// Parameter carrying the page size.
	pub page_size: String,
}

impl Default for PaginationParamNames {
	fn default() -> Self {
		Self {
			page_index: "pageIndex".to_string(),
			page_size: "pageSize".to_string(),
		}
	}
}

/// Query parameter name for each slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParamNames {
	/// Global filter parameter.
	pub global_filter: String,
	/// Sorting parameter.
	pub sorting: String,
	/// Column filters parameter.
	pub column_filters: String,
	/// Column order parameter.
	pub column_order: String,
	/// Row selection parameter.
	pub row_selection: String,
	/// Pagination parameters.
	pub pagination: PaginationParamNames,
}

impl Default for ParamNames {
	fn default() -> Self {
		Self {
			global_filter: "globalFilter".to_string(),
			sorting: "sorting".to_string(),
			column_filters: "columnFilters".to_string(),
			column_order: "columnOrder".to_string(),
			row_selection: "rowSelection".to_string(),
			pagination: PaginationParamNames::default(),
		}
	}
}

impl ParamNames {
	/// Returns the parameter names written by `slice`.
	pub fn keys(&self, slice: StateSlice) -> Vec<&str> {
		match slice {
			StateSlice::GlobalFilter => vec![self.global_filter.as_str()],
			StateSlice::Sorting => vec![self.sorting.as_str()],
			StateSlice::ColumnFilters => vec![self.column_filters.as_str()],
			StateSlice::ColumnOrder => vec![self.column_order.as_str()],
			StateSlice::RowSelection => vec![self.row_selection.as_str()],
			StateSlice::Pagination => vec![
				self.pagination.page_index.as_str(),
				self.pagination.page_size.as_str(),
			],
		}
	}

	/// Sets the global filter parameter name.
	pub fn with_global_filter(mut self, name: impl Into<String>) -> Self {
		self.global_filter = name.into();
		self
	}

	/// Sets the sorting parameter name.
	pub fn with_sorting(mut self, name: impl Into<String>) -> Self {
		self.sorting = name.into();
		self
	}

	/// Sets the column filters parameter name.
	pub fn with_column_filters(mut self, name: impl Into<String>) -> Self {
		self.column_filters = name.into();
		self
	}

	/// Sets the column order parameter name.
	pub fn with_column_order(mut self, name: impl Into<String>) -> Self {
		self.column_order = name.into();
		self
	}

	/// Sets the row selection parameter name.
	pub fn with_row_selection(mut self, name: impl Into<String>) -> Self {
		self.row_selection = name.into();
		self
	}

	/// Sets both pagination parameter names.
	pub fn with_pagination(
		mut self,
		page_index: impl Into<String>,
		page_size: impl Into<String>,
	) -> Self {
		self.pagination = PaginationParamNames {
			page_index: page_index.into(),
			page_size: page_size.into(),
		};
		self
	}
}

/// Debounce delay in milliseconds for each slice. `0` updates the URL
/// immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebounceMilliseconds {
	/// Global filter delay.
	pub global_filter: u64,
	/// Sorting delay.
	pub sorting: u64,
	/// Column filters delay.
	pub column_filters: u64,
	/// Column order delay.
	pub column_order: u64,
	/// Row selection delay.
	pub row_selection: u64,
	/// Pagination delay.
	pub pagination: u64,
}

impl DebounceMilliseconds {
	/// Returns the delay for `slice` in milliseconds.
	pub fn get(&self, slice: StateSlice) -> u64 {
		match slice {
			StateSlice::GlobalFilter => self.global_filter,
			StateSlice::Sorting => self.sorting,
			StateSlice::ColumnFilters => self.column_filters,
			StateSlice::ColumnOrder => self.column_order,
			StateSlice::RowSelection => self.row_selection,
			StateSlice::Pagination => self.pagination,
		}
	}

	/// Returns the delay for `slice`.
	pub fn duration(&self, slice: StateSlice) -> Duration {
		Duration::from_millis(self.get(slice))
	}

	/// Sets the delay for `slice`.
	pub fn with(mut self, slice: StateSlice, millis: u64) -> Self {
		let field = match slice {
			StateSlice::GlobalFilter => &mut self.global_filter,
			StateSlice::Sorting => &mut self.sorting,
			StateSlice::ColumnFilters => &mut self.column_filters,
			StateSlice::ColumnOrder => &mut self.column_order,
			StateSlice::RowSelection => &mut self.row_selection,
			StateSlice::Pagination => &mut self.pagination,
		};
		*field = millis;
		self
	}
}

/// How the URL change is pushed to the router.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationType {
	/// Add a history entry.
	#[default]
	Push,
	/// Replace the current history entry.
	Replace,
}

/// Encoder override for a single-parameter slice.
pub type EncodeFn<T> = Arc<dyn Fn(&T) -> Result<Option<QueryValue>, BoxError> + Send + Sync>;

/// Decoder override for a single-parameter slice.
pub type DecodeFn<T> = Arc<dyn Fn(Option<&QueryValue>) -> Result<T, BoxError> + Send + Sync>;

/// Output of a pagination encoder: one value per parameter, `None` omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedPagination {
	/// Value for the page index parameter.
	pub page_index: Option<QueryValue>,
	/// Value for the page size parameter.
	pub page_size: Option<QueryValue>,
}

/// Encoder override for pagination.
pub type PaginationEncodeFn =
	Arc<dyn Fn(&PaginationState) -> Result<EncodedPagination, BoxError> + Send + Sync>;

/// Decoder override for pagination. Receives the page index and page size
/// parameters.
pub type PaginationDecodeFn = Arc<
	dyn Fn(Option<&QueryValue>, Option<&QueryValue>) -> Result<PaginationState, BoxError>
		+ Send
		+ Sync,
>;

/// Caller-supplied encoders that replace the built-in codecs.
///
/// Overrides replace the built-in behavior entirely, including the
/// omission of default values.
#[derive(Clone, Default)]
pub struct Encoders {
	/// Global filter encoder.
	pub global_filter: Option<EncodeFn<Option<String>>>,
	/// Sorting encoder.
	pub sorting: Option<EncodeFn<Vec<ColumnSort>>>,
	/// Column filters encoder.
	pub column_filters: Option<EncodeFn<Vec<ColumnFilter>>>,
	/// Column order encoder.
	pub column_order: Option<EncodeFn<Vec<String>>>,
	/// Row selection encoder.
	pub row_selection: Option<EncodeFn<RowSelection>>,
	/// Pagination encoder.
	pub pagination: Option<PaginationEncodeFn>,
}

impl Encoders {
	/// Creates an empty set of overrides.
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the global filter encoder.
	pub fn with_global_filter<F>(mut self, f: F) -> Self
	where
		F: Fn(&Option<String>) -> Result<Option<QueryValue>, BoxError> + Send + Sync + 'static,
	{
		self.global_filter = Some(Arc::new(f));
		self
	}

	/// Overrides the sorting encoder.
	pub fn with_sorting<F>(mut self, f: F) -> Self
	where
		F: Fn(&Vec<ColumnSort>) -> Result<Option<QueryValue>, BoxError> + Send + Sync + 'static,
	{
		self.sorting = Some(Arc::new(f));
		self
	}

	/// Overrides the column filters encoder.
	pub fn with_column_filters<F>(mut self, f: F) -> Self
	where
		F: Fn(&Vec<ColumnFilter>) -> Result<Option<QueryValue>, BoxError> + Send + Sync + 'static,
	{
		self.column_filters = Some(Arc::new(f));
		self
	}

	/// Overrides the column order encoder.
	pub fn with_column_order<F>(mut self, f: F) -> Self
	where
		F: Fn(&Vec<String>) -> Result<Option<QueryValue>, BoxError> + Send + Sync + 'static,
	{
		self.column_order = Some(Arc::new(f));
		self
	}

	/// Overrides the row selection encoder.
	pub fn with_row_selection<F>(mut self, f: F) -> Self
	where
		F: Fn(&RowSelection) -> Result<Option<QueryValue>, BoxError> + Send + Sync + 'static,
	{
		self.row_selection = Some(Arc::new(f));
		self
	}

	/// Overrides the pagination encoder.
	pub fn with_pagination<F>(mut self, f: F) -> Self
	where
		F: Fn(&PaginationState) -> Result<EncodedPagination, BoxError> + Send + Sync + 'static,
	{
		self.pagination = Some(Arc::new(f));
		self
	}

	fn overridden(&self) -> Vec<StateSlice> {
		let set = [
			self.global_filter.is_some(),
			self.sorting.is_some(),
			self.column_filters.is_some(),
			self.column_order.is_some(),
			self.row_selection.is_some(),
			self.pagination.is_some(),
		];
		StateSlice::ALL
			.into_iter()
			.zip(set)
			.filter_map(|(slice, set)| set.then_some(slice))
			.collect()
	}
}

impl fmt::Debug for Encoders {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Encoders")
			.field("overridden", &self.overridden())
			.finish()
	}
}

/// Caller-supplied decoders that replace the built-in codecs.
#[derive(Clone, Default)]
pub struct Decoders {
	/// Global filter decoder.
	pub global_filter: Option<DecodeFn<Option<String>>>,
	/// Sorting decoder.
	pub sorting: Option<DecodeFn<Vec<ColumnSort>>>,
	/// Column filters decoder.
	pub column_filters: Option<DecodeFn<Vec<ColumnFilter>>>,
	/// Column order decoder.
	pub column_order: Option<DecodeFn<Vec<String>>>,
	/// Row selection decoder.
	pub row_selection: Option<DecodeFn<RowSelection>>,
	/// Pagination decoder.
	pub pagination: Option<PaginationDecodeFn>,
}

impl Decoders {
	/// Creates an empty set of overrides.
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the global filter decoder.
	pub fn with_global_filter<F>(mut self, f: F) -> Self
	where
		F: Fn(Option<&QueryValue>) -> Result<Option<String>, BoxError> + Send + Sync + 'static,
	{
		self.global_filter = Some(Arc::new(f));
		self
	}

	/// Overrides the sorting decoder.
	pub fn with_sorting<F>(mut self, f: F) -> Self
	where
		F: Fn(Option<&QueryValue>) -> Result<Vec<ColumnSort>, BoxError> + Send + Sync + 'static,
	{
		self.sorting = Some(Arc::new(f));
		self
	}

	/// Overrides the column filters decoder.
	pub fn with_column_filters<F>(mut self, f: F) -> Self
	where
		F: Fn(Option<&QueryValue>) -> Result<Vec<ColumnFilter>, BoxError> + Send + Sync + 'static,
	{
		self.column_filters = Some(Arc::new(f));
		self
	}

	/// Overrides the column order decoder.
	pub fn with_column_order<F>(mut self, f: F) -> Self
	where
		F: Fn(Option<&QueryValue>) -> Result<Vec<String>, BoxError> + Send + Sync + 'static,
	{
		self.column_order = Some(Arc::new(f));
		self
	}

	/// Overrides the row selection decoder.
	pub fn with_row_selection<F>(mut self, f: F) -> Self
	where
		F: Fn(Option<&QueryValue>) -> Result<RowSelection, BoxError> + Send + Sync + 'static,
	{
		self.row_selection = Some(Arc::new(f));
		self
	}

	/// Overrides the pagination decoder.
	pub fn with_pagination<F>(mut self, f: F) -> Self
	where
		F: Fn(Option<&QueryValue>, Option<&QueryValue>) -> Result<PaginationState, BoxError>
			+ Send
			+ Sync
			+ 'static,
	{
		self.pagination = Some(Arc::new(f));
		self
	}

	fn overridden(&self) -> Vec<StateSlice> {
		let set = [
			self.global_filter.is_some(),
			self.sorting.is_some(),
			self.column_filters.is_some(),
			self.column_order.is_some(),
			self.row_selection.is_some(),
			self.pagination.is_some(),
		];
		StateSlice::ALL
			.into_iter()
			.zip(set)
			.filter_map(|(slice, set)| set.then_some(slice))
			.collect()
	}
}

impl fmt::Debug for Decoders {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Decoders")
			.field("overridden", &self.overridden())
			.finish()
	}
}

/// Full synchronization configuration.
#[derive(Debug, Clone, Default)]
pub struct UrlStateConfig {
	/// Query parameter names.
	pub param_names: ParamNames,
	/// Per-slice defaults.
	pub default_values: DefaultValues,
	/// Encoder overrides.
	pub encoders: Encoders,
	/// Decoder overrides.
	pub decoders: Decoders,
	/// Per-slice debounce delays.
	pub debounce: DebounceMilliseconds,
	/// Push or replace history entries.
	pub navigation_type: NavigationType,
}

impl UrlStateConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the parameter names.
	pub fn with_param_names(mut self, param_names: ParamNames) -> Self {
		self.param_names = param_names;
		self
	}

	/// Sets the default values.
	pub fn with_default_values(mut self, default_values: DefaultValues) -> Self {
		self.default_values = default_values;
		self
	}

	/// Sets the encoder overrides.
	pub fn with_encoders(mut self, encoders: Encoders) -> Self {
		self.encoders = encoders;
		self
	}

	/// Sets the decoder overrides.
	pub fn with_decoders(mut self, decoders: Decoders) -> Self {
		self.decoders = decoders;
		self
	}

	/// Sets the debounce delays.
	pub fn with_debounce(mut self, debounce: DebounceMilliseconds) -> Self {
		self.debounce = debounce;
		self
	}

	/// Sets the navigation type.
	pub fn with_navigation_type(mut self, navigation_type: NavigationType) -> Self {
		self.navigation_type = navigation_type;
		self
	}
}

/// Serializable part of [`UrlStateConfig`], suitable for settings files.
///
/// ```
/// use reinhardt_table_state::config::{NavigationType, UrlStateConfig, UrlStateSettings};
///
/// let settings = UrlStateSettings::from_json_str(r#"{
///     "paramNames": { "globalFilter": "q", "pagination": { "pageIndex": "page" } },
///     "debounceMilliseconds": { "globalFilter": 250 },
///     "navigationType": "replace"
/// }"#).unwrap();
///
/// let config = UrlStateConfig::from(settings);
/// assert_eq!(config.param_names.global_filter, "q");
/// assert_eq!(config.param_names.pagination.page_index, "page");
/// assert_eq!(config.param_names.pagination.page_size, "pageSize");
/// assert_eq!(config.navigation_type, NavigationType::Replace);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UrlStateSettings {
	/// Query parameter names.
	pub param_names: ParamNames,
	/// Per-slice defaults.
	pub default_values: DefaultValues,
	/// Per-slice debounce delays.
	pub debounce_milliseconds: DebounceMilliseconds,
	/// Push or replace history entries.
	pub navigation_type: NavigationType,
}

impl UrlStateSettings {
	/// Parses settings from JSON.
	pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

impl From<UrlStateSettings> for UrlStateConfig {
	fn from(settings: UrlStateSettings) -> Self {
		Self {
			param_names: settings.param_names,
			default_values: settings.default_values,
			encoders: Encoders::default(),
			decoders: Decoders::default(),
			debounce: settings.debounce_milliseconds,
			navigation_type: settings.navigation_type,
		}
	}
}
