//! Table state query-string codecs for Reinhardt
//!
//! This crate converts the interactive state of a data table (global
//! filter, sorting, column filters, column order, row selection and
//! pagination) to and from a URL query string, so that table views can be
//! bookmarked, shared and restored after a reload.
//!
//! # Features
//!
//! - **State model**: [`TableState`] and its six independently synchronized
//!   [`StateSlice`]s
//! - **Codecs**: one encode/decode pair per slice, omitting values equal to
//!   their configured default
//! - **Query adapter**: [`Query`] parsing and serialization, repeated keys and
//!   dot-notation nesting
//! - **Configuration**: parameter names, defaults, encoder/decoder overrides
//!   and debounce delays via [`UrlStateConfig`]
//!
//! # Example
//!
//! ```rust
//! use reinhardt_table_state::prelude::*;
//!
//! let config = UrlStateConfig::default();
//! let state = TableState {
//!     sorting: vec![ColumnSort::desc("name")],
//!     column_filters: vec![ColumnFilter::new("name", "John")],
//!     pagination: PaginationState::new(2, 20),
//!     ..TableState::default()
//! };
//!
//! let mut query = Query::new();
//! query.apply(&encode_state(&state, &config).unwrap());
//! assert_eq!(query.get_single("sorting"), Some("name.desc"));
//! assert_eq!(query.get_single("columnFilters"), Some("name.%22John%22"));
//! assert_eq!(query.get_single("pageIndex"), Some("3"));
//!
//! let restored = decode_state(&Query::parse(&query.to_search_params()), &config).unwrap();
//! assert_eq!(restored, state);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod codec;
pub mod config;
pub mod error;
pub mod query;
pub mod state;

// Re-exports for convenience
pub use codec::{decode_slice, decode_state, encode_slice, encode_state};
pub use config::{
	DebounceMilliseconds, Decoders, DefaultValues, EncodedPagination, Encoders, NavigationType,
	PaginationParamNames, ParamNames, UrlStateConfig, UrlStateSettings,
};
pub use error::{BoxError, CodecError, Result};
pub use query::{Query, QueryUpdate, QueryValue};
pub use state::{
	ColumnFilter, ColumnSort, PaginationState, RowSelection, SortDirection, StateSlice, TableState,
};

/// Commonly used types.
pub mod prelude {
	pub use crate::codec::{decode_state, encode_state};
	pub use crate::config::{
		DebounceMilliseconds, Decoders, Encoders, NavigationType, ParamNames, UrlStateConfig,
	};
	pub use crate::query::{Query, QueryUpdate, QueryValue};
	pub use crate::state::{
		ColumnFilter, ColumnSort, PaginationState, RowSelection, StateSlice, TableState,
	};
}
