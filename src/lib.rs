//! # Reinhardt Table URL
//!
//! Keeps the interactive state of a data table in the URL query string.
//!
//! Global filter, sorting, column filters, column order, row selection and
//! pagination are each encoded into their own query parameter(s). Values
//! equal to their configured default are left out of the URL, unrelated
//! parameters are preserved, and every table update produces a single
//! navigation.
//!
//! ## Crates
//!
//! - [`state`] (`reinhardt-table-state`) - state model, configuration,
//!   per-slice codecs and the query adapter. Pure and synchronous.
//! - [`sync`] (`reinhardt-table-sync`) - router abstraction, batched
//!   updater, per-slice debouncing and the URL binding. Built on tokio.
//!
//! ## Feature Flags
//!
//! - `sync` (default) - enables the [`sync`] module
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_table_url::prelude::*;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let router = Arc::new(MemoryRouter::new("/users"));
//! let binding = UrlStateBinding::new(router.clone(), UrlStateConfig::default());
//!
//! binding.set_sorting(vec![ColumnSort::asc("name")]).await.unwrap();
//! binding.set_pagination(PaginationState::new(2, 20)).await.unwrap();
//!
//! assert_eq!(
//!     router.current_url(),
//!     "/users?sorting=name.asc&pageIndex=3&pageSize=20"
//! );
//! # });
//! ```

#![warn(missing_docs)]

pub mod state;
#[cfg(feature = "sync")]
pub mod sync;

pub use reinhardt_table_state::{
	CodecError, ColumnFilter, ColumnSort, PaginationState, Query, QueryUpdate, QueryValue,
	StateSlice, TableState, UrlStateConfig, UrlStateSettings, decode_state, encode_state,
};

#[cfg(feature = "sync")]
pub use reinhardt_table_sync::{
	BatchedUpdater, Debouncer, MemoryRouter, Router, RouterError, SyncError, UrlStateBinding,
};

/// Prelude module for convenient imports
///
/// Import everything needed to bind a table to the URL:
///
/// ```rust
/// use reinhardt_table_url::prelude::*;
/// ```
pub mod prelude {
	pub use reinhardt_table_state::prelude::*;

	#[cfg(feature = "sync")]
	pub use reinhardt_table_sync::{
		BatchedUpdater, Debouncer, MemoryRouter, Router, SyncError, UrlStateBinding,
	};
}
