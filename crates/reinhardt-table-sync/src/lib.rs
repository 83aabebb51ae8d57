//! URL synchronization of table state for Reinhardt
//!
//! This crate keeps the interactive state of a data table in the URL query
//! string. State changes are encoded with `reinhardt-table-state` and pushed
//! through a [`Router`]: every changed slice of one update lands in a single
//! navigation, and slices can be debounced independently.
//!
//! # Features
//!
//! - **Router abstraction**: [`Router`] trait plus an in-memory
//!   [`MemoryRouter`] recording its history
//! - **Batched updates**: [`BatchedUpdater`] merges all changed slices into
//!   one navigation, preserving unrelated query parameters
//! - **Debouncing**: [`Debouncer`] delays writes per slice and cancels
//!   pending timers on disposal
//! - **Binding**: [`UrlStateBinding`] reads the current state and exposes a
//!   setter per slice
//!
//! # Example
//!
//! ```rust
//! use reinhardt_table_state::{ColumnFilter, TableState, UrlStateConfig};
//! use reinhardt_table_sync::{BatchedUpdater, MemoryRouter};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let router = Arc::new(MemoryRouter::new("/users?globalFilter=initial"));
//! let updater = BatchedUpdater::new(router.clone(), Arc::new(UrlStateConfig::default()));
//!
//! let old = TableState {
//!     global_filter: Some("initial".to_string()),
//!     ..TableState::default()
//! };
//! let new = TableState {
//!     column_filters: vec![ColumnFilter::new("name", "John")],
//!     ..old.clone()
//! };
//! updater.update(&old, &new).await.unwrap();
//!
//! assert_eq!(
//!     router.current_url(),
//!     "/users?globalFilter=initial&columnFilters=name.%2522John%2522"
//! );
//! # });
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod binding;
pub mod debounce;
pub mod error;
pub mod router;
pub mod updater;

// Re-exports for convenience
pub use binding::UrlStateBinding;
pub use debounce::Debouncer;
pub use error::{Result, SyncError};
pub use router::{HistoryEntry, MemoryRouter, Router, RouterError};
pub use updater::{BatchedUpdater, build_url};
