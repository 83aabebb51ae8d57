//! Batched, debounced URL synchronization.
//!
//! # Examples
//!
//! ```rust,no_run
//! use reinhardt_table_url::sync::{MemoryRouter, UrlStateBinding};
//! ```

pub use reinhardt_table_sync::*;
