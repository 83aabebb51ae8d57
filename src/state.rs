//! Table state model and query-string codecs.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_table_url::state::{Query, TableState, UrlStateConfig, decode_state};
//!
//! let query = Query::parse("?sorting=name.desc&pageIndex=2");
//! let state = decode_state(&query, &UrlStateConfig::default()).unwrap();
//! assert_eq!(state.pagination.page_index, 1);
//! assert_ne!(state, TableState::default());
//! ```

pub use reinhardt_table_state::*;
