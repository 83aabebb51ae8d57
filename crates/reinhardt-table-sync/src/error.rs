//! Error types for URL synchronization.

use crate::router::RouterError;
use reinhardt_table_state::CodecError;
use thiserror::Error;

/// Result type for synchronization operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Synchronization errors.
///
/// Malformed URLs never produce an error; they decode to defaults. What
/// does surface is caller code failing (encoder and decoder overrides) and
/// the router rejecting a navigation. Neither is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
	/// An encoder or decoder override failed.
	#[error(transparent)]
	Codec(#[from] CodecError),

	/// The router rejected the navigation.
	#[error(transparent)]
	Router(#[from] RouterError),
}
