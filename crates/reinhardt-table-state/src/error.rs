//! Error types for table state codecs.
//!
//! Malformed query input is never an error: every codec recovers to the
//! slice's default. The only failures surfaced here come from
//! caller-supplied encoder and decoder overrides.

use crate::state::StateSlice;
use thiserror::Error;

/// Boxed error returned by encoder and decoder overrides.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Codec errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
	/// An encoder override failed.
	#[error("encoder override for '{slice}' failed: {source}")]
	Encoder {
		/// Slice whose encoder failed.
		slice: StateSlice,
		/// Error raised by the override.
		#[source]
		source: BoxError,
	},

	/// A decoder override failed.
	#[error("decoder override for '{slice}' failed: {source}")]
	Decoder {
		/// Slice whose decoder failed.
		slice: StateSlice,
		/// Error raised by the override.
		#[source]
		source: BoxError,
	},
}

impl CodecError {
	/// Returns the slice whose override failed.
	pub fn slice(&self) -> StateSlice {
		match self {
			Self::Encoder { slice, .. } | Self::Decoder { slice, .. } => *slice,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_encoder_error_display() {
		let err = CodecError::Encoder {
			slice: StateSlice::Sorting,
			source: "boom".into(),
		};

		assert_eq!(err.to_string(), "encoder override for 'sorting' failed: boom");
		assert_eq!(err.slice(), StateSlice::Sorting);
	}

	#[rstest]
	fn test_decoder_error_source() {
		use std::error::Error as _;

		let err = CodecError::Decoder {
			slice: StateSlice::Pagination,
			source: "bad page".into(),
		};

		assert_eq!(err.source().map(|s| s.to_string()), Some("bad page".to_string()));
	}
}
