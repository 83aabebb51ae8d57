//! Batched URL updates.
//!
//! Every slice that changed in a single table update is encoded into one
//! merged query, and the router is asked for exactly one navigation.

use crate::error::Result;
use crate::router::Router;
use reinhardt_table_state::{
	NavigationType, Query, QueryUpdate, StateSlice, TableState, UrlStateConfig, encode_slice,
};
use std::fmt;
use std::sync::Arc;

/// Writes changed table state into the URL, one navigation per call.
#[derive(Clone)]
pub struct BatchedUpdater {
	router: Arc<dyn Router>,
	config: Arc<UrlStateConfig>,
}

impl fmt::Debug for BatchedUpdater {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BatchedUpdater")
			.field("pathname", &self.router.pathname())
			.field("config", &self.config)
			.finish()
	}
}

impl BatchedUpdater {
	/// Creates an updater navigating through `router`.
	pub fn new(router: Arc<dyn Router>, config: Arc<UrlStateConfig>) -> Self {
		Self { router, config }
	}

	/// Returns the router.
	pub fn router(&self) -> &Arc<dyn Router> {
		&self.router
	}

	/// Returns the configuration.
	pub fn config(&self) -> &UrlStateConfig {
		&self.config
	}

	/// Writes every slice that differs between `old` and `new`.
	///
	/// The router is asked to navigate exactly once, even when nothing
	/// changed. Parameters not owned by a changed slice are preserved.
	///
	/// # Errors
	///
	/// Returns an error if an encoder override fails (no navigation is
	/// attempted) or the router rejects the navigation.
	pub async fn update(&self, old: &TableState, new: &TableState) -> Result<()> {
		let changed = StateSlice::changed(old, new);
		self.apply(&changed, new).await
	}

	/// Writes the given slices of `new`, in a single navigation.
	///
	/// # Errors
	///
	/// Returns an error if an encoder override fails or the router rejects
	/// the navigation.
	pub async fn apply(&self, slices: &[StateSlice], new: &TableState) -> Result<()> {
		let query = self.merged_query(slices, new)?;
		let url = build_url(&self.router.pathname(), &query);

		tracing::debug!(
			?slices,
			url = %url,
			navigation = ?self.config.navigation_type,
			"syncing table state to URL"
		);

		match self.config.navigation_type {
			NavigationType::Push => self.router.navigate(&url).await?,
			NavigationType::Replace => self.router.replace(&url).await?,
		}
		Ok(())
	}

	/// Returns the router's current query with `slices` of `new` applied.
	///
	/// # Errors
	///
	/// Returns an error if an encoder override fails.
	pub fn merged_query(&self, slices: &[StateSlice], new: &TableState) -> Result<Query> {
		let mut update = QueryUpdate::new();
		for slice in slices {
			update.extend(encode_slice(*slice, new, &self.config)?);
		}

		let mut query = self.router.query();
		query.apply(&update);
		Ok(query)
	}
}

/// Joins `pathname` and the serialized `query`.
///
/// The `?` is left out when the query is empty.
pub fn build_url(pathname: &str, query: &Query) -> String {
	let search = query.to_search_params();
	if search.is_empty() {
		pathname.to_string()
	} else {
		format!("{}?{}", pathname, search)
	}
}
