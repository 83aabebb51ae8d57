//! Two-way binding between a table and the URL.

use crate::debounce::Debouncer;
use crate::error::Result;
use crate::router::Router;
use crate::updater::BatchedUpdater;
use reinhardt_table_state::{
	ColumnFilter, ColumnSort, PaginationState, RowSelection, TableState, UrlStateConfig,
	decode_state,
};
use std::sync::Arc;

/// Binds table state to the query string of a [`Router`].
///
/// Reading goes through [`UrlStateBinding::state`], which decodes the URL
/// and layers any not-yet-written debounced values on top. Writing goes
/// through [`UrlStateBinding::handle_change`] or the per-slice setters.
///
/// # Example
///
/// ```rust
/// use reinhardt_table_state::{ColumnSort, UrlStateConfig};
/// use reinhardt_table_sync::{MemoryRouter, UrlStateBinding};
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let router = Arc::new(MemoryRouter::new("/users?page=2"));
/// let binding = UrlStateBinding::new(router.clone(), UrlStateConfig::default());
///
/// binding.set_sorting(vec![ColumnSort::desc("name")]).await.unwrap();
///
/// assert_eq!(router.current_url(), "/users?page=2&sorting=name.desc");
/// assert_eq!(binding.state().unwrap().sorting, vec![ColumnSort::desc("name")]);
/// # });
/// ```
#[derive(Debug)]
pub struct UrlStateBinding {
	updater: BatchedUpdater,
	debouncer: Debouncer,
}

impl UrlStateBinding {
	/// Creates a binding over `router`.
	pub fn new(router: Arc<dyn Router>, config: UrlStateConfig) -> Self {
		let updater = BatchedUpdater::new(router, Arc::new(config));
		let debouncer = Debouncer::new(updater.clone());
		Self { updater, debouncer }
	}

	/// Returns the configuration.
	pub fn config(&self) -> &UrlStateConfig {
		self.updater.config()
	}

	/// Returns the current table state.
	///
	/// # Errors
	///
	/// Returns an error if a decoder override fails.
	pub fn state(&self) -> Result<TableState> {
		let query = self.updater.router().query();
		let mut state = decode_state(&query, self.config())?;
		self.debouncer.overlay(&mut state);
		Ok(state)
	}

	/// Propagates a table update from `old` to `new` into the URL.
	///
	/// # Errors
	///
	/// Returns an error if an immediate write fails.
	pub async fn handle_change(&self, old: &TableState, new: &TableState) -> Result<()> {
		self.debouncer.handle_change(old, new).await
	}

	/// Replaces the whole table state.
	///
	/// # Errors
	///
	/// Returns an error if decoding the current state or an immediate write
	/// fails.
	pub async fn set_state(&self, new: TableState) -> Result<()> {
		let old = self.state()?;
		self.handle_change(&old, &new).await
	}

	/// Applies `f` to the current state and writes the result.
	///
	/// # Errors
	///
	/// Returns an error if decoding the current state or an immediate write
	/// fails.
	pub async fn update_with<F>(&self, f: F) -> Result<()>
	where
		F: FnOnce(&mut TableState),
	{
		let old = self.state()?;
		let mut new = old.clone();
		f(&mut new);
		self.handle_change(&old, &new).await
	}

	/// Sets the global filter.
	pub async fn set_global_filter(&self, value: Option<String>) -> Result<()> {
		self.update_with(|state| state.global_filter = value).await
	}

	/// Sets the sort entries.
	pub async fn set_sorting(&self, value: Vec<ColumnSort>) -> Result<()> {
		self.update_with(|state| state.sorting = value).await
	}

	/// Sets the column filters.
	pub async fn set_column_filters(&self, value: Vec<ColumnFilter>) -> Result<()> {
		self.update_with(|state| state.column_filters = value).await
	}

	/// Sets the column order.
	pub async fn set_column_order(&self, value: Vec<String>) -> Result<()> {
		self.update_with(|state| state.column_order = value).await
	}

	/// Sets the row selection.
	pub async fn set_row_selection(&self, value: RowSelection) -> Result<()> {
		self.update_with(|state| state.row_selection = value).await
	}

	/// Sets the pagination.
	pub async fn set_pagination(&self, value: PaginationState) -> Result<()> {
		self.update_with(|state| state.pagination = value).await
	}

	/// Writes every pending debounced value now.
	///
	/// # Errors
	///
	/// Returns an error if the write fails.
	pub async fn flush(&self) -> Result<()> {
		self.debouncer.flush().await
	}

	/// Tears the binding down, discarding pending debounced writes.
	pub fn dispose(self) {
		self.debouncer.dispose();
	}
}
