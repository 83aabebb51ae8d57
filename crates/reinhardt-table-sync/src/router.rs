//! Router abstraction.
//!
//! The synchronization layer never touches a browser directly. It reads the
//! current location and asks for navigations through [`Router`], so the same
//! code drives a client-side router, a server-rendered request or the
//! in-memory [`MemoryRouter`] used in tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use reinhardt_table_state::{NavigationType, Query};
use thiserror::Error;

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RouterError {
	/// Navigation failed.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
	/// The URL could not be navigated to.
	#[error("Invalid URL: {0}")]
	InvalidUrl(String),
}

/// Access to the current location and to navigation.
#[async_trait]
pub trait Router: Send + Sync {
	/// Returns the current query parameters.
	fn query(&self) -> Query;

	/// Returns the current path, without query string.
	fn pathname(&self) -> String;

	/// Navigates to `url`, adding a history entry.
	async fn navigate(&self, url: &str) -> Result<(), RouterError>;

	/// Navigates to `url`, replacing the current history entry.
	///
	/// Routers without history replacement fall back to [`Router::navigate`].
	async fn replace(&self, url: &str) -> Result<(), RouterError> {
		self.navigate(url).await
	}
}

/// A navigation recorded by [`MemoryRouter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
	/// Full URL (path plus query string).
	pub url: String,
	/// How the entry was created.
	pub navigation_type: NavigationType,
}

#[derive(Debug)]
struct Location {
	pathname: String,
	query: Query,
	history: Vec<HistoryEntry>,
	navigations: usize,
	fail_next: Option<String>,
}

/// Router holding its location in memory.
///
/// Every navigation is recorded, which makes it the router of choice for
/// asserting how many navigations a state change triggered.
#[derive(Debug)]
pub struct MemoryRouter {
	location: RwLock<Location>,
}

impl MemoryRouter {
	/// Creates a router positioned at `url` (e.g. `/users?sorting=name.asc`).
	pub fn new(url: &str) -> Self {
		let (pathname, query) = split_url(url);
		Self {
			location: RwLock::new(Location {
				pathname: pathname.to_string(),
				query: Query::parse(query),
				history: vec![HistoryEntry {
					url: url.to_string(),
					navigation_type: NavigationType::Push,
				}],
				navigations: 0,
				fail_next: None,
			}),
		}
	}

	/// Returns the current URL.
	pub fn current_url(&self) -> String {
		let location = self.location.read();
		let search = location.query.to_search_params();
		if search.is_empty() {
			location.pathname.clone()
		} else {
			format!("{}?{}", location.pathname, search)
		}
	}

	/// Returns the history stack, oldest first.
	pub fn history(&self) -> Vec<HistoryEntry> {
		self.location.read().history.clone()
	}

	/// Returns how many navigations succeeded, pushes and replaces alike.
	pub fn navigation_count(&self) -> usize {
		self.location.read().navigations
	}

	/// Makes the next navigation fail with `message`.
	pub fn fail_next_navigation(&self, message: impl Into<String>) {
		self.location.write().fail_next = Some(message.into());
	}

	fn go(&self, url: &str, nav_type: NavigationType) -> Result<(), RouterError> {
		let mut location = self.location.write();
		if let Some(message) = location.fail_next.take() {
			return Err(RouterError::NavigationFailed(message));
		}
		if !url.starts_with('/') {
			return Err(RouterError::InvalidUrl(url.to_string()));
		}

		let (pathname, query) = split_url(url);
		location.pathname = pathname.to_string();
		location.query = Query::parse(query);
		location.navigations += 1;

		let entry = HistoryEntry {
			url: url.to_string(),
			navigation_type: nav_type,
		};
		match nav_type {
			NavigationType::Push => location.history.push(entry),
			NavigationType::Replace => match location.history.last_mut() {
				Some(last) => *last = entry,
				None => location.history.push(entry),
			},
		}
		Ok(())
	}
}

impl Default for MemoryRouter {
	fn default() -> Self {
		Self::new("/")
	}
}

#[async_trait]
impl Router for MemoryRouter {
	fn query(&self) -> Query {
		self.location.read().query.clone()
	}

	fn pathname(&self) -> String {
		self.location.read().pathname.clone()
	}

	async fn navigate(&self, url: &str) -> Result<(), RouterError> {
		self.go(url, NavigationType::Push)
	}

	async fn replace(&self, url: &str) -> Result<(), RouterError> {
		self.go(url, NavigationType::Replace)
	}
}

/// Splits a URL into path and query string, dropping any fragment.
fn split_url(url: &str) -> (&str, &str) {
	let url = url.split_once('#').map_or(url, |(before, _)| before);
	url.split_once('?').unwrap_or((url, ""))
}
