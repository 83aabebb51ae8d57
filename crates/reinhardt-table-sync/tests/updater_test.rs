//! Batched updater tests against an in-memory router.

use reinhardt_table_state::{
	CodecError, ColumnFilter, ColumnSort, Encoders, NavigationType, PaginationState, StateSlice,
	TableState, UrlStateConfig,
};
use reinhardt_table_sync::{BatchedUpdater, MemoryRouter, Router, RouterError, SyncError};
use rstest::*;
use std::sync::Arc;

fn updater(router: &Arc<MemoryRouter>, config: UrlStateConfig) -> BatchedUpdater {
	BatchedUpdater::new(router.clone(), Arc::new(config))
}

#[fixture]
fn filtered() -> TableState {
	TableState {
		global_filter: Some("initial".to_string()),
		column_filters: vec![ColumnFilter::new("name", "John")],
		..TableState::default()
	}
}

#[rstest]
#[tokio::test]
async fn test_unchanged_state_navigates_once_without_writes() {
	// Arrange
	let router = Arc::new(MemoryRouter::new("/users?tab=1&sorting=name.asc"));
	let updater = updater(&router, UrlStateConfig::default());
	let state = TableState::default();

	// Act
	updater.update(&state, &state).await.unwrap();

	// Assert
	assert_eq!(router.navigation_count(), 1);
	assert_eq!(router.current_url(), "/users?tab=1&sorting=name.asc");
}

#[rstest]
#[tokio::test]
async fn test_adding_column_filter_keeps_global_filter() {
	// Arrange
	let router = Arc::new(MemoryRouter::new("/users?globalFilter=initial"));
	let updater = updater(&router, UrlStateConfig::default());
	let old = TableState {
		global_filter: Some("initial".to_string()),
		..TableState::default()
	};
	let new = TableState {
		column_filters: vec![ColumnFilter::new("name", "John")],
		..old.clone()
	};

	// Act
	updater.update(&old, &new).await.unwrap();

	// Assert
	let query = router.query();
	assert_eq!(query.get_single("globalFilter"), Some("initial"));
	assert_eq!(query.get_single("columnFilters"), Some("name.%22John%22"));
	assert_eq!(router.navigation_count(), 1);
}

#[rstest]
#[tokio::test]
async fn test_clearing_slices_removes_params(filtered: TableState) {
	// Arrange
	let router = Arc::new(MemoryRouter::new(
		"/users?globalFilter=initial&columnFilters=name.%2522John%2522",
	));
	let updater = updater(&router, UrlStateConfig::default());

	// Act
	updater
		.update(&filtered, &TableState::default())
		.await
		.unwrap();

	// Assert
	assert_eq!(router.current_url(), "/users");
}

#[rstest]
#[tokio::test]
async fn test_pagination_is_written_one_based() {
	// Arrange
	let router = Arc::new(MemoryRouter::new("/users"));
	let updater = updater(&router, UrlStateConfig::default());
	let new = TableState {
		pagination: PaginationState::new(2, 20),
		..TableState::default()
	};

	// Act
	updater.update(&TableState::default(), &new).await.unwrap();

	// Assert
	insta::assert_snapshot!(router.current_url(), @"/users?pageIndex=3&pageSize=20");
}

#[rstest]
#[tokio::test]
async fn test_several_slices_share_one_navigation() {
	// Arrange
	let router = Arc::new(MemoryRouter::new("/users?tab=archived"));
	let updater = updater(&router, UrlStateConfig::default());
	let new = TableState {
		global_filter: Some("jo".to_string()),
		sorting: vec![ColumnSort::desc("age")],
		column_order: vec!["age".to_string(), "name".to_string()],
		pagination: PaginationState::new(1, 10),
		..TableState::default()
	};

	// Act
	updater.update(&TableState::default(), &new).await.unwrap();

	// Assert
	assert_eq!(router.navigation_count(), 1);
	insta::assert_snapshot!(
		router.current_url(),
		@"/users?tab=archived&globalFilter=jo&sorting=age.desc&columnOrder=age%2Cname&pageIndex=2"
	);
}

#[rstest]
#[tokio::test]
async fn test_replace_navigation_type_replaces_history_entry() {
	// Arrange
	let router = Arc::new(MemoryRouter::new("/users"));
	let config = UrlStateConfig::default().with_navigation_type(NavigationType::Replace);
	let updater = updater(&router, config);
	let new = TableState {
		sorting: vec![ColumnSort::asc("name")],
		..TableState::default()
	};

	// Act
	updater.update(&TableState::default(), &new).await.unwrap();

	// Assert
	let history = router.history();
	assert_eq!(history.len(), 1);
	assert_eq!(history[0].url, "/users?sorting=name.asc");
	assert_eq!(history[0].navigation_type, NavigationType::Replace);
}

#[rstest]
#[tokio::test]
async fn test_navigation_failure_is_returned(filtered: TableState) {
	// Arrange
	let router = Arc::new(MemoryRouter::new("/users"));
	let updater = updater(&router, UrlStateConfig::default());
	router.fail_next_navigation("blocked");

	// Act
	let result = updater.update(&TableState::default(), &filtered).await;

	// Assert
	assert!(matches!(
		result,
		Err(SyncError::Router(RouterError::NavigationFailed(ref msg))) if msg == "blocked"
	));
	assert_eq!(router.current_url(), "/users");
}

#[rstest]
#[tokio::test]
async fn test_encoder_failure_prevents_navigation() {
	// Arrange
	let router = Arc::new(MemoryRouter::new("/users"));
	let config = UrlStateConfig::default()
		.with_encoders(Encoders::new().with_sorting(|_| Err("unsupported".into())));
	let updater = updater(&router, config);
	let new = TableState {
		sorting: vec![ColumnSort::asc("name")],
		..TableState::default()
	};

	// Act
	let result = updater.update(&TableState::default(), &new).await;

	// Assert
	match result {
		Err(SyncError::Codec(err @ CodecError::Encoder { .. })) => {
			assert_eq!(err.slice(), StateSlice::Sorting);
		}
		other => panic!("expected encoder error, got {:?}", other),
	}
	assert_eq!(router.navigation_count(), 0);
}

#[rstest]
#[tokio::test]
async fn test_apply_writes_only_listed_slices(filtered: TableState) {
	// Arrange
	let router = Arc::new(MemoryRouter::new("/users"));
	let updater = updater(&router, UrlStateConfig::default());

	// Act
	updater
		.apply(&[StateSlice::GlobalFilter], &filtered)
		.await
		.unwrap();

	// Assert
	assert_eq!(router.current_url(), "/users?globalFilter=initial");
}
