//! Per-slice debouncing of URL updates.

use crate::error::Result;
use crate::updater::BatchedUpdater;
use parking_lot::Mutex;
use reinhardt_table_state::{DebounceMilliseconds, StateSlice, TableState};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::AbortHandle;
use tokio::time::Instant;

/// A slice waiting for its quiet period to elapse.
struct Pending {
	/// Latest snapshot observed for the slice.
	state: TableState,
	deadline: Instant,
	/// Identifies the timer that owns this entry.
	generation: u64,
	handle: AbortHandle,
}

struct Shared {
	updater: BatchedUpdater,
	delays: DebounceMilliseconds,
	pending: Mutex<BTreeMap<StateSlice, Pending>>,
	generations: AtomicU64,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Delays URL writes per slice until the slice has been quiet for its
/// configured number of milliseconds.
///
/// Slices with a delay of zero are written immediately. Every other slice
/// owns one timer; a new change restarts it and replaces the pending value,
/// so only the final value of a burst reaches the URL. When a timer fires,
/// every pending slice that is also due is written in the same navigation.
///
/// ```mermaid
/// sequenceDiagram
///     participant T as Table
///     participant D as Debouncer
///     participant U as BatchedUpdater
///     participant R as Router
///     T->>D: handle_change(globalFilter = "a")
///     D->>D: arm timer (300 ms)
///     T->>D: handle_change(globalFilter = "ab")
///     D->>D: abort timer, re-arm (300 ms)
///     Note over D: 300 ms of silence
///     D->>U: apply([globalFilter], "ab")
///     U->>R: navigate(url)
/// ```
///
/// Timers run on the ambient Tokio runtime. Dropping the debouncer, or
/// calling [`Debouncer::dispose`], aborts them without writing.
pub struct Debouncer {
	shared: Arc<Shared>,
}

impl std::fmt::Debug for Debouncer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Debouncer")
			.field("delays", &self.shared.delays)
			.field("pending", &self.pending_slices())
			.finish()
	}
}

impl Debouncer {
	/// Creates a debouncer feeding `updater`, using the updater's configured
	/// delays.
	pub fn new(updater: BatchedUpdater) -> Self {
		let delays = updater.config().debounce;
		Self {
			shared: Arc::new(Shared {
				updater,
				delays,
				pending: Mutex::new(BTreeMap::new()),
				generations: AtomicU64::new(0),
			}),
		}
	}

	/// Handles a table update from `old` to `new`.
	///
	/// Changed slices without a delay are written right away, in one
	/// navigation. The rest are (re)scheduled. When nothing changed, the
	/// update is forwarded as-is so the router still sees one navigation.
	///
	/// # Errors
	///
	/// Returns an error from the immediate write only. Failures of delayed
	/// writes happen outside any caller and are logged.
	pub async fn handle_change(&self, old: &TableState, new: &TableState) -> Result<()> {
		let changed = StateSlice::changed(old, new);
		if changed.is_empty() {
			return self.shared.updater.apply(&[], new).await;
		}

		let mut immediate = Vec::new();
		for slice in changed {
			if self.shared.delays.get(slice) == 0 {
				immediate.push(slice);
			} else {
				self.schedule(slice, new);
			}
		}

		if immediate.is_empty() {
			return Ok(());
		}
		self.shared.updater.apply(&immediate, new).await
	}

	fn schedule(&self, slice: StateSlice, new: &TableState) {
		let deadline = Instant::now() + self.shared.delays.duration(slice);
		let mut pending = self.shared.pending.lock();

		if let Some(existing) = pending.remove(&slice) {
			existing.handle.abort();
		}

		let generation = self.shared.generations.fetch_add(1, Ordering::Relaxed);
		let shared = Arc::clone(&self.shared);
		let handle = tokio::spawn(async move {
			tokio::time::sleep_until(deadline).await;
			fire(shared, slice, generation).await;
		})
		.abort_handle();

		tracing::debug!(
			%slice,
			delay_ms = self.shared.delays.get(slice),
			"debounce timer armed"
		);
		pending.insert(
			slice,
			Pending {
				state: new.clone(),
				deadline,
				generation,
				handle,
			},
		);
	}

	/// Returns the slices with a pending write, in encoding order.
	pub fn pending_slices(&self) -> Vec<StateSlice> {
		self.shared.pending.lock().keys().copied().collect()
	}

	/// Overwrites every pending slice of `state` with its pending value.
	///
	/// Applied to state decoded from the URL, this yields what the URL will
	/// hold once all timers have fired.
	pub fn overlay(&self, state: &mut TableState) {
		for (slice, pending) in self.shared.pending.lock().iter() {
			state.copy_slice_from(&pending.state, *slice);
		}
	}

	/// Writes every pending slice now, in one navigation.
	///
	/// Does nothing when no write is pending.
	///
	/// # Errors
	///
	/// Returns an error if an encoder override fails or the router rejects
	/// the navigation.
	pub async fn flush(&self) -> Result<()> {
		let drained = std::mem::take(&mut *self.shared.pending.lock());
		for pending in drained.values() {
			pending.handle.abort();
		}
		let Some((slices, state)) = merge(drained) else {
			return Ok(());
		};
		self.shared.updater.apply(&slices, &state).await
	}

	/// Cancels every pending write.
	pub fn dispose(&self) {
		let drained = std::mem::take(&mut *self.shared.pending.lock());
		if !drained.is_empty() {
			tracing::debug!(pending = drained.len(), "discarding pending URL writes");
		}
		for pending in drained.into_values() {
			pending.handle.abort();
		}
	}
}

impl Drop for Debouncer {
	fn drop(&mut self) {
		self.dispose();
	}
}

/// Timer expiry for `slice`: writes it together with every other due slice.
///
/// A timer whose entry was re-armed, flushed or written by a sibling while it
/// waited for the lock does nothing.
async fn fire(shared: Arc<Shared>, slice: StateSlice, generation: u64) {
	let due = {
		let mut pending = shared.pending.lock();
		let owned = pending
			.get(&slice)
			.is_some_and(|entry| entry.generation == generation);
		if !owned {
			return;
		}
		let now = Instant::now();
		let keys: Vec<StateSlice> = pending
			.iter()
			.filter(|(key, entry)| **key == slice || entry.deadline <= now)
			.map(|(key, _)| *key)
			.collect();
		keys.into_iter()
			.filter_map(|key| pending.remove_entry(&key))
			.collect::<BTreeMap<_, _>>()
	};
	for (key, entry) in &due {
		if *key != slice {
			entry.handle.abort();
		}
	}

	let Some((slices, state)) = merge(due) else {
		return;
	};
	if let Err(e) = shared.updater.apply(&slices, &state).await {
		tracing::warn!(error = %e, ?slices, "debounced URL update failed");
	}
}

/// Combines pending entries into one state carrying each slice's latest
/// value.
fn merge(entries: BTreeMap<StateSlice, Pending>) -> Option<(Vec<StateSlice>, TableState)> {
	let mut merged: Option<TableState> = None;
	let mut slices = Vec::with_capacity(entries.len());

	for (slice, pending) in entries {
		match merged.as_mut() {
			Some(state) => state.copy_slice_from(&pending.state, slice),
			None => merged = Some(pending.state),
		}
		slices.push(slice);
	}

	merged.map(|state| (slices, state))
}
