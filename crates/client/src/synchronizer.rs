//! # Slot Synchronizer
//!
//! This module keeps a booking form's time dropdown in sync with the
//! availability endpoint. Whenever the employee, service or date
//! selection changes, the synchronizer issues one lookup for the current
//! triple and rebuilds the time control from the answer, restoring the
//! preferred time when it is still offered.
//!
//! ## Refresh contract
//!
//! 1. The changed field is folded into the selection and the resulting
//!    triple is snapshotted. Later changes never alter a lookup that is
//!    already in flight.
//! 2. An incomplete triple (any field empty) skips the lookup entirely.
//! 3. A complete triple claims the next request generation and asks the
//!    availability source for slots.
//! 4. A successful answer rebuilds the time control, unless a newer
//!    refresh was dispatched while this one was in flight. Responses for
//!    superseded generations are discarded, so the control never travels
//!    backwards to an older triple.
//! 5. A failed lookup leaves the control untouched. The previous options
//!    stay on display.
//!
//! ## Concurrency
//!
//! [`SlotSynchronizer::bind`] spawns an event loop that folds changes
//! into the selection in arrival order and runs each qualifying lookup
//! on its own task, so the loop stays responsive while requests are in
//! flight. Overlapping requests are neither de-duplicated nor cancelled;
//! only the application of their responses is gated by the generation
//! counter.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

use slotsync_core::errors::SyncResult;
use slotsync_core::models::selection::{Selection, SelectionChange};
use slotsync_core::models::time_control::TimeControl;

use crate::endpoint::AvailabilitySource;

/// What a single refresh ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A selection field was empty, so no request was issued.
    Skipped,
    /// The time control was rebuilt with this many options.
    Updated(usize),
    /// The response arrived after a newer refresh had been dispatched
    /// and was discarded.
    Superseded,
}

struct Inner {
    selection: Mutex<Selection>,
    control: Mutex<TimeControl>,
    source: Box<dyn AvailabilitySource>,
    generation: AtomicU64,
}

/// Keeps the time control in step with the current selection.
///
/// Cheap to clone; all clones share the same selection, time control and
/// generation counter.
#[derive(Clone)]
pub struct SlotSynchronizer {
    inner: Arc<Inner>,
}

impl SlotSynchronizer {
    pub fn new(source: impl AvailabilitySource + 'static, control: TimeControl) -> Self {
        Self {
            inner: Arc::new(Inner {
                selection: Mutex::new(Selection::default()),
                control: Mutex::new(control),
                source: Box::new(source),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Folds one field change into the selection and refreshes the time
    /// control, waiting for the lookup to finish.
    ///
    /// This is the sequential counterpart of the bound event loop. Use it
    /// when the embedding code wants to observe the outcome of each
    /// change directly.
    pub async fn apply(&self, change: SelectionChange) -> SyncResult<RefreshOutcome> {
        let snapshot = self.fold(change).await;

        if !snapshot.is_complete() {
            debug!("selection incomplete, skipping availability lookup");
            return Ok(RefreshOutcome::Skipped);
        }

        let generation = self.next_generation();
        self.refresh(snapshot, generation).await
    }

    /// Spawns the event loop and hands back the listener-facing handle.
    ///
    /// Call once per embedding, the way a page binds its listeners once
    /// on load. Must be called from within a Tokio runtime.
    pub fn bind(self) -> SyncHandle {
        let (events, inbox) = mpsc::unbounded_channel();
        let sync = self.clone();
        tokio::spawn(sync.run(inbox));

        SyncHandle { events, sync: self }
    }

    async fn run(self, mut inbox: mpsc::UnboundedReceiver<SelectionChange>) {
        while let Some(change) = inbox.recv().await {
            let snapshot = self.fold(change).await;

            if !snapshot.is_complete() {
                debug!("selection incomplete, skipping availability lookup");
                continue;
            }

            // Generations are claimed in event order, before the lookup
            // task gets a chance to run.
            let generation = self.next_generation();
            let sync = self.clone();
            tokio::spawn(async move {
                match sync.refresh(snapshot, generation).await {
                    Ok(outcome) => debug!(?outcome, "slot refresh finished"),
                    Err(error) => warn!(%error, "slot refresh failed, keeping previous options"),
                }
            });
        }
    }

    async fn fold(&self, change: SelectionChange) -> Selection {
        let mut selection = self.inner.selection.lock().await;
        selection.apply(change);
        selection.clone()
    }

    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn refresh(&self, snapshot: Selection, generation: u64) -> SyncResult<RefreshOutcome> {
        let slots = self.inner.source.available_time(&snapshot).await?;

        let mut control = self.inner.control.lock().await;
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding slots for a superseded selection");
            return Ok(RefreshOutcome::Superseded);
        }

        let count = slots.len();
        control.rebuild(slots);
        Ok(RefreshOutcome::Updated(count))
    }

    /// Snapshot of the current time control.
    pub async fn time_control(&self) -> TimeControl {
        self.inner.control.lock().await.clone()
    }

    /// Snapshot of the current selection.
    pub async fn selection(&self) -> Selection {
        self.inner.selection.lock().await.clone()
    }

    /// Stores the preferred time consulted when options are rebuilt. The
    /// marker is owned by the embedding form.
    pub async fn set_preferred_time(&self, preferred: Option<String>) {
        self.inner.control.lock().await.set_preferred(preferred);
    }
}

/// Listener-facing handle returned by [`SlotSynchronizer::bind`].
///
/// The three `*_changed` methods are the change listeners a booking page
/// wires to its employee, service and date controls.
pub struct SyncHandle {
    events: mpsc::UnboundedSender<SelectionChange>,
    sync: SlotSynchronizer,
}

impl SyncHandle {
    pub fn employee_changed(&self, employee: impl Into<String>) {
        self.notify(SelectionChange::Employee(employee.into()));
    }

    pub fn service_changed(&self, service: impl Into<String>) {
        self.notify(SelectionChange::Service(service.into()));
    }

    pub fn date_changed(&self, date: impl Into<String>) {
        self.notify(SelectionChange::Date(date.into()));
    }

    /// Queues a raw selection change for the event loop.
    pub fn notify(&self, change: SelectionChange) {
        if self.events.send(change).is_err() {
            warn!("synchronizer event loop is gone, dropping selection change");
        }
    }

    /// Snapshot of the current time control.
    pub async fn time_control(&self) -> TimeControl {
        self.sync.time_control().await
    }

    /// Snapshot of the current selection.
    pub async fn selection(&self) -> Selection {
        self.sync.selection().await
    }

    /// Stores the preferred time consulted when options are rebuilt.
    pub async fn set_preferred_time(&self, preferred: Option<String>) {
        self.sync.set_preferred_time(preferred).await;
    }
}
