//! `ChunkTicks` — the tick queue of one live chunk.
//!
//! # Lifecycle
//!
//! ```text
//! ChunkTicks::new()                    empty, chunk generated this session
//! ChunkTicks::from_saved(list)         loaded: list kept as pending, indexed
//!        │
//!        ▼ unpack(step)                once; pending → heap with negative orders
//! schedule / peek / pop / remove_if    live use by the level scheduler
//!        │
//!        ▼ pack(step)                  chunk unloads
//! Vec<SavedTick>
//! ```
//!
//! The uniqueness index covers pending *and* live ticks, so
//! `has_scheduled_tick` and duplicate suppression are correct before the
//! container is unpacked.

use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;
use tk_core::{BlockPos, Step};

use crate::access::{SerializableTickContainer, TickAccess};
use crate::tick::{DrainEntry, SavedTick, ScheduledTick, TickKey, TickPayload};

/// Per-chunk min-heap of live ticks plus not-yet-materialised saved ticks.
#[derive(Clone, Debug)]
pub struct ChunkTicks<T> {
    queue:              BinaryHeap<DrainEntry<T>>,
    /// Saved ticks awaiting [`unpack`](Self::unpack).  `None` once unpacked.
    pending:            Option<Vec<SavedTick<T>>>,
    ticks_per_position: FxHashSet<TickKey<T>>,
}

impl<T: TickPayload> Default for ChunkTicks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TickPayload> ChunkTicks<T> {
    /// An empty container with nothing pending.
    pub fn new() -> Self {
        Self {
            queue:              BinaryHeap::new(),
            pending:            None,
            ticks_per_position: FxHashSet::default(),
        }
    }

    /// A container restored from a saved tick list.
    ///
    /// The list stays packed until [`unpack`](Self::unpack); its keys are
    /// indexed now.  Duplicate `(pos, payload)` entries in the list are
    /// dropped, keeping the first.
    pub fn from_saved(saved: Vec<SavedTick<T>>) -> Self {
        let mut ticks_per_position = FxHashSet::default();
        let pending: Vec<SavedTick<T>> = saved
            .into_iter()
            .filter(|tick| ticks_per_position.insert(tick.key()))
            .collect();
        Self {
            queue: BinaryHeap::new(),
            pending: (!pending.is_empty()).then_some(pending),
            ticks_per_position,
        }
    }

    /// Schedule `tick` unless `(pos, payload)` is already pending.
    ///
    /// Returns `true` when the tick was inserted and is now the head of the
    /// queue, i.e. the container's next due step may have moved earlier.
    pub fn schedule(&mut self, tick: ScheduledTick<T>) -> bool {
        if !self.ticks_per_position.insert(tick.key()) {
            return false;
        }
        let (step, priority, order) = (tick.trigger_step, tick.priority, tick.sub_tick_order);
        self.queue.push(DrainEntry(tick));
        self.queue.peek().is_some_and(|head| {
            head.0.trigger_step == step
                && head.0.priority == priority
                && head.0.sub_tick_order == order
        })
    }

    /// Earliest live tick by drain order.
    #[inline]
    pub fn peek(&self) -> Option<&ScheduledTick<T>> {
        self.queue.peek().map(|entry| &entry.0)
    }

    /// Remove and return the earliest live tick.
    pub fn pop(&mut self) -> Option<ScheduledTick<T>> {
        let tick = self.queue.pop()?.0;
        self.ticks_per_position.remove(&tick.key());
        Some(tick)
    }

    /// `true` if a live or pending tick exists for `(pos, payload)`.
    pub fn has_scheduled_tick(&self, pos: BlockPos, payload: &T) -> bool {
        self.ticks_per_position
            .contains(&TickKey::new(pos, payload.clone()))
    }

    /// Remove every live tick matching `pred`; returns how many were removed.
    ///
    /// Pending saved ticks are not visited; see [`remove_saved_if`](Self::remove_saved_if).
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&ScheduledTick<T>) -> bool,
    {
        let before = self.queue.len();
        let index = &mut self.ticks_per_position;
        self.queue.retain(|entry| {
            if pred(&entry.0) {
                index.remove(&entry.0.key());
                false
            } else {
                true
            }
        });
        before - self.queue.len()
    }

    /// Remove every still-packed saved tick matching `pred`; returns how many
    /// were removed.  Emptying the list ends the pending state.
    pub fn remove_saved_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&SavedTick<T>) -> bool,
    {
        let Some(pending) = self.pending.as_mut() else {
            return 0;
        };
        let before = pending.len();
        let index = &mut self.ticks_per_position;
        pending.retain(|saved| {
            if pred(saved) {
                index.remove(&saved.key());
                false
            } else {
                true
            }
        });
        let removed = before - pending.len();
        if pending.is_empty() {
            self.pending = None;
        }
        removed
    }

    /// Live ticks in heap storage order (not drain order).
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledTick<T>> {
        self.queue.iter().map(|entry| &entry.0)
    }

    /// Live ticks sorted by drain order.
    pub fn sorted(&self) -> Vec<&ScheduledTick<T>> {
        let mut ticks: Vec<&ScheduledTick<T>> = self.iter().collect();
        ticks.sort_by(|a, b| ScheduledTick::drain_order(a, b));
        ticks
    }

    /// Live plus pending tick count.
    pub fn count(&self) -> usize {
        self.queue.len() + self.pending.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// `true` until [`unpack`](Self::unpack) has materialised a saved list.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Materialise pending saved ticks relative to `step`.  One-shot: later
    /// calls are no-ops.
    ///
    /// The `n` pending ticks receive sub-tick orders `-n..=-1` in list order,
    /// so they keep their saved relative order and all sort before any tick
    /// scheduled fresh in this session at the same step and priority.
    pub fn unpack(&mut self, step: Step) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let base = -(pending.len() as i64);
        self.queue.reserve(pending.len());
        for (i, saved) in pending.into_iter().enumerate() {
            self.queue.push(DrainEntry(saved.unpack(step, base + i as i64)));
        }
    }

    /// Pending saved ticks verbatim, then live ticks in drain order with
    /// delays relative to `step`.
    pub fn pack(&self, step: Step) -> Vec<SavedTick<T>> {
        let mut out: Vec<SavedTick<T>> = Vec::with_capacity(self.count());
        if let Some(pending) = &self.pending {
            out.extend(pending.iter().cloned());
        }
        out.extend(
            self.sorted()
                .into_iter()
                .map(|tick| SavedTick::from_scheduled(tick.clone(), step)),
        );
        out
    }
}

impl<T: TickPayload> TickAccess<T> for ChunkTicks<T> {
    fn schedule(&mut self, tick: ScheduledTick<T>) {
        ChunkTicks::schedule(self, tick);
    }

    fn has_scheduled_tick(&self, pos: BlockPos, payload: &T) -> bool {
        ChunkTicks::has_scheduled_tick(self, pos, payload)
    }

    fn count(&self) -> usize {
        ChunkTicks::count(self)
    }
}

impl<T: TickPayload> SerializableTickContainer<T> for ChunkTicks<T> {
    fn pack(&self, step: Step) -> Vec<SavedTick<T>> {
        ChunkTicks::pack(self, step)
    }
}
