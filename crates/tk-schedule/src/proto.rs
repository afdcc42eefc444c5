//! `ProtoChunkTicks` — tick list of a chunk that is not yet live.
//!
//! Chunks still being generated collect ticks but never drain them.  Ticks
//! are stored already packed (delay 0), so promotion to a live
//! [`ChunkTicks`] is a move of the list and the first cycle after promotion
//! runs them.

use rustc_hash::FxHashSet;
use tk_core::{BlockPos, Step};

use crate::access::{SerializableTickContainer, TickAccess};
use crate::chunk_ticks::ChunkTicks;
use crate::tick::{SavedTick, ScheduledTick, TickKey, TickPayload};

/// Append-only, de-duplicated list of saved ticks.
#[derive(Clone, Debug)]
pub struct ProtoChunkTicks<T> {
    ticks:              Vec<SavedTick<T>>,
    ticks_per_position: FxHashSet<TickKey<T>>,
}

impl<T: TickPayload> Default for ProtoChunkTicks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TickPayload> ProtoChunkTicks<T> {
    pub fn new() -> Self {
        Self {
            ticks:              Vec::new(),
            ticks_per_position: FxHashSet::default(),
        }
    }

    /// Restore from a saved list, dropping duplicate `(pos, payload)` entries.
    pub fn from_saved(saved: Vec<SavedTick<T>>) -> Self {
        let mut proto = Self::new();
        for tick in saved {
            proto.schedule_saved(tick);
        }
        proto
    }

    /// Store `tick` with delay 0; its trigger step and order are discarded.
    pub fn schedule(&mut self, tick: ScheduledTick<T>) {
        self.schedule_saved(SavedTick::new(tick.payload, tick.pos, 0, tick.priority));
    }

    /// Append a saved tick unless `(pos, payload)` is already listed.
    pub fn schedule_saved(&mut self, tick: SavedTick<T>) {
        if self.ticks_per_position.insert(tick.key()) {
            self.ticks.push(tick);
        }
    }

    pub fn has_scheduled_tick(&self, pos: BlockPos, payload: &T) -> bool {
        self.ticks_per_position
            .contains(&TickKey::new(pos, payload.clone()))
    }

    pub fn count(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Saved ticks in insertion order.
    pub fn ticks(&self) -> &[SavedTick<T>] {
        &self.ticks
    }

    /// Promote to a live container; the list becomes its pending set.
    pub fn into_chunk_ticks(self) -> ChunkTicks<T> {
        ChunkTicks::from_saved(self.ticks)
    }
}

impl<T: TickPayload> TickAccess<T> for ProtoChunkTicks<T> {
    fn schedule(&mut self, tick: ScheduledTick<T>) {
        ProtoChunkTicks::schedule(self, tick);
    }

    fn has_scheduled_tick(&self, pos: BlockPos, payload: &T) -> bool {
        ProtoChunkTicks::has_scheduled_tick(self, pos, payload)
    }

    fn count(&self) -> usize {
        ProtoChunkTicks::count(self)
    }
}

impl<T: TickPayload> SerializableTickContainer<T> for ProtoChunkTicks<T> {
    /// Proto ticks carry no absolute step, so `step` is ignored.
    fn pack(&self, _step: Step) -> Vec<SavedTick<T>> {
        self.ticks.clone()
    }
}
