//! Traits shared by everything ticks can be scheduled into.
//!
//! Host code that generates ticks (world generation, block updates, area
//! copies) is written against [`TickAccess`] so it works the same whether the
//! target is a live [`ChunkTicks`][crate::ChunkTicks], a
//! [`ProtoChunkTicks`][crate::ProtoChunkTicks] for a chunk still being
//! generated, or the whole level.

use tk_core::{BlockPos, Step};

use crate::{SavedTick, ScheduledTick};

/// Schedule-and-query access to a tick store.
pub trait TickAccess<T> {
    /// Schedule `tick`.  A tick whose `(pos, payload)` is already pending is
    /// silently ignored.
    fn schedule(&mut self, tick: ScheduledTick<T>);

    /// `true` if a tick for `(pos, payload)` is pending.
    fn has_scheduled_tick(&self, pos: BlockPos, payload: &T) -> bool;

    /// Number of pending ticks.
    fn count(&self) -> usize;
}

/// A tick store that can be written out when its chunk unloads.
pub trait SerializableTickContainer<T> {
    /// Every pending tick, with delays relative to `step`.
    fn pack(&self, step: Step) -> Vec<SavedTick<T>>;
}
