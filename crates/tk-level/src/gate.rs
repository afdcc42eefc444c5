//! `TickGate` — decides which chunks may run ticks this cycle.
//!
//! The host simulation owns the notion of "simulated distance"; the scheduler
//! only asks.  A gate is consulted once per due chunk per cycle, during
//! collection.

use tk_core::ChunkPos;

/// Predicate consulted before a due chunk's ticks are collected.
///
/// Any `Fn(ChunkPos) -> bool` is a gate.
pub trait TickGate {
    fn may_tick(&self, chunk: ChunkPos) -> bool;
}

impl<F: Fn(ChunkPos) -> bool> TickGate for F {
    #[inline]
    fn may_tick(&self, chunk: ChunkPos) -> bool {
        self(chunk)
    }
}

/// A gate that lets every loaded chunk tick.
#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysTick;

impl TickGate for AlwaysTick {
    #[inline]
    fn may_tick(&self, _chunk: ChunkPos) -> bool {
        true
    }
}
