//! `tk-level` — the level-wide tick scheduler.
//!
//! # Cycle model
//!
//! ```text
//! tick(step, budget, handler):
//!   ① Collect  — every chunk whose indexed next-due step has arrived is
//!                unpacked if needed, re-peeked, and (if the gate allows)
//!                moved into the ready heap.
//!   ② Drain    — pop the globally earliest due tick across ready chunks,
//!                then keep popping from the same chunk while it still
//!                precedes the next-best chunk.  Stops at `budget`.
//!   ③ Fold     — chunks left in the ready heap get their head step written
//!                back into the next-due index.
//!   ④ Run      — handler(pos, payload) for each selected tick, in order.
//!   ⑤ Cleanup  — per-cycle buffers cleared.
//! ```
//!
//! Hosts whose handler needs `&mut LevelTicks` (to schedule follow-up ticks
//! or query [`LevelTicks::will_tick_this_cycle`]) drive ④ themselves with
//! [`LevelTicks::collect_ticks`], [`LevelTicks::pop_collected`] and
//! [`LevelTicks::cleanup_after_cycle`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tk_core::{BlockPos, ChunkPos, Step, TickPriority};
//! use tk_level::{AlwaysTick, LevelTicks};
//! use tk_schedule::ChunkTicks;
//!
//! let mut level = LevelTicks::new(AlwaysTick);
//! level.add_container(ChunkPos::new(0, 0), ChunkTicks::new());
//! level.schedule_tick("water", BlockPos::new(1, 64, 1), 5, TickPriority::Normal);
//! level.tick(Step(5), 1024, |pos, block| println!("{block} at {pos}"));
//! ```

pub mod gate;
pub mod level;

#[cfg(test)]
mod tests;

pub use gate::{AlwaysTick, TickGate};
pub use level::{CycleStats, LevelTicks};
