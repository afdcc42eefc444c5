//! `tk-schedule` — scheduled ticks, per-chunk tick containers, and tick-list
//! persistence.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`tick`]        | `ScheduledTick`, `SavedTick`, `TickKey`, drain orderings  |
//! | [`chunk_ticks`] | `ChunkTicks` — live per-chunk min-heap                    |
//! | [`proto`]       | `ProtoChunkTicks` — append-only list for non-live chunks  |
//! | [`access`]      | `TickAccess`, `SerializableTickContainer` traits          |
//! | [`codec`]       | `read_ticks`, `write_ticks`, CSV load/save helpers        |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Save/load model (summary)
//!
//! A live tick carries an absolute `trigger_step`.  Packing a container at
//! step `s` stores `delay = trigger_step - s`; unpacking at step `s'` restores
//! `trigger_step = s' + delay`:
//!
//! ```text
//! pack(s)      ScheduledTick { trigger_step: s + 5, .. } → SavedTick { delay: 5, .. }
//! unpack(s')   SavedTick { delay: 5, .. } → ScheduledTick { trigger_step: s' + 5, sub_tick_order: < 0 }
//! ```
//!
//! Unpacked ticks get negative sub-tick orders so they run before ticks
//! scheduled in the new session at the same step and priority.

pub mod access;
pub mod chunk_ticks;
pub mod codec;
pub mod error;
pub mod proto;
pub mod tick;


pub use access::{SerializableTickContainer, TickAccess};
pub use chunk_ticks::ChunkTicks;
pub use codec::{
    load_chunk_ticks, load_proto_chunk_ticks, load_ticks_csv, read_ticks, save_ticks_csv,
    write_ticks,
};
pub use error::{ScheduleError, ScheduleResult};
pub use proto::ProtoChunkTicks;
pub use tick::{SavedTick, ScheduledTick, TickKey, TickPayload};
