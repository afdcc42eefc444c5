//! `tk-core` — foundational types for the chunk tick scheduler.
//!
//! This crate is a dependency of every other `tk-*` crate.  It intentionally
//! has no `tk-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`pos`]         | `BlockPos`, `ChunkPos`, `BoundingBox`                 |
//! | [`time`]        | `Step`, `TickConfig`                                  |
//! | [`priority`]    | `TickPriority` enum                                   |
//! | [`error`]       | `TickError`, `TickResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod pos;
pub mod priority;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TickError, TickResult};
pub use pos::{BlockPos, BoundingBox, ChunkPos};
pub use priority::TickPriority;
pub use time::{Step, TickConfig};
