//! CSV tick-list codec.
//!
//! # CSV format
//!
//! One row per saved tick.  The list is embedded in whatever per-chunk save
//! the host writes; this module only reads and writes the rows.
//!
//! ```csv
//! payload,x,y,z,delay,priority
//! water,3,64,7,5,0
//! redstone_wire,4,64,7,2,-1
//! ```
//!
//! | Column     | Meaning                                                  |
//! |------------|----------------------------------------------------------|
//! | `payload`  | Payload id, resolved by a caller-supplied parser         |
//! | `x,y,z`    | Block position                                           |
//! | `delay`    | Steps after the save point the tick is due (may be < 0)  |
//! | `priority` | `TickPriority::value()`; out-of-range values clamp       |
//!
//! Rows whose payload id does not resolve, or whose position lies outside the
//! chunk being loaded, are skipped with a warning rather than failing the
//! whole chunk.

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tk_core::{BlockPos, ChunkPos, TickPriority};
use tracing::warn;

use crate::chunk_ticks::ChunkTicks;
use crate::proto::ProtoChunkTicks;
use crate::tick::{SavedTick, TickPayload};
use crate::{ScheduleError, ScheduleResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct SavedTickRecord {
    payload:  String,
    x:        i32,
    y:        i32,
    z:        i32,
    delay:    i32,
    priority: i32,
}

// ── Writing ───────────────────────────────────────────────────────────────────

/// Write `ticks` as CSV rows to `writer`, naming payloads with `payload_id`.
pub fn write_ticks<W, T, F>(writer: W, ticks: &[SavedTick<T>], payload_id: F) -> ScheduleResult<()>
where
    W: Write,
    F: Fn(&T) -> String,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for tick in ticks {
        let record = SavedTickRecord {
            payload:  payload_id(&tick.payload),
            x:        tick.pos.x,
            y:        tick.pos.y,
            z:        tick.pos.z,
            delay:    tick.delay,
            priority: tick.priority.value(),
        };
        csv_writer
            .serialize(record)
            .map_err(|e| ScheduleError::Write(e.to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Like [`write_ticks`] but creates (or truncates) the file at `path`.
pub fn save_ticks_csv<T, F>(path: &Path, ticks: &[SavedTick<T>], payload_id: F) -> ScheduleResult<()>
where
    F: Fn(&T) -> String,
{
    let file = std::fs::File::create(path)?;
    write_ticks(file, ticks, payload_id)
}

// ── Reading ───────────────────────────────────────────────────────────────────

/// Read the saved tick list of `chunk` from `reader`.
///
/// `parse_payload` resolves payload ids; `None` skips the row.  Rows outside
/// `chunk` are skipped.  A structurally malformed row is an error.
pub fn read_ticks<R, T, F>(reader: R, chunk: ChunkPos, parse_payload: F) -> ScheduleResult<Vec<SavedTick<T>>>
where
    R: Read,
    F: Fn(&str) -> Option<T>,
{
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut ticks = Vec::new();

    for result in csv_reader.deserialize::<SavedTickRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let pos = BlockPos::new(row.x, row.y, row.z);

        let Some(payload) = parse_payload(&row.payload) else {
            warn!(payload = %row.payload, %pos, "skipping saved tick with unknown payload");
            continue;
        };
        if !chunk.contains(pos) {
            warn!(%pos, %chunk, "skipping saved tick outside its chunk");
            continue;
        }

        ticks.push(SavedTick::new(
            payload,
            pos,
            row.delay,
            TickPriority::from_value(row.priority),
        ));
    }

    Ok(ticks)
}

/// Like [`read_ticks`] but opens the file at `path`.
pub fn load_ticks_csv<T, F>(path: &Path, chunk: ChunkPos, parse_payload: F) -> ScheduleResult<Vec<SavedTick<T>>>
where
    F: Fn(&str) -> Option<T>,
{
    let file = std::fs::File::open(path)?;
    read_ticks(file, chunk, parse_payload)
}

/// Read a live chunk's container; its ticks stay pending until unpacked.
pub fn load_chunk_ticks<R, T, F>(reader: R, chunk: ChunkPos, parse_payload: F) -> ScheduleResult<ChunkTicks<T>>
where
    R: Read,
    T: TickPayload,
    F: Fn(&str) -> Option<T>,
{
    read_ticks(reader, chunk, parse_payload).map(ChunkTicks::from_saved)
}

/// Read a not-yet-live chunk's tick list.
pub fn load_proto_chunk_ticks<R, T, F>(reader: R, chunk: ChunkPos, parse_payload: F) -> ScheduleResult<ProtoChunkTicks<T>>
where
    R: Read,
    T: TickPayload,
    F: Fn(&str) -> Option<T>,
{
    read_ticks(reader, chunk, parse_payload).map(ProtoChunkTicks::from_saved)
}
