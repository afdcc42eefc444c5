//! Scheduled and saved ticks, and the orderings the scheduler drains by.
//!
//! # Ordering
//!
//! Live ticks are drained in *drain order*:
//!
//! ```text
//! (trigger_step asc, priority asc, sub_tick_order asc)
//! ```
//!
//! `sub_tick_order` is unique among live ticks, so the order is total.  Once
//! two ticks are both known to be due this cycle, `trigger_step` no longer
//! matters and the cheaper *intra-cycle order* `(priority, sub_tick_order)`
//! is used instead.
//!
//! # Identity
//!
//! Two ticks are "the same tick" for de-duplication purposes when they share
//! `(pos, payload)`; see [`TickKey`].

use std::cmp::Ordering;
use std::hash::Hash;

use tk_core::{BlockPos, Step, TickPriority};

// ── TickKey ───────────────────────────────────────────────────────────────────

/// De-duplication key: a tick's position and payload, nothing else.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TickKey<T> {
    pub pos:     BlockPos,
    pub payload: T,
}

impl<T> TickKey<T> {
    #[inline]
    pub fn new(pos: BlockPos, payload: T) -> Self {
        Self { pos, payload }
    }
}

// ── ScheduledTick ─────────────────────────────────────────────────────────────

/// A live tick: run `payload` at `pos` on `trigger_step`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ScheduledTick<T> {
    pub payload:        T,
    pub pos:            BlockPos,
    pub trigger_step:   Step,
    pub priority:       TickPriority,
    pub sub_tick_order: i64,
}

impl<T> ScheduledTick<T> {
    pub fn new(
        payload: T,
        pos: BlockPos,
        trigger_step: Step,
        priority: TickPriority,
        sub_tick_order: i64,
    ) -> Self {
        Self { payload, pos, trigger_step, priority, sub_tick_order }
    }

    /// Global drain order: trigger step, then priority, then sub-tick order.
    #[inline]
    pub fn drain_order(a: &Self, b: &Self) -> Ordering {
        a.trigger_step
            .cmp(&b.trigger_step)
            .then_with(|| Self::intra_cycle_order(a, b))
    }

    /// Order between ticks already known to be due in the same cycle.
    #[inline]
    pub fn intra_cycle_order(a: &Self, b: &Self) -> Ordering {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.sub_tick_order.cmp(&b.sub_tick_order))
    }

    #[inline]
    pub fn is_due(&self, now: Step) -> bool {
        self.trigger_step <= now
    }

    /// Same tick moved by `delta`, keeping step, priority and order.
    pub fn translated(self, delta: BlockPos) -> Self {
        Self { pos: self.pos.offset_by(delta), ..self }
    }
}

impl<T: Clone> ScheduledTick<T> {
    /// De-duplication key for this tick.
    #[inline]
    pub fn key(&self) -> TickKey<T> {
        TickKey::new(self.pos, self.payload.clone())
    }
}

// ── DrainEntry ────────────────────────────────────────────────────────────────

/// Heap adapter giving `ScheduledTick` a reversed drain order, so that
/// `BinaryHeap<DrainEntry<T>>` pops the earliest tick first.
#[derive(Clone, Debug)]
pub(crate) struct DrainEntry<T>(pub(crate) ScheduledTick<T>);

impl<T> PartialEq for DrainEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for DrainEntry<T> {}

impl<T> PartialOrd for DrainEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for DrainEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        ScheduledTick::drain_order(&other.0, &self.0)
    }
}

// ── SavedTick ─────────────────────────────────────────────────────────────────

/// The persisted form of a tick: its delay is relative to the step at which
/// its container was packed.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SavedTick<T> {
    pub payload:  T,
    pub pos:      BlockPos,
    pub delay:    i32,
    pub priority: TickPriority,
}

impl<T> SavedTick<T> {
    pub fn new(payload: T, pos: BlockPos, delay: i32, priority: TickPriority) -> Self {
        Self { payload, pos, delay, priority }
    }

    /// Convert a live tick relative to `step`.  Delays beyond `i32` saturate.
    pub fn from_scheduled(tick: ScheduledTick<T>, step: Step) -> Self {
        let delay = (tick.trigger_step - step).clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        Self::new(tick.payload, tick.pos, delay, tick.priority)
    }

    /// Re-materialise relative to `step` with the given sub-tick order.
    pub fn unpack(self, step: Step, sub_tick_order: i64) -> ScheduledTick<T> {
        ScheduledTick::new(
            self.payload,
            self.pos,
            step + self.delay as i64,
            self.priority,
            sub_tick_order,
        )
    }
}

impl<T: Clone> SavedTick<T> {
    #[inline]
    pub fn key(&self) -> TickKey<T> {
        TickKey::new(self.pos, self.payload.clone())
    }
}

/// Payload types usable in tick containers.
pub trait TickPayload: Clone + Eq + Hash {}

impl<T: Clone + Eq + Hash> TickPayload for T {}
