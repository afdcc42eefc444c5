//! The `LevelTicks` scheduler and its per-cycle state machine.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use rustc_hash::{FxHashMap, FxHashSet};
use tk_core::{BlockPos, BoundingBox, ChunkPos, Step, TickConfig, TickPriority, TickResult};
use tk_schedule::{ChunkTicks, ScheduledTick, TickAccess, TickKey, TickPayload};
use tracing::{debug, trace, warn};

use crate::TickGate;

// ── Ready heap entry ──────────────────────────────────────────────────────────

/// A chunk whose head tick is due this cycle, keyed by that head.
///
/// The head is cached: a chunk is never mutated while it sits in the ready
/// heap.  Ties in intra-cycle order (possible across chunks, e.g. two freshly
/// unpacked chunks) fall back to `ChunkPos`.  `trigger_step` is carried for
/// the index fold-back and takes no part in the ordering.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ReadyChunk {
    priority:       TickPriority,
    sub_tick_order: i64,
    chunk:          ChunkPos,
    trigger_step:   Step,
}

impl ReadyChunk {
    pub(crate) fn new<T>(chunk: ChunkPos, head: &ScheduledTick<T>) -> Self {
        Self {
            priority:       head.priority,
            sub_tick_order: head.sub_tick_order,
            chunk,
            trigger_step:   head.trigger_step,
        }
    }

    #[inline]
    fn key(&self) -> (TickPriority, i64, ChunkPos) {
        (self.priority, self.sub_tick_order, self.chunk)
    }
}

impl PartialEq for ReadyChunk {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReadyChunk {}

impl Ord for ReadyChunk {
    /// Reversed so `BinaryHeap` pops the earliest head first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for ReadyChunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── CycleStats ────────────────────────────────────────────────────────────────

/// Counters for one [`LevelTicks::tick`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub step:      Step,
    /// Ticks selected during collection.
    pub collected: usize,
    /// Ticks handed to the handler.  Lower than `collected` only if ticks
    /// were cleared mid-cycle.
    pub ran:       usize,
}

// ── LevelTicks ────────────────────────────────────────────────────────────────

/// Scheduler over every loaded chunk's tick container.
///
/// Owns the containers, a coarse `chunk → next due step` index so idle chunks
/// are not re-peeked every cycle, and the transient per-cycle buffers.  The
/// index is a lower bound: an entry may be earlier than the chunk's real head
/// (it is corrected on the next collect) but never later.
pub struct LevelTicks<T, G> {
    gate:       G,
    config:     TickConfig,
    containers: FxHashMap<ChunkPos, ChunkTicks<T>>,
    next_due:   FxHashMap<ChunkPos, Step>,

    // ── Per-cycle state; empty between cycles ─────────────────────────────
    ready:       BinaryHeap<ReadyChunk>,
    to_run:      VecDeque<ScheduledTick<T>>,
    already_run: Vec<ScheduledTick<T>>,
    /// Lazily built view of `to_run` for `will_tick_this_cycle`.
    to_run_set:  FxHashSet<TickKey<T>>,

    current_step:   Step,
    /// Level-wide sub-tick counter; never reused within a session.
    next_sub_order: i64,
}

impl<T: TickPayload, G: TickGate> LevelTicks<T, G> {
    /// A scheduler with the default [`TickConfig`].
    pub fn new(gate: G) -> Self {
        Self {
            gate,
            config:         TickConfig::default(),
            containers:     FxHashMap::default(),
            next_due:       FxHashMap::default(),
            ready:          BinaryHeap::new(),
            to_run:         VecDeque::new(),
            already_run:    Vec::new(),
            to_run_set:     FxHashSet::default(),
            current_step:   Step::ZERO,
            next_sub_order: 0,
        }
    }

    /// A scheduler with a validated `config`.
    pub fn with_config(gate: G, config: TickConfig) -> TickResult<Self> {
        config.validate()?;
        let mut level = Self::new(gate);
        level.config = config;
        Ok(level)
    }

    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    /// Step of the most recent cycle; the base for [`schedule_tick`](Self::schedule_tick) delays.
    pub fn current_step(&self) -> Step {
        self.current_step
    }

    /// Move the scheduling clock without running a cycle, e.g. after loading.
    pub fn set_current_step(&mut self, step: Step) {
        self.current_step = step;
    }

    // ── Containers ────────────────────────────────────────────────────────

    /// Attach a chunk's container.
    ///
    /// A container still holding saved ticks is indexed as due immediately;
    /// the next collect unpacks it relative to that cycle's step.
    pub fn add_container(&mut self, chunk: ChunkPos, container: ChunkTicks<T>) {
        let due = if container.has_pending() {
            Some(Step(i64::MIN))
        } else {
            container.peek().map(|head| head.trigger_step)
        };
        match due {
            Some(due) => {
                self.next_due.insert(chunk, due);
            }
            None => {
                self.next_due.remove(&chunk);
            }
        }
        trace!(%chunk, ticks = container.count(), "attached tick container");
        if self.containers.insert(chunk, container).is_some() {
            warn!(%chunk, "replaced an already attached tick container");
        }
    }

    /// Detach a chunk's container, typically to pack it for saving.
    pub fn remove_container(&mut self, chunk: ChunkPos) -> Option<ChunkTicks<T>> {
        self.next_due.remove(&chunk);
        let container = self.containers.remove(&chunk)?;
        trace!(%chunk, ticks = container.count(), "detached tick container");
        Some(container)
    }

    pub fn container(&self, chunk: ChunkPos) -> Option<&ChunkTicks<T>> {
        self.containers.get(&chunk)
    }

    pub fn loaded_chunks(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.containers.keys().copied()
    }

    /// The indexed next-due step of `chunk`, if it has one.
    pub fn next_due(&self, chunk: ChunkPos) -> Option<Step> {
        self.next_due.get(&chunk).copied()
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Schedule `payload` at `pos`, `delay` steps after the current step,
    /// stamped with the next level-wide sub-tick order.
    pub fn schedule_tick(&mut self, payload: T, pos: BlockPos, delay: i64, priority: TickPriority) {
        let order = self.next_sub_tick_order();
        let tick = ScheduledTick::new(payload, pos, self.current_step + delay, priority, order);
        self.schedule(tick);
    }

    /// Schedule a pre-built tick into the chunk owning its position.
    ///
    /// Ticks for unloaded chunks are logged and dropped.  A tick whose
    /// `(pos, payload)` is already pending is ignored.  A container's saved
    /// ticks stay packed; the next collect unpacks them at its own step.
    pub fn schedule(&mut self, tick: ScheduledTick<T>) {
        let chunk = ChunkPos::containing(tick.pos);
        let Some(container) = self.containers.get_mut(&chunk) else {
            warn!(pos = %tick.pos, %chunk, "dropping tick scheduled in unloaded chunk");
            return;
        };
        let trigger_step = tick.trigger_step;
        if container.schedule(tick) {
            Self::lower_next_due(&mut self.next_due, chunk, trigger_step);
        }
    }

    pub fn has_scheduled_tick(&self, pos: BlockPos, payload: &T) -> bool {
        self.containers
            .get(&ChunkPos::containing(pos))
            .is_some_and(|container| container.has_scheduled_tick(pos, payload))
    }

    /// Pending ticks across all attached containers.
    pub fn count(&self) -> usize {
        self.containers.values().map(ChunkTicks::count).sum()
    }

    fn next_sub_tick_order(&mut self) -> i64 {
        let order = self.next_sub_order;
        self.next_sub_order += 1;
        order
    }

    fn lower_next_due(next_due: &mut FxHashMap<ChunkPos, Step>, chunk: ChunkPos, step: Step) {
        next_due
            .entry(chunk)
            .and_modify(|due| *due = (*due).min(step))
            .or_insert(step);
    }

    // ── Cycle ─────────────────────────────────────────────────────────────

    /// Run one cycle: collect up to `budget` due ticks (further capped by
    /// `config.max_ticks_per_cycle`), hand each to `handler` in drain order,
    /// and clear the per-cycle state.
    ///
    /// A panic in `handler` propagates unchanged.
    pub fn tick<F>(&mut self, step: Step, budget: usize, mut handler: F) -> CycleStats
    where
        F: FnMut(BlockPos, T),
    {
        let collected = self.collect_ticks(step, budget);
        let mut ran = 0;
        while let Some(tick) = self.pop_collected() {
            handler(tick.pos, tick.payload);
            ran += 1;
        }
        self.cleanup_after_cycle();

        debug!(%step, collected, ran, "tick cycle complete");
        CycleStats { step, collected, ran }
    }

    /// Collect and drain phases.  Returns the number of ticks selected.
    ///
    /// Call [`cleanup_after_cycle`](Self::cleanup_after_cycle) once the
    /// selection is consumed.  If the previous cycle was abandoned instead
    /// (e.g. a caught handler panic), its unrun ticks are requeued and its
    /// buffers cleared before collecting.
    pub fn collect_ticks(&mut self, step: Step, budget: usize) -> usize {
        self.requeue_abandoned_cycle();
        self.current_step = step;
        let budget = budget.min(self.config.max_ticks_per_cycle);
        self.sort_containers_to_tick(step);
        self.drain_containers(step, budget);
        self.reschedule_leftover_containers();
        self.to_run.len()
    }

    /// Next selected tick in run order, or `None` once the selection is
    /// exhausted.  The tick is recorded as already run.
    pub fn pop_collected(&mut self) -> Option<ScheduledTick<T>> {
        let tick = self.to_run.pop_front()?;
        if !self.to_run_set.is_empty() {
            self.to_run_set.remove(&tick.key());
        }
        self.already_run.push(tick.clone());
        Some(tick)
    }

    /// Clear every per-cycle buffer.
    pub fn cleanup_after_cycle(&mut self) {
        self.to_run.clear();
        self.ready.clear();
        self.already_run.clear();
        self.to_run_set.clear();
    }

    /// `true` if `(pos, payload)` was selected this cycle and has not run yet.
    pub fn will_tick_this_cycle(&mut self, pos: BlockPos, payload: &T) -> bool {
        if self.to_run_set.is_empty() && !self.to_run.is_empty() {
            self.to_run_set.extend(self.to_run.iter().map(ScheduledTick::key));
        }
        self.to_run_set.contains(&TickKey::new(pos, payload.clone()))
    }

    /// Put a previous cycle's unrun selection back into its containers and
    /// reset the per-cycle buffers.
    fn requeue_abandoned_cycle(&mut self) {
        if self.to_run.is_empty() && self.already_run.is_empty() && self.ready.is_empty() {
            self.to_run_set.clear();
            return;
        }
        warn!(unrun = self.to_run.len(), "previous tick cycle was not cleaned up");
        self.reschedule_leftover_containers();
        let unrun = std::mem::take(&mut self.to_run);
        self.cleanup_after_cycle();
        for tick in unrun {
            self.schedule(tick);
        }
    }

    /// ① Move every due, gate-approved chunk into the ready heap.
    fn sort_containers_to_tick(&mut self, step: Step) {
        let containers = &mut self.containers;
        let ready = &mut self.ready;
        let gate = &self.gate;

        self.next_due.retain(|&chunk, due| {
            if *due > step {
                return true;
            }
            let Some(container) = containers.get_mut(&chunk) else {
                return false;
            };
            container.unpack(step);
            let Some(head) = container.peek() else {
                return false;
            };
            if !head.is_due(step) || !gate.may_tick(chunk) {
                *due = head.trigger_step;
                return true;
            }
            ready.push(ReadyChunk::new(chunk, head));
            false
        });
    }

    /// ② Pop due ticks in global order until the budget is spent.
    fn drain_containers(&mut self, step: Step, budget: usize) {
        while self.to_run.len() < budget {
            let Some(current) = self.ready.pop() else {
                break;
            };
            let Some(container) = self.containers.get_mut(&current.chunk) else {
                continue;
            };
            if let Some(tick) = container.pop() {
                self.to_run.push_back(tick);
            }

            // Keep draining this chunk while its head still precedes the
            // next-best chunk.
            let next_best = self.ready.peek().map(ReadyChunk::key);
            while self.to_run.len() < budget {
                let Some(head) = container.peek() else {
                    break;
                };
                if !head.is_due(step)
                    || next_best.is_some_and(|next| ReadyChunk::new(current.chunk, head).key() > next)
                {
                    break;
                }
                if let Some(tick) = container.pop() {
                    self.to_run.push_back(tick);
                }
            }

            match container.peek() {
                Some(head) if head.is_due(step) && self.to_run.len() < budget => {
                    self.ready.push(ReadyChunk::new(current.chunk, head));
                }
                Some(head) => {
                    Self::lower_next_due(&mut self.next_due, current.chunk, head.trigger_step);
                }
                None => {}
            }
        }
    }

    /// ③ Chunks still ready when the budget ran out go back in the index.
    fn reschedule_leftover_containers(&mut self) {
        for leftover in self.ready.drain() {
            Self::lower_next_due(&mut self.next_due, leftover.chunk, leftover.trigger_step);
        }
    }

    // ── Area operations ───────────────────────────────────────────────────

    /// Remove every tick inside `area`: pending in containers, selected this
    /// cycle, and already run this cycle.  Returns how many ticks were
    /// removed from containers and the unrun selection.
    pub fn clear_area(&mut self, area: BoundingBox) -> usize {
        let mut removed = 0;
        for chunk in area.intersecting_chunks() {
            let Some(container) = self.containers.get_mut(&chunk) else {
                continue;
            };
            let n = container.remove_if(|tick| area.is_inside(tick.pos))
                + container.remove_saved_if(|saved| area.is_inside(saved.pos));
            if n == 0 {
                continue;
            }
            removed += n;
            if container.has_pending() {
                continue;
            }
            match container.peek() {
                Some(head) => {
                    self.next_due.insert(chunk, head.trigger_step);
                }
                None => {
                    self.next_due.remove(&chunk);
                }
            }
        }

        let selected_before = self.to_run.len();
        self.to_run.retain(|tick| !area.is_inside(tick.pos));
        self.already_run.retain(|tick| !area.is_inside(tick.pos));
        if self.to_run.len() != selected_before {
            removed += selected_before - self.to_run.len();
            self.to_run_set.clear();
        }

        if removed > 0 {
            debug!(%area, removed, "cleared ticks in area");
        }
        removed
    }

    /// Copy every tick inside `area` to `area + offset` within this level.
    /// Returns the number of ticks copied.
    pub fn copy_area(&mut self, area: BoundingBox, offset: BlockPos) -> usize {
        let ticks = self.ticks_in_area(area);
        self.schedule_copies(ticks, offset)
    }

    /// Copy every tick of `source` inside `area` into this level at
    /// `area + offset`.  Returns the number of ticks copied.
    ///
    /// Copies keep their trigger steps and relative order, and are ordered
    /// after every tick already scheduled here.
    pub fn copy_area_from<S: TickGate>(
        &mut self,
        source: &mut LevelTicks<T, S>,
        area:   BoundingBox,
        offset: BlockPos,
    ) -> usize {
        let ticks = source.ticks_in_area(area);
        self.schedule_copies(ticks, offset)
    }

    /// Ticks inside `area` that ran this cycle, are selected to run, or are
    /// still queued, in the order this level drains them: drain order, then
    /// owning chunk.
    fn ticks_in_area(&mut self, area: BoundingBox) -> Vec<ScheduledTick<T>> {
        let mut ticks: Vec<ScheduledTick<T>> = self
            .already_run
            .iter()
            .chain(self.to_run.iter())
            .filter(|tick| area.is_inside(tick.pos))
            .cloned()
            .collect();

        for chunk in area.intersecting_chunks() {
            if let Some(container) = self.containers.get_mut(&chunk) {
                container.unpack(self.current_step);
                ticks.extend(container.iter().filter(|tick| area.is_inside(tick.pos)).cloned());
            }
        }

        ticks.sort_by(|a, b| {
            ScheduledTick::drain_order(a, b)
                .then_with(|| ChunkPos::containing(a.pos).cmp(&ChunkPos::containing(b.pos)))
        });
        ticks
    }

    /// Stamp `ticks`, already in run order, with consecutive fresh sub-tick
    /// orders and schedule them translated by `offset`.
    fn schedule_copies(&mut self, ticks: Vec<ScheduledTick<T>>, offset: BlockPos) -> usize {
        let copied = ticks.len();
        let base = self.next_sub_order;
        self.next_sub_order += copied as i64;

        for (i, tick) in ticks.into_iter().enumerate() {
            let order = base + i as i64;
            let moved = ScheduledTick { sub_tick_order: order, ..tick.translated(offset) };
            self.schedule(moved);
        }
        copied
    }
}

impl<T: TickPayload, G: TickGate> TickAccess<T> for LevelTicks<T, G> {
    fn schedule(&mut self, tick: ScheduledTick<T>) {
        LevelTicks::schedule(self, tick);
    }

    fn has_scheduled_tick(&self, pos: BlockPos, payload: &T) -> bool {
        LevelTicks::has_scheduled_tick(self, pos, payload)
    }

    fn count(&self) -> usize {
        LevelTicks::count(self)
    }
}
