//! Integration tests for tk-level.

use tk_core::{BlockPos, BoundingBox, ChunkPos, Step, TickConfig, TickPriority};
use tk_schedule::{ChunkTicks, SavedTick};

use crate::{AlwaysTick, LevelTicks, TickGate};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
enum Block {
    Water,
    Sand,
    Wire,
}

const ORIGIN_CHUNK: ChunkPos = ChunkPos::new(0, 0);

/// Level with the 3×3 chunks around the origin loaded.
fn level() -> LevelTicks<Block, AlwaysTick> {
    let mut level = LevelTicks::new(AlwaysTick);
    for x in -1..=1 {
        for z in -1..=1 {
            level.add_container(ChunkPos::new(x, z), ChunkTicks::new());
        }
    }
    level
}

fn pos(x: i32, y: i32, z: i32) -> BlockPos {
    BlockPos::new(x, y, z)
}

/// Run one cycle and return what the handler saw.
fn run<G: TickGate>(level: &mut LevelTicks<Block, G>, step: i64, budget: usize) -> Vec<(BlockPos, Block)> {
    let mut seen = Vec::new();
    level.tick(Step(step), budget, |p, block| seen.push((p, block)));
    seen
}

fn positions(seen: &[(BlockPos, Block)]) -> Vec<BlockPos> {
    seen.iter().map(|&(p, _)| p).collect()
}

// ── Ordering ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ordering_tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn priority_breaks_ties_at_same_step() {
        let mut l = level();
        l.schedule_tick(Block::Wire, pos(0, 64, 0), 3, TickPriority::Low);
        l.schedule_tick(Block::Wire, pos(1, 64, 0), 3, TickPriority::High);
        l.schedule_tick(Block::Wire, pos(2, 64, 0), 3, TickPriority::Normal);

        assert!(run(&mut l, 2, 100).is_empty());
        let seen = run(&mut l, 3, 100);
        assert_eq!(positions(&seen), vec![pos(1, 64, 0), pos(2, 64, 0), pos(0, 64, 0)]);
    }

    #[test]
    fn schedule_order_breaks_ties_across_chunks() {
        let mut l = level();
        l.schedule_tick(Block::Sand, pos(20, 64, 0), 1, TickPriority::Normal);
        l.schedule_tick(Block::Sand, pos(-5, 64, 0), 1, TickPriority::Normal);
        l.schedule_tick(Block::Sand, pos(3, 64, 20), 1, TickPriority::Normal);

        let seen = run(&mut l, 1, 100);
        assert_eq!(
            positions(&seen),
            vec![pos(20, 64, 0), pos(-5, 64, 0), pos(3, 64, 20)]
        );
    }

    #[test]
    fn random_schedules_drain_in_total_order() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut l = level();
        let mut expected = Vec::new();

        for i in 0..500 {
            let p = pos(rng.gen_range(-16..32), i, rng.gen_range(-16..32));
            let delay: i64 = rng.gen_range(0..20);
            let priority = TickPriority::ALL[rng.gen_range(0..7)];
            l.schedule_tick(Block::Water, p, delay, priority);
            expected.push((delay, priority, i64::from(i), p));
        }
        expected.sort();

        let mut seen = Vec::new();
        for step in 0..20 {
            seen.extend(positions(&run(&mut l, step, usize::MAX)));
        }
        let expected: Vec<BlockPos> = expected.into_iter().map(|(_, _, _, p)| p).collect();
        assert_eq!(seen, expected);
        assert_eq!(l.count(), 0);
    }

    #[test]
    fn overdue_ticks_run_on_next_cycle() {
        let mut l = level();
        l.schedule_tick(Block::Sand, pos(0, 64, 0), 2, TickPriority::Normal);
        assert!(run(&mut l, 1, 10).is_empty());
        // Step 2 skipped by the host.
        assert_eq!(run(&mut l, 5, 10).len(), 1);
    }
}

#[cfg(test)]
mod ready_heap_tests {
    use std::cmp::Ordering;

    use tk_schedule::ScheduledTick;

    use super::*;
    use crate::level::ReadyChunk;

    #[test]
    fn equality_agrees_with_ordering() {
        let early = ScheduledTick::new(Block::Water, pos(0, 64, 0), Step(3), TickPriority::Normal, 7);
        let late = ScheduledTick::new(Block::Sand, pos(1, 64, 0), Step(9), TickPriority::Normal, 7);
        let a = ReadyChunk::new(ORIGIN_CHUNK, &early);
        let b = ReadyChunk::new(ORIGIN_CHUNK, &late);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a, b);

        let other_chunk = ReadyChunk::new(ChunkPos::new(1, 0), &early);
        assert_ne!(a, other_chunk);
        assert!(a > other_chunk, "lower chunk pops first");
    }
}

// ── Uniqueness ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod uniqueness_tests {
    use super::*;

    #[test]
    fn second_schedule_for_same_pair_is_dropped() {
        let mut l = level();
        let p = pos(4, 64, 4);
        l.schedule_tick(Block::Water, p, 10, TickPriority::Normal);
        l.schedule_tick(Block::Water, p, 5, TickPriority::Normal);
        assert_eq!(l.count(), 1);

        let mut runs = Vec::new();
        for step in 0..=12 {
            if !run(&mut l, step, 100).is_empty() {
                runs.push(step);
            }
        }
        assert_eq!(runs, vec![10]);
    }

    #[test]
    fn different_payload_same_position_both_run() {
        let mut l = level();
        let p = pos(4, 64, 4);
        l.schedule_tick(Block::Water, p, 1, TickPriority::Normal);
        l.schedule_tick(Block::Sand, p, 1, TickPriority::Normal);
        assert_eq!(run(&mut l, 1, 100), vec![(p, Block::Water), (p, Block::Sand)]);
    }

    #[test]
    fn has_scheduled_tracks_lifecycle() {
        let mut l = level();
        let p = pos(-3, 64, 9);
        assert!(!l.has_scheduled_tick(p, &Block::Wire));
        l.schedule_tick(Block::Wire, p, 1, TickPriority::Normal);
        assert!(l.has_scheduled_tick(p, &Block::Wire));
        run(&mut l, 1, 100);
        assert!(!l.has_scheduled_tick(p, &Block::Wire));
    }
}

// ── Budget ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod budget_tests {
    use super::*;

    /// 100 ticks due at step 0, spread over three chunks.
    fn burst() -> LevelTicks<Block, AlwaysTick> {
        let mut l = level();
        for i in 0..100 {
            l.schedule_tick(Block::Sand, pos(i % 48 - 16, i, 0), 0, TickPriority::Normal);
        }
        l
    }

    #[test]
    fn budget_limits_invocations() {
        let mut l = burst();
        let stats = l.tick(Step(0), 10, |_, _| {});
        assert_eq!(stats.collected, 10);
        assert_eq!(stats.ran, 10);
        assert_eq!(run(&mut l, 0, 90).len(), 90);
        assert!(run(&mut l, 0, 50).is_empty());
        assert_eq!(l.count(), 0);
    }

    #[test]
    fn split_drain_matches_single_drain() {
        let mut whole = burst();
        let expected = positions(&run(&mut whole, 0, usize::MAX));

        let mut split = burst();
        let mut seen = Vec::new();
        for step in 0..10 {
            seen.extend(positions(&run(&mut split, step, 7)));
        }
        assert_eq!(seen.len(), 70);
        seen.extend(positions(&run(&mut split, 10, usize::MAX)));
        assert_eq!(seen, expected);
    }

    #[test]
    fn leftover_chunks_stay_indexed() {
        let mut l = burst();
        run(&mut l, 0, 1);
        for x in -1..=1 {
            assert_eq!(l.next_due(ChunkPos::new(x, 0)), Some(Step(0)));
        }
    }

    #[test]
    fn zero_budget_loses_nothing() {
        let mut l = burst();
        assert!(run(&mut l, 0, 0).is_empty());
        assert_eq!(l.count(), 100);
        assert_eq!(run(&mut l, 0, 1000).len(), 100);
    }

    #[test]
    fn config_caps_budget() {
        let config = TickConfig { max_ticks_per_cycle: 3 };
        let mut l = LevelTicks::with_config(AlwaysTick, config).unwrap();
        l.add_container(ORIGIN_CHUNK, ChunkTicks::new());
        for x in 0..5 {
            l.schedule_tick(Block::Wire, pos(x, 64, 0), 0, TickPriority::Normal);
        }
        assert_eq!(run(&mut l, 0, 100).len(), 3);
        assert_eq!(run(&mut l, 1, 100).len(), 2);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = TickConfig { max_ticks_per_cycle: 0 };
        assert!(LevelTicks::<Block, _>::with_config(AlwaysTick, config).is_err());
    }
}

// ── Containers, gate, persistence ─────────────────────────────────────────────

#[cfg(test)]
mod container_tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn schedule_in_unloaded_chunk_is_dropped() {
        let mut l: LevelTicks<Block, AlwaysTick> = LevelTicks::new(AlwaysTick);
        l.schedule_tick(Block::Water, pos(100, 64, 100), 1, TickPriority::Normal);
        assert_eq!(l.count(), 0);
        assert!(!l.has_scheduled_tick(pos(100, 64, 100), &Block::Water));
        assert!(run(&mut l, 1, 10).is_empty());
    }

    #[test]
    fn removed_container_stops_ticking() {
        let mut l = level();
        l.schedule_tick(Block::Water, pos(1, 64, 1), 1, TickPriority::Normal);
        let container = l.remove_container(ORIGIN_CHUNK).unwrap();
        assert_eq!(container.count(), 1);
        assert!(l.next_due(ORIGIN_CHUNK).is_none());
        assert!(run(&mut l, 1, 10).is_empty());
        assert!(l.remove_container(ORIGIN_CHUNK).is_none());
    }

    #[test]
    fn gate_defers_chunk() {
        let enabled = Rc::new(Cell::new(false));
        let gate = {
            let enabled = Rc::clone(&enabled);
            move |chunk: ChunkPos| chunk.x == 0 || enabled.get()
        };
        let mut l = LevelTicks::new(gate);
        l.add_container(ChunkPos::new(0, 0), ChunkTicks::new());
        l.add_container(ChunkPos::new(1, 0), ChunkTicks::new());
        l.schedule_tick(Block::Sand, pos(1, 64, 1), 0, TickPriority::Normal);
        l.schedule_tick(Block::Sand, pos(17, 64, 1), 0, TickPriority::Normal);

        assert_eq!(positions(&run(&mut l, 0, 10)), vec![pos(1, 64, 1)]);
        assert_eq!(l.next_due(ChunkPos::new(1, 0)), Some(Step(0)));

        enabled.set(true);
        assert_eq!(positions(&run(&mut l, 1, 10)), vec![pos(17, 64, 1)]);
    }

    #[test]
    fn saved_container_unpacks_on_first_collect() {
        let saved = vec![SavedTick::new(Block::Wire, pos(2, 64, 2), 3, TickPriority::Normal)];
        let mut l = LevelTicks::new(AlwaysTick);
        l.add_container(ORIGIN_CHUNK, ChunkTicks::from_saved(saved));
        assert!(l.has_scheduled_tick(pos(2, 64, 2), &Block::Wire));

        assert!(run(&mut l, 100, 10).is_empty());
        assert_eq!(l.next_due(ORIGIN_CHUNK), Some(Step(103)));
        assert_eq!(run(&mut l, 103, 10), vec![(pos(2, 64, 2), Block::Wire)]);
    }

    #[test]
    fn unload_reload_preserves_relative_order() {
        let specs = [
            (pos(0, 64, 0), 5, TickPriority::Low),
            (pos(1, 64, 0), 5, TickPriority::Low),
            (pos(2, 64, 0), 2, TickPriority::Normal),
            (pos(3, 64, 0), 5, TickPriority::High),
            (pos(4, 64, 0), 9, TickPriority::ExtremelyHigh),
        ];
        let build = || {
            let mut l = level();
            l.set_current_step(Step(100));
            for (p, delay, priority) in specs {
                l.schedule_tick(Block::Water, p, delay, priority);
            }
            l
        };

        let mut original = build();
        let mut expected = Vec::new();
        for step in 100..=110 {
            for (p, _) in run(&mut original, step, 100) {
                expected.push((step + 400, p));
            }
        }

        let mut unloaded = build();
        let saved = unloaded.remove_container(ORIGIN_CHUNK).unwrap().pack(Step(100));
        let mut reloaded: LevelTicks<Block, AlwaysTick> = LevelTicks::new(AlwaysTick);
        reloaded.add_container(ORIGIN_CHUNK, ChunkTicks::from_saved(saved));

        let mut actual = Vec::new();
        for step in 500..=510 {
            for (p, _) in run(&mut reloaded, step, 100) {
                actual.push((step, p));
            }
        }
        assert_eq!(actual, expected);
        assert_eq!(actual.len(), 5);
    }

    #[test]
    fn reloaded_ticks_run_before_fresh_ones() {
        let saved = vec![SavedTick::new(Block::Sand, pos(1, 64, 1), 2, TickPriority::Normal)];
        let mut l = LevelTicks::new(AlwaysTick);
        l.add_container(ORIGIN_CHUNK, ChunkTicks::from_saved(saved));
        l.add_container(ChunkPos::new(1, 0), ChunkTicks::new());

        assert!(run(&mut l, 500, 10).is_empty());
        l.schedule_tick(Block::Sand, pos(17, 64, 1), 2, TickPriority::Normal);
        assert_eq!(
            positions(&run(&mut l, 502, 10)),
            vec![pos(1, 64, 1), pos(17, 64, 1)]
        );
    }

    #[test]
    fn level_implements_tick_access() {
        use tk_schedule::{ScheduledTick, TickAccess};

        fn seed<A: TickAccess<Block>>(target: &mut A) {
            target.schedule(ScheduledTick::new(Block::Water, pos(0, 0, 0), Step(1), TickPriority::Normal, 0));
        }
        let mut l = level();
        seed(&mut l);
        assert_eq!(TickAccess::count(&l), 1);
    }

    #[test]
    fn schedule_before_first_collect_keeps_saved_delays() {
        let saved = vec![SavedTick::new(Block::Wire, pos(2, 64, 2), 3, TickPriority::Normal)];
        let mut l = LevelTicks::new(AlwaysTick);
        l.add_container(ORIGIN_CHUNK, ChunkTicks::from_saved(saved));

        l.schedule_tick(Block::Sand, pos(3, 64, 2), 1, TickPriority::Normal);
        assert!(l.container(ORIGIN_CHUNK).unwrap().has_pending());
        assert_eq!(l.count(), 2);

        assert_eq!(run(&mut l, 100, 10), vec![(pos(3, 64, 2), Block::Sand)]);
        assert_eq!(l.next_due(ORIGIN_CHUNK), Some(Step(103)));
        assert_eq!(run(&mut l, 103, 10), vec![(pos(2, 64, 2), Block::Wire)]);
    }

    #[test]
    fn abandoned_cycle_is_requeued() {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        let mut l = level();
        for x in 0..3 {
            l.schedule_tick(Block::Water, pos(x, 64, 0), 0, TickPriority::Normal);
        }
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            l.tick(Step(0), 10, |p, _| {
                if p.x == 1 {
                    panic!("handler failed");
                }
            })
        }));
        assert!(outcome.is_err());

        l.schedule_tick(Block::Water, pos(3, 64, 0), 1, TickPriority::Normal);
        assert_eq!(
            positions(&run(&mut l, 1, 2)),
            vec![pos(2, 64, 0), pos(3, 64, 0)]
        );
        assert!(!l.will_tick_this_cycle(pos(2, 64, 0), &Block::Water));
        assert_eq!(l.count(), 0);
    }

    #[test]
    #[should_panic(expected = "handler failed")]
    fn handler_panic_propagates() {
        let mut l = level();
        l.schedule_tick(Block::Water, pos(0, 64, 0), 0, TickPriority::Normal);
        l.tick(Step(0), 10, |_, _| panic!("handler failed"));
    }
}

// ── Per-cycle queries ─────────────────────────────────────────────────────────

#[cfg(test)]
mod cycle_tests {
    use super::*;

    #[test]
    fn will_tick_this_cycle_follows_the_selection() {
        let mut l = level();
        let (a, b) = (pos(0, 64, 0), pos(1, 64, 0));
        l.schedule_tick(Block::Water, a, 0, TickPriority::Normal);
        l.schedule_tick(Block::Water, b, 0, TickPriority::Normal);

        assert!(!l.will_tick_this_cycle(a, &Block::Water));
        assert_eq!(l.collect_ticks(Step(0), 10), 2);
        assert!(l.will_tick_this_cycle(a, &Block::Water));
        assert!(l.will_tick_this_cycle(b, &Block::Water));
        assert!(!l.will_tick_this_cycle(a, &Block::Sand));

        assert_eq!(l.pop_collected().unwrap().pos, a);
        assert!(!l.will_tick_this_cycle(a, &Block::Water));
        assert!(l.will_tick_this_cycle(b, &Block::Water));

        l.cleanup_after_cycle();
        assert!(!l.will_tick_this_cycle(b, &Block::Water));
        assert!(l.pop_collected().is_none());
    }

    #[test]
    fn handler_loop_can_schedule_follow_ups() {
        let mut l = level();
        l.schedule_tick(Block::Wire, pos(0, 64, 0), 0, TickPriority::Normal);

        l.collect_ticks(Step(0), 10);
        while let Some(tick) = l.pop_collected() {
            l.schedule_tick(Block::Wire, tick.pos.offset(1, 0, 0), 1, TickPriority::Normal);
        }
        l.cleanup_after_cycle();

        assert_eq!(positions(&run(&mut l, 1, 10)), vec![pos(1, 64, 0)]);
    }

    #[test]
    fn rescheduling_a_selected_tick_is_allowed() {
        let mut l = level();
        let p = pos(0, 64, 0);
        l.schedule_tick(Block::Wire, p, 0, TickPriority::Normal);
        l.collect_ticks(Step(0), 10);
        l.schedule_tick(Block::Wire, p, 2, TickPriority::Normal);
        assert!(l.has_scheduled_tick(p, &Block::Wire));
        assert!(l.pop_collected().is_some());
        l.cleanup_after_cycle();
        assert_eq!(run(&mut l, 2, 10).len(), 1);
    }
}

// ── Area operations ───────────────────────────────────────────────────────────

#[cfg(test)]
mod area_tests {
    use super::*;

    fn row(l: &mut LevelTicks<Block, AlwaysTick>, delay: i64) {
        for x in 0..4 {
            l.schedule_tick(Block::Sand, pos(x, 64, 0), delay, TickPriority::Normal);
        }
    }

    #[test]
    fn clear_area_removes_only_inside() {
        let mut l = level();
        row(&mut l, 5);
        l.schedule_tick(Block::Water, pos(-5, 64, 0), 5, TickPriority::Normal);

        let removed = l.clear_area(BoundingBox::new(pos(0, 0, 0), pos(1, 100, 0)));
        assert_eq!(removed, 2);
        assert!(!l.has_scheduled_tick(pos(0, 64, 0), &Block::Sand));
        assert!(!l.has_scheduled_tick(pos(1, 64, 0), &Block::Sand));
        assert!(l.has_scheduled_tick(pos(2, 64, 0), &Block::Sand));
        assert!(l.has_scheduled_tick(pos(3, 64, 0), &Block::Sand));
        assert!(l.has_scheduled_tick(pos(-5, 64, 0), &Block::Water));

        assert_eq!(
            positions(&run(&mut l, 5, 100)),
            vec![pos(2, 64, 0), pos(3, 64, 0), pos(-5, 64, 0)]
        );
    }

    #[test]
    fn clear_area_updates_index() {
        let mut l = level();
        l.schedule_tick(Block::Sand, pos(0, 64, 0), 1, TickPriority::Normal);
        l.schedule_tick(Block::Sand, pos(5, 64, 0), 9, TickPriority::Normal);
        assert_eq!(l.next_due(ORIGIN_CHUNK), Some(Step(1)));

        l.clear_area(BoundingBox::single(pos(0, 64, 0)));
        assert_eq!(l.next_due(ORIGIN_CHUNK), Some(Step(9)));

        l.clear_area(BoundingBox::single(pos(5, 64, 0)));
        assert_eq!(l.next_due(ORIGIN_CHUNK), None);
        assert_eq!(l.count(), 0);
    }

    #[test]
    fn clear_area_drops_selected_ticks() {
        let mut l = level();
        row(&mut l, 0);
        assert_eq!(l.collect_ticks(Step(0), 100), 4);
        assert!(l.will_tick_this_cycle(pos(0, 64, 0), &Block::Sand));

        l.clear_area(BoundingBox::new(pos(0, 0, 0), pos(1, 100, 0)));
        assert!(!l.will_tick_this_cycle(pos(0, 64, 0), &Block::Sand));
        assert!(l.will_tick_this_cycle(pos(2, 64, 0), &Block::Sand));

        let mut ran = Vec::new();
        while let Some(tick) = l.pop_collected() {
            ran.push(tick.pos);
        }
        l.cleanup_after_cycle();
        assert_eq!(ran, vec![pos(2, 64, 0), pos(3, 64, 0)]);
    }

    #[test]
    fn copy_area_from_translates_and_keeps_order() {
        let mut source = level();
        source.schedule_tick(Block::Wire, pos(0, 0, 0), 2, TickPriority::Normal);
        source.schedule_tick(Block::Wire, pos(1, 1, 1), 2, TickPriority::High);

        let mut dest = level();
        dest.schedule_tick(Block::Water, pos(12, 0, 0), 2, TickPriority::High);

        let area = BoundingBox::new(pos(0, 0, 0), pos(1, 1, 1));
        assert_eq!(dest.copy_area_from(&mut source, area, pos(10, 0, 0)), 2);
        assert_eq!(source.count(), 2);

        let seen = run(&mut dest, 2, 100);
        assert_eq!(
            seen,
            vec![
                (pos(12, 0, 0), Block::Water),
                (pos(11, 1, 1), Block::Wire),
                (pos(10, 0, 0), Block::Wire),
            ]
        );
    }

    #[test]
    fn copy_area_within_level_orders_copies_after_existing() {
        let mut l = level();
        l.schedule_tick(Block::Sand, pos(0, 64, 0), 1, TickPriority::Normal);
        l.schedule_tick(Block::Sand, pos(9, 64, 9), 1, TickPriority::Normal);

        let copied = l.copy_area(BoundingBox::single(pos(0, 64, 0)), pos(0, 0, 3));
        assert_eq!(copied, 1);
        assert_eq!(l.count(), 3);
        assert_eq!(
            positions(&run(&mut l, 1, 100)),
            vec![pos(0, 64, 0), pos(9, 64, 9), pos(0, 64, 3)]
        );
    }

    #[test]
    fn copy_area_includes_selected_ticks() {
        let mut l = level();
        l.schedule_tick(Block::Sand, pos(0, 64, 0), 1, TickPriority::Normal);
        l.collect_ticks(Step(1), 10);
        assert_eq!(l.count(), 0);

        l.copy_area(BoundingBox::single(pos(0, 64, 0)), pos(2, 0, 0));
        assert!(l.pop_collected().is_some());
        l.cleanup_after_cycle();

        assert_eq!(l.count(), 1);
        assert_eq!(positions(&run(&mut l, 2, 10)), vec![pos(2, 64, 0)]);
    }

    #[test]
    fn clear_area_reaches_saved_ticks() {
        let saved = (0..3)
            .map(|x| SavedTick::new(Block::Sand, pos(x, 64, 0), 3, TickPriority::Normal))
            .collect();
        let mut l = LevelTicks::new(AlwaysTick);
        l.add_container(ORIGIN_CHUNK, ChunkTicks::from_saved(saved));

        assert_eq!(l.clear_area(BoundingBox::single(pos(1, 64, 0))), 1);
        assert!(!l.has_scheduled_tick(pos(1, 64, 0), &Block::Sand));
        assert!(l.container(ORIGIN_CHUNK).unwrap().has_pending());

        assert!(run(&mut l, 10, 10).is_empty());
        assert_eq!(positions(&run(&mut l, 13, 10)), vec![pos(0, 64, 0), pos(2, 64, 0)]);
    }

    #[test]
    fn copy_of_restored_chunks_keeps_source_run_order() {
        let restored = |xs: std::ops::RangeInclusive<i32>| {
            ChunkTicks::from_saved(
                xs.map(|x| SavedTick::new(Block::Wire, pos(x, 64, 0), 5, TickPriority::Normal))
                    .collect(),
            )
        };
        let mut source = LevelTicks::new(AlwaysTick);
        source.add_container(ORIGIN_CHUNK, restored(13..=15));
        source.add_container(ChunkPos::new(1, 0), restored(16..=18));
        assert!(run(&mut source, 0, 10).is_empty());

        let mut dest = LevelTicks::new(AlwaysTick);
        dest.add_container(ChunkPos::new(2, 0), ChunkTicks::new());
        let area = BoundingBox::new(pos(0, 0, 0), pos(31, 255, 15));
        assert_eq!(dest.copy_area_from(&mut source, area, pos(20, 0, 0)), 6);

        let expected: Vec<BlockPos> = positions(&run(&mut source, 5, 10))
            .into_iter()
            .map(|p| p.offset(20, 0, 0))
            .collect();
        assert_eq!(
            expected,
            vec![pos(33, 64, 0), pos(36, 64, 0), pos(34, 64, 0), pos(37, 64, 0), pos(35, 64, 0), pos(38, 64, 0)]
        );
        assert_eq!(positions(&run(&mut dest, 5, 10)), expected);
    }

    #[test]
    fn copy_of_empty_area_is_noop() {
        let mut l = level();
        assert_eq!(l.copy_area(BoundingBox::single(pos(0, 0, 0)), pos(1, 0, 0)), 0);
        assert_eq!(l.count(), 0);
    }
}
