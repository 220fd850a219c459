//! Fork-join parallel computation over a chunked range.
//!
//! The range `[0, n)` is split into as many contiguous, near-equal chunks as
//! there are worker tasks. Each worker squares the indices of its own chunk
//! and records every result under a shared mutex, so lines from different
//! workers may interleave but no single line is ever torn. The calling
//! operation does not return until every worker has joined.

use std::ops::Range;
use std::sync::Mutex;
use std::thread;

use crate::error::TourError;

/// Length of the iteration range covered by the squares demo.
pub const SQUARE_RANGE: usize = 11;

/// Split `[0, n)` into `tasks` contiguous chunks.
///
/// Chunk `t` covers `[t*n/tasks, (t+1)*n/tasks)`, with the last chunk
/// clamped to `n` so rounding never drops an index. A task count of zero is
/// treated as one; some hosts report no parallelism at all, and dividing by
/// zero is a worse answer than running serially.
pub fn chunk_ranges(n: usize, tasks: usize) -> Vec<Range<usize>> {
    let tasks = tasks.max(1);
    (0..tasks)
        .map(|t| {
            let begin = t * n / tasks;
            let end = if t + 1 == tasks { n } else { (t + 1) * n / tasks };
            begin..end
        })
        .collect()
}

/// Square every index in `[0, n)` across `tasks` concurrent workers.
///
/// Returns `(task, index*index)` pairs in the order they were recorded.
/// Ordering across tasks is whatever the scheduler produced; ordering within
/// a task is ascending by index, because each worker walks its chunk front
/// to back and records one entry per lock acquisition.
pub fn squares_by_chunk(n: usize, tasks: usize) -> Result<Vec<(usize, usize)>, TourError> {
    let recorded = Mutex::new(Vec::with_capacity(n));

    // Scoped threads: all workers join before the scope exits.
    thread::scope(|s| {
        for (task, chunk) in chunk_ranges(n, tasks).into_iter().enumerate() {
            let recorded = &recorded;
            s.spawn(move || {
                for i in chunk {
                    let square = i * i;
                    // One lock acquisition per recorded entry, matching the
                    // one-lock-per-printed-line contract of the demo.
                    if let Ok(mut entries) = recorded.lock() {
                        entries.push((task, square));
                    }
                }
            });
        }
    });

    recorded.into_inner().map_err(|_| TourError::PoisonedLock)
}

/// Worker count to use on this host, never zero.
pub fn worker_count() -> usize {
    num_cpus::get().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn four_tasks_split_eleven_indices_as_documented() {
        let chunks = chunk_ranges(11, 4);
        assert_eq!(chunks, vec![0..2, 2..5, 5..8, 8..11]);
    }

    #[test]
    fn one_task_covers_the_whole_range() {
        assert_eq!(chunk_ranges(11, 1), vec![0..11]);
    }

    #[test]
    fn zero_tasks_fall_back_to_one() {
        assert_eq!(chunk_ranges(11, 0), vec![0..11]);
    }

    #[test]
    fn chunks_are_contiguous_with_no_gaps_or_overlaps() {
        for tasks in 1..=256 {
            let chunks = chunk_ranges(11, tasks);
            assert_eq!(chunks.len(), tasks);
            assert_eq!(chunks[0].start, 0);
            assert_eq!(chunks[tasks - 1].end, 11);
            for pair in chunks.windows(2) {
                assert_eq!(pair[0].end, pair[1].start, "gap or overlap at {tasks} tasks");
            }
        }
    }

    #[test]
    fn every_square_appears_exactly_once() {
        for tasks in [1, 2, 4, 7, 11, 64] {
            let mut values: Vec<usize> = squares_by_chunk(11, tasks)
                .unwrap()
                .into_iter()
                .map(|(_, square)| square)
                .collect();
            values.sort_unstable();
            assert_eq!(values, vec![0, 1, 4, 9, 16, 25, 36, 49, 64, 81, 100]);
        }
    }

    #[test]
    fn per_task_output_is_ascending() {
        let entries = squares_by_chunk(11, 4).unwrap();
        let tasks: HashSet<usize> = entries.iter().map(|&(task, _)| task).collect();
        for task in tasks {
            let own: Vec<usize> = entries
                .iter()
                .filter(|&&(t, _)| t == task)
                .map(|&(_, square)| square)
                .collect();
            assert!(own.windows(2).all(|w| w[0] < w[1]), "task {task} out of order");
        }
    }

    #[test]
    fn four_task_chunks_hold_the_expected_squares() {
        let entries = squares_by_chunk(11, 4).unwrap();
        let per_task = |task: usize| -> HashSet<usize> {
            entries
                .iter()
                .filter(|&&(t, _)| t == task)
                .map(|&(_, square)| square)
                .collect()
        };
        assert_eq!(per_task(0), HashSet::from([0, 1]));
        assert_eq!(per_task(1), HashSet::from([4, 9, 16]));
        assert_eq!(per_task(2), HashSet::from([25, 36, 49]));
        assert_eq!(per_task(3), HashSet::from([64, 81, 100]));
    }

    #[test]
    fn joins_even_with_far_more_tasks_than_work() {
        // Most chunks are empty here; the scope must still wind down cleanly.
        let entries = squares_by_chunk(11, 256).unwrap();
        assert_eq!(entries.len(), 11);
    }
}
