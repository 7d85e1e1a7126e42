//! Fan-out/join timer.
//!
//! Every array is moved into its own coroutine, which sorts it and hands `(array, nanos)`
//! back through its `JoinHandle`. The handle is the unit's only output slot, so slots are
//! disjoint by construction and nothing is locked. Handles are joined in input order,
//! which is both the completion barrier and the positional fan-in.

use super::{time_sort, SortFn};
use may::coroutine::{Builder, JoinHandle};
use std::io;
use tracing::{debug, error};

type UnitHandle = JoinHandle<(Vec<i64>, i64)>;

/// Sort all arrays concurrently, one coroutine per array, and wait for all of them.
///
/// Each unit measures only its own sort; spawn and scheduling overhead is outside the
/// measured interval. Sorted arrays are written back to their original positions.
///
/// # Errors
///
/// Returns an error if a coroutine cannot be spawned or a unit panicked. Every unit that
/// was started is joined before returning, and each unit that completed has its sorted
/// array written back. The array owned by a unit that failed to spawn or panicked is
/// lost: its slot is left empty. Slots after a spawn failure are never started and keep
/// their original, unsorted contents.
pub fn time_concurrent(arrays: &mut [Vec<i64>], stack_size: usize) -> io::Result<Vec<i64>> {
    fan_out(arrays, stack_size, time_sort)
}

/// [`time_concurrent`] with the per-unit sort routine supplied by the caller.
pub(crate) fn fan_out(
    arrays: &mut [Vec<i64>],
    stack_size: usize,
    sort: SortFn,
) -> io::Result<Vec<i64>> {
    if arrays.is_empty() {
        return Ok(Vec::new());
    }

    let mut handles: Vec<UnitHandle> = Vec::with_capacity(arrays.len());
    let mut spawn_err = None;

    for (index, slot) in arrays.iter_mut().enumerate() {
        let mut arr = std::mem::take(slot);
        // SAFETY: Builder::spawn is unsafe in may 0.3 because coroutines must not hold
        // thread-local borrows across yields. The closure owns its array and runs a plain
        // slice sort, which touches no TLS.
        let spawned = unsafe {
            Builder::new()
                .name(format!("sort-unit-{index}"))
                .stack_size(stack_size)
                .spawn(move || {
                    let nanos = sort(&mut arr);
                    (arr, nanos)
                })
        };
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                error!(unit = index, error = %e, "Failed to spawn sort unit");
                spawn_err = Some(e);
                break;
            }
        }
    }

    debug!(units = handles.len(), stack_size, "Sort units spawned, joining");

    let mut times = Vec::with_capacity(arrays.len());
    let mut join_err = None;
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok((arr, nanos)) => {
                arrays[index] = arr;
                times.push(nanos);
            }
            Err(panic) => {
                error!(unit = index, panic_message = ?panic, "Sort unit panicked");
                join_err.get_or_insert_with(|| {
                    io::Error::other(format!("sort unit {index} panicked"))
                });
            }
        }
    }

    if let Some(e) = spawn_err.or(join_err) {
        return Err(e);
    }
    Ok(times)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    const STACK: usize = 0x10000;

    /// Sort routine that panics on an empty array, so the panic path can be driven.
    pub(crate) fn panic_on_empty(arr: &mut [i64]) -> i64 {
        if arr.is_empty() {
            panic!("refusing to sort an empty array");
        }
        time_sort(arr)
    }

    #[test]
    fn test_sorts_every_array_and_aligns_output() {
        let mut arrays = vec![vec![3, 1, 2], vec![5, 4]];
        let times = time_concurrent(&mut arrays, STACK).unwrap();
        assert_eq!(arrays, vec![vec![1, 2, 3], vec![4, 5]]);
        assert_eq!(times.len(), 2);
        assert!(times.iter().all(|t| *t >= 0));
    }

    #[test]
    fn test_zero_arrays_spawns_nothing() {
        let mut arrays: Vec<Vec<i64>> = Vec::new();
        assert!(time_concurrent(&mut arrays, STACK).unwrap().is_empty());
    }

    #[test]
    fn test_positions_are_preserved() {
        // Arrays of distinct lengths finish at different times; each must land back at
        // its own index regardless of completion order.
        let mut arrays: Vec<Vec<i64>> = (0..32)
            .map(|n| (0..(n * 100) as i64).rev().collect())
            .collect();
        let times = time_concurrent(&mut arrays, STACK).unwrap();
        assert_eq!(times.len(), 32);
        for (n, arr) in arrays.iter().enumerate() {
            assert_eq!(arr.len(), n * 100);
            assert!(arr.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_panicking_unit_fails_after_joining_the_rest() {
        let mut arrays = vec![vec![3, 1], vec![], vec![5, 4], vec![9, 8, 7]];
        let err = fan_out(&mut arrays, STACK, panic_on_empty).unwrap_err();
        assert!(err.to_string().contains("sort unit 1 panicked"));

        // Completed units are written back sorted at their own index; the failed one is empty.
        assert_eq!(arrays[0], vec![1, 3]);
        assert!(arrays[1].is_empty());
        assert_eq!(arrays[2], vec![4, 5]);
        assert_eq!(arrays[3], vec![7, 8, 9]);
    }
}
