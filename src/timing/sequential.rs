use super::{time_sort, SortFn};

/// Sort each array in place, one after another, on the calling coroutine.
///
/// Returns one elapsed-nanoseconds value per array, in input order. Execution is strictly
/// serial, so the summed durations approximate the total wall time of the call.
#[must_use]
pub fn time_sequential(arrays: &mut [Vec<i64>]) -> Vec<i64> {
    sort_each(arrays, time_sort)
}

pub(crate) fn sort_each(arrays: &mut [Vec<i64>], sort: SortFn) -> Vec<i64> {
    arrays.iter_mut().map(|arr| sort(arr)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_every_array_and_aligns_output() {
        let mut arrays = vec![vec![3, 1, 2], vec![5, 4]];
        let times = time_sequential(&mut arrays);
        assert_eq!(arrays, vec![vec![1, 2, 3], vec![4, 5]]);
        assert_eq!(times.len(), 2);
        assert!(times.iter().all(|t| *t >= 0));
    }

    #[test]
    fn test_empty_input() {
        let mut arrays: Vec<Vec<i64>> = Vec::new();
        assert!(time_sequential(&mut arrays).is_empty());
    }

    #[test]
    fn test_empty_array_stays_empty() {
        let mut arrays = vec![Vec::new()];
        let times = time_sequential(&mut arrays);
        assert_eq!(times.len(), 1);
        assert!(times[0] >= 0);
        assert!(arrays[0].is_empty());
    }

    #[test]
    fn test_already_sorted_input() {
        let mut arrays = vec![(0..1_000).collect::<Vec<i64>>()];
        let times = time_sequential(&mut arrays);
        assert!(times[0] >= 0);
        assert!(arrays[0].windows(2).all(|w| w[0] <= w[1]));
    }
}
