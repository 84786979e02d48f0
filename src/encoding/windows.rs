//! Admissible start-time windows per operation.
//!
//! # Algorithm
//! Walk each job's operations in order, tracking:
//! - `back_space`: total duration of earlier operations in the job. An
//!   operation cannot start before its predecessors could have finished.
//! - `forward_space`: total duration of this and later operations, minus
//!   one. Starting later than `horizon - forward_space` leaves no room for
//!   the rest of the chain.
//!
//! The 0-based window is `[back_space, horizon - forward_space)`, shifted
//! to 1-based start times. Without slack elimination both spaces stay 0
//! and every window is `1..=horizon`.
//!
//! All bounds use checked arithmetic: a horizon whose window end does not
//! fit in `i64` is reported as infeasible rather than wrapping.

use tracing::debug;

use crate::error::{EncodingError, Result};
use crate::models::{JobShop, TimeWindow};
use crate::validation::job_duration_overflow;

/// Immutable windows for every `(job, operation)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindows {
    horizon: i64,
    windows: Vec<Vec<TimeWindow>>,
}

impl TimeWindows {
    /// Computes windows for every operation of `shop`.
    ///
    /// # Errors
    /// - [`EncodingError::InfeasibleHorizon`] if any window is empty or its
    ///   end overflows. No operation is silently dropped.
    /// - [`EncodingError::InvalidJobSpec`] if a job's durations overflow
    ///   when summed.
    pub fn compute(shop: &JobShop, horizon: i64, eliminate_slack: bool) -> Result<Self> {
        let mut windows = Vec::with_capacity(shop.jobs.len());

        for job in &shop.jobs {
            let infeasible = |operation: usize| EncodingError::InfeasibleHorizon {
                job: job.id.clone(),
                operation,
                horizon,
            };
            let overflow = || EncodingError::InvalidJobSpec(vec![job_duration_overflow(&job.id)]);

            let mut forward_space = if eliminate_slack {
                job.total_duration()
                    .and_then(|d| d.checked_sub(1))
                    .ok_or_else(overflow)?
            } else {
                0
            };
            let mut back_space: i64 = 0;
            let mut job_windows = Vec::with_capacity(job.operations.len());

            for (idx, op) in job.operations.iter().enumerate() {
                let start = back_space.checked_add(1).ok_or_else(overflow)?;
                let end = horizon
                    .checked_sub(forward_space)
                    .and_then(|e| e.checked_add(1))
                    .ok_or_else(|| infeasible(idx + 1))?;
                let window = TimeWindow::new(start, end);
                if window.is_empty() {
                    return Err(infeasible(idx + 1));
                }
                job_windows.push(window);

                if eliminate_slack {
                    forward_space = forward_space.checked_sub(op.duration).ok_or_else(overflow)?;
                    back_space = back_space.checked_add(op.duration).ok_or_else(overflow)?;
                }
            }

            debug!(
                event = "job_windows",
                job = %job.id,
                operations = job_windows.len(),
                start_times = job_windows
                    .iter()
                    .fold(0usize, |acc, w| acc.saturating_add(w.len())),
            );
            windows.push(job_windows);
        }

        Ok(Self { horizon, windows })
    }

    /// Horizon the windows were computed for.
    pub fn horizon(&self) -> i64 {
        self.horizon
    }

    /// Window of one operation (`op` is 0-based).
    pub fn get(&self, job: usize, op: usize) -> Option<&TimeWindow> {
        self.windows.get(job).and_then(|w| w.get(op))
    }

    /// All windows of one job in operation order.
    pub fn job(&self, job: usize) -> &[TimeWindow] {
        self.windows.get(job).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of jobs.
    pub fn job_count(&self) -> usize {
        self.windows.len()
    }

    /// Iterates `(job, op, window)` in job-then-operation order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &TimeWindow)> + '_ {
        self.windows.iter().enumerate().flat_map(|(j, ws)| {
            ws.iter().enumerate().map(move |(o, w)| (j, o, w))
        })
    }

    /// Sum of all window sizes (the number of decision variables).
    ///
    /// Saturates at `usize::MAX`.
    pub fn total_len(&self) -> usize {
        self.iter()
            .fold(0usize, |acc, (_, _, w)| acc.saturating_add(w.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn three_jobs() -> JobShop {
        JobShop::from_pairs([
            ("j1", vec![("m1", 2), ("m2", 1), ("m3", 1)]),
            ("j2", vec![("m3", 2), ("m1", 1), ("m2", 2)]),
            ("j3", vec![("m2", 1), ("m1", 1), ("m3", 2)]),
        ])
    }

    fn times(w: &TimeWindow) -> Vec<i64> {
        w.times().collect()
    }

    #[test]
    fn test_first_operation_window() {
        let tw = TimeWindows::compute(&three_jobs(), 7, true).unwrap();
        // forward_space = (2+1+1)-1 = 3, end = 7-3 = 4, back_space = 0
        assert_eq!(times(&tw.job(0)[0]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_all_windows_with_slack_elimination() {
        let tw = TimeWindows::compute(&three_jobs(), 7, true).unwrap();
        let expected: [[&[i64]; 3]; 3] = [
            [&[1, 2, 3, 4], &[3, 4, 5, 6], &[4, 5, 6, 7]],
            [&[1, 2, 3], &[3, 4, 5], &[4, 5, 6]],
            [&[1, 2, 3, 4], &[2, 3, 4, 5], &[3, 4, 5, 6]],
        ];
        for (j, ops) in expected.iter().enumerate() {
            for (o, want) in ops.iter().enumerate() {
                assert_eq!(times(tw.get(j, o).unwrap()), *want, "job {j} op {o}");
            }
        }
        assert_eq!(tw.total_len(), 33);
        assert_eq!(tw.horizon(), 7);
    }

    #[test]
    fn test_without_slack_elimination() {
        let tw = TimeWindows::compute(&three_jobs(), 7, false).unwrap();
        for (_, _, w) in tw.iter() {
            assert_eq!(*w, TimeWindow::new(1, 8));
        }
        assert_eq!(tw.total_len(), 63);
    }

    #[test]
    fn test_zero_duration_last_operation() {
        // forward_space = -1 for a lone zero-duration op: starts 1..=h+1
        let shop = JobShop::from_pairs([("a", vec![("m", 0)])]);
        let tw = TimeWindows::compute(&shop, 2, true).unwrap();
        assert_eq!(times(tw.get(0, 0).unwrap()), vec![1, 2, 3]);
    }

    #[test]
    fn test_infeasible_horizon() {
        let shop = JobShop::from_pairs([("j1", vec![("m1", 3), ("m2", 3)])]);
        let err = TimeWindows::compute(&shop, 4, true).unwrap_err();
        assert_eq!(
            err,
            EncodingError::InfeasibleHorizon {
                job: "j1".into(),
                operation: 1,
                horizon: 4,
            }
        );
    }

    #[test]
    fn test_tight_horizon_single_slot() {
        let shop = JobShop::from_pairs([("j1", vec![("m1", 3), ("m2", 3)])]);
        let tw = TimeWindows::compute(&shop, 6, true).unwrap();
        assert_eq!(times(tw.get(0, 0).unwrap()), vec![1]);
        assert_eq!(times(tw.get(0, 1).unwrap()), vec![4]);
    }

    #[test]
    fn test_horizon_end_overflow_is_infeasible() {
        let shop = JobShop::from_pairs([("a", vec![("m", 1)])]);
        for slack in [true, false] {
            let err = TimeWindows::compute(&shop, i64::MAX, slack).unwrap_err();
            assert_eq!(
                err,
                EncodingError::InfeasibleHorizon {
                    job: "a".into(),
                    operation: 1,
                    horizon: i64::MAX,
                }
            );
        }
    }

    #[test]
    fn test_large_duration_within_range() {
        // forward_space = MAX - 1 leaves exactly one start time
        let shop = JobShop::from_pairs([("a", vec![("m", i64::MAX)])]);
        let tw = TimeWindows::compute(&shop, i64::MAX, true).unwrap();
        assert_eq!(times(tw.get(0, 0).unwrap()), vec![1]);
    }

    #[test]
    fn test_job_duration_overflow() {
        let shop = JobShop::from_pairs([("a", vec![("m", i64::MAX), ("n", 1)])]);
        match TimeWindows::compute(&shop, 10, true) {
            Err(EncodingError::InvalidJobSpec(errors)) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::DurationOverflow);
            }
            other => panic!("expected InvalidJobSpec, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_lookup() {
        let tw = TimeWindows::compute(&three_jobs(), 7, true).unwrap();
        assert!(tw.get(3, 0).is_none());
        assert!(tw.get(0, 3).is_none());
        assert!(tw.job(9).is_empty());
    }
}
