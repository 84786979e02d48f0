//! Machine-capacity constraints.
//!
//! A machine processes at most one operation at a time. For every pair of
//! distinct operations `(i, k)` sharing a machine and every pair of start
//! times `(t, t')` from their windows, the variables `x[i,t]` and `x[k,t']`
//! are excluded when:
//!
//! - **Overlap**: `0 < t' - t < p_i`. `k` starts while `i` still runs. Both
//!   role assignments are checked, since each operation's own duration
//!   bounds its occupancy. The band is empty when `p_i` is 0.
//! - **Equal start**: `t == t'` with `p_i > 0` and `p_k > 0`. Emitted once per
//!   unordered operation pair, in canonical (job ID, operation) order.
//!
//! # Complexity
//! Windows are contiguous, so the overlap band of a start time is a range
//! intersection. Each machine costs `O(ops² · window · p)` instead of the
//! `O(ops² · window²)` of the nested product, and machines are independent
//! of each other.
//!
//! # Reference
//! Venturelli et al. (2015), arXiv:1506.08479, sets `A_m` and `B_m`

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::models::ExclusionPair;

use super::variables::{MachineGroup, OpRef};
use super::VariableSpace;

/// Generates capacity pairs for every machine and merges them.
///
/// With `parallel` set, each machine is handled as an independent rayon
/// task and per-machine results are reduced once at the end.
pub fn capacity_pairs(space: &VariableSpace, parallel: bool) -> Vec<ExclusionPair> {
    let machines = space.machines();

    let merged: BTreeSet<ExclusionPair> = if parallel {
        machines
            .par_iter()
            .map(machine_pairs)
            .reduce(BTreeSet::new, merge)
    } else {
        machines
            .iter()
            .map(machine_pairs)
            .fold(BTreeSet::new(), merge)
    };

    merged.into_iter().collect()
}

/// Generates capacity pairs for a single machine by ID.
///
/// # Errors
/// [`EncodingError::UnknownMachine`](crate::EncodingError::UnknownMachine)
/// if no operation uses `machine`.
pub fn capacity_pairs_for(space: &VariableSpace, machine: &str) -> Result<Vec<ExclusionPair>> {
    let group = space.machine(machine)?;
    Ok(machine_pairs(group).into_iter().collect())
}

/// Deduplicated exclusion pairs of one machine.
pub fn machine_pairs(group: &MachineGroup) -> BTreeSet<ExclusionPair> {
    let mut pairs = BTreeSet::new();

    for (idx, a) in group.ops.iter().enumerate() {
        for b in &group.ops[idx + 1..] {
            overlap_pairs(a, b, &mut pairs);
            overlap_pairs(b, a, &mut pairs);
            equal_start_pairs(a, b, &mut pairs);
        }
    }

    debug!(
        event = "machine_pairs",
        machine = %group.machine,
        operations = group.ops.len(),
        pairs = pairs.len(),
    );
    pairs
}

/// `later` starts while `occupying` is still running.
fn overlap_pairs(occupying: &OpRef, later: &OpRef, out: &mut BTreeSet<ExclusionPair>) {
    for t in occupying.window.times() {
        for t_prime in later.window.band(t + 1, t.saturating_add(occupying.duration)) {
            out.insert(ExclusionPair::capacity(occupying.key(t), later.key(t_prime)));
        }
    }
}

/// Both operations start together; instantaneous operations never collide.
fn equal_start_pairs(a: &OpRef, b: &OpRef, out: &mut BTreeSet<ExclusionPair>) {
    if a.duration <= 0 || b.duration <= 0 {
        return;
    }
    for t in a.window.band(b.window.start, b.window.end) {
        out.insert(ExclusionPair::capacity(a.key(t), b.key(t)));
    }
}

fn merge(mut acc: BTreeSet<ExclusionPair>, part: BTreeSet<ExclusionPair>) -> BTreeSet<ExclusionPair> {
    if acc.len() < part.len() {
        return merge(part, acc);
    }
    acc.extend(part);
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TimeWindows;
    use crate::models::{JobShop, VarKey};
    use proptest::prelude::*;

    fn space(shop: &JobShop, horizon: i64, eliminate_slack: bool) -> VariableSpace {
        let windows = TimeWindows::compute(shop, horizon, eliminate_slack).unwrap();
        VariableSpace::build(shop, windows).unwrap()
    }

    /// Nested-product baseline over ordered operation pairs.
    fn exhaustive_pairs(group: &MachineGroup) -> BTreeSet<ExclusionPair> {
        let mut out = BTreeSet::new();
        for (ai, a) in group.ops.iter().enumerate() {
            for (bi, b) in group.ops.iter().enumerate() {
                if ai == bi {
                    continue;
                }
                for t in a.window.times() {
                    for tp in b.window.times() {
                        let overlap = 0 < tp - t && tp - t < a.duration;
                        let equal = ai < bi && t == tp && a.duration > 0 && b.duration > 0;
                        if overlap || equal {
                            out.insert(ExclusionPair::capacity(a.key(t), b.key(tp)));
                        }
                    }
                }
            }
        }
        out
    }

    fn three_jobs() -> JobShop {
        JobShop::from_pairs([
            ("j1", vec![("m1", 2), ("m2", 1), ("m3", 1)]),
            ("j2", vec![("m3", 2), ("m1", 1), ("m2", 2)]),
            ("j3", vec![("m2", 1), ("m1", 1), ("m3", 2)]),
        ])
    }

    #[test]
    fn test_two_operations_one_machine() {
        let shop = JobShop::from_pairs([("a", vec![("m", 2)]), ("b", vec![("m", 1)])]);
        let pairs = capacity_pairs(&space(&shop, 3, true), false);
        let a = |t| VarKey::new(0, 1, t);
        let b = |t| VarKey::new(1, 1, t);
        let expected = vec![
            ExclusionPair::capacity(a(1), b(1)),
            ExclusionPair::capacity(a(1), b(2)),
            ExclusionPair::capacity(a(2), b(2)),
            ExclusionPair::capacity(a(2), b(3)),
        ];
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_zero_duration_only_occupied() {
        // a has p=0: never occupying, never equal-start.
        let shop = JobShop::from_pairs([("a", vec![("m", 0)]), ("b", vec![("m", 2)])]);
        let pairs = capacity_pairs(&space(&shop, 2, true), false);
        assert_eq!(
            pairs,
            vec![ExclusionPair::capacity(VarKey::new(0, 1, 2), VarKey::new(1, 1, 1))]
        );
        for p in &pairs {
            assert_ne!(p.first.time, p.second.time);
        }
    }

    #[test]
    fn test_three_job_count() {
        let pairs = capacity_pairs(&space(&three_jobs(), 7, true), false);
        assert_eq!(pairs.len(), 34);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let vs = space(&three_jobs(), 9, false);
        assert_eq!(capacity_pairs(&vs, true), capacity_pairs(&vs, false));
    }

    #[test]
    fn test_banded_matches_exhaustive() {
        for slack in [true, false] {
            let vs = space(&three_jobs(), 8, slack);
            for group in vs.machines() {
                assert_eq!(machine_pairs(group), exhaustive_pairs(group), "{}", group.machine);
            }
        }
    }

    #[test]
    fn test_same_job_operations_on_one_machine() {
        let shop = JobShop::from_pairs([("a", vec![("m", 2), ("m", 1)])]);
        let pairs = capacity_pairs(&space(&shop, 4, false), false);
        // a1 at t occupies t..t+1; a2 at t+1 overlaps
        assert!(pairs.contains(&ExclusionPair::capacity(VarKey::new(0, 1, 1), VarKey::new(0, 2, 2))));
        // equal starts conflict within the same job too
        assert!(pairs.contains(&ExclusionPair::capacity(VarKey::new(0, 1, 3), VarKey::new(0, 2, 3))));
    }

    #[test]
    fn test_huge_duration_occupies_rest_of_window() {
        let shop = JobShop::from_pairs([("a", vec![("m", i64::MAX)]), ("b", vec![("m", 1)])]);
        let vs = space(&shop, 3, false);
        let group = vs.machine("m").unwrap();
        let pairs = machine_pairs(group);
        // a occupies every later slot; equal starts on all three
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs, exhaustive_pairs(group));
    }

    #[test]
    fn test_single_machine_lookup() {
        let vs = space(&three_jobs(), 7, true);
        let m1 = capacity_pairs_for(&vs, "m1").unwrap();
        let all = capacity_pairs(&vs, false);
        assert!(m1.iter().all(|p| all.contains(p)));
        assert!(capacity_pairs_for(&vs, "m9").is_err());
    }

    proptest! {
        #[test]
        fn prop_banded_matches_exhaustive(
            durations in proptest::collection::vec(0i64..4, 2..6),
            horizon in 4i64..10,
        ) {
            let shop = JobShop::from_pairs(
                durations
                    .iter()
                    .enumerate()
                    .map(|(i, &d)| (format!("j{i}"), vec![("m", d)])),
            );
            let vs = space(&shop, horizon, false);
            let group = vs.machine("m").unwrap();
            prop_assert_eq!(machine_pairs(group), exhaustive_pairs(group));
        }
    }
}
