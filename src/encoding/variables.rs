//! Decision-variable space.
//!
//! Enumerates one binary variable per admissible `(job, operation, time)`.
//! Windows are contiguous, so the variables of one operation occupy a
//! contiguous id range and key lookup is arithmetic, not hashed.

use std::collections::HashMap;

use crate::error::{EncodingError, Result};
use crate::models::{JobShop, TimeWindow, VarKey};

use super::TimeWindows;

/// Reference to one operation of the job shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpRef {
    /// Job index.
    pub job: usize,
    /// Operation index within the job (0-based).
    pub op: usize,
    /// Processing duration.
    pub duration: i64,
    /// Admissible start times.
    pub window: TimeWindow,
}

impl OpRef {
    /// Variable key of this operation starting at `time`.
    #[inline]
    pub fn key(&self, time: i64) -> VarKey {
        VarKey::new(self.job as u32, self.op as u32 + 1, time)
    }
}

/// Operations processed on one machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineGroup {
    /// Machine identifier.
    pub machine: String,
    /// Operations in canonical order: job ID, then operation index.
    pub ops: Vec<OpRef>,
}

/// All decision variables of an encoding.
#[derive(Debug, Clone)]
pub struct VariableSpace {
    windows: TimeWindows,
    job_ids: Vec<String>,
    durations: Vec<Vec<i64>>,
    /// First variable id of each `(job, op)`.
    offsets: Vec<Vec<usize>>,
    keys: Vec<VarKey>,
    machines: Vec<MachineGroup>,
    machine_index: HashMap<String, usize>,
}

impl VariableSpace {
    /// Enumerates variables from precomputed windows.
    ///
    /// # Errors
    /// - [`EncodingError::VariableSpaceTooLarge`] if the key table cannot be
    ///   allocated.
    /// - [`EncodingError::UnknownMachine`] if an operation's machine is
    ///   missing from the machine index derived from the same shop.
    pub fn build(shop: &JobShop, windows: TimeWindows) -> Result<Self> {
        let total = windows.total_len();
        let mut keys: Vec<VarKey> = Vec::new();
        keys.try_reserve_exact(total)
            .map_err(|_| EncodingError::VariableSpaceTooLarge {
                variables: total,
                horizon: windows.horizon(),
            })?;
        let mut offsets = Vec::with_capacity(shop.jobs.len());

        for j in 0..windows.job_count() {
            let job_windows = windows.job(j);
            let mut job_offsets = Vec::with_capacity(job_windows.len());
            for (o, window) in job_windows.iter().enumerate() {
                job_offsets.push(keys.len());
                keys.extend(window.times().map(|t| VarKey::new(j as u32, o as u32 + 1, t)));
            }
            offsets.push(job_offsets);
        }

        let machine_index: HashMap<String, usize> = shop
            .machines()
            .into_iter()
            .enumerate()
            .map(|(i, m)| (m.to_string(), i))
            .collect();
        let mut machines: Vec<MachineGroup> = shop
            .machines()
            .into_iter()
            .map(|m| MachineGroup {
                machine: m.to_string(),
                ops: Vec::new(),
            })
            .collect();

        for (j, job) in shop.jobs.iter().enumerate() {
            for (o, (op, window)) in job.operations.iter().zip(windows.job(j)).enumerate() {
                let idx = *machine_index
                    .get(&op.machine)
                    .ok_or_else(|| EncodingError::UnknownMachine(op.machine.clone()))?;
                machines[idx].ops.push(OpRef {
                    job: j,
                    op: o,
                    duration: op.duration,
                    window: *window,
                });
            }
        }

        for group in &mut machines {
            group.ops.sort_by(|a, b| {
                shop.jobs[a.job]
                    .id
                    .cmp(&shop.jobs[b.job].id)
                    .then(a.op.cmp(&b.op))
            });
        }

        Ok(Self {
            windows,
            job_ids: shop.jobs.iter().map(|j| j.id.clone()).collect(),
            durations: shop
                .jobs
                .iter()
                .map(|j| j.operations.iter().map(|o| o.duration).collect())
                .collect(),
            offsets,
            keys,
            machines,
            machine_index,
        })
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether there are no variables.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All variable keys in id order.
    pub fn keys(&self) -> &[VarKey] {
        &self.keys
    }

    /// Dense id of a variable, if it exists.
    pub fn var_id(&self, key: VarKey) -> Option<usize> {
        let job = key.job as usize;
        let op = (key.operation as usize).checked_sub(1)?;
        let window = self.windows.get(job, op)?;
        let offset = window.offset_of(key.time)?;
        Some(self.offsets[job][op] + offset)
    }

    /// Whether a variable exists.
    pub fn contains(&self, key: VarKey) -> bool {
        self.var_id(key).is_some()
    }

    /// Key of a variable by dense id.
    pub fn key(&self, id: usize) -> Option<VarKey> {
        self.keys.get(id).copied()
    }

    /// Variables of one operation in ascending time (`op` is 0-based).
    pub fn group(&self, job: usize, op: usize) -> &[VarKey] {
        match self.windows.get(job, op) {
            Some(window) => {
                let start = self.offsets[job][op];
                &self.keys[start..start + window.len()]
            }
            None => &[],
        }
    }

    /// Iterates `(job, op, variables)` for every operation.
    pub fn groups(&self) -> impl Iterator<Item = (usize, usize, &[VarKey])> + '_ {
        self.windows
            .iter()
            .map(move |(j, o, _)| (j, o, self.group(j, o)))
    }

    /// Operations grouped by machine, in first-seen machine order.
    pub fn machines(&self) -> &[MachineGroup] {
        &self.machines
    }

    /// Operations on one machine.
    ///
    /// # Errors
    /// [`EncodingError::UnknownMachine`] if no operation uses `machine`.
    pub fn machine(&self, machine: &str) -> Result<&MachineGroup> {
        self.machine_index
            .get(machine)
            .map(|&i| &self.machines[i])
            .ok_or_else(|| EncodingError::UnknownMachine(machine.to_string()))
    }

    /// The windows backing this space.
    pub fn windows(&self) -> &TimeWindows {
        &self.windows
    }

    /// Window of one operation.
    pub fn window(&self, job: usize, op: usize) -> Option<&TimeWindow> {
        self.windows.get(job, op)
    }

    /// Duration of one operation.
    pub fn duration(&self, job: usize, op: usize) -> Option<i64> {
        self.durations.get(job).and_then(|d| d.get(op)).copied()
    }

    /// Number of operations in a job.
    pub fn operation_count(&self, job: usize) -> usize {
        self.durations.get(job).map_or(0, Vec::len)
    }

    /// Number of jobs.
    pub fn job_count(&self) -> usize {
        self.job_ids.len()
    }

    /// Job ID by index.
    pub fn job_id(&self, job: usize) -> Option<&str> {
        self.job_ids.get(job).map(String::as_str)
    }

    /// Key for `job_id`, 0-based `op`, and start `time`, if admissible.
    pub fn key_for(&self, job_id: &str, op: usize, time: i64) -> Option<VarKey> {
        let job = self.job_ids.iter().position(|id| id == job_id)?;
        let key = VarKey::new(job as u32, op as u32 + 1, time);
        self.contains(key).then_some(key)
    }

    /// Renders the `x_{job}_o{op}_t{time}` label of a key.
    pub fn label(&self, key: VarKey) -> String {
        key.label(self.job_id(key.job as usize).unwrap_or("?"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> VariableSpace {
        let shop = JobShop::from_pairs([
            ("j2", vec![("m1", 2), ("m2", 1)]),
            ("j1", vec![("m2", 1), ("m1", 1)]),
        ]);
        let windows = TimeWindows::compute(&shop, 5, true).unwrap();
        VariableSpace::build(&shop, windows).unwrap()
    }

    #[test]
    fn test_enumeration_matches_windows() {
        let vs = space();
        assert_eq!(vs.len(), vs.windows().total_len());
        for (j, o, w) in vs.windows().iter() {
            let group = vs.group(j, o);
            assert_eq!(group.len(), w.len());
            assert!(group.iter().zip(w.times()).all(|(k, t)| k.time == t));
        }
    }

    #[test]
    fn test_lookup_roundtrip() {
        let vs = space();
        for (id, &key) in vs.keys().iter().enumerate() {
            assert_eq!(vs.var_id(key), Some(id));
            assert_eq!(vs.key(id), Some(key));
        }
        assert!(!vs.contains(VarKey::new(0, 1, 99)));
        assert!(!vs.contains(VarKey::new(0, 0, 1)));
        assert!(!vs.contains(VarKey::new(5, 1, 1)));
    }

    #[test]
    fn test_every_variable_in_one_group() {
        let vs = space();
        let grouped: usize = vs.groups().map(|(_, _, g)| g.len()).sum();
        assert_eq!(grouped, vs.len());
    }

    #[test]
    fn test_machine_groups_canonical_order() {
        let vs = space();
        let m1 = vs.machine("m1").unwrap();
        // j1 sorts before j2 even though j2 was inserted first
        let order: Vec<(usize, usize)> = m1.ops.iter().map(|o| (o.job, o.op)).collect();
        assert_eq!(order, vec![(1, 1), (0, 0)]);
        assert_eq!(m1.ops[1].duration, 2);
    }

    #[test]
    fn test_unknown_machine() {
        let vs = space();
        assert_eq!(
            vs.machine("m9").unwrap_err(),
            EncodingError::UnknownMachine("m9".into())
        );
    }

    #[test]
    fn test_oversized_space_is_an_error() {
        let shop = JobShop::from_pairs([("a", vec![("m", 1)])]);
        let windows = TimeWindows::compute(&shop, i64::MAX - 1, false).unwrap();
        match VariableSpace::build(&shop, windows) {
            Err(EncodingError::VariableSpaceTooLarge { variables, horizon }) => {
                assert_eq!(horizon, i64::MAX - 1);
                // window 1..i64::MAX
                assert_eq!(variables, usize::try_from(i64::MAX - 1).unwrap_or(usize::MAX));
            }
            other => panic!("expected VariableSpaceTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_key_for_and_label() {
        let vs = space();
        let key = vs.key_for("j1", 0, 1).unwrap();
        assert_eq!(key, VarKey::new(1, 1, 1));
        assert_eq!(vs.label(key), "x_j1_o1_t1");
        assert!(vs.key_for("j1", 0, 9).is_none());
        assert!(vs.key_for("nope", 0, 1).is_none());
    }
}
