//! Precedence constraints.
//!
//! Within a job, operation `i + 1` may not start before operation `i`
//! finishes. For every `t` in the window of `i` and `t'` in the window of
//! `i + 1` with `t + p_i > t'`, the pair `(x[i,t], x[i+1,t'])` is excluded.
//! Only adjacent operations are related; longer gaps follow transitively.

use tracing::debug;

use crate::models::{ExclusionPair, VarKey};

use super::VariableSpace;

/// Generates precedence pairs for every job.
pub fn precedence_pairs(space: &VariableSpace) -> Vec<ExclusionPair> {
    let mut pairs = Vec::new();

    for job in 0..space.job_count() {
        let before = pairs.len();
        for op in 0..space.operation_count(job).saturating_sub(1) {
            let (Some(w), Some(next_w), Some(duration)) = (
                space.window(job, op),
                space.window(job, op + 1),
                space.duration(job, op),
            ) else {
                continue;
            };

            for t in w.times() {
                // successor starts strictly before t + p_i
                for t_prime in next_w.band(next_w.start, t.saturating_add(duration)) {
                    pairs.push(ExclusionPair::precedence(
                        VarKey::new(job as u32, op as u32 + 1, t),
                        VarKey::new(job as u32, op as u32 + 2, t_prime),
                    ));
                }
            }
        }
        debug!(
            event = "job_precedence",
            job = space.job_id(job).unwrap_or_default(),
            pairs = pairs.len() - before,
        );
    }

    pairs
}
