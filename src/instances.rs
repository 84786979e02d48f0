//! Random job-shop instances.
//!
//! Generates classic JSP instances in the style of Taillard's benchmarks:
//! every job visits every machine exactly once, in a random order, with
//! uniformly drawn durations.
//!
//! # Reference
//! Taillard (1993), "Benchmarks for basic scheduling problems"

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Job, JobShop, Operation};

/// Generates a `jobs × machines` instance with durations in `1..=max_duration`.
///
/// Jobs are named `j1..jN` and machines `m1..mM`. `max_duration` below 1 is
/// treated as 1.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_jsp_csp::instances::random_instance;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let shop = random_instance(&mut rng, 4, 3, 5);
/// assert_eq!(shop.operation_count(), 12);
/// ```
pub fn random_instance<R: Rng>(
    rng: &mut R,
    jobs: usize,
    machines: usize,
    max_duration: i64,
) -> JobShop {
    let max_duration = max_duration.max(1);
    let mut shop = JobShop::new();

    for j in 0..jobs {
        let mut route: Vec<usize> = (0..machines).collect();
        route.shuffle(rng);

        let job = route.into_iter().fold(Job::new(format!("j{}", j + 1)), |job, m| {
            job.with_operation(Operation::new(
                format!("m{}", m + 1),
                rng.random_range(1..=max_duration),
            ))
        });
        shop = shop.with_job(job);
    }

    shop
}
