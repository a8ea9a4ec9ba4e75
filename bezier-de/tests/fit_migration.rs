use rand::rngs::StdRng;
use rand::Rng;

use bezier_de::ParallelDe;

fn sphere_pool(workers: usize, seed: u64) -> ParallelDe<2> {
    ParallelDe::new(
        0.9,
        0.8,
        workers * 8,
        workers,
        1.0,
        seed,
        || Box::new(|rng: &mut StdRng| rng.random_range(-5.0..5.0)),
        || Box::new(|v: &[f64; 2]| [v[0] * v[0], v[1] * v[1]]),
        || Box::new(|a, b| a < b),
    )
}

/// Scenario 6: with W=4 and phi=1.0, after every generation each worker's
/// pre-migration best lands in exactly one slot of the next worker around
/// the ring.
#[test]
fn ring_migration_places_each_workers_best_in_the_next_worker() {
    let mut de = sphere_pool(4, 11);
    de.step();

    for src in 0..de.worker_count() {
        let (_, position) = de.worker_best(src);
        let dest = (src + 1) % de.worker_count();
        let population = de.worker_population(dest);
        assert!(
            population.iter().any(|p| *p == position),
            "worker {src}'s best {position:?} not found in worker {dest}'s population"
        );
    }
}

/// Sub-population size invariant: stays exactly M/W before and after every
/// step.
#[test]
fn sub_population_size_is_invariant_under_migration() {
    let mut de = sphere_pool(4, 22);
    let expected = de.per_worker_population();
    for _ in 0..10 {
        de.step();
        for w in 0..de.worker_count() {
            assert_eq!(de.worker_population(w).len(), expected);
        }
    }
}
