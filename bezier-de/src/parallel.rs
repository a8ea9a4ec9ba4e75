//! Worker-pool-parallel Differential Evolution with ring-topology migration.

use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::solver::DeSolver;

enum WorkKind {
    SolveGeneration,
    GetBestCandidate,
}

struct PendingState {
    pending: bool,
    finish: bool,
    work: Option<WorkKind>,
}

/// The two rendezvous points a worker thread blocks on: "pending work",
/// set by the coordinator and cleared by the worker, and "work ready", set
/// by the worker and cleared by the coordinator. `finish` travels with
/// `pending` and is checked immediately after each wake.
struct WorkerSync {
    pending_lock: Mutex<PendingState>,
    pending_cv: Condvar,
    ready_lock: Mutex<bool>,
    ready_cv: Condvar,
}

impl WorkerSync {
    fn new() -> Self {
        Self {
            pending_lock: Mutex::new(PendingState {
                pending: false,
                finish: false,
                work: None,
            }),
            pending_cv: Condvar::new(),
            ready_lock: Mutex::new(false),
            ready_cv: Condvar::new(),
        }
    }

    fn post(&self, work: WorkKind) {
        let mut guard = self.pending_lock.lock();
        guard.pending = true;
        guard.work = Some(work);
        self.pending_cv.notify_one();
    }

    fn post_finish(&self) {
        let mut guard = self.pending_lock.lock();
        guard.pending = true;
        guard.finish = true;
        self.pending_cv.notify_one();
    }

    fn wait_ready(&self) {
        let mut guard = self.ready_lock.lock();
        while !*guard {
            self.ready_cv.wait(&mut guard);
        }
        *guard = false;
    }
}

/// A single worker: its own sub-population, its own RNG, and the
/// synchronization state shared with the coordinator.
struct WorkerHandle<const D: usize> {
    sync: Arc<WorkerSync>,
    solver: Arc<Mutex<DeSolver<D>>>,
    /// Published after every `SOLVE_GENERATION`: this worker's current
    /// best (error, position), used both by migration and by `best()`.
    best_record: Arc<Mutex<([f64; D], [f64; D])>>,
    thread: Option<JoinHandle<()>>,
}

/// Worker-pool-parallel DE: `W` workers, each owning an equal-sized
/// sub-population of a shared `M`, coupled by ring-topology migration
/// between generations.
pub struct ParallelDe<const D: usize> {
    workers: Vec<WorkerHandle<D>>,
    phi: f64,
    per_worker: usize,
    migration_rng: StdRng,
}

impl<const D: usize> ParallelDe<D> {
    /// Constructs `workers` worker threads, each with population
    /// `m / workers`, seeded from `base_seed + worker_index` so runs are
    /// reproducible but not identical across workers.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cr: f64,
        f: f64,
        m: usize,
        workers: usize,
        phi: f64,
        base_seed: u64,
        sample_domain: impl Fn() -> Box<dyn FnMut(&mut StdRng) -> f64 + Send> + 'static,
        evaluate_error: impl Fn() -> Box<dyn Fn(&[f64; D]) -> [f64; D] + Send + Sync> + 'static,
        error_is_better: impl Fn() -> Box<dyn Fn(f64, f64) -> bool + Send + Sync> + 'static,
    ) -> Self {
        let per_worker = m / workers;
        let mut handles = Vec::with_capacity(workers);
        for w in 0..workers {
            let sync = Arc::new(WorkerSync::new());
            let solver = DeSolver::<D>::new(
                cr,
                f,
                per_worker,
                base_seed.wrapping_add(w as u64),
                sample_domain(),
                evaluate_error(),
                error_is_better(),
            );
            let best_record = Arc::new(Mutex::new(solver.best()));
            let solver = Arc::new(Mutex::new(solver));

            let thread_sync = Arc::clone(&sync);
            let thread_solver = Arc::clone(&solver);
            let thread_best = Arc::clone(&best_record);
            let join = std::thread::Builder::new()
                .name(format!("bezier-de-worker-{w}"))
                .spawn(move || worker_loop(thread_sync, thread_solver, thread_best))
                .expect("failed to spawn DE worker thread");

            handles.push(WorkerHandle {
                sync,
                solver,
                best_record,
                thread: Some(join),
            });
        }
        log::info!("ParallelDe constructed: workers={workers}, per_worker_population={per_worker}, phi={phi}");
        Self {
            workers: handles,
            phi,
            per_worker,
            migration_rng: StdRng::seed_from_u64(base_seed ^ 0xd3_fa_u64),
        }
    }

    pub fn per_worker_population(&self) -> usize {
        self.per_worker
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Snapshot of one worker's current sub-population. Intended for tests
    /// and diagnostics; the pool must be quiescent (not mid-`step`) when
    /// this is called.
    pub fn worker_population(&self, w: usize) -> Vec<[f64; D]> {
        self.workers[w].solver.lock().population().to_vec()
    }

    /// Snapshot of one worker's current best (error, position), as
    /// published after its most recent generation.
    pub fn worker_best(&self, w: usize) -> ([f64; D], [f64; D]) {
        *self.workers[w].best_record.lock()
    }

    /// Runs one generation on every worker, waits for completion, then
    /// performs ring-topology migration.
    pub fn step(&mut self) {
        for w in &self.workers {
            w.sync.post(WorkKind::SolveGeneration);
        }
        for w in &self.workers {
            w.sync.wait_ready();
        }
        self.migrate();
    }

    pub fn step_n(&mut self, k: usize) {
        for _ in 0..k {
            self.step();
        }
    }

    fn migrate(&mut self) {
        let w_count = self.workers.len();
        if w_count < 2 {
            return;
        }
        let mut migrated = 0usize;
        for src in 0..w_count {
            if self.migration_rng.random::<f64>() > self.phi {
                continue;
            }
            let position = self.workers[src].best_record.lock().1;
            let dest = (src + 1) % w_count;
            let slot = self.migration_rng.random_range(0..self.per_worker);
            self.workers[dest].solver.lock().inject(slot, position);
            migrated += 1;
        }
        log::info!("migration: {migrated}/{w_count} workers migrated");
    }

    /// Posts `GET_BEST_CANDIDATE` to every worker, waits, and returns the
    /// globally best per-dimension (error, position) across all workers,
    /// found by an independent per-dimension comparator supplied by the
    /// caller (must match the comparator used to build each worker's
    /// solver).
    pub fn best(&self, error_is_better: impl Fn(f64, f64) -> bool) -> ([f64; D], [f64; D]) {
        for w in &self.workers {
            w.sync.post(WorkKind::GetBestCandidate);
        }
        for w in &self.workers {
            w.sync.wait_ready();
        }
        let (mut best_error, mut best_position) = *self.workers[0].best_record.lock();
        for w in &self.workers[1..] {
            let (error, position) = *w.best_record.lock();
            for d in 0..D {
                if error_is_better(error[d], best_error[d]) {
                    best_error[d] = error[d];
                    best_position[d] = position[d];
                }
            }
        }
        (best_error, best_position)
    }
}

fn worker_loop<const D: usize>(
    sync: Arc<WorkerSync>,
    solver: Arc<Mutex<DeSolver<D>>>,
    best_record: Arc<Mutex<([f64; D], [f64; D])>>,
) {
    loop {
        let work = {
            let mut guard = sync.pending_lock.lock();
            while !guard.pending {
                sync.pending_cv.wait(&mut guard);
            }
            guard.pending = false;
            if guard.finish {
                return;
            }
            guard.work.take().expect("pending work with no work kind set")
        };

        match work {
            WorkKind::SolveGeneration => {
                let mut s = solver.lock();
                s.step();
                *best_record.lock() = s.best();
            }
            WorkKind::GetBestCandidate => {
                *best_record.lock() = solver.lock().best();
            }
        }

        *sync.ready_lock.lock() = true;
        sync.ready_cv.notify_one();
    }
}

impl<const D: usize> Drop for ParallelDe<D> {
    fn drop(&mut self) {
        for w in &self.workers {
            w.sync.post_finish();
        }
        for w in &mut self.workers {
            if let Some(t) = w.thread.take() {
                let _ = t.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_parallel(m: usize, workers: usize, seed: u64) -> ParallelDe<2> {
        ParallelDe::new(
            0.9,
            0.8,
            m,
            workers,
            1.0,
            seed,
            || Box::new(|rng: &mut StdRng| rng.random_range(-5.0..5.0)),
            || Box::new(|v: &[f64; 2]| [v[0] * v[0], v[1] * v[1]]),
            || Box::new(|a, b| a < b),
        )
    }

    #[test]
    fn sub_population_size_is_stable_across_steps() {
        let mut de = sphere_parallel(32, 4, 1);
        for _ in 0..5 {
            de.step();
            assert_eq!(de.per_worker_population(), 8);
        }
    }

    #[test]
    fn best_error_improves_under_migration() {
        let mut de = sphere_parallel(64, 4, 7);
        let mut prev = de.best(|a, b| a < b).0;
        for _ in 0..30 {
            de.step();
            let cur = de.best(|a, b| a < b).0;
            assert!(cur[0] <= prev[0] + 1e-9);
            assert!(cur[1] <= prev[1] + 1e-9);
            prev = cur;
        }
    }

    #[test]
    fn same_seed_gives_identical_results_with_single_worker() {
        let mut a = sphere_parallel(32, 1, 55);
        let mut b = sphere_parallel(32, 1, 55);
        a.step_n(10);
        b.step_n(10);
        assert_eq!(a.best(|x, y| x < y), b.best(|x, y| x < y));
    }
}
