use rand::Rng;

/// Draws three indices in `[0, m)`, pairwise distinct from each other and
/// from `exclude`, by rejection sampling. Callers must ensure `m >= 4` (the
/// DE configuration layer enforces `M / W >= 5`, see `ConfigError`).
pub fn distinct_indices<R: Rng + ?Sized>(rng: &mut R, m: usize, exclude: usize) -> (usize, usize, usize) {
    debug_assert!(m >= 4, "population too small to draw 3 distinct indices");
    let r1 = loop {
        let r = rng.random_range(0..m);
        if r != exclude {
            break r;
        }
    };
    let r2 = loop {
        let r = rng.random_range(0..m);
        if r != exclude && r != r1 {
            break r;
        }
    };
    let r3 = loop {
        let r = rng.random_range(0..m);
        if r != exclude && r != r1 && r != r2 {
            break r;
        }
    };
    (r1, r2, r3)
}
