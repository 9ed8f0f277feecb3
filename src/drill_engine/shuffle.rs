use rand::Rng;

/// Shuffle `items` in place (Fisher-Yates).
pub fn fisher_yates<T, R: Rng>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Identity order `0..n`.
pub fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// A uniformly random permutation of `0..n`.
pub fn permutation<R: Rng>(rng: &mut R, n: usize) -> Vec<usize> {
    let mut order = identity(n);
    fisher_yates(rng, &mut order);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn permutation_contains_every_index_once() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1usize, 2, 7, 14, 69] {
            let mut order = permutation(&mut rng, n);
            assert_eq!(order.len(), n);
            order.sort_unstable();
            assert_eq!(order, identity(n), "not a permutation for n={n}");
        }
    }

    #[test]
    fn permutation_is_deterministic_with_seed() {
        let make = |seed: u64| -> Vec<usize> {
            let mut rng = StdRng::seed_from_u64(seed);
            permutation(&mut rng, 14)
        };
        assert_eq!(make(99), make(99));
        assert_ne!(make(99), make(100));
    }

    #[test]
    fn empty_and_single_inputs_are_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(permutation(&mut rng, 0).is_empty());
        assert_eq!(permutation(&mut rng, 1), vec![0]);
    }
}
