use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

///generate a random level in `[1, max_level]`
///the probability of node.level>=k is probability^(k-1),
///for example with probability 1/e, P(level>=2)=1/e, P(level>=3)=1/e^2;
pub(crate) struct LevelGenerator {
    max_level: usize,
    probability: f64,
    /// `prob_table[i] == probability^i`
    prob_table: Vec<f64>,
    rng: Box<dyn RngCore + Send>,
}
impl LevelGenerator {
    pub(crate) fn new(max_level: usize, probability: f64, rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            max_level,
            probability,
            prob_table: Self::probability_table(max_level, probability),
            rng,
        }
    }
    pub(crate) fn from_entropy(max_level: usize, probability: f64) -> Self {
        Self::new(max_level, probability, Box::new(StdRng::from_entropy()))
    }
    fn probability_table(max_level: usize, probability: f64) -> Vec<f64> {
        let mut table = Vec::with_capacity(max_level);
        let mut p = 1.0;
        for _ in 0..max_level {
            table.push(p);
            p *= probability;
        }
        table
    }
    #[inline]
    pub(crate) fn random_level(&mut self) -> usize {
        let r: f64 = self.rng.gen_range(0.0..=1.0);
        let mut level = 1;
        while level < self.max_level && r < self.prob_table[level] {
            level += 1;
        }
        level
    }
    pub(crate) fn max_level(&self) -> usize {
        self.max_level
    }
    pub(crate) fn probability(&self) -> f64 {
        self.probability
    }
}
impl std::fmt::Debug for LevelGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelGenerator")
            .field("max_level", &self.max_level)
            .field("probability", &self.probability)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::LevelGenerator;

    fn seeded(max_level: usize, probability: f64, seed: u64) -> LevelGenerator {
        LevelGenerator::new(max_level, probability, Box::new(StdRng::seed_from_u64(seed)))
    }

    #[test]
    fn test_probability_table() {
        let generator = seeded(5, 0.5, 0);
        assert_eq!(generator.prob_table, vec![1.0, 0.5, 0.25, 0.125, 0.0625]);
    }
    #[test]
    fn test_level_in_range() {
        for max_level in [1, 2, 18, 63] {
            let mut generator = seeded(max_level, std::f64::consts::E.recip(), 7);
            for _ in 0..10_000 {
                let level = generator.random_level();
                assert!((1..=max_level).contains(&level));
            }
        }
    }
    #[test]
    fn test_probability_one_promotes_to_max() {
        let mut generator = seeded(12, 1.0, 3);
        for _ in 0..1000 {
            assert_eq!(generator.random_level(), 12);
        }
    }
    #[test]
    fn test_same_seed_same_levels() {
        let mut a = seeded(18, 0.25, 42);
        let mut b = seeded(18, 0.25, 42);
        let a: Vec<usize> = (0..256).map(|_| a.random_level()).collect();
        let b: Vec<usize> = (0..256).map(|_| b.random_level()).collect();
        assert_eq!(a, b);
    }
    #[test]
    fn test_geometric_distribution() {
        const SAMPLES: usize = 200_000;
        let probability = 0.5;
        let mut generator = seeded(18, probability, 2024);
        let mut at_least = [0usize; 19];
        for _ in 0..SAMPLES {
            let level = generator.random_level();
            for count in at_least.iter_mut().take(level + 1) {
                *count += 1;
            }
        }
        // P(level >= k) = p^(k-1)
        for k in 1..=5 {
            let observed = at_least[k] as f64 / SAMPLES as f64;
            let expected = probability.powi(k as i32 - 1);
            assert!(
                (observed - expected).abs() < 0.01,
                "P(level >= {k}) observed {observed}, expected {expected}"
            );
        }
    }
}
