use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Deterministic rng derived from a readable seed such as the test name.
pub fn get_rng(seed: &str) -> StdRng {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    let result = hasher.finalize();
    let seed = result.into();
    StdRng::from_seed(seed)
}
/// `0..count` in a random order.
pub fn shuffled_keys(rng: &mut StdRng, count: u32) -> Vec<u32> {
    let mut keys: Vec<u32> = (0..count).collect();
    keys.shuffle(rng);
    keys
}
/// `count` random keys below `bound`, duplicates allowed.
pub fn gen_random_keys(rng: &mut StdRng, count: usize, bound: u32) -> Vec<u32> {
    (0..count).map(|_| rng.gen_range(0..bound)).collect()
}
/// Keys formatted the way string-keyed tests spell them, `"0"`, `"1"`, ...
pub fn string_keys(count: u32) -> Vec<String> {
    (0..count).map(|i| i.to_string()).collect()
}
