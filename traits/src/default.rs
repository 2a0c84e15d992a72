/// Index height used when none is configured.
pub const DEFAULT_MAX_LEVEL: usize = 18;
/// Promotion probability used when none is configured, `1/e`.
///
/// Minimizes the expected number of pointer updates per insertion.
pub const DEFAULT_PROBABILITY: f64 = 1.0 / std::f64::consts::E;
/// Exclusive upper bound for `max_level`.
pub const MAX_LEVEL_LIMIT: usize = 64;
