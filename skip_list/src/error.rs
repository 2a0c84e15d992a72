use thiserror::Error;

use cskl_traits::default::MAX_LEVEL_LIMIT;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CsklSkipListError {
    #[error("Invalid max level {0}, must satisfy 0 < max_level < {}", MAX_LEVEL_LIMIT)]
    InvalidMaxLevel(usize),
    #[error("Invalid probability {0}, must be in (0, 1]")]
    InvalidProbability(f64),
}
