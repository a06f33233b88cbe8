use thiserror::Error;

/// Errors raised when spreading parameters are out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SculkError {
    #[error("charge decay rate must be at least 1")]
    ZeroChargeDecayRate,

    #[error("additional decay rate must be at least 1")]
    ZeroAdditionalDecayRate,

    #[error("growth spawn cost must be at least 1")]
    ZeroGrowthSpawnCost,

    #[error("no-growth radius {0} must be below {1}")]
    NoGrowthRadiusTooLarge(u32, u32),
}
